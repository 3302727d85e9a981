//! Uniform sequence operations over statically or dynamically typed
//! elements.
//!
//! # The Sequence type
//!
//! [`Sequence`] is a single logical container type: callers append, slice,
//! search, reorder and deduplicate without naming the element type at the
//! call site. Construction inspects the element type once and dispatches to
//! one of two implementations behind the same operation set:
//!
//! * [`TypedSeq<T>`] is selected when the element type is one of the
//!   recognized categories: `i64` (integral), `f64` (floating), `String`
//!   (textual) or [`Map`] (string-keyed map). Operations run against a
//!   plain `Vec<T>` with no runtime type inspection inside.
//! * [`DynSeq`] is the fallback for every other element type. Elements live
//!   behind the [`Element`] trait and each operation works through runtime
//!   type inspection, so any `T: Any + Clone + Debug + PartialEq`
//!   participates with no ceremony.
//!
//! ```
//! use polyseq::{seq, Sequence};
//!
//! let mut planets = seq!["mercury".to_string(), "venus".to_string()];
//! planets.push("earth".to_string())?;
//! assert_eq!(planets.len(), 3);
//! assert!(!planets.is_dynamic());
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Color(u8, u8, u8);
//!
//! let mut palette = Sequence::new();
//! palette.push(Color(255, 0, 0))?;
//! assert!(palette.is_dynamic());
//! # Ok::<(), polyseq::Error>(())
//! ```
//!
//! # Indexing
//!
//! Indices are `i64` and may be negative, counting from the end: `-1` is
//! the last element. Two-index ranges include **both** bounds, so
//! `copy_range(1, 2)` over `[a, b, c, d]` copies `b` and `c`. Reads through
//! an index that does not resolve quietly produce an empty [`Fetched`] or
//! an empty sequence; only [`Sequence::set`] treats an unresolvable index
//! as an error, because silently dropping a write would corrupt caller
//! expectations. The arithmetic itself is exposed in the [`index`] module.
//!
//! ```
//! use polyseq::seq;
//!
//! let mut numbers = seq![1_i64, 2, 3, 4];
//! numbers.drop_range(1, 1);
//! assert_eq!(numbers.to_vec::<i64>(), Some(vec![1, 3, 4]));
//! assert!(numbers.at(9).is_empty());
//! assert!(numbers.set(9, 5_i64).is_err());
//! ```
//!
//! # Views and copies
//!
//! [`Sequence::first_n`] and [`Sequence::last_n`] return windows that share
//! storage with the sequence: writes through a window land in the original.
//! The copying family ([`Sequence::copy_range`], [`Clone`], the derivation
//! methods) allocates fresh storage that never aliases the source. Both
//! behaviors are deliberate and tested; pick the family that matches the
//! mutation semantics you need.
//!
//! # Element types are fixed
//!
//! The first element a sequence ever stores fixes its element type, and
//! every later element must match it exactly: a mismatch is a typed error,
//! never a silent coercion. Ordering is just as strict: sorting a dynamic
//! sequence works only for the recognized scalar categories, and anything
//! else reports an error rather than producing a partially ordered result.

#![deny(missing_docs)]

mod de;
mod dynamic;
mod element;
mod error;
mod factory;
mod fetched;
pub mod index;
mod macros;
pub mod map;
mod sequence;
mod ser;
mod traits;
mod typed;

pub use crate::dynamic::DynSeq;
pub use crate::element::{Comparable, Element, TypeDesc};
pub use crate::error::{Error, ErrorCode, Result};
pub use crate::fetched::Fetched;
pub use crate::map::Map;
pub use crate::sequence::{Sequence, ViewMut};
pub use crate::traits::{SequenceOps, SortOrder};
pub use crate::typed::TypedSeq;
