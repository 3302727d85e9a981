//! The capability contract satisfied by every concrete sequence.

use std::any::Any;
use std::fmt;

use crate::element::{Element, TypeDesc};
use crate::error::Result;
use crate::fetched::Fetched;

/// The direction of an in-place or derived sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest element first.
    Ascending,
    /// Largest element first.
    Descending,
}

/// The operation set every concrete sequence implements.
///
/// [`TypedSeq`] implements it once per statically known element type with no
/// runtime inspection beyond its boundary; [`DynSeq`] implements it for
/// elements whose type is only known at runtime. The [`Sequence`] facade
/// forwards to whichever implementation the dispatch logic selected, so most
/// callers never name this trait. It is public so that additional storage
/// strategies can participate in the same dispatch.
///
/// Error posture, uniform across implementations: read operations never
/// fail, an unresolvable index yields an empty [`Fetched`] or an empty
/// sequence; `set` at an unresolvable index is a loud error with the
/// sequence unchanged; an element whose runtime type disagrees with the
/// sequence's element type is always a loud error, never a coercion.
///
/// [`TypedSeq`]: crate::TypedSeq
/// [`DynSeq`]: crate::DynSeq
/// [`Sequence`]: crate::Sequence
pub trait SequenceOps: Any {
    // ------------------------------------------------------------------
    // Identity and state
    // ------------------------------------------------------------------

    /// The number of elements.
    fn len(&self) -> usize;

    /// Returns true if this implementation operates through runtime type
    /// inspection rather than compiled-in element knowledge. Callers use
    /// this to decide whether a statically typed fast path is available.
    fn is_dynamic(&self) -> bool;

    /// The element type this sequence stores. `None` only for a dynamic
    /// sequence that is still empty and untyped.
    fn element_type(&self) -> Option<TypeDesc>;

    /// Borrows the element at a raw, already validated position.
    fn peek(&self, pos: usize) -> Option<&dyn Element>;

    /// Returns true if any element equals the candidate.
    fn contains(&self, candidate: &dyn Element) -> bool;

    /// Returns true if any element equals any of the candidates.
    fn contains_any(&self, candidates: &[&dyn Element]) -> bool;

    /// Returns true if any element satisfies the predicate.
    fn any_matches(&self, pred: &mut dyn FnMut(&dyn Element) -> bool) -> bool;

    // ------------------------------------------------------------------
    // Positional reads
    // ------------------------------------------------------------------

    /// The element at a possibly negative index. An index that does not
    /// resolve yields the empty result.
    fn at(&self, index: i64) -> Fetched;

    /// The first element.
    fn first(&self) -> Fetched;

    /// The last element.
    fn last(&self) -> Fetched;

    // ------------------------------------------------------------------
    // Copying reads
    // ------------------------------------------------------------------

    /// An independent copy of the elements selected by an inclusive range.
    /// The copy shares no storage with the source.
    fn copy_range(&self, start: i64, end: i64) -> Box<dyn SequenceOps>;

    /// Clones of every element, in order.
    fn snapshot(&self) -> Vec<Box<dyn Element>>;

    // ------------------------------------------------------------------
    // In-place mutation
    // ------------------------------------------------------------------

    /// Appends one element.
    fn append(&mut self, value: Box<dyn Element>) -> Result<()>;

    /// Appends many elements. Nothing is appended unless every element is
    /// well typed.
    fn append_all(&mut self, values: Vec<Box<dyn Element>>) -> Result<()>;

    /// Inserts an element relative to a possibly negative index: before the
    /// resolved position for a non-negative index, after it for a negative
    /// one (so `-1` appends). On an empty sequence this is an append; an
    /// index that does not resolve leaves the sequence unchanged without
    /// error.
    fn insert(&mut self, index: i64, value: Box<dyn Element>) -> Result<()>;

    /// Replaces the element at a possibly negative index. Unlike the read
    /// operations, an index that does not resolve is an error and the
    /// sequence is left unchanged.
    fn set(&mut self, index: i64, value: Box<dyn Element>) -> Result<()>;

    /// Removes the elements selected by an inclusive range. A range that
    /// selects nothing is a no-op.
    fn drop_range(&mut self, start: i64, end: i64);

    /// Removes the element at a possibly negative index, silently
    /// tolerating one that does not resolve.
    fn drop_at(&mut self, index: i64);

    /// Removes the first `count` elements (fewer if the sequence is
    /// shorter). The sign of `count` is ignored.
    fn drop_first(&mut self, count: i64);

    /// Removes the last `count` elements (fewer if the sequence is
    /// shorter). The sign of `count` is ignored.
    fn drop_last(&mut self, count: i64);

    /// Removes every element satisfying the predicate.
    fn drop_matching(&mut self, pred: &mut dyn FnMut(&dyn Element) -> bool);

    /// Removes every element.
    fn clear(&mut self);

    /// Reverses the elements in place.
    fn reverse(&mut self);

    /// Sorts the elements in place. An element type with no ordering is an
    /// error and the elements keep their current order.
    fn sort(&mut self, order: SortOrder) -> Result<()>;

    /// Removes repeated elements in place, keeping the first occurrence of
    /// each and preserving their relative order.
    fn dedup(&mut self);

    /// Exchanges the elements at two possibly negative indices, silently
    /// tolerating indices that do not resolve.
    fn swap(&mut self, i: i64, j: i64);

    /// Orders the elements at two possibly negative indices. Errors on an
    /// index that does not resolve or an element type with no ordering.
    fn less(&self, i: i64, j: i64) -> Result<bool>;

    // ------------------------------------------------------------------
    // Mutation returning the removed data
    // ------------------------------------------------------------------

    /// Removes and returns the last element.
    fn pop(&mut self) -> Fetched;

    /// Removes and returns the first element.
    fn shift(&mut self) -> Fetched;

    /// Removes and returns the last `count` elements, preserving their
    /// original relative order.
    fn pop_n(&mut self, count: i64) -> Box<dyn SequenceOps>;

    /// Removes and returns the first `count` elements.
    fn shift_n(&mut self, count: i64) -> Box<dyn SequenceOps>;

    /// Removes and returns the elements selected by an inclusive range.
    fn take_range(&mut self, start: i64, end: i64) -> Box<dyn SequenceOps>;

    /// Removes and returns the element at a possibly negative index.
    fn take_at(&mut self, index: i64) -> Fetched;

    /// Removes and returns every element satisfying the predicate.
    fn take_matching(&mut self, pred: &mut dyn FnMut(&dyn Element) -> bool) -> Box<dyn SequenceOps>;

    // ------------------------------------------------------------------
    // Escape hatches
    // ------------------------------------------------------------------

    /// An independent deep copy of this sequence.
    fn boxed_clone(&self) -> Box<dyn SequenceOps>;

    /// Element-wise equality against any other sequence, regardless of
    /// which implementation backs it.
    fn eq_seq(&self, other: &dyn SequenceOps) -> bool;

    /// Writes a human-readable rendering of the elements.
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Borrow as `Any` for downcasting to the concrete implementation.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for downcasting to the concrete
    /// implementation.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
