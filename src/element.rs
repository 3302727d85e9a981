//! Element machinery for dynamically typed sequences.
//!
//! A [`Sequence`] whose element type is not one of the recognized scalar
//! categories stores its elements behind the [`Element`] trait and operates
//! on them through runtime type inspection. Any `T` that is `Any + Clone +
//! Debug + PartialEq` participates automatically through the blanket impl;
//! there is nothing to derive or register.
//!
//! [`Sequence`]: crate::Sequence

use std::any::{self, Any, TypeId};
use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::error::{Error, Result};
use crate::map::Map;

/// A runtime descriptor for an element type: its `TypeId` plus a
/// human-readable name used in error reports.
#[derive(Clone, Copy, Debug)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    /// The descriptor for the type `T`.
    pub fn of<T: Any>() -> TypeDesc {
        TypeDesc {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// The name of the described type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value that can be stored in a dynamically typed sequence.
///
/// Implemented for every `T: Any + Clone + Debug + PartialEq` by the blanket
/// impl below. The methods exist so that sequences can clone, compare and
/// extract elements without knowing their type at compile time; user code
/// rarely calls them directly.
pub trait Element: Any + Debug {
    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert into `Any` for by-value extraction.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clone into a fresh box.
    fn boxed_clone(&self) -> Box<dyn Element>;

    /// Equality against another type-erased element. Elements of different
    /// runtime types are never equal.
    fn eq_element(&self, other: &(dyn Element + '_)) -> bool;

    /// The runtime descriptor of this element's type.
    fn type_desc(&self) -> TypeDesc;
}

impl<T> Element for T
where
    T: Any + Clone + Debug + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn boxed_clone(&self) -> Box<dyn Element> {
        Box::new(self.clone())
    }

    fn eq_element(&self, other: &(dyn Element + '_)) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn type_desc(&self) -> TypeDesc {
        TypeDesc::of::<T>()
    }
}

impl PartialEq for dyn Element {
    fn eq(&self, other: &dyn Element) -> bool {
        self.eq_element(other)
    }
}

/// A per-type total order consulted by sorting and comparison operations.
///
/// The recognized scalar categories come with impls (floats order through
/// `total_cmp`); `Map` deliberately reports no order. A custom element type
/// opts in or out with a one-line impl:
///
/// ```
/// use polyseq::Comparable;
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Token(u32);
///
/// impl Comparable for Token {
///     fn compare(&self, other: &Self) -> Option<Ordering> {
///         Some(self.0.cmp(&other.0))
///     }
/// }
/// ```
pub trait Comparable {
    /// The ordering between `self` and `other`, or `None` if the type has
    /// no natural order.
    fn compare(&self, other: &Self) -> Option<Ordering>;
}

macro_rules! comparable_via_ord {
    ($($ty:ty)*) => {
        $(
            impl Comparable for $ty {
                fn compare(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

comparable_via_ord! {
    i8 i16 i32 i64 i128 isize
    u8 u16 u32 u64 u128 usize
    bool char String
}

impl Comparable for f32 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Comparable for f64 {
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Comparable for Map {
    fn compare(&self, _other: &Self) -> Option<Ordering> {
        None
    }
}

/// Extracts a `T` from a boxed element, reporting a type mismatch if the
/// element's runtime type is anything else.
pub(crate) fn take_element<T: Any>(value: Box<dyn Element>) -> Result<T> {
    let found = value.type_desc();
    match value.into_any().downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(Error::type_mismatch(TypeDesc::of::<T>(), found)),
    }
}

/// Orders two type-erased elements.
///
/// Only the recognized scalar categories can be ordered on the dynamic
/// path; every other element type reports `Unordered`, mirroring what the
/// statically typed implementations are able to sort.
pub(crate) fn compare_erased(a: &dyn Element, b: &dyn Element) -> Result<Ordering> {
    if let (Some(a), Some(b)) = (
        a.as_any().downcast_ref::<i64>(),
        b.as_any().downcast_ref::<i64>(),
    ) {
        return Ok(a.cmp(b));
    }
    if let (Some(a), Some(b)) = (
        a.as_any().downcast_ref::<f64>(),
        b.as_any().downcast_ref::<f64>(),
    ) {
        return Ok(a.total_cmp(b));
    }
    if let (Some(a), Some(b)) = (
        a.as_any().downcast_ref::<String>(),
        b.as_any().downcast_ref::<String>(),
    ) {
        return Ok(a.cmp(b));
    }
    Err(Error::unordered(a.type_desc()))
}

/// Writes a type-erased element the way the category scalars render
/// themselves, with the fast integer and float formatters on those paths
/// and `Debug` for everything else.
pub(crate) fn render_erased(value: &dyn Element, f: &mut fmt::Formatter) -> fmt::Result {
    let any = value.as_any();
    if let Some(n) = any.downcast_ref::<i64>() {
        return f.write_str(itoa::Buffer::new().format(*n));
    }
    if let Some(n) = any.downcast_ref::<f64>() {
        return f.write_str(zmij::Buffer::new().format(*n));
    }
    if let Some(s) = any.downcast_ref::<String>() {
        return write!(f, "{:?}", s);
    }
    write!(f, "{:?}", value)
}

/// Best-effort rendering of a type-erased element to owned text.
pub(crate) fn text_erased(value: &dyn Element) -> String {
    let any = value.as_any();
    if let Some(n) = any.downcast_ref::<i64>() {
        return itoa::Buffer::new().format(*n).to_owned();
    }
    if let Some(n) = any.downcast_ref::<f64>() {
        return zmij::Buffer::new().format(*n).to_owned();
    }
    if let Some(s) = any.downcast_ref::<String>() {
        return s.clone();
    }
    format!("{:?}", value)
}

/// Best-effort coercion of a type-erased element to an integer. Anything
/// that is not an integer, a finite float, or numeric text yields zero.
pub(crate) fn int_erased(value: &dyn Element) -> i64 {
    let any = value.as_any();
    if let Some(n) = any.downcast_ref::<i64>() {
        return *n;
    }
    if let Some(n) = any.downcast_ref::<f64>() {
        if n.is_finite() {
            return *n as i64;
        }
        return 0;
    }
    if let Some(s) = any.downcast_ref::<String>() {
        return s.trim().parse().unwrap_or(0);
    }
    0
}
