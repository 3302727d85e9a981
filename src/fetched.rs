//! The uniform result of reading a single element.

use std::fmt;

use crate::element::{self, Element};
use crate::error::{Error, Result};

/// Zero or one element of unknown type, as returned by every single-element
/// read (`at`, `first`, `last`, `pop`, `shift`, `take_at`, ...).
///
/// An empty `Fetched` is observably different from one wrapping a value that
/// happens to be its type's zero value: fetching an empty string that is
/// present is not the same as fetching nothing.
///
/// ```
/// use polyseq::seq;
///
/// let numbers = seq![10_i64, 20, 30];
/// let fetched = numbers.at(-1);
/// assert!(!fetched.is_empty());
/// assert_eq!(fetched.value::<i64>(), Some(&30));
/// assert!(numbers.at(7).is_empty());
/// ```
pub struct Fetched {
    value: Option<Box<dyn Element>>,
}

impl Fetched {
    /// The empty result: nothing was found.
    pub fn none() -> Fetched {
        Fetched { value: None }
    }

    /// A result wrapping a present value.
    pub fn of(value: impl Element) -> Fetched {
        Fetched {
            value: Some(Box::new(value)),
        }
    }

    pub(crate) fn from_boxed(value: Box<dyn Element>) -> Fetched {
        Fetched { value: Some(value) }
    }

    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrows the wrapped value as a `T`. Returns `None` when empty or
    /// when the value's runtime type is anything else.
    pub fn value<T: Element>(&self) -> Option<&T> {
        self.value.as_ref()?.as_any().downcast_ref()
    }

    /// Extracts the wrapped value as a `T`. An empty result is an error,
    /// as is a present value of another runtime type.
    pub fn into_value<T: Element>(self) -> Result<T> {
        match self.value {
            Some(value) => element::take_element(value),
            None => Err(Error::nothing_fetched()),
        }
    }

    /// Best-effort rendering to text. Empty results render as the empty
    /// string; this never fails.
    pub fn to_text(&self) -> String {
        match &self.value {
            Some(value) => element::text_erased(&**value),
            None => String::new(),
        }
    }

    /// Best-effort coercion to an integer. Empty results and values with no
    /// numeric reading coerce to zero; this never fails.
    pub fn to_int(&self) -> i64 {
        match &self.value {
            Some(value) => element::int_erased(&**value),
            None => 0,
        }
    }

    /// The wrapped value, if any, surrendered as a type-erased box.
    pub fn into_boxed(self) -> Option<Box<dyn Element>> {
        self.value
    }
}

impl fmt::Debug for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => f.debug_tuple("Fetched").field(value).finish(),
            None => f.write_str("Fetched(<empty>)"),
        }
    }
}

impl fmt::Display for Fetched {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => element::render_erased(&**value, f),
            None => Ok(()),
        }
    }
}
