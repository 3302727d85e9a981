//! Index and range arithmetic shared by every sequence implementation.
//!
//! All user-facing indices are `i64` and may be negative, in which case they
//! count from the end of the sequence: `-1` is the last element. Ranges are
//! **inclusive** of their end bound, unlike native Rust slicing: the range
//! `(1, 2)` over `[a, b, c, d]` selects `b` and `c`.
//!
//! These functions never panic and never allocate. An index that does not
//! resolve and a range that selects nothing are ordinary return values, not
//! errors; the only error here is building a range from exactly one bound,
//! which is ambiguous and always a caller bug.

use crate::error::{Error, Result};

/// Resolves a possibly negative index against a sequence length.
///
/// Returns the non-negative position, or `None` if the index falls outside
/// `[0, len)` after translation. A zero length never resolves.
///
/// ```
/// use polyseq::index::resolve_index;
///
/// assert_eq!(resolve_index(4, 1), Some(1));
/// assert_eq!(resolve_index(4, -1), Some(3));
/// assert_eq!(resolve_index(4, 4), None);
/// assert_eq!(resolve_index(0, 0), None);
/// ```
pub fn resolve_index(len: usize, index: i64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let position = if index < 0 { len + index } else { index };
    if position < 0 || position >= len {
        return None;
    }
    Some(position as usize)
}

/// Resolves zero or two possibly negative bounds into an inclusive range.
///
/// With no bounds the result is the full range. With two bounds, each is
/// translated the same way as [`resolve_index`] but not individually
/// validated; instead the start is clamped up to `0` and the end down to
/// `len - 1`. A start that still exceeds the end selects nothing, which is
/// reported as `Ok(None)`; operations built on such a range produce an
/// empty result rather than failing.
///
/// Exactly one bound is rejected with an error: it cannot be told apart
/// from a missing start or a missing end.
///
/// ```
/// use polyseq::index::resolve_range;
///
/// assert_eq!(resolve_range(4, &[]).unwrap(), Some((0, 3)));
/// assert_eq!(resolve_range(4, &[-6, 6]).unwrap(), Some((0, 3)));
/// assert_eq!(resolve_range(4, &[2, -3]).unwrap(), None);
/// assert!(resolve_range(4, &[2]).is_err());
/// ```
pub fn resolve_range(len: usize, bounds: &[i64]) -> Result<Option<(usize, usize)>> {
    match *bounds {
        [] => {
            if len == 0 {
                Ok(None)
            } else {
                Ok(Some((0, len - 1)))
            }
        }
        [start, end] => {
            let len = len as i64;
            let mut start = if start < 0 { len + start } else { start };
            let mut end = if end < 0 { len + end } else { end };
            if start < 0 {
                start = 0;
            }
            if end > len - 1 {
                end = len - 1;
            }
            if start > end {
                return Ok(None);
            }
            Ok(Some((start as usize, end as usize)))
        }
        [_] => Err(Error::single_bound()),
        _ => Err(Error::single_bound()),
    }
}

/// The non-negative magnitude of a count argument.
pub fn magnitude(n: i64) -> i64 {
    n.saturating_abs()
}

/// The non-positive magnitude of a count argument.
pub fn negated(n: i64) -> i64 {
    if n > 0 {
        -n
    } else {
        n
    }
}
