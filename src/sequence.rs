//! The uniform sequence type handed to callers.

use std::fmt;

use crate::element::{Element, TypeDesc};
use crate::error::{Error, Result};
use crate::factory;
use crate::fetched::Fetched;
use crate::index::{magnitude, resolve_index};
use crate::traits::{SequenceOps, SortOrder};
use crate::typed::TypedSeq;

/// An ordered, growable sequence over a single element type, chosen at
/// runtime.
///
/// Construction inspects the element type and dispatches to a statically
/// typed implementation for the recognized categories (`i64`, `f64`,
/// `String`, [`Map`]) or to the dynamic fallback for anything else; either
/// way the same operations are available afterwards. A freshly made
/// `Sequence::new()` is *absent*: no storage is allocated and no element
/// type is fixed. Reading from an absent sequence behaves like reading from
/// an empty one, and the first mutation allocates storage sized to the
/// element type it introduces.
///
/// ```
/// use polyseq::seq;
///
/// let mut numbers = seq![4_i64, 2, 2, 3];
/// numbers.push(1)?;
/// numbers.sort()?;
/// numbers.dedup();
/// assert_eq!(numbers.to_vec::<i64>(), Some(vec![1, 2, 3, 4]));
/// assert!(!numbers.is_dynamic());
/// # Ok::<(), polyseq::Error>(())
/// ```
///
/// Indices may be negative, counting from the end, and ranges include their
/// end bound. Unresolvable indices are silently tolerated by every read
/// (yielding an empty [`Fetched`] or an empty sequence) but rejected loudly
/// by [`set`], where dropping a write would corrupt caller expectations.
///
/// A `Sequence` has a single owner and is not safe to mutate from multiple
/// threads; share one only behind external synchronization.
///
/// [`Map`]: crate::Map
/// [`set`]: Sequence::set
pub struct Sequence {
    inner: Option<Box<dyn SequenceOps>>,
}

impl Sequence {
    /// Makes a new absent sequence. Storage is allocated by the first
    /// mutation, sized to the element type it introduces.
    pub fn new() -> Sequence {
        Sequence { inner: None }
    }

    /// Moves a typed vector into the best implementation for its element
    /// type. A recognized category keeps the vector's allocation.
    pub fn from_vec<T: Element>(items: Vec<T>) -> Sequence {
        Sequence {
            inner: Some(factory::from_vec(items)),
        }
    }

    /// Copies a borrowed slice (or fixed-size array) into fresh growable
    /// storage.
    pub fn from_slice<T: Element + Clone>(items: &[T]) -> Sequence {
        Sequence::from_vec(items.to_vec())
    }

    /// Wraps a single value as a one-element sequence of its type.
    pub fn from_value<T: Element>(value: T) -> Sequence {
        Sequence::from_vec(vec![value])
    }

    /// Builds a sequence from elements whose types are only known at
    /// runtime. The first element's runtime type decides the element type
    /// of the whole result; a later element of any other type rejects the
    /// input with a type mismatch. An empty input yields an empty dynamic
    /// sequence with no element type fixed.
    pub fn from_boxed(items: Vec<Box<dyn Element>>) -> Result<Sequence> {
        Ok(Sequence {
            inner: Some(factory::from_boxed(items)?),
        })
    }

    /// Builds a sequence from a loose argument list in which individual
    /// arguments may be absent. The first present argument decides the
    /// element type, absent arguments are skipped, and a later argument of
    /// another type surfaces the append error. If no argument is present
    /// the result is the absent sequence.
    pub fn from_args(args: Vec<Option<Box<dyn Element>>>) -> Result<Sequence> {
        let present: Vec<Box<dyn Element>> = args.into_iter().flatten().collect();
        let desc = match present.first() {
            Some(first) => first.type_desc(),
            None => return Ok(Sequence::new()),
        };
        let mut inner = factory::empty_for(desc);
        for value in present {
            inner.append(value)?;
        }
        Ok(Sequence { inner: Some(inner) })
    }

    // ------------------------------------------------------------------
    // Identity and state
    // ------------------------------------------------------------------

    /// Returns true if no storage has been allocated yet. An absent
    /// sequence reads like an empty one.
    pub fn is_absent(&self) -> bool {
        self.inner.is_none()
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |ops| ops.len())
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this sequence is backed by the dynamic fallback
    /// rather than a statically typed implementation.
    pub fn is_dynamic(&self) -> bool {
        self.inner.as_ref().map_or(false, |ops| ops.is_dynamic())
    }

    /// The element type this sequence stores, if one has been fixed.
    pub fn element_type(&self) -> Option<TypeDesc> {
        self.inner.as_ref().and_then(|ops| ops.element_type())
    }

    /// Returns true if any element equals the candidate.
    pub fn contains<T: Element>(&self, candidate: &T) -> bool {
        self.inner
            .as_ref()
            .map_or(false, |ops| ops.contains(candidate))
    }

    /// Returns true if any element equals any of the candidates.
    pub fn contains_any(&self, candidates: &[&dyn Element]) -> bool {
        self.inner
            .as_ref()
            .map_or(false, |ops| ops.contains_any(candidates))
    }

    /// Returns true if any element satisfies the predicate.
    pub fn any_matches(&self, mut pred: impl FnMut(&dyn Element) -> bool) -> bool {
        self.inner
            .as_ref()
            .map_or(false, |ops| ops.any_matches(&mut pred))
    }

    // ------------------------------------------------------------------
    // Positional reads
    // ------------------------------------------------------------------

    /// The element at a possibly negative index; empty if the index does
    /// not resolve.
    pub fn at(&self, index: i64) -> Fetched {
        self.inner
            .as_ref()
            .map_or_else(Fetched::none, |ops| ops.at(index))
    }

    /// The first element.
    pub fn first(&self) -> Fetched {
        self.at(0)
    }

    /// The last element.
    pub fn last(&self) -> Fetched {
        self.at(-1)
    }

    /// A window over the first `count` elements sharing storage with this
    /// sequence: writes through the window land in this sequence. The sign
    /// of `count` is ignored and the window never extends past the end.
    pub fn first_n(&mut self, count: i64) -> ViewMut<'_> {
        let len = self.len();
        let count = magnitude(count).min(len as i64) as usize;
        ViewMut {
            ops: self.inner.as_mut(),
            start: 0,
            len: count,
        }
    }

    /// A window over the last `count` elements sharing storage with this
    /// sequence.
    pub fn last_n(&mut self, count: i64) -> ViewMut<'_> {
        let len = self.len();
        let count = magnitude(count).min(len as i64) as usize;
        ViewMut {
            ops: self.inner.as_mut(),
            start: len - count,
            len: count,
        }
    }

    // ------------------------------------------------------------------
    // Copying reads
    // ------------------------------------------------------------------

    /// An independent copy of the elements selected by the inclusive range
    /// `start..=end`. Mutating the copy never affects this sequence. A
    /// range that selects nothing yields an empty sequence.
    pub fn copy_range(&self, start: i64, end: i64) -> Sequence {
        match &self.inner {
            Some(ops) => Sequence {
                inner: Some(ops.copy_range(start, end)),
            },
            None => Sequence::new(),
        }
    }

    /// Clones of every element, in order, as type-erased boxes.
    pub fn snapshot(&self) -> Vec<Box<dyn Element>> {
        self.inner.as_ref().map_or_else(Vec::new, |ops| ops.snapshot())
    }

    // ------------------------------------------------------------------
    // In-place mutation
    // ------------------------------------------------------------------

    /// Appends an element, allocating storage for its type if this sequence
    /// is absent.
    pub fn push<T: Element>(&mut self, value: T) -> Result<()> {
        self.push_boxed(Box::new(value))
    }

    /// Appends an already type-erased element.
    pub fn push_boxed(&mut self, value: Box<dyn Element>) -> Result<()> {
        let desc = value.type_desc();
        self.storage_for(desc).append(value)
    }

    /// Appends every element of an iterator. Nothing is appended unless
    /// every element is well typed.
    pub fn push_all<T, I>(&mut self, values: I) -> Result<()>
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        let values = values
            .into_iter()
            .map(|value| Box::new(value) as Box<dyn Element>)
            .collect();
        self.push_all_boxed(values)
    }

    /// Appends already type-erased elements.
    pub fn push_all_boxed(&mut self, values: Vec<Box<dyn Element>>) -> Result<()> {
        let desc = match values.first() {
            Some(first) => first.type_desc(),
            None => return Ok(()),
        };
        self.storage_for(desc).append_all(values)
    }

    /// Inserts an element relative to a possibly negative index: before the
    /// resolved position for a non-negative index, after it for a negative
    /// one, so `insert(-1, ..)` appends. On an empty or absent sequence
    /// this is an append; an index that does not resolve leaves the
    /// sequence unchanged without error.
    pub fn insert<T: Element>(&mut self, index: i64, value: T) -> Result<()> {
        self.insert_boxed(index, Box::new(value))
    }

    /// Inserts an already type-erased element.
    pub fn insert_boxed(&mut self, index: i64, value: Box<dyn Element>) -> Result<()> {
        let desc = value.type_desc();
        self.storage_for(desc).insert(index, value)
    }

    /// Replaces the element at a possibly negative index. An index that
    /// does not resolve is an error and the sequence is left unchanged;
    /// this is the one place where an invalid index is loud rather than
    /// tolerated.
    pub fn set<T: Element>(&mut self, index: i64, value: T) -> Result<()> {
        self.set_boxed(index, Box::new(value))
    }

    /// Replaces with an already type-erased element.
    pub fn set_boxed(&mut self, index: i64, value: Box<dyn Element>) -> Result<()> {
        match &mut self.inner {
            Some(ops) => ops.set(index, value),
            None => Err(Error::out_of_bounds(index, 0)),
        }
    }

    /// Removes the elements selected by the inclusive range `start..=end`.
    /// A range that selects nothing is a no-op.
    pub fn drop_range(&mut self, start: i64, end: i64) {
        if let Some(ops) = &mut self.inner {
            ops.drop_range(start, end);
        }
    }

    /// Removes the element at a possibly negative index, silently
    /// tolerating one that does not resolve.
    pub fn drop_at(&mut self, index: i64) {
        if let Some(ops) = &mut self.inner {
            ops.drop_at(index);
        }
    }

    /// Removes the first `count` elements.
    pub fn drop_first(&mut self, count: i64) {
        if let Some(ops) = &mut self.inner {
            ops.drop_first(count);
        }
    }

    /// Removes the last `count` elements.
    pub fn drop_last(&mut self, count: i64) {
        if let Some(ops) = &mut self.inner {
            ops.drop_last(count);
        }
    }

    /// Removes every element satisfying the predicate.
    pub fn drop_matching(&mut self, mut pred: impl FnMut(&dyn Element) -> bool) {
        if let Some(ops) = &mut self.inner {
            ops.drop_matching(&mut pred);
        }
    }

    /// Removes every element. The element type stays fixed.
    pub fn clear(&mut self) {
        if let Some(ops) = &mut self.inner {
            ops.clear();
        }
    }

    /// Reverses the elements in place.
    pub fn reverse(&mut self) {
        if let Some(ops) = &mut self.inner {
            ops.reverse();
        }
    }

    /// Sorts the elements in place, smallest first. An element type with no
    /// ordering is an error and the elements keep their current order.
    pub fn sort(&mut self) -> Result<()> {
        match &mut self.inner {
            Some(ops) => ops.sort(SortOrder::Ascending),
            None => Ok(()),
        }
    }

    /// Sorts the elements in place, largest first.
    pub fn sort_desc(&mut self) -> Result<()> {
        match &mut self.inner {
            Some(ops) => ops.sort(SortOrder::Descending),
            None => Ok(()),
        }
    }

    /// Removes repeated elements in place, keeping the first occurrence of
    /// each and preserving their relative order.
    pub fn dedup(&mut self) {
        if let Some(ops) = &mut self.inner {
            ops.dedup();
        }
    }

    /// Exchanges the elements at two possibly negative indices, silently
    /// tolerating indices that do not resolve.
    pub fn swap(&mut self, i: i64, j: i64) {
        if let Some(ops) = &mut self.inner {
            ops.swap(i, j);
        }
    }

    /// Orders the elements at two possibly negative indices.
    pub fn less(&self, i: i64, j: i64) -> Result<bool> {
        match &self.inner {
            Some(ops) => ops.less(i, j),
            None => Err(Error::out_of_bounds(i, 0)),
        }
    }

    // ------------------------------------------------------------------
    // Mutation returning the removed data
    // ------------------------------------------------------------------

    /// Removes and returns the last element; empty on an empty sequence.
    pub fn pop(&mut self) -> Fetched {
        self.inner
            .as_mut()
            .map_or_else(Fetched::none, |ops| ops.pop())
    }

    /// Removes and returns the first element; empty on an empty sequence.
    pub fn shift(&mut self) -> Fetched {
        self.inner
            .as_mut()
            .map_or_else(Fetched::none, |ops| ops.shift())
    }

    /// Removes and returns the last `count` elements, preserving their
    /// original relative order.
    pub fn pop_n(&mut self, count: i64) -> Sequence {
        match &mut self.inner {
            Some(ops) => Sequence {
                inner: Some(ops.pop_n(count)),
            },
            None => Sequence::new(),
        }
    }

    /// Removes and returns the first `count` elements.
    pub fn shift_n(&mut self, count: i64) -> Sequence {
        match &mut self.inner {
            Some(ops) => Sequence {
                inner: Some(ops.shift_n(count)),
            },
            None => Sequence::new(),
        }
    }

    /// Removes and returns the elements selected by the inclusive range
    /// `start..=end`.
    pub fn take_range(&mut self, start: i64, end: i64) -> Sequence {
        match &mut self.inner {
            Some(ops) => Sequence {
                inner: Some(ops.take_range(start, end)),
            },
            None => Sequence::new(),
        }
    }

    /// Removes and returns the element at a possibly negative index.
    pub fn take_at(&mut self, index: i64) -> Fetched {
        self.inner
            .as_mut()
            .map_or_else(Fetched::none, |ops| ops.take_at(index))
    }

    /// Removes and returns every element satisfying the predicate.
    pub fn take_matching(&mut self, mut pred: impl FnMut(&dyn Element) -> bool) -> Sequence {
        match &mut self.inner {
            Some(ops) => Sequence {
                inner: Some(ops.take_matching(&mut pred)),
            },
            None => Sequence::new(),
        }
    }

    // ------------------------------------------------------------------
    // Derivations
    // ------------------------------------------------------------------

    /// A copy with the elements in reverse order; this sequence is
    /// untouched.
    pub fn reversed(&self) -> Sequence {
        let mut out = self.clone();
        out.reverse();
        out
    }

    /// A sorted copy, smallest first; this sequence is untouched.
    pub fn sorted(&self) -> Result<Sequence> {
        let mut out = self.clone();
        out.sort()?;
        Ok(out)
    }

    /// A sorted copy, largest first; this sequence is untouched.
    pub fn sorted_desc(&self) -> Result<Sequence> {
        let mut out = self.clone();
        out.sort_desc()?;
        Ok(out)
    }

    /// A copy with repeated elements removed; this sequence is untouched.
    pub fn deduped(&self) -> Sequence {
        let mut out = self.clone();
        out.dedup();
        out
    }

    /// A copy of this sequence followed by the other sequence's elements,
    /// appended individually. The element types must agree; an absent
    /// sequence adopts the other's element type.
    pub fn concat(&self, other: &Sequence) -> Result<Sequence> {
        let mut out = self.clone();
        if let Some(theirs) = &other.inner {
            if out.inner.is_none() {
                if let Some(desc) = theirs.element_type() {
                    out.inner = Some(factory::empty_for(desc));
                }
            }
            if let Some(ops) = &mut out.inner {
                ops.append_all(theirs.snapshot())?;
            }
        }
        Ok(out)
    }

    /// The set union: a concatenation with repeated elements removed,
    /// keeping first occurrences in order. Neither input is mutated.
    pub fn union(&self, other: &Sequence) -> Result<Sequence> {
        let mut out = self.concat(other)?;
        out.dedup();
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Escape hatches
    // ------------------------------------------------------------------

    /// Borrows the raw backing storage when this sequence is statically
    /// typed over exactly `T`.
    pub fn as_slice_of<T: Element>(&self) -> Option<&[T]> {
        let ops = self.inner.as_deref()?;
        ops.as_any()
            .downcast_ref::<TypedSeq<T>>()
            .map(TypedSeq::as_slice)
    }

    /// Clones the elements into a plain vector, if every element is a `T`.
    /// Works for both the statically typed and the dynamic implementation.
    pub fn to_vec<T: Element + Clone>(&self) -> Option<Vec<T>> {
        let ops = self.inner.as_deref()?;
        if let Some(typed) = ops.as_any().downcast_ref::<TypedSeq<T>>() {
            return Some(typed.as_slice().to_vec());
        }
        let mut out = Vec::with_capacity(ops.len());
        for pos in 0..ops.len() {
            out.push(ops.peek(pos)?.as_any().downcast_ref::<T>()?.clone());
        }
        Some(out)
    }

    /// Borrows the implementation behind this sequence, if any.
    pub fn as_ops(&self) -> Option<&dyn SequenceOps> {
        self.inner.as_deref()
    }

    fn storage_for(&mut self, desc: TypeDesc) -> &mut Box<dyn SequenceOps> {
        if self.inner.is_none() {
            self.inner = Some(factory::empty_for(desc));
        }
        match &mut self.inner {
            Some(ops) => ops,
            None => unreachable!(),
        }
    }
}

impl Default for Sequence {
    fn default() -> Sequence {
        Sequence::new()
    }
}

impl Clone for Sequence {
    fn clone(&self) -> Sequence {
        Sequence {
            inner: self.inner.as_ref().map(|ops| ops.boxed_clone()),
        }
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Sequence) -> bool {
        match (self.inner.as_deref(), other.inner.as_deref()) {
            (Some(mine), Some(theirs)) => mine.eq_seq(theirs),
            (Some(mine), None) => mine.len() == 0,
            (None, Some(theirs)) => theirs.len() == 0,
            (None, None) => true,
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.inner {
            Some(ops) => ops.render(f),
            None => f.write_str("[]"),
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: Element> From<Vec<T>> for Sequence {
    fn from(items: Vec<T>) -> Sequence {
        Sequence::from_vec(items)
    }
}

impl<T: Element> FromIterator<T> for Sequence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Sequence {
        Sequence::from_vec(iter.into_iter().collect())
    }
}

/// Panics if an element's runtime type disagrees with the sequence's element
/// type. [`Sequence::push_all`] is the fallible form.
impl<T: Element> Extend<T> for Sequence {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push(value) {
                panic!("{}", err);
            }
        }
    }
}

/// A mutable window over the first or last elements of a [`Sequence`].
///
/// The window aliases the sequence's storage: writing through [`set`]
/// changes the underlying sequence. Indices are relative to the window and
/// may be negative.
///
/// ```
/// use polyseq::seq;
///
/// let mut numbers = seq![1_i64, 2, 3, 4];
/// let mut head = numbers.first_n(2);
/// head.set(0, 10_i64)?;
/// assert_eq!(numbers.at(0).value::<i64>(), Some(&10));
/// # Ok::<(), polyseq::Error>(())
/// ```
///
/// [`set`]: ViewMut::set
pub struct ViewMut<'a> {
    ops: Option<&'a mut Box<dyn SequenceOps>>,
    start: usize,
    len: usize,
}

impl ViewMut<'_> {
    /// The number of elements in the window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the window covers no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The element at a possibly negative window-relative index.
    pub fn at(&self, index: i64) -> Fetched {
        let pos = match resolve_index(self.len, index) {
            Some(pos) => pos,
            None => return Fetched::none(),
        };
        match &self.ops {
            Some(ops) => ops.at((self.start + pos) as i64),
            None => Fetched::none(),
        }
    }

    /// Replaces the element at a window-relative index, writing through to
    /// the underlying sequence.
    pub fn set<T: Element>(&mut self, index: i64, value: T) -> Result<()> {
        self.set_boxed(index, Box::new(value))
    }

    /// Replaces with an already type-erased element.
    pub fn set_boxed(&mut self, index: i64, value: Box<dyn Element>) -> Result<()> {
        let pos = resolve_index(self.len, index)
            .ok_or_else(|| Error::out_of_bounds(index, self.len))?;
        match &mut self.ops {
            Some(ops) => ops.set((self.start + pos) as i64, value),
            None => Err(Error::out_of_bounds(index, self.len)),
        }
    }
}
