//! The dynamically typed sequence implementation.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use crate::element::{self, Element, TypeDesc};
use crate::error::{Error, Result};
use crate::fetched::Fetched;
use crate::index::{magnitude, resolve_index, resolve_range};
use crate::traits::{SequenceOps, SortOrder};

/// A sequence whose element type is only known at runtime.
///
/// This is the implementation the dispatch logic falls back to when a
/// sequence's element type is not one of the recognized categories: elements
/// live behind the [`Element`] trait and every operation works through
/// runtime type inspection. The recorded element type is fixed by the first
/// element ever stored; inserting anything of a different runtime type is a
/// type-mismatch error, never a coercion.
///
/// ```
/// use polyseq::DynSeq;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Marker(u8);
///
/// let seq = DynSeq::from_vec(vec![Marker(1), Marker(2)]);
/// assert_eq!(seq.len(), 2);
/// assert!(seq.element_type().is_some());
/// ```
pub struct DynSeq {
    elem: Option<TypeDesc>,
    items: Vec<Box<dyn Element>>,
}

impl DynSeq {
    /// Makes a new empty sequence with no element type fixed yet. The first
    /// element stored decides the type.
    pub fn empty() -> DynSeq {
        DynSeq {
            elem: None,
            items: Vec::new(),
        }
    }

    /// Makes a new empty sequence that will only accept elements of the
    /// described type.
    pub fn empty_of(desc: TypeDesc) -> DynSeq {
        DynSeq {
            elem: Some(desc),
            items: Vec::new(),
        }
    }

    /// Boxes the elements of a typed vector into dynamic storage.
    pub fn from_vec<T: Element>(items: Vec<T>) -> DynSeq {
        DynSeq {
            elem: Some(TypeDesc::of::<T>()),
            items: items
                .into_iter()
                .map(|item| Box::new(item) as Box<dyn Element>)
                .collect(),
        }
    }

    /// Adopts already boxed elements, verifying each against the expected
    /// element type.
    pub(crate) fn from_parts(desc: TypeDesc, items: Vec<Box<dyn Element>>) -> Result<DynSeq> {
        for item in &items {
            let found = item.type_desc();
            if found != desc {
                return Err(Error::type_mismatch(desc, found));
            }
        }
        Ok(DynSeq {
            elem: Some(desc),
            items,
        })
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The recorded element type, or `None` while the sequence is empty and
    /// untyped.
    pub fn element_type(&self) -> Option<TypeDesc> {
        self.elem
    }

    /// Iterates over the elements as type-erased borrows.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Element> {
        self.items.iter().map(|item| &**item)
    }

    /// Checks an incoming element against the recorded element type, fixing
    /// the type if this is the first element ever stored.
    fn admit(&mut self, value: &dyn Element) -> Result<()> {
        let found = value.type_desc();
        match self.elem {
            None => {
                self.elem = Some(found);
                Ok(())
            }
            Some(expected) if expected == found => Ok(()),
            Some(expected) => Err(Error::type_mismatch(expected, found)),
        }
    }
}

impl Clone for DynSeq {
    fn clone(&self) -> Self {
        DynSeq {
            elem: self.elem,
            items: self.items.iter().map(|item| item.boxed_clone()).collect(),
        }
    }
}

impl PartialEq for DynSeq {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(mine, theirs)| mine.eq_element(&**theirs))
    }
}

impl fmt::Debug for DynSeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        SequenceOps::render(self, f)
    }
}

impl SequenceOps for DynSeq {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_dynamic(&self) -> bool {
        true
    }

    fn element_type(&self) -> Option<TypeDesc> {
        self.elem
    }

    fn peek(&self, pos: usize) -> Option<&dyn Element> {
        self.items.get(pos).map(|item| &**item)
    }

    fn contains(&self, candidate: &dyn Element) -> bool {
        self.items.iter().any(|item| item.eq_element(candidate))
    }

    fn contains_any(&self, candidates: &[&dyn Element]) -> bool {
        candidates.iter().any(|candidate| self.contains(*candidate))
    }

    fn any_matches(&self, pred: &mut dyn FnMut(&dyn Element) -> bool) -> bool {
        self.items.iter().any(|item| pred(&**item))
    }

    fn at(&self, index: i64) -> Fetched {
        match resolve_index(self.items.len(), index) {
            Some(pos) => Fetched::from_boxed(self.items[pos].boxed_clone()),
            None => Fetched::none(),
        }
    }

    fn first(&self) -> Fetched {
        self.at(0)
    }

    fn last(&self) -> Fetched {
        self.at(-1)
    }

    fn copy_range(&self, start: i64, end: i64) -> Box<dyn SequenceOps> {
        let items = match resolve_range(self.items.len(), &[start, end]) {
            Ok(Some((start, end))) => self.items[start..=end]
                .iter()
                .map(|item| item.boxed_clone())
                .collect(),
            _ => Vec::new(),
        };
        Box::new(DynSeq {
            elem: self.elem,
            items,
        })
    }

    fn snapshot(&self) -> Vec<Box<dyn Element>> {
        self.items.iter().map(|item| item.boxed_clone()).collect()
    }

    fn append(&mut self, value: Box<dyn Element>) -> Result<()> {
        self.admit(&*value)?;
        self.items.push(value);
        Ok(())
    }

    fn append_all(&mut self, values: Vec<Box<dyn Element>>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let expected = match self.elem {
            Some(desc) => desc,
            None => values[0].type_desc(),
        };
        for value in &values {
            let found = value.type_desc();
            if found != expected {
                return Err(Error::type_mismatch(expected, found));
            }
        }
        self.elem = Some(expected);
        self.items.extend(values);
        Ok(())
    }

    fn insert(&mut self, index: i64, value: Box<dyn Element>) -> Result<()> {
        if self.items.is_empty() {
            return self.append(value);
        }
        self.admit(&*value)?;
        match resolve_index(self.items.len(), index) {
            Some(pos) if index < 0 => self.items.insert(pos + 1, value),
            Some(pos) => self.items.insert(pos, value),
            None => {}
        }
        Ok(())
    }

    fn set(&mut self, index: i64, value: Box<dyn Element>) -> Result<()> {
        let pos = resolve_index(self.items.len(), index)
            .ok_or_else(|| Error::out_of_bounds(index, self.items.len()))?;
        self.admit(&*value)?;
        self.items[pos] = value;
        Ok(())
    }

    fn drop_range(&mut self, start: i64, end: i64) {
        if let Ok(Some((start, end))) = resolve_range(self.items.len(), &[start, end]) {
            self.items.drain(start..=end);
        }
    }

    fn drop_at(&mut self, index: i64) {
        if let Some(pos) = resolve_index(self.items.len(), index) {
            self.items.remove(pos);
        }
    }

    fn drop_first(&mut self, count: i64) {
        let count = magnitude(count).min(self.items.len() as i64) as usize;
        self.items.drain(..count);
    }

    fn drop_last(&mut self, count: i64) {
        let count = magnitude(count).min(self.items.len() as i64) as usize;
        let keep = self.items.len() - count;
        self.items.truncate(keep);
    }

    fn drop_matching(&mut self, pred: &mut dyn FnMut(&dyn Element) -> bool) {
        self.items.retain(|item| !pred(&**item));
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn reverse(&mut self) {
        self.items.reverse();
    }

    fn sort(&mut self, order: SortOrder) -> Result<()> {
        if self.items.len() > 1 {
            let probe = &*self.items[0];
            element::compare_erased(probe, probe)?;
            match order {
                SortOrder::Ascending => self.items.sort_by(|a, b| {
                    element::compare_erased(&**a, &**b).unwrap_or(Ordering::Equal)
                }),
                SortOrder::Descending => self.items.sort_by(|a, b| {
                    element::compare_erased(&**b, &**a).unwrap_or(Ordering::Equal)
                }),
            }
        }
        Ok(())
    }

    fn dedup(&mut self) {
        let mut kept: Vec<Box<dyn Element>> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if !kept.iter().any(|seen| seen.eq_element(&*item)) {
                kept.push(item);
            }
        }
        self.items = kept;
    }

    fn swap(&mut self, i: i64, j: i64) {
        let len = self.items.len();
        if let (Some(a), Some(b)) = (resolve_index(len, i), resolve_index(len, j)) {
            self.items.swap(a, b);
        }
    }

    fn less(&self, i: i64, j: i64) -> Result<bool> {
        let len = self.items.len();
        let a = resolve_index(len, i).ok_or_else(|| Error::out_of_bounds(i, len))?;
        let b = resolve_index(len, j).ok_or_else(|| Error::out_of_bounds(j, len))?;
        let ordering = element::compare_erased(&*self.items[a], &*self.items[b])?;
        Ok(ordering == Ordering::Less)
    }

    fn pop(&mut self) -> Fetched {
        match self.items.pop() {
            Some(item) => Fetched::from_boxed(item),
            None => Fetched::none(),
        }
    }

    fn shift(&mut self) -> Fetched {
        if self.items.is_empty() {
            return Fetched::none();
        }
        Fetched::from_boxed(self.items.remove(0))
    }

    fn pop_n(&mut self, count: i64) -> Box<dyn SequenceOps> {
        let count = magnitude(count).min(self.items.len() as i64) as usize;
        let split = self.items.len() - count;
        Box::new(DynSeq {
            elem: self.elem,
            items: self.items.split_off(split),
        })
    }

    fn shift_n(&mut self, count: i64) -> Box<dyn SequenceOps> {
        let count = magnitude(count).min(self.items.len() as i64) as usize;
        Box::new(DynSeq {
            elem: self.elem,
            items: self.items.drain(..count).collect(),
        })
    }

    fn take_range(&mut self, start: i64, end: i64) -> Box<dyn SequenceOps> {
        let items = match resolve_range(self.items.len(), &[start, end]) {
            Ok(Some((start, end))) => self.items.drain(start..=end).collect(),
            _ => Vec::new(),
        };
        Box::new(DynSeq {
            elem: self.elem,
            items,
        })
    }

    fn take_at(&mut self, index: i64) -> Fetched {
        match resolve_index(self.items.len(), index) {
            Some(pos) => Fetched::from_boxed(self.items.remove(pos)),
            None => Fetched::none(),
        }
    }

    fn take_matching(&mut self, pred: &mut dyn FnMut(&dyn Element) -> bool) -> Box<dyn SequenceOps> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if pred(&*item) {
                taken.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        Box::new(DynSeq {
            elem: self.elem,
            items: taken,
        })
    }

    fn boxed_clone(&self) -> Box<dyn SequenceOps> {
        Box::new(self.clone())
    }

    fn eq_seq(&self, other: &dyn SequenceOps) -> bool {
        if self.items.len() != other.len() {
            return false;
        }
        self.items.iter().enumerate().all(|(pos, item)| {
            other
                .peek(pos)
                .map_or(false, |theirs| item.eq_element(theirs))
        })
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (pos, item) in self.items.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            element::render_erased(&**item, f)?;
        }
        f.write_str("]")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
