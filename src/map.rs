//! A string-keyed map of dynamically typed values.
//!
//! `Map` is the map-like element category: a sequence of maps dispatches to
//! the statically typed path with `Map` as its element type. By default the
//! map is backed by a [`BTreeMap`]. Enable the `preserve_order` feature of
//! polyseq to use [`IndexMap`] instead.
//!
//! [`BTreeMap`]: std::collections::BTreeMap
//! [`IndexMap`]: https://docs.rs/indexmap/*/indexmap/map/struct.IndexMap.html

use std::borrow::Borrow;
use std::fmt::{self, Debug};

use crate::element::Element;

#[cfg(not(feature = "preserve_order"))]
use std::collections::{btree_map, BTreeMap};

#[cfg(feature = "preserve_order")]
use indexmap::IndexMap;

/// Represents a string-keyed collection of dynamically typed values.
pub struct Map {
    inner: MapImpl<String, Box<dyn Element>>,
}

#[cfg(not(feature = "preserve_order"))]
type MapImpl<K, V> = BTreeMap<K, V>;
#[cfg(feature = "preserve_order")]
type MapImpl<K, V> = IndexMap<K, V>;

impl Map {
    /// Makes a new empty Map.
    pub fn new() -> Self {
        Map {
            inner: MapImpl::new(),
        }
    }

    /// Clears the map, removing all values.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&dyn Element>
    where
        String: Borrow<Q>,
        Q: ?Sized + Ord + Eq + std::hash::Hash,
    {
        self.inner.get(key).map(|value| &**value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut dyn Element>
    where
        String: Borrow<Q>,
        Q: ?Sized + Ord + Eq + std::hash::Hash,
    {
        self.inner.get_mut(key).map(|value| &mut **value)
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: ?Sized + Ord + Eq + std::hash::Hash,
    {
        self.inner.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. If the
    /// map did have this key present, the value is updated and the old value
    /// is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Element) -> Option<Box<dyn Element>> {
        self.inner.insert(key.into(), Box::new(value))
    }

    /// Inserts an already type-erased value.
    pub fn insert_boxed(&mut self, key: impl Into<String>, value: Box<dyn Element>) -> Option<Box<dyn Element>> {
        self.inner.insert(key.into(), value)
    }

    /// Removes a key from the map, returning the value at the key if the
    /// key was previously in the map.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Box<dyn Element>>
    where
        String: Borrow<Q>,
        Q: ?Sized + Ord + Eq + std::hash::Hash,
    {
        #[cfg(not(feature = "preserve_order"))]
        return self.inner.remove(key);
        #[cfg(feature = "preserve_order")]
        return self.inner.shift_remove(key);
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Gets an iterator over the entries of the map.
    pub fn iter(&self) -> Iter {
        Iter(self.inner.iter())
    }

    /// Gets an iterator over the keys of the map.
    pub fn keys(&self) -> Keys {
        Keys(self.inner.keys())
    }

    /// Gets an iterator over the values of the map.
    pub fn values(&self) -> Values {
        Values(self.inner.values())
    }
}

impl Default for Map {
    fn default() -> Self {
        Map::new()
    }
}

impl Clone for Map {
    fn clone(&self) -> Self {
        let mut inner = MapImpl::new();
        for (key, value) in &self.inner {
            inner.insert(key.clone(), value.boxed_clone());
        }
        Map { inner }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.inner.iter().all(|(key, value)| {
            other
                .inner
                .get(key)
                .map_or(false, |theirs| value.eq_element(&**theirs))
        })
    }
}

impl Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K: Into<String>, V: Element> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Element> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

macro_rules! delegate_iterator {
    (($name:ident $($generics:tt)*) => $item:ty) => {
        impl $($generics)* Iterator for $name $($generics)* {
            type Item = $item;
            fn next(&mut self) -> Option<Self::Item> {
                self.0.next()
            }
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl $($generics)* ExactSizeIterator for $name $($generics)* {
            fn len(&self) -> usize {
                self.0.len()
            }
        }
    };
}

//////////////////////////////////////////////////////////////////////////////

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Box<dyn Element>);
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        Iter(self.inner.iter())
    }
}

/// An iterator over the entries of a `Map`.
pub struct Iter<'a>(IterImpl<'a>);

#[cfg(not(feature = "preserve_order"))]
type IterImpl<'a> = btree_map::Iter<'a, String, Box<dyn Element>>;
#[cfg(feature = "preserve_order")]
type IterImpl<'a> = indexmap::map::Iter<'a, String, Box<dyn Element>>;

delegate_iterator!((Iter<'a>) => (&'a String, &'a Box<dyn Element>));

//////////////////////////////////////////////////////////////////////////////

/// An iterator over the keys of a `Map`.
pub struct Keys<'a>(KeysImpl<'a>);

#[cfg(not(feature = "preserve_order"))]
type KeysImpl<'a> = btree_map::Keys<'a, String, Box<dyn Element>>;
#[cfg(feature = "preserve_order")]
type KeysImpl<'a> = indexmap::map::Keys<'a, String, Box<dyn Element>>;

delegate_iterator!((Keys<'a>) => &'a String);

//////////////////////////////////////////////////////////////////////////////

/// An iterator over the values of a `Map`.
pub struct Values<'a>(ValuesImpl<'a>);

#[cfg(not(feature = "preserve_order"))]
type ValuesImpl<'a> = btree_map::Values<'a, String, Box<dyn Element>>;
#[cfg(feature = "preserve_order")]
type ValuesImpl<'a> = indexmap::map::Values<'a, String, Box<dyn Element>>;

delegate_iterator!((Values<'a>) => &'a Box<dyn Element>);
