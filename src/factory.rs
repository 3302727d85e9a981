//! Dispatch: selecting the best implementation for an element type.
//!
//! The recognized element categories are `i64` (integral), `f64`
//! (floating), `String` (textual) and [`Map`] (map-like); each dispatches
//! to [`TypedSeq`] of that type. Every other element type falls back to
//! [`DynSeq`].
//!
//! [`Map`]: crate::Map
//! [`TypedSeq`]: crate::TypedSeq
//! [`DynSeq`]: crate::DynSeq

use std::any::{Any, TypeId};

use crate::dynamic::DynSeq;
use crate::element::{self, Element, TypeDesc};
use crate::error::Result;
use crate::map::Map;
use crate::traits::SequenceOps;
use crate::typed::TypedSeq;

/// Recovers a concretely typed vector after a `TypeId` check has proven
/// that `T` and `U` are the same type.
fn reuse_vec<T: Any, U: Any>(items: Vec<T>) -> Vec<U> {
    match (Box::new(items) as Box<dyn Any>).downcast::<Vec<U>>() {
        Ok(items) => *items,
        Err(_) => unreachable!(),
    }
}

/// An empty sequence ready to hold elements of the described type.
pub(crate) fn empty_for(desc: TypeDesc) -> Box<dyn SequenceOps> {
    let id = desc.id();
    if id == TypeId::of::<i64>() {
        return Box::new(TypedSeq::<i64>::new());
    }
    if id == TypeId::of::<f64>() {
        return Box::new(TypedSeq::<f64>::new());
    }
    if id == TypeId::of::<String>() {
        return Box::new(TypedSeq::<String>::new());
    }
    if id == TypeId::of::<Map>() {
        return Box::new(TypedSeq::<Map>::new());
    }
    Box::new(DynSeq::empty_of(desc))
}

/// Moves a typed vector into the best implementation for `T`. A recognized
/// category reuses the vector's allocation; anything else is boxed into the
/// dynamic fallback.
pub(crate) fn from_vec<T: Element>(items: Vec<T>) -> Box<dyn SequenceOps> {
    let id = TypeId::of::<T>();
    if id == TypeId::of::<i64>() {
        return Box::new(TypedSeq::from_vec(reuse_vec::<T, i64>(items)));
    }
    if id == TypeId::of::<f64>() {
        return Box::new(TypedSeq::from_vec(reuse_vec::<T, f64>(items)));
    }
    if id == TypeId::of::<String>() {
        return Box::new(TypedSeq::from_vec(reuse_vec::<T, String>(items)));
    }
    if id == TypeId::of::<Map>() {
        return Box::new(TypedSeq::from_vec(reuse_vec::<T, Map>(items)));
    }
    Box::new(DynSeq::from_vec(items))
}

/// Builds a sequence from elements whose types are only known at runtime.
///
/// The first element's runtime type decides the element type for the whole
/// result; a later element of any other type rejects the input. An empty
/// input produces the empty, untyped dynamic sequence.
pub(crate) fn from_boxed(items: Vec<Box<dyn Element>>) -> Result<Box<dyn SequenceOps>> {
    let desc = match items.first() {
        Some(first) => first.type_desc(),
        None => return Ok(Box::new(DynSeq::empty())),
    };

    macro_rules! materialize {
        ($ty:ty) => {
            if desc.id() == TypeId::of::<$ty>() {
                let mut out: Vec<$ty> = Vec::with_capacity(items.len());
                for item in items {
                    out.push(element::take_element::<$ty>(item)?);
                }
                return Ok(Box::new(TypedSeq::from_vec(out)));
            }
        };
    }

    materialize!(i64);
    materialize!(f64);
    materialize!(String);
    materialize!(Map);

    Ok(Box::new(DynSeq::from_parts(desc, items)?))
}
