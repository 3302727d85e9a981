//! Serialization of sequences and maps.
//!
//! Elements serialize through a runtime switch over the recognized
//! categories (plus booleans and nested sequences, which deserialization
//! can produce). An element of any other type is a serialization-time
//! error: the data, not the call site, decides whether serialization can
//! succeed.

use serde::ser::{Error as SerError, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::element::Element;
use crate::map::Map;
use crate::sequence::Sequence;
use crate::typed::TypedSeq;

struct ErasedElement<'a>(&'a dyn Element);

impl Serialize for ErasedElement<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let any = self.0.as_any();
        if let Some(n) = any.downcast_ref::<i64>() {
            return serializer.serialize_i64(*n);
        }
        if let Some(n) = any.downcast_ref::<f64>() {
            return serializer.serialize_f64(*n);
        }
        if let Some(s) = any.downcast_ref::<String>() {
            return serializer.serialize_str(s);
        }
        if let Some(map) = any.downcast_ref::<Map>() {
            return map.serialize(serializer);
        }
        if let Some(seq) = any.downcast_ref::<Sequence>() {
            return seq.serialize(serializer);
        }
        if let Some(b) = any.downcast_ref::<bool>() {
            return serializer.serialize_bool(*b);
        }
        Err(SerError::custom(format_args!(
            "element type {} cannot be serialized",
            self.0.type_desc()
        )))
    }
}

impl Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.len();
        let mut seq = serializer.serialize_seq(Some(len))?;
        if let Some(ops) = self.as_ops() {
            for pos in 0..len {
                if let Some(element) = ops.peek(pos) {
                    seq.serialize_element(&ErasedElement(element))?;
                }
            }
        }
        seq.end()
    }
}

impl Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, &ErasedElement(&**value))?;
        }
        map.end()
    }
}

impl<T> Serialize for TypedSeq<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}
