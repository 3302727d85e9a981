//! Deserialization of sequences and maps from self-describing formats.
//!
//! Each incoming element materializes as the category scalar its wire type
//! maps to (integers as `i64`, floats as `f64`, text as `String`, objects
//! as [`Map`], nested arrays as [`Sequence`], booleans as `bool`), and the
//! collected elements go through the same first-element dispatch as
//! [`Sequence::from_boxed`]. A homogeneous integer array therefore
//! deserializes straight into the statically typed integral sequence.
//!
//! [`Map`]: crate::Map
//! [`Sequence`]: crate::Sequence
//! [`Sequence::from_boxed`]: crate::Sequence::from_boxed

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as DeError, MapAccess, SeqAccess, Visitor};

use crate::element::Element;
use crate::error::Error;
use crate::map::Map;
use crate::sequence::Sequence;
use crate::typed::TypedSeq;

struct BoxedElement(Box<dyn Element>);

impl<'de> Deserialize<'de> for BoxedElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ElementVisitor).map(BoxedElement)
    }
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = Box<dyn Element>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence element")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        Ok(Box::new(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        Ok(Box::new(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        match i64::try_from(value) {
            Ok(value) => Ok(Box::new(value)),
            Err(_) => Err(E::custom(Error::number_out_of_range(value))),
        }
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        Ok(Box::new(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        Ok(Box::new(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        Ok(Box::new(value))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        collect_sequence(seq).map(|sequence| Box::new(sequence) as Box<dyn Element>)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        collect_map(map).map(|map| Box::new(map) as Box<dyn Element>)
    }
}

fn collect_sequence<'de, A>(mut seq: A) -> Result<Sequence, A::Error>
where
    A: SeqAccess<'de>,
{
    let mut items: Vec<Box<dyn Element>> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(BoxedElement(item)) = seq.next_element()? {
        items.push(item);
    }
    Sequence::from_boxed(items).map_err(DeError::custom)
}

fn collect_map<'de, A>(mut access: A) -> Result<Map, A::Error>
where
    A: MapAccess<'de>,
{
    let mut map = Map::new();
    while let Some((key, BoxedElement(value))) = access.next_entry::<String, BoxedElement>()? {
        map.insert_boxed(key, value);
    }
    Ok(map)
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SequenceVisitor;

        impl<'de> Visitor<'de> for SequenceVisitor {
            type Value = Sequence;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                collect_sequence(seq)
            }
        }

        deserializer.deserialize_seq(SequenceVisitor)
    }
}

impl<'de> Deserialize<'de> for Map {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = Map;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                collect_map(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

impl<'de, T> Deserialize<'de> for TypedSeq<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(TypedSeq::from_vec)
    }
}
