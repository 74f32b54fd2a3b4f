// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient scalar deserialization.
//!
//! YAML types unquoted scalars (`3.6` is a float, `yes`/`true` a bool,
//! `~` null). Manifest fields that are strings accept any scalar and keep
//! its textual form, so `test-versions: [2.7, 3.6]` reads as strings.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yml::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Text of a scalar YAML value; `null` becomes the empty string.
fn scalar_text<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Sequence(_) => Err(E::custom("expected a scalar, found a sequence")),
        Value::Mapping(_) => Err(E::custom("expected a scalar, found a mapping")),
    }
}

pub(crate) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
}

pub(crate) fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        other => scalar_text(other).map(Some),
    }
}

pub(crate) fn string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items.into_iter().map(scalar_text).collect(),
        other => Err(de::Error::custom(format!(
            "expected a sequence of strings, found {}",
            kind(&other)
        ))),
    }
}

pub(crate) fn string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(k, v)| Ok((scalar_text::<D::Error>(k)?, scalar_text::<D::Error>(v)?)))
            .collect(),
        other => Err(de::Error::custom(format!(
            "expected a mapping, found {}",
            kind(&other)
        ))),
    }
}

pub(crate) fn string_list_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Vec<String>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(k, v)| {
                let key = scalar_text::<D::Error>(k)?;
                let items = match v {
                    Value::Null => Vec::new(),
                    Value::Sequence(items) => items
                        .into_iter()
                        .map(scalar_text)
                        .collect::<Result<_, D::Error>>()?,
                    single => vec![scalar_text::<D::Error>(single)?],
                };
                Ok((key, items))
            })
            .collect(),
        other => Err(de::Error::custom(format!(
            "expected a mapping, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Deserialize a mapping, rejecting duplicate keys.
///
/// `what` names the entries in the error, e.g. "command".
pub(crate) fn unique_map<'de, D, V>(
    deserializer: D,
    what: &'static str,
) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueVisitor<V> {
        what: &'static str,
        marker: std::marker::PhantomData<V>,
    }

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueVisitor<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a mapping of {} names", self.what)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some(key) = access.next_key::<Value>()? {
                let key = scalar_text::<A::Error>(key)?;
                if map.contains_key(&key) {
                    return Err(de::Error::custom(format!(
                        "duplicate {} name: {:?}",
                        self.what, key
                    )));
                }
                let value = access.next_value::<V>()?;
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_any(UniqueVisitor {
        what,
        marker: std::marker::PhantomData,
    })
}

#[cfg(test)]
#[path = "scalar_tests.rs"]
mod tests;
