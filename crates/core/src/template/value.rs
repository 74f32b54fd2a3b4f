// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template context (variable bindings) and the values it holds.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A value in the template context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Number(i64),
    Float(f64),
    Bool(bool),
    List(Vec<ContextValue>),
    Object(BTreeMap<String, ContextValue>),
    Null,
}

impl ContextValue {
    /// Go truthiness: false, 0, nil and empty string/list/map are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            ContextValue::String(s) => !s.is_empty(),
            ContextValue::Number(n) => *n != 0,
            ContextValue::Float(f) => *f != 0.0,
            ContextValue::Bool(b) => *b,
            ContextValue::List(l) => !l.is_empty(),
            ContextValue::Object(o) => !o.is_empty(),
            ContextValue::Null => false,
        }
    }

    /// Name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ContextValue::String(_) => "string",
            ContextValue::Number(_) => "int",
            ContextValue::Float(_) => "float",
            ContextValue::Bool(_) => "bool",
            ContextValue::List(_) => "list",
            ContextValue::Object(_) => "map",
            ContextValue::Null => "nil",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar as a string; lists, maps and nil yield `None`.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ContextValue::String(s) => Some(s.clone()),
            ContextValue::Number(n) => Some(n.to_string()),
            ContextValue::Float(f) => Some(f.to_string()),
            ContextValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Parse a command-line value.
    ///
    /// Values that look like JSON arrays or objects are decoded as JSON,
    /// everything else stays a string.
    pub fn parse_cli(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
                return ContextValue::from(&json);
            }
        }
        ContextValue::String(raw.to_string())
    }

    /// Deep-merge `other` into `self`; objects merge key by key, anything else is replaced.
    pub fn merge(&mut self, other: ContextValue) {
        match (self, other) {
            (ContextValue::Object(base), ContextValue::Object(incoming)) => {
                for (key, value) in incoming {
                    match base.get_mut(&key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            base.insert(key, value);
                        }
                    }
                }
            }
            (slot, other) => *slot = other,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::String(s) => f.write_str(s),
            ContextValue::Number(n) => write!(f, "{}", n),
            ContextValue::Float(v) => write!(f, "{}", v),
            ContextValue::Bool(b) => write!(f, "{}", b),
            ContextValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ContextValue::Object(map) => {
                f.write_str("map[")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                f.write_str("]")
            }
            ContextValue::Null => Ok(()),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::String(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::String(s)
    }
}

impl From<i64> for ContextValue {
    fn from(n: i64) -> Self {
        ContextValue::Number(n)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(items: Vec<T>) -> Self {
        ContextValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ContextValue>> From<BTreeMap<String, T>> for ContextValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        ContextValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<&serde_json::Value> for ContextValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContextValue::Null,
            serde_json::Value::Bool(b) => ContextValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ContextValue::Number(i),
                None => ContextValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => ContextValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                ContextValue::List(items.iter().map(ContextValue::from).collect())
            }
            serde_json::Value::Object(map) => ContextValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), ContextValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&toml::Value> for ContextValue {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ContextValue::String(s.clone()),
            toml::Value::Integer(i) => ContextValue::Number(*i),
            toml::Value::Float(f) => ContextValue::Float(*f),
            toml::Value::Boolean(b) => ContextValue::Bool(*b),
            toml::Value::Datetime(dt) => ContextValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ContextValue::List(items.iter().map(ContextValue::from).collect())
            }
            toml::Value::Table(table) => ContextValue::Object(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), ContextValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_yml::Value> for ContextValue {
    fn from(value: &serde_yml::Value) -> Self {
        match value {
            serde_yml::Value::Null => ContextValue::Null,
            serde_yml::Value::Bool(b) => ContextValue::Bool(*b),
            serde_yml::Value::Number(n) => match n.as_i64() {
                Some(i) => ContextValue::Number(i),
                None => ContextValue::Float(n.as_f64().unwrap_or_default()),
            },
            serde_yml::Value::String(s) => ContextValue::String(s.clone()),
            serde_yml::Value::Sequence(items) => {
                ContextValue::List(items.iter().map(ContextValue::from).collect())
            }
            serde_yml::Value::Mapping(map) => ContextValue::Object(
                map.iter()
                    .filter_map(|(k, v)| {
                        let key = match k {
                            serde_yml::Value::String(s) => s.clone(),
                            other => ContextValue::from(other).scalar_string()?,
                        };
                        Some((key, ContextValue::from(v)))
                    })
                    .collect(),
            ),
            serde_yml::Value::Tagged(tagged) => ContextValue::from(&tagged.value),
        }
    }
}

/// Template context (root variable bindings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, ContextValue>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string value to the context.
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), ContextValue::String(value.into()));
        self
    }

    /// Add an object value to the context.
    pub fn with_object(
        mut self,
        key: impl Into<String>,
        value: BTreeMap<String, ContextValue>,
    ) -> Self {
        self.values.insert(key.into(), ContextValue::Object(value));
        self
    }

    /// Add a context value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Add a value at a dotted path, e.g. `Org.Value`.
    pub fn with_path(mut self, path: &str, value: impl Into<ContextValue>) -> Self {
        self.set_path(path, value);
        self
    }

    /// Set a string value in the context.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), ContextValue::String(value.into()));
    }

    /// Set an arbitrary value in the context.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Set a value at a dotted path, creating intermediate objects.
    ///
    /// Intermediate segments that hold a non-object value are replaced.
    pub fn set_path(&mut self, path: &str, value: impl Into<ContextValue>) {
        let mut segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut current = &mut self.values;
        for segment in segments {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| ContextValue::Object(BTreeMap::new()));
            if !matches!(slot, ContextValue::Object(_)) {
                *slot = ContextValue::Object(BTreeMap::new());
            }
            current = match slot {
                ContextValue::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value.into());
    }

    /// Get a top-level value.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Get a value at a dotted path.
    pub fn get_path(&self, path: &str) -> Option<&ContextValue> {
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                ContextValue::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Root names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Deep-merge another context over this one.
    pub fn merge(&mut self, other: Context) {
        for (key, value) in other.values {
            match self.values.get_mut(&key) {
                Some(existing) => existing.merge(value),
                None => {
                    self.values.insert(key, value);
                }
            }
        }
    }

    /// Build a context from an object value; other kinds yield an empty context.
    pub fn from_value(value: ContextValue) -> Self {
        match value {
            ContextValue::Object(values) => Self { values },
            _ => Self::default(),
        }
    }

    /// The whole context as a single object value (the template's root dot).
    pub fn to_value(&self) -> ContextValue {
        ContextValue::Object(self.values.clone())
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
