// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template functions.
//!
//! String helpers take their subject first (`hasPrefix $v "3.6"`), the way
//! Go's `strings` package orders arguments. A piped value is appended as the
//! final argument.

use super::value::ContextValue;
use super::TemplateError;
use std::collections::BTreeMap;
use std::time::SystemTime;

pub(crate) type Func = fn(&[ContextValue]) -> Result<ContextValue, TemplateError>;

/// Resolve a function by name.
pub(crate) fn lookup(name: &str) -> Option<Func> {
    let func: Func = match name {
        "hasPrefix" => has_prefix,
        "hasSuffix" => has_suffix,
        "trimPrefix" => trim_prefix,
        "trimSuffix" => trim_suffix,
        "toUpper" => to_upper,
        "toLower" => to_lower,
        "split" => split,
        "join" => join,
        "index" => index,
        "len" => len,
        "not" => not,
        "and" => and,
        "or" => or,
        "eq" => eq,
        "ne" => ne,
        "findLatestFile" => find_latest_file,
        _ => return None,
    };
    Some(func)
}

fn render_err(message: impl Into<String>) -> TemplateError {
    TemplateError::Render(message.into())
}

fn arity(name: &str, args: &[ContextValue], expected: usize) -> Result<(), TemplateError> {
    if args.len() != expected {
        return Err(render_err(format!(
            "wrong number of args for {}: want {} got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn string_arg(name: &str, value: &ContextValue) -> Result<String, TemplateError> {
    value.scalar_string().ok_or_else(|| {
        render_err(format!(
            "{}: expected string argument, got {}",
            name,
            value.type_name()
        ))
    })
}

fn two_strings(name: &str, args: &[ContextValue]) -> Result<(String, String), TemplateError> {
    arity(name, args, 2)?;
    Ok((string_arg(name, &args[0])?, string_arg(name, &args[1])?))
}

fn has_prefix(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let (s, prefix) = two_strings("hasPrefix", args)?;
    Ok(ContextValue::Bool(s.starts_with(&prefix)))
}

fn has_suffix(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let (s, suffix) = two_strings("hasSuffix", args)?;
    Ok(ContextValue::Bool(s.ends_with(&suffix)))
}

fn trim_prefix(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let (s, prefix) = two_strings("trimPrefix", args)?;
    let trimmed = s.strip_prefix(prefix.as_str()).unwrap_or(&s);
    Ok(ContextValue::String(trimmed.to_string()))
}

fn trim_suffix(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let (s, suffix) = two_strings("trimSuffix", args)?;
    let trimmed = s.strip_suffix(suffix.as_str()).unwrap_or(&s);
    Ok(ContextValue::String(trimmed.to_string()))
}

fn to_upper(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("toUpper", args, 1)?;
    Ok(ContextValue::String(
        string_arg("toUpper", &args[0])?.to_uppercase(),
    ))
}

fn to_lower(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("toLower", args, 1)?;
    Ok(ContextValue::String(
        string_arg("toLower", &args[0])?.to_lowercase(),
    ))
}

fn split(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let (s, sep) = two_strings("split", args)?;
    let parts: Vec<ContextValue> = if sep.is_empty() {
        s.chars().map(|c| ContextValue::String(c.to_string())).collect()
    } else {
        s.split(sep.as_str()).map(ContextValue::from).collect()
    };
    Ok(ContextValue::List(parts))
}

fn join(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("join", args, 2)?;
    let ContextValue::List(items) = &args[0] else {
        return Err(render_err(format!(
            "join: expected list, got {}",
            args[0].type_name()
        )));
    };
    let sep = string_arg("join", &args[1])?;
    let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(ContextValue::String(joined.join(&sep)))
}

fn index(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    let Some((collection, keys)) = args.split_first() else {
        return Err(render_err("wrong number of args for index: want at least 1 got 0"));
    };
    let mut current = collection.clone();
    for key in keys {
        current = match (&current, key) {
            (ContextValue::List(items), ContextValue::Number(n)) => {
                let idx = usize::try_from(*n)
                    .ok()
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| render_err(format!("index out of range: {}", n)))?;
                items[idx].clone()
            }
            (ContextValue::String(s), ContextValue::Number(n)) => {
                let idx = usize::try_from(*n)
                    .ok()
                    .filter(|i| *i < s.len())
                    .ok_or_else(|| render_err(format!("index out of range: {}", n)))?;
                ContextValue::Number(i64::from(s.as_bytes()[idx]))
            }
            (ContextValue::Object(map), key) => {
                let key = string_arg("index", key)?;
                map.get(&key).cloned().unwrap_or(ContextValue::Null)
            }
            (ContextValue::Null, _) => {
                return Err(render_err("index of untyped nil"));
            }
            (other, key) => {
                return Err(render_err(format!(
                    "can't index item of type {} with {}",
                    other.type_name(),
                    key.type_name()
                )))
            }
        };
    }
    Ok(current)
}

fn len(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("len", args, 1)?;
    let n = match &args[0] {
        ContextValue::String(s) => s.len(),
        ContextValue::List(items) => items.len(),
        ContextValue::Object(map) => map.len(),
        other => {
            return Err(render_err(format!(
                "len of type {}",
                other.type_name()
            )))
        }
    };
    Ok(ContextValue::Number(n as i64))
}

fn not(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("not", args, 1)?;
    Ok(ContextValue::Bool(!args[0].is_truthy()))
}

/// Returns the first falsy argument, or the last one.
fn and(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    if args.is_empty() {
        return Err(render_err("wrong number of args for and: want at least 1 got 0"));
    }
    let picked = args
        .iter()
        .find(|v| !v.is_truthy())
        .or_else(|| args.last())
        .cloned()
        .unwrap_or(ContextValue::Null);
    Ok(picked)
}

/// Returns the first truthy argument, or the last one.
fn or(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    if args.is_empty() {
        return Err(render_err("wrong number of args for or: want at least 1 got 0"));
    }
    let picked = args
        .iter()
        .find(|v| v.is_truthy())
        .or_else(|| args.last())
        .cloned()
        .unwrap_or(ContextValue::Null);
    Ok(picked)
}

fn values_equal(a: &ContextValue, b: &ContextValue) -> Result<bool, TemplateError> {
    match (a, b) {
        (ContextValue::Number(x), ContextValue::Float(y))
        | (ContextValue::Float(y), ContextValue::Number(x)) => Ok((*x as f64) == *y),
        (ContextValue::List(_), _) | (ContextValue::Object(_), _) => Err(render_err(format!(
            "incompatible types for comparison: {}",
            a.type_name()
        ))),
        (ContextValue::Null, ContextValue::Null) => Ok(true),
        _ if std::mem::discriminant(a) != std::mem::discriminant(b) => Err(render_err(format!(
            "incompatible types for comparison: {} and {}",
            a.type_name(),
            b.type_name()
        ))),
        _ => Ok(a == b),
    }
}

/// `eq a b c` is true when `a` equals any of the rest.
fn eq(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    if args.len() < 2 {
        return Err(render_err(format!(
            "wrong number of args for eq: want at least 2 got {}",
            args.len()
        )));
    }
    for other in &args[1..] {
        if values_equal(&args[0], other)? {
            return Ok(ContextValue::Bool(true));
        }
    }
    Ok(ContextValue::Bool(false))
}

fn ne(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("ne", args, 2)?;
    Ok(ContextValue::Bool(!values_equal(&args[0], &args[1])?))
}

/// Newest file (by modification time) matching a glob pattern.
fn find_latest_file(args: &[ContextValue]) -> Result<ContextValue, TemplateError> {
    arity("findLatestFile", args, 1)?;
    let pattern = string_arg("findLatestFile", &args[0])?;
    let paths = glob::glob(&pattern)
        .map_err(|e| render_err(format!("findLatestFile: bad pattern {:?}: {}", pattern, e)))?;

    let mut candidates: BTreeMap<String, SystemTime> = BTreeMap::new();
    for path in paths.flatten() {
        let Ok(meta) = path.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.insert(path.display().to_string(), modified);
    }

    // Ties on mtime resolve to the lexically greatest path.
    candidates
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(path, _)| ContextValue::String(path))
        .ok_or_else(|| render_err(format!("findLatestFile: no file matches {:?}", pattern)))
}

#[cfg(test)]
#[path = "funcs_tests.rs"]
mod tests;
