// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSONPath-like field paths into observed objects.
//!
//! Supports the subset used by wait conditions and kind rules:
//! `status.phase`, `{.status.phase}`, `$.spec.replicas`, `items[0]`,
//! `metadata.labels["app.kubernetes.io/name"]` and
//! `status.conditions[?(@.type=="Ready")].status`.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    /// First array element whose nested `field` renders to `value`
    Filter { field: Vec<String>, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Resolve the path against a value, returning `None` when any segment is missing
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(index) => current.get(*index),
                Segment::Filter { field, value } => current
                    .as_array()?
                    .iter()
                    .find(|item| {
                        resolve_keys(item, field).map(render_scalar).as_deref()
                            == Some(value.as_str())
                    }),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn resolve_keys<'a>(value: &'a Value, keys: &[String]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| current.get(key.as_str()))
}

/// Render a resolved value as the string compared against expected values.
///
/// Null and empty collections render as the empty string.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.is_empty() => String::new(),
        Value::Object(map) if map.is_empty() => String::new(),
        other => other.to_string(),
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> ProviderError {
    ProviderError::InvalidFieldPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a bare key off the front of `input`, stopping at `.` or `[`
fn take_key<'a>(raw: &str, input: &'a str) -> Result<(Segment, &'a str)> {
    let end = input.find(['.', '[']).unwrap_or(input.len());
    let key = &input[..end];
    if key.is_empty() {
        return Err(invalid(raw, "empty field name"));
    }
    Ok((Segment::Key(key.to_string()), &input[end..]))
}

/// Parse a quoted string starting at `input[0]`, returning the contents and the rest
fn take_quoted<'a>(raw: &str, input: &'a str) -> Result<(&'a str, &'a str)> {
    let quote = input
        .chars()
        .next()
        .filter(|c| *c == '"' || *c == '\'')
        .ok_or_else(|| invalid(raw, "expected a quoted string"))?;
    let body = &input[1..];
    let end = body
        .find(quote)
        .ok_or_else(|| invalid(raw, "unterminated quoted string"))?;
    Ok((&body[..end], &body[end + 1..]))
}

/// Parse the inside of `[...]`, `input` starting right after the `[`
fn take_bracket<'a>(raw: &str, input: &'a str) -> Result<(Segment, &'a str)> {
    if input.starts_with('"') || input.starts_with('\'') {
        let (key, rest) = take_quoted(raw, input)?;
        let rest = rest
            .strip_prefix(']')
            .ok_or_else(|| invalid(raw, "expected ']' after quoted key"))?;
        return Ok((Segment::Key(key.to_string()), rest));
    }

    if let Some(filter) = input.strip_prefix("?(") {
        let expr = filter
            .strip_prefix("@.")
            .ok_or_else(|| invalid(raw, "filter must start with '@.'"))?;
        let eq = expr
            .find("==")
            .ok_or_else(|| invalid(raw, "filter must compare with '=='"))?;
        let field: Vec<String> = expr[..eq].trim().split('.').map(str::to_string).collect();
        if field.iter().any(String::is_empty) {
            return Err(invalid(raw, "empty field name in filter"));
        }
        let (value, rest) = take_quoted(raw, expr[eq + 2..].trim_start())?;
        let rest = rest
            .trim_start()
            .strip_prefix(")]")
            .ok_or_else(|| invalid(raw, "expected ')]' to close filter"))?;
        return Ok((
            Segment::Filter {
                field,
                value: value.to_string(),
            },
            rest,
        ));
    }

    let end = input
        .find(']')
        .ok_or_else(|| invalid(raw, "unterminated '['"))?;
    let index = input[..end]
        .trim()
        .parse()
        .map_err(|_| invalid(raw, format!("'{}' is not an array index", &input[..end])))?;
    Ok((Segment::Index(index), &input[end + 1..]))
}

impl FromStr for FieldPath {
    type Err = ProviderError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(trimmed);
        let inner = inner.strip_prefix('$').unwrap_or(inner);

        if inner.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = inner;

        // A leading bare key is allowed, as in "status.phase"
        if !rest.starts_with('.') && !rest.starts_with('[') {
            let (segment, remaining) = take_key(raw, rest)?;
            segments.push(segment);
            rest = remaining;
        }

        while !rest.is_empty() {
            let (segment, remaining) = if let Some(after) = rest.strip_prefix('.') {
                take_key(raw, after)?
            } else if let Some(after) = rest.strip_prefix('[') {
                take_bracket(raw, after)?
            } else {
                return Err(invalid(raw, format!("unexpected input at '{}'", rest)));
            };
            segments.push(segment);
            rest = remaining;
        }

        Ok(FieldPath {
            raw: trimmed.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ProviderError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
