//! JSON types for document content
//!
//! This module defines types for navigating and rewriting document content:
//! - JsonValue: Newtype wrapper around serde_json::Value
//! - JsonPath: RFC 6901 pointer into a JSON document (`/Person/PersonalData`)
//!
//! # Document Size Limits
//!
//! | Limit | Value | Constant |
//! |-------|-------|----------|
//! | Max document size | 16 MB | [`MAX_DOCUMENT_SIZE`] |
//! | Max nesting depth | 100 levels | [`MAX_NESTING_DEPTH`] |
//! | Max path length | 256 tokens | [`MAX_PATH_LENGTH`] |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Document Size Limits
// =============================================================================

/// Maximum document size in bytes (16 MB)
///
/// Checked by the document store on create and update.
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Maximum nesting depth in a JSON document (100 levels)
pub const MAX_NESTING_DEPTH: usize = 100;

/// Maximum path length in tokens (256 tokens)
pub const MAX_PATH_LENGTH: usize = 256;

/// Error type for document limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document exceeds maximum size
    #[error("document size {size} exceeds maximum of {max} bytes")]
    DocumentTooLarge {
        /// Actual document size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Document nesting exceeds maximum depth
    #[error("document nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Actual nesting depth
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// Path exceeds maximum length
    #[error("path length {length} exceeds maximum of {max} tokens")]
    PathTooLong {
        /// Actual path length
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
}

// =============================================================================
// JsonValue
// =============================================================================

/// JSON value wrapper
///
/// Newtype around serde_json::Value with direct access via Deref/DerefMut.
///
/// # Examples
///
/// ```
/// use docmigrate_core::JsonValue;
///
/// let doc: JsonValue = r#"{"Person":{"Name":"X"}}"#.parse().unwrap();
/// assert!(doc.is_object());
/// assert_eq!(doc.to_json_string(), r#"{"Person":{"Name":"X"}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct JsonValue(serde_json::Value);

impl JsonValue {
    /// Get a reference to the underlying serde_json::Value
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }

    /// Get a mutable reference to the underlying serde_json::Value
    pub fn as_inner_mut(&mut self) -> &mut serde_json::Value {
        &mut self.0
    }

    /// Serialize to compact JSON string
    ///
    /// Object keys keep their insertion order.
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }

    /// Size of the compact JSON representation in bytes
    pub fn size_bytes(&self) -> usize {
        self.to_json_string().len()
    }

    /// Maximum nesting depth of this value
    ///
    /// Returns 0 for primitives and counts nested objects/arrays.
    pub fn nesting_depth(&self) -> usize {
        fn depth_of(value: &serde_json::Value) -> usize {
            match value {
                serde_json::Value::Null
                | serde_json::Value::Bool(_)
                | serde_json::Value::Number(_)
                | serde_json::Value::String(_) => 0,
                serde_json::Value::Array(arr) => 1 + arr.iter().map(depth_of).max().unwrap_or(0),
                serde_json::Value::Object(obj) => 1 + obj.values().map(depth_of).max().unwrap_or(0),
            }
        }
        depth_of(&self.0)
    }

    /// Validate size and depth limits
    pub fn validate(&self) -> Result<(), LimitError> {
        let size = self.size_bytes();
        if size > MAX_DOCUMENT_SIZE {
            return Err(LimitError::DocumentTooLarge {
                size,
                max: MAX_DOCUMENT_SIZE,
            });
        }
        let depth = self.nesting_depth();
        if depth > MAX_NESTING_DEPTH {
            return Err(LimitError::NestingTooDeep {
                depth,
                max: MAX_NESTING_DEPTH,
            });
        }
        Ok(())
    }
}

impl FromStr for JsonValue {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(JsonValue)
    }
}

impl Deref for JsonValue {
    type Target = serde_json::Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        JsonValue(v)
    }
}

// =============================================================================
// JsonPath
// =============================================================================

/// Error type for JSON path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Non-empty path not starting with `/`
    #[error("path must start with '/': {0}")]
    MissingLeadingSlash(String),
    /// `~` not followed by `0` or `1`
    #[error("invalid escape in pointer token: {0}")]
    InvalidEscape(String),
}

/// An RFC 6901 pointer into a JSON document
///
/// Each reference token names an object property, or an array element when
/// the container is an array and the token is a decimal index. The empty
/// string is the document root.
///
/// # Examples
///
/// ```
/// use docmigrate_core::json::JsonPath;
///
/// let path: JsonPath = "/Person/PersonalData/PlaceOfBirth".parse().unwrap();
/// let (parent, leaf) = path.split_leaf().unwrap();
/// assert_eq!(parent.to_pointer(), "/Person/PersonalData");
/// assert_eq!(leaf, "PlaceOfBirth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    tokens: Vec<String>,
}

impl JsonPath {
    /// The root path
    pub fn root() -> Self {
        Self::default()
    }

    /// Unescaped reference tokens
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Path without its final token (None if root)
    pub fn parent(&self) -> Option<JsonPath> {
        let (_, init) = self.tokens.split_last()?;
        Some(JsonPath {
            tokens: init.to_vec(),
        })
    }

    /// Split into the parent path and the final token
    pub fn split_leaf(&self) -> Option<(JsonPath, String)> {
        let (leaf, init) = self.tokens.split_last()?;
        Some((
            JsonPath {
                tokens: init.to_vec(),
            },
            leaf.clone(),
        ))
    }

    /// Check the path length limit
    pub fn validate(&self) -> Result<(), LimitError> {
        let length = self.tokens.len();
        if length > MAX_PATH_LENGTH {
            return Err(LimitError::PathTooLong {
                length,
                max: MAX_PATH_LENGTH,
            });
        }
        Ok(())
    }

    /// Render as a pointer string (`""` for root)
    pub fn to_pointer(&self) -> String {
        self.tokens
            .iter()
            .map(|token| format!("/{}", token.replace('~', "~0").replace('/', "~1")))
            .collect()
    }
}

fn unescape_token(raw: &str) -> Result<String, PathParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PathParseError::InvalidEscape(raw.to_string())),
        }
    }
    Ok(out)
}

impl FromStr for JsonPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(JsonPath::root());
        }
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| PathParseError::MissingLeadingSlash(s.to_string()))?;
        let tokens = rest
            .split('/')
            .map(unescape_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(JsonPath { tokens })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}

// =============================================================================
// Path Operations
// =============================================================================

/// Get value at path within a JSON document
///
/// Returns None if any token is missing or a container has the wrong type.
///
/// # Examples
///
/// ```
/// use docmigrate_core::json::{get_at_path, JsonPath, JsonValue};
///
/// let doc: JsonValue = r#"{"user":{"scores":[100,95]}}"#.parse().unwrap();
/// let path: JsonPath = "/user/scores/1".parse().unwrap();
/// assert_eq!(get_at_path(&doc, &path).and_then(|v| v.as_i64()), Some(95));
/// assert!(get_at_path(&doc, &"/user/name".parse().unwrap()).is_none());
/// ```
pub fn get_at_path<'a>(value: &'a JsonValue, path: &JsonPath) -> Option<&'a serde_json::Value> {
    path.tokens()
        .iter()
        .try_fold(value.as_inner(), |current, token| match current {
            serde_json::Value::Object(obj) => obj.get(token),
            serde_json::Value::Array(arr) => arr.get(token.parse::<usize>().ok()?),
            _ => None,
        })
}

/// Get mutable reference to value at path within a JSON document
pub fn get_at_path_mut<'a>(
    value: &'a mut JsonValue,
    path: &JsonPath,
) -> Option<&'a mut serde_json::Value> {
    path.tokens()
        .iter()
        .try_fold(value.as_inner_mut(), |current, token| match current {
            serde_json::Value::Object(obj) => obj.get_mut(token),
            serde_json::Value::Array(arr) => arr.get_mut(token.parse::<usize>().ok()?),
            _ => None,
        })
}

/// Delete value at path within a JSON document
///
/// Removes an object key (keeping the order of the remaining keys) or an
/// array element. Returns the removed value, or None when nothing was removed:
/// a missing ancestor, a parent of the wrong type and an absent leaf are all
/// treated the same. Deleting the root is not supported and returns None.
///
/// # Examples
///
/// ```
/// use docmigrate_core::json::{delete_at_path, JsonValue};
///
/// let mut doc: JsonValue = r#"{"a":{"b":1,"c":2}}"#.parse().unwrap();
/// let removed = delete_at_path(&mut doc, &"/a/b".parse().unwrap());
/// assert_eq!(removed.and_then(|v| v.as_i64()), Some(1));
/// assert_eq!(doc.to_json_string(), r#"{"a":{"c":2}}"#);
///
/// assert!(delete_at_path(&mut doc, &"/missing/b".parse().unwrap()).is_none());
/// ```
pub fn delete_at_path(root: &mut JsonValue, path: &JsonPath) -> Option<serde_json::Value> {
    let (parent_path, leaf) = path.split_leaf()?;

    match get_at_path_mut(root, &parent_path)? {
        serde_json::Value::Object(obj) => obj.shift_remove(&leaf),
        serde_json::Value::Array(arr) => {
            let idx = leaf.parse::<usize>().ok()?;
            (idx < arr.len()).then(|| arr.remove(idx))
        }
        _ => None,
    }
}
