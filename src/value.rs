//! Property list value representation.

use indexmap::IndexMap;
use std::fmt;

/// A parsed old-style property list value.
///
/// The ASCII plist grammar has no native integer, float, boolean, or date
/// literal: every non-container leaf other than hex data is a string, and
/// coercing a string to a richer type is the caller's concern.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Hex data: one element per hexadecimal digit of the literal, each in
    /// `0..=15`, in input order. `<0a3f>` is `[0, 10, 3, 15]`, never the
    /// packed bytes `[0x0a, 0x3f]` — re-encoding each element as a single
    /// lowercase hex digit reproduces the original digit string.
    Data(Vec<u8>),
    /// Array of values.
    Array(Vec<Value>),
    /// Dictionary with insertion-ordered keys. A repeated key keeps its
    /// first position and takes the last value.
    Dict(IndexMap<String, Value>),
}

impl Value {
    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the hex digit values if this is a `Data`.
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(d) => Some(d),
            _ => None,
        }
    }

    /// Returns a reference to the items if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a reference to the entries if this is a `Dict`.
    pub fn as_dict(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Data(digits) => {
                write!(f, "<")?;
                for d in digits {
                    write!(f, "{:x}", d)?;
                }
                write!(f, ">")
            }
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Dict(entries) => f.debug_map().entries(entries).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Dict(entries)
    }
}
