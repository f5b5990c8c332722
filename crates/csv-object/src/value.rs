/*!
# Cell Values

A loaded cell is either the raw string from the source or the result of a
successful coercion to one of the supported column types.
*/

use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell of row or column data.
///
/// Serializes untagged; booleans serialize as `True`/`False`, the same text
/// [`Display`](fmt::Display) and the CSV writer produce.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl CellValue {
    /// The raw string if this cell was never typed (or fell back to a string)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, CellValue::Str(_))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the decimal point on whole numbers (1.0, not 1)
            CellValue::Float(x) => write!(f, "{:?}", x),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Str(s) => f.write_str(s),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(x) => serializer.serialize_f64(*x),
            CellValue::Bool(_) => serializer.collect_str(self),
            CellValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Str(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Str(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}
