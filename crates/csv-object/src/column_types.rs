/*!
# Column Types

The closed set of coercions a column can be loaded with, the shapes in which a
caller may request them, and the per-cell conversion rules.

A request is one of:
- `Absent`: cells stay as strings
- `Uniform(t)`: every column uses `t`
- `PerColumn([t, ...])`: one type per column, length must match the headers

Booleans never use a "non-empty means true" rule: `"False"` must load as
`false`, so they go through [`string_to_bool`].
*/

use crate::{
    errors::{CsvObjectError, CsvObjectResult},
    value::CellValue,
};
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Strings accepted as `true` (compared case-insensitively)
pub const TRUTHY: &[&str] = &["y", "yes", "t", "true", "on", "1"];

/// Strings accepted as `false` (compared case-insensitively)
pub const FALSY: &[&str] = &["n", "no", "f", "false", "off", "0"];

// ================================================================================================
// Column Type
// ================================================================================================

/// Target type of a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    Int,
    Float,
    Str,
    Bool,
}

/// A cell that could not be converted to its column's type
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid literal for {column_type}: '{value}'")]
pub struct ValueFormatError {
    pub value: String,
    pub column_type: ColumnType,
}

impl ColumnType {
    /// Convert a raw cell to this type.
    ///
    /// Numeric conversions ignore surrounding whitespace; `Str` never fails.
    pub fn coerce(self, raw: &str) -> Result<CellValue, ValueFormatError> {
        let coerced = match self {
            ColumnType::Int => raw.trim().parse::<i64>().ok().map(CellValue::Int),
            ColumnType::Float => raw.trim().parse::<f64>().ok().map(CellValue::Float),
            ColumnType::Str => Some(CellValue::Str(raw.to_string())),
            ColumnType::Bool => return string_to_bool(raw).map(CellValue::Bool),
        };

        coerced.ok_or_else(|| ValueFormatError {
            value: raw.to_string(),
            column_type: self,
        })
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }

    /// Zero value used in place of unparseable numeric cells
    pub fn zero(self) -> Option<CellValue> {
        match self {
            ColumnType::Int => Some(CellValue::Int(0)),
            ColumnType::Float => Some(CellValue::Float(0.0)),
            ColumnType::Str | ColumnType::Bool => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Bool => "bool",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = CsvObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(ColumnType::Int),
            "float" | "double" => Ok(ColumnType::Float),
            "str" | "string" => Ok(ColumnType::Str),
            "bool" | "boolean" => Ok(ColumnType::Bool),
            other => Err(CsvObjectError::Config(format!(
                "Unsupported column type '{}', expected one of int, float, str, bool",
                other
            ))),
        }
    }
}

/// Parse a boolean from its common textual spellings
pub fn string_to_bool(raw: &str) -> Result<bool, ValueFormatError> {
    let lowered = raw.to_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(ValueFormatError {
            value: raw.to_string(),
            column_type: ColumnType::Bool,
        })
    }
}

// ================================================================================================
// Requested Column Types
// ================================================================================================

/// The `column_types` load option
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnTypes {
    #[default]
    Absent,
    Uniform(ColumnType),
    PerColumn(Vec<ColumnType>),
}

impl ColumnTypes {
    /// Resolve into one type per column, or `None` when no typing was requested
    pub fn resolve(&self, column_count: usize) -> CsvObjectResult<Option<Vec<ColumnType>>> {
        match self {
            ColumnTypes::Absent => Ok(None),
            ColumnTypes::Uniform(column_type) => Ok(Some(vec![*column_type; column_count])),
            ColumnTypes::PerColumn(types) => {
                if types.len() != column_count {
                    return Err(CsvObjectError::ColumnTypeCount {
                        found: types.len(),
                        expected: column_count,
                    });
                }
                Ok(Some(types.clone()))
            }
        }
    }
}

impl From<ColumnType> for ColumnTypes {
    fn from(column_type: ColumnType) -> Self {
        ColumnTypes::Uniform(column_type)
    }
}

impl From<Vec<ColumnType>> for ColumnTypes {
    fn from(types: Vec<ColumnType>) -> Self {
        ColumnTypes::PerColumn(types)
    }
}

impl From<Option<ColumnType>> for ColumnTypes {
    fn from(column_type: Option<ColumnType>) -> Self {
        column_type.map_or(ColumnTypes::Absent, ColumnTypes::Uniform)
    }
}

/// `""` is absent, `"int"` is uniform, `"int,float,str"` is per-column
impl FromStr for ColumnTypes {
    type Err = CsvObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(ColumnTypes::Absent);
        }
        if !s.contains(',') {
            return s.parse().map(ColumnTypes::Uniform);
        }
        s.split(',')
            .map(ColumnType::from_str)
            .collect::<CsvObjectResult<Vec<_>>>()
            .map(ColumnTypes::PerColumn)
    }
}

impl<'de> Deserialize<'de> for ColumnTypes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ColumnTypesVisitor)
    }
}

struct ColumnTypesVisitor;

impl<'de> Visitor<'de> for ColumnTypesVisitor {
    type Value = ColumnTypes;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a type tag, a list of type tags, or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ColumnTypes::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ColumnTypes::Absent)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<ColumnType>()
            .map(ColumnTypes::Uniform)
            .map_err(E::custom)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut types = Vec::new();
        while let Some(tag) = seq.next_element::<String>()? {
            types.push(
                tag.parse::<ColumnType>()
                    .map_err(<A::Error as de::Error>::custom)?,
            );
        }
        Ok(ColumnTypes::PerColumn(types))
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_bool_accepts_known_spellings() {
        for s in ["y", "yes", "t", "true", "on", "1", "Y", "TRUE"] {
            assert_eq!(string_to_bool(s), Ok(true), "{}", s);
        }
        for s in ["n", "no", "f", "false", "off", "0", "N", "FALSE"] {
            assert_eq!(string_to_bool(s), Ok(false), "{}", s);
        }
    }

    #[test]
    fn test_string_to_bool_rejects_other_strings() {
        for s in ["", "maybe", "2", "truthy", " yes"] {
            let err = string_to_bool(s).unwrap_err();
            assert_eq!(err.value, s);
            assert_eq!(err.column_type, ColumnType::Bool);
        }
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(ColumnType::Int.coerce(" 12 "), Ok(CellValue::Int(12)));
        assert_eq!(ColumnType::Int.coerce("-3"), Ok(CellValue::Int(-3)));
        assert_eq!(ColumnType::Float.coerce("1e3"), Ok(CellValue::Float(1000.0)));
        assert!(ColumnType::Int.coerce("1.5").is_err());
        assert!(ColumnType::Int.coerce("").is_err());
        assert!(ColumnType::Float.coerce("abc").is_err());
        assert!(ColumnType::Int.coerce("99999999999999999999").is_err());
    }

    #[test]
    fn test_coerce_str_and_bool() {
        assert_eq!(ColumnType::Str.coerce(""), Ok(CellValue::from("")));
        assert_eq!(ColumnType::Bool.coerce("False"), Ok(CellValue::Bool(false)));
        assert!(ColumnType::Bool.coerce("nope").is_err());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(ColumnType::Int.zero(), Some(CellValue::Int(0)));
        assert_eq!(ColumnType::Float.zero(), Some(CellValue::Float(0.0)));
        assert_eq!(ColumnType::Str.zero(), None);
        assert!(!ColumnType::Bool.is_numeric());
    }

    #[test]
    fn test_resolve_shapes() {
        assert_eq!(ColumnTypes::Absent.resolve(3).unwrap(), None);
        assert_eq!(
            ColumnTypes::Uniform(ColumnType::Bool).resolve(2).unwrap(),
            Some(vec![ColumnType::Bool, ColumnType::Bool])
        );
        let per_column = ColumnTypes::PerColumn(vec![ColumnType::Int, ColumnType::Str]);
        assert_eq!(
            per_column.resolve(2).unwrap(),
            Some(vec![ColumnType::Int, ColumnType::Str])
        );
    }

    #[test]
    fn test_resolve_length_mismatch() {
        let types = ColumnTypes::PerColumn(vec![ColumnType::Int; 2]);
        match types.resolve(3) {
            Err(CsvObjectError::ColumnTypeCount { found, expected }) => {
                assert_eq!(found, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let err = ColumnTypes::PerColumn(vec![ColumnType::Int; 4])
            .resolve(3)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("found 4"));
        assert!(message.contains("expected 3"));
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("".parse::<ColumnTypes>().unwrap(), ColumnTypes::Absent);
        assert_eq!(
            "Integer".parse::<ColumnTypes>().unwrap(),
            ColumnTypes::Uniform(ColumnType::Int)
        );
        assert_eq!(
            "int, float,bool".parse::<ColumnTypes>().unwrap(),
            ColumnTypes::PerColumn(vec![ColumnType::Int, ColumnType::Float, ColumnType::Bool])
        );
        assert!("int,complex".parse::<ColumnTypes>().is_err());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let absent: ColumnTypes = serde_yaml::from_str("~").unwrap();
        assert_eq!(absent, ColumnTypes::Absent);

        let uniform: ColumnTypes = serde_yaml::from_str("float").unwrap();
        assert_eq!(uniform, ColumnTypes::Uniform(ColumnType::Float));

        let per_column: ColumnTypes = serde_yaml::from_str("[int, str]").unwrap();
        assert_eq!(
            per_column,
            ColumnTypes::PerColumn(vec![ColumnType::Int, ColumnType::Str])
        );
    }

    #[test]
    fn test_deserialize_rejects_unsupported_kind() {
        let err = serde_yaml::from_str::<ColumnTypes>("5").unwrap_err();
        assert!(err.to_string().contains("integer"));

        let err = serde_yaml::from_str::<ColumnTypes>("{a: int}").unwrap_err();
        assert!(err.to_string().contains("map"));
    }
}
