//! Cell values and row identity.

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Stable identity of a row.
///
/// Returned by [`GridRow::key`](crate::GridRow::key). Selection and
/// speculative patches are tracked by key, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    /// Integer identity (database ids).
    Int(i64),
    /// String identity (setting names, slugs).
    Text(String),
}

impl RowKey {
    /// Parses a key the way it would be typed by a user: integers become
    /// [`RowKey::Int`], anything else [`RowKey::Text`].
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(RowKey::Int)
            .unwrap_or_else(|_| RowKey::Text(raw.to_string()))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(v) => write!(f, "{}", v),
            RowKey::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

/// A value produced by a column accessor.
///
/// Accessors that cannot produce a value return [`CellValue::Null`]; every
/// engine handles nulls explicitly (skipped by search, sorted last, never
/// equal to a filter value).
///
/// # Example
///
/// ```
/// use datagrid::CellValue;
///
/// let name = CellValue::from("example.com");
/// let port = CellValue::from(8080i64);
/// let missing = CellValue::Null;
/// assert!(missing.is_null());
/// assert_eq!(port.to_search_text().as_deref(), Some("8080"));
/// # let _ = name;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Text(String),
    /// Timestamp.
    DateTime(DateTime<Utc>),
    /// Several values (domain names, roles).
    List(Vec<CellValue>),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Stringified form used by search. `None` for nulls.
    ///
    /// Lists are joined with `,`, timestamps use RFC 3339.
    pub fn to_search_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Relational comparison used by the sort engine.
    ///
    /// Values of the same kind compare naturally; integers and floats compare
    /// numerically with each other. Any other pairing, and NaN, compares as
    /// [`Ordering::Equal`]. Nulls are not handled here, the sort engine places
    /// them before calling this.
    pub fn relational_cmp(&self, other: &CellValue) -> Ordering {
        use CellValue::*;

        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Text(a), Text(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (List(a), List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.relational_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::DateTime(v) => f.write_str(&v.to_rfc3339()),
            CellValue::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<u16> for CellValue {
    fn from(v: u16) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl<V: Into<CellValue>> From<Vec<V>> for CellValue {
    fn from(v: Vec<V>) -> Self {
        CellValue::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_has_no_search_text() {
        assert_eq!(CellValue::Null.to_search_text(), None);
    }

    #[test]
    fn test_list_search_text_joins_with_comma() {
        let value = CellValue::from(vec!["a.com", "b.com"]);
        assert_eq!(value.to_search_text().as_deref(), Some("a.com,b.com"));
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        assert_eq!(
            CellValue::Int(2).relational_cmp(&CellValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Float(3.0).relational_cmp(&CellValue::Int(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_incomparable_kinds_are_equal() {
        assert_eq!(
            CellValue::Text("1".into()).relational_cmp(&CellValue::Int(1)),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::Float(f64::NAN).relational_cmp(&CellValue::Float(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_list_comparison_is_lexicographic() {
        let a = CellValue::from(vec!["a.com", "z.com"]);
        let b = CellValue::from(vec!["b.com"]);
        assert_eq!(a.relational_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_row_key_parse() {
        assert_eq!(RowKey::parse("42"), RowKey::Int(42));
        assert_eq!(RowKey::parse("default-site"), RowKey::Text("default-site".into()));
    }
}
