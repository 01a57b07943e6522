//! Field-keyed database rows.

use std::fmt;

/// A single cell as returned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL `NULL`.
    Null,
    /// Integer column value.
    Integer(i64),
    /// Floating point column value.
    Real(f64),
    /// Text column value.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl CellValue {
    /// Integer view, used for `COUNT(*)` results.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Real(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// One row, with columns in result-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, CellValue)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    pub fn push(&mut self, name: impl Into<String>, value: CellValue) {
        self.columns.push((name.into(), value));
    }

    /// Builder form of [`Record::push`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(name, value.into());
        self
    }

    /// Looks up a column by name. Names compare case-insensitively, matching
    /// SQL identifier rules.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Projects the record onto `fields`, rendering each cell. Missing columns
    /// render empty.
    #[must_use]
    pub fn project<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        fields
            .into_iter()
            .map(|field| self.get(field).map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    /// Value of the first column.
    #[must_use]
    pub fn first(&self) -> Option<&CellValue> {
        self.columns.first().map(|(_, value)| value)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_in_field_order() {
        let record = Record::new()
            .with("Cost", 49.99)
            .with("ServiceID", 1_i64)
            .with("SName", "OilChange");

        assert_eq!(
            record.project(["ServiceID", "SName", "Cost"]),
            vec!["1", "OilChange", "49.99"]
        );
    }

    #[test]
    fn test_project_missing_and_null() {
        let mut record = Record::new();
        record.push("Middle", CellValue::Null);

        assert_eq!(record.project(["Middle", "Lname"]), vec!["", ""]);
    }

    #[test]
    fn test_get_ignores_case() {
        let record = Record::new().with("c", 4_i64);
        assert_eq!(record.get("C"), Some(&CellValue::Integer(4)));
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(CellValue::Integer(7).as_i64(), Some(7));
        assert_eq!(CellValue::from(" 12 ").as_i64(), Some(12));
        assert_eq!(CellValue::Real(3.0).as_i64(), Some(3));
        assert_eq!(CellValue::Real(3.5).as_i64(), None);
        assert_eq!(CellValue::Null.as_i64(), None);
    }
}
