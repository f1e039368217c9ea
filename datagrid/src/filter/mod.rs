//! Filter and search engine.
//!
//! Filtering runs in two independent passes over the raw collection: the free
//! text search and the active filter predicates. An item survives when both
//! accept it. Input order is preserved and the input is never mutated.

mod search;
mod strategy;

pub use search::*;
pub use strategy::*;

use std::collections::BTreeMap;

use crate::column::Column;
use crate::value::CellValue;

/// The value a filter control currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A single string choice.
    Text(String),
    /// A numeric choice.
    Int(i64),
    /// A checkbox.
    Bool(bool),
    /// Several accepted values; matches when any member matches.
    Many(Vec<FilterValue>),
}

impl FilterValue {
    /// Whether this value is one of the "inactive" sentinels (`""`, `"all"`).
    ///
    /// Inactive values are stored but excluded from predicate evaluation.
    pub fn is_inactive(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.is_empty() || s == "all")
    }

    /// Stringified value, as compared by stringly strategies.
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Text(v) => v.clone(),
            FilterValue::Int(v) => v.to_string(),
            FilterValue::Bool(v) => v.to_string(),
            FilterValue::Many(values) => values
                .iter()
                .map(FilterValue::as_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Strict equality against a cell value. `Many` tests membership.
    ///
    /// Text cells compare against the stringified value, so `Int(2024)`
    /// matches the text `"2024"`.
    pub fn matches_cell(&self, cell: &CellValue) -> bool {
        match (self, cell) {
            (FilterValue::Many(values), _) => values.iter().any(|v| v.matches_cell(cell)),
            (value, CellValue::Text(b)) => value.as_text() == *b,
            (FilterValue::Int(a), CellValue::Int(b)) => a == b,
            (FilterValue::Bool(a), CellValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl<V: Into<FilterValue>> From<Vec<V>> for FilterValue {
    fn from(v: Vec<V>) -> Self {
        FilterValue::Many(v.into_iter().map(Into::into).collect())
    }
}

/// Current value of every filter control, keyed by filter id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    values: BTreeMap<String, FilterValue>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or removes (`None`) a filter value. Returns `true` if it changed.
    pub fn set(&mut self, id: impl Into<String>, value: Option<FilterValue>) -> bool {
        let id = id.into();
        match value {
            Some(value) => self.values.insert(id, value.clone()) != Some(value),
            None => self.values.remove(&id).is_some(),
        }
    }

    /// Returns the stored value for a filter, active or not.
    pub fn get(&self, id: &str) -> Option<&FilterValue> {
        self.values.get(id)
    }

    /// Returns the value for a filter only if it is active.
    pub fn active_value(&self, id: &str) -> Option<&FilterValue> {
        self.values.get(id).filter(|v| !v.is_inactive())
    }

    /// Iterates over active filters in id order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_inactive())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over all stored values, including inactive ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Kind of control used to edit a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    Select,
    Checkbox,
    Date,
    Text,
}

/// One selectable option of a filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Descriptive definition of a filter control.
///
/// Definitions carry no predicate logic; that lives in [`FilterMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    pub id: String,
    pub label: String,
    pub kind: FilterKind,
    pub options: Vec<FilterOption>,
    /// Initial (and reset) value.
    pub default_value: Option<FilterValue>,
}

impl FilterDef {
    /// Creates a select filter with no options.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FilterKind::Select,
            options: Vec::new(),
            default_value: None,
        }
    }

    /// Sets the control kind.
    pub fn kind(mut self, kind: FilterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds an option.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FilterOption::new(value, label));
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: impl Into<FilterValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Builds the initial filter state from definitions' defaults.
pub fn default_filter_state(defs: &[FilterDef]) -> FilterState {
    let mut state = FilterState::new();
    for def in defs {
        if let Some(value) = &def.default_value {
            state.set(def.id.clone(), Some(value.clone()));
        }
    }
    state
}

/// Applies search and filters to a collection.
///
/// Returns references to the surviving items in input order.
pub fn apply<'a, T>(
    items: &'a [T],
    query: &str,
    filters: &FilterState,
    columns: &[Column<T>],
    search: &SearchConfig<T>,
    mode: &FilterMode<T>,
) -> Vec<&'a T> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| search.matches(*item, &query, columns))
        .filter(|item| mode.matches(*item, filters, columns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        code: Option<i64>,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |r: &Row| r.name.into()),
            Column::new("code", "Code", |r: &Row| r.code.into()),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Alpha", code: Some(301) },
            Row { name: "beta", code: None },
            Row { name: "gamma", code: Some(302) },
        ]
    }

    #[test]
    fn test_matches_cell_compares_text_cells_as_text() {
        let year = CellValue::from("2024");
        assert!(FilterValue::Int(2024).matches_cell(&year));
        assert!(FilterValue::from("2024").matches_cell(&year));
        assert!(!FilterValue::Int(2025).matches_cell(&year));
        assert!(FilterValue::Bool(true).matches_cell(&CellValue::from("true")));
        assert!(!FilterValue::from("301").matches_cell(&CellValue::Int(301)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = rows();
        let result = apply(
            &rows,
            "AL",
            &FilterState::new(),
            &columns(),
            &SearchConfig::default(),
            &FilterMode::default(),
        );
        assert_eq!(result, vec![&rows[0]]);
    }

    #[test]
    fn test_search_skips_null_cells_but_matches_others() {
        let rows = rows();
        let result = apply(
            &rows,
            "302",
            &FilterState::new(),
            &columns(),
            &SearchConfig::default(),
            &FilterMode::default(),
        );
        assert_eq!(result, vec![&rows[2]]);
    }

    #[test]
    fn test_inactive_values_are_no_ops() {
        let rows = rows();
        for inactive in ["", "all"] {
            let filters: FilterState = [("code", inactive)].into_iter().collect();
            let result = apply(
                &rows,
                "",
                &filters,
                &columns(),
                &SearchConfig::default(),
                &FilterMode::default(),
            );
            assert_eq!(result.len(), rows.len());
        }
    }

    #[test]
    fn test_generic_equality_and_membership() {
        let rows = rows();
        let mut filters = FilterState::new();
        filters.set("code", Some(FilterValue::Int(301)));
        let mode = FilterMode::default();
        let result = apply(&rows, "", &filters, &columns(), &SearchConfig::default(), &mode);
        assert_eq!(result, vec![&rows[0]]);

        filters.set("code", Some(vec![301i64, 302].into()));
        let result = apply(&rows, "", &filters, &columns(), &SearchConfig::default(), &mode);
        assert_eq!(result, vec![&rows[0], &rows[2]]);
    }

    #[test]
    fn test_text_value_never_matches_numeric_cell() {
        let value = FilterValue::Text("301".into());
        assert!(!value.matches_cell(&CellValue::Int(301)));
        assert!(!value.matches_cell(&CellValue::Null));
    }

    #[test]
    fn test_unknown_filter_id_is_no_op() {
        let rows = rows();
        let filters: FilterState = [("missing", "x")].into_iter().collect();
        let result = apply(
            &rows,
            "",
            &filters,
            &columns(),
            &SearchConfig::default(),
            &FilterMode::default(),
        );
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_filter_state_set_reports_change() {
        let mut state = FilterState::new();
        assert!(state.set("ssl", Some("enabled".into())));
        assert!(!state.set("ssl", Some("enabled".into())));
        assert!(state.set("ssl", None));
        assert!(!state.set("ssl", None));
    }

    #[test]
    fn test_default_filter_state() {
        let defs = vec![
            FilterDef::new("status", "Status").default_value("online"),
            FilterDef::new("ssl", "SSL"),
        ];
        let state = default_filter_state(&defs);
        assert_eq!(state.get("status"), Some(&FilterValue::Text("online".into())));
        assert_eq!(state.get("ssl"), None);
    }
}
