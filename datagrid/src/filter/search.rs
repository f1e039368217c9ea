//! Free text search over column values.

use std::fmt;
use std::sync::Arc;

use crate::column::Column;

/// Extra search predicate over nested records, given the lowercased query.
pub type SearchExtension<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Search configuration for a table.
///
/// By default every column takes part in search. `fields` restricts search to
/// the listed column ids; `extension` adds matches from data that is not a
/// column (child records such as access list users).
pub struct SearchConfig<T> {
    fields: Option<Vec<String>>,
    extension: Option<SearchExtension<T>>,
}

impl<T> Default for SearchConfig<T> {
    fn default() -> Self {
        Self {
            fields: None,
            extension: None,
        }
    }
}

impl<T> Clone for SearchConfig<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            extension: self.extension.clone(),
        }
    }
}

impl<T> fmt::Debug for SearchConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("fields", &self.fields)
            .field("extension", &self.extension.is_some())
            .finish()
    }
}

impl<T> SearchConfig<T> {
    /// Creates a config searching every column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts search to the given column ids.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a nested-record predicate. It receives the lowercased query.
    pub fn extension(mut self, extension: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.extension = Some(Arc::new(extension));
        self
    }

    /// Whether `item` matches the already lowercased `query`.
    ///
    /// An empty query matches everything. Null cells are skipped.
    pub fn matches(&self, item: &T, query: &str, columns: &[Column<T>]) -> bool {
        if query.is_empty() {
            return true;
        }

        let column_hit = columns
            .iter()
            .filter(|c| self.includes(&c.id))
            .filter_map(|c| c.value(item).to_search_text())
            .any(|text| text.to_lowercase().contains(query));

        column_hit || self.extension.as_ref().is_some_and(|ext| ext(item, query))
    }

    fn includes(&self, column_id: &str) -> bool {
        self.fields
            .as_ref()
            .is_none_or(|fields| fields.iter().any(|f| f == column_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[derive(Clone)]
    struct List {
        name: String,
        users: Vec<String>,
    }

    fn columns() -> Vec<Column<List>> {
        vec![
            Column::new("name", "Name", |l: &List| CellValue::from(l.name.as_str())),
            Column::new("count", "Users", |l: &List| CellValue::Int(l.users.len() as i64)),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let list = List { name: "Office".into(), users: vec![] };
        assert!(SearchConfig::new().matches(&list, "", &columns()));
    }

    #[test]
    fn test_fields_restrict_columns() {
        let list = List { name: "Office".into(), users: vec!["a".into()] };
        let config = SearchConfig::new().fields(["count"]);
        assert!(!config.matches(&list, "office", &columns()));
        assert!(config.matches(&list, "1", &columns()));
    }

    #[test]
    fn test_extension_searches_nested_records() {
        let list = List {
            name: "Office".into(),
            users: vec!["Bob".into()],
        };
        let config = SearchConfig::new().extension(|l: &List, q| {
            l.users.iter().any(|u| u.to_lowercase().contains(q))
        });
        assert!(config.matches(&list, "bob", &columns()));
        assert!(!config.matches(&list, "alice", &columns()));
    }
}
