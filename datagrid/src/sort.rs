//! Sort engine.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::column::{Column, find_column};
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort state of a table.
///
/// A `None` field means no sort is applied and input order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// No sort.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending sort on a column.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Header click behavior: re-clicking the sorted column flips the
    /// direction, any other column sorts ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
    }
}

/// Compares two cell values with nulls always last.
///
/// Direction only flips the order of non-null pairs.
pub fn compare_nulls_last(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.relational_cmp(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Sorts items by the column named in `sort`.
///
/// Returns the input unchanged when no field is set, the column does not
/// exist, or it is not sortable. Ties keep their input order.
pub fn apply<'a, T>(items: Vec<&'a T>, sort: &SortState, columns: &[Column<T>]) -> Vec<&'a T> {
    let Some(column) = sort
        .field
        .as_deref()
        .and_then(|field| find_column(columns, field))
        .filter(|c| c.sortable)
    else {
        return items;
    };

    let mut keyed: Vec<(CellValue, &'a T)> = items
        .into_iter()
        .map(|item| (column.value(item), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_nulls_last(a, b, sort.direction));
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Redirect {
        id: i64,
        code: Option<i64>,
    }

    fn columns() -> Vec<Column<Redirect>> {
        vec![
            Column::new("code", "Code", |r: &Redirect| r.code.into()).sortable(),
            Column::new("id", "Id", |r: &Redirect| r.id.into()),
        ]
    }

    fn rows() -> Vec<Redirect> {
        vec![
            Redirect { id: 1, code: Some(301) },
            Redirect { id: 2, code: None },
            Redirect { id: 3, code: Some(302) },
        ]
    }

    fn ids(items: &[&Redirect]) -> Vec<i64> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let rows = rows();
        let asc = apply(rows.iter().collect(), &SortState::asc("code"), &columns());
        assert_eq!(ids(&asc), vec![1, 3, 2]);

        let desc = apply(rows.iter().collect(), &SortState::desc("code"), &columns());
        assert_eq!(ids(&desc), vec![3, 1, 2]);
    }

    #[test]
    fn test_no_field_is_identity() {
        let rows = rows();
        let result = apply(rows.iter().collect(), &SortState::none(), &columns());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_or_unsortable_column_is_identity() {
        let rows = rows();
        let result = apply(rows.iter().collect(), &SortState::desc("missing"), &columns());
        assert_eq!(ids(&result), vec![1, 2, 3]);

        let result = apply(rows.iter().collect(), &SortState::desc("id"), &columns());
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle() {
        let mut sort = SortState::asc("domain");
        sort.toggle("domain");
        assert_eq!(sort, SortState::desc("domain"));
        sort.toggle("status");
        assert_eq!(sort, SortState::asc("status"));
    }
}
