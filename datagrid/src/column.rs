//! GridRow trait and Column types.

use std::fmt;
use std::sync::Arc;

use crate::responsive::ResponsiveMode;
use crate::value::{CellValue, RowKey};

/// Extracts a [`CellValue`] from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Renders a row's cell for display.
pub type Renderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Trait for records that can be displayed as rows in a data table.
///
/// # Examples
///
/// ```
/// use datagrid::{GridRow, RowKey};
///
/// #[derive(Clone)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl GridRow for User {
///     fn key(&self) -> RowKey {
///         RowKey::Int(self.id)
///     }
/// }
/// ```
pub trait GridRow: Clone {
    /// Unique identifier for this row.
    ///
    /// Must be pure: the same row always yields the same key, and no two rows
    /// in one collection share a key.
    fn key(&self) -> RowKey;
}

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Responsive priority of a column.
///
/// Columns without a priority are always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    /// Always visible.
    P1,
    /// Hidden in mobile mode.
    P2,
    /// Hidden in mobile and compact modes.
    P3,
}

impl Priority {
    /// Whether a column with this priority is shown in `mode`.
    pub fn is_visible_in(self, mode: ResponsiveMode) -> bool {
        match self {
            Priority::P1 => true,
            Priority::P2 => mode != ResponsiveMode::Mobile,
            Priority::P3 => mode == ResponsiveMode::Full,
        }
    }
}

/// Column configuration.
///
/// Columns define one presented attribute of a row: an id used by sort and
/// filter state, a header label, and an accessor producing the cell value.
///
/// # Examples
///
/// ```
/// use datagrid::{CellValue, Column, GridRow, Priority, RowKey};
///
/// #[derive(Clone)]
/// struct Host {
///     id: i64,
///     domain: String,
///     port: u16,
/// }
///
/// impl GridRow for Host {
///     fn key(&self) -> RowKey {
///         RowKey::Int(self.id)
///     }
/// }
///
/// let columns = vec![
///     Column::new("domain", "Domain", |h: &Host| h.domain.as_str().into())
///         .sortable()
///         .priority(Priority::P1),
///     Column::new("port", "Port", |h: &Host| CellValue::from(h.port)).priority(Priority::P3),
/// ];
/// # let _ = columns;
/// ```
pub struct Column<T> {
    /// Unique column id.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Responsive priority, `None` means always visible.
    pub priority: Option<Priority>,
    /// Horizontal alignment.
    pub align: Alignment,
    accessor: Accessor<T>,
    render: Option<Renderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            priority: None,
            align: Alignment::Left,
            accessor: Arc::new(accessor),
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the responsive priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a display renderer. Without one the stringified value is shown.
    pub fn render(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Evaluate the accessor for a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for a row.
    pub fn display(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }

    /// Whether this column is shown in `mode`.
    pub fn is_visible_in(&self, mode: ResponsiveMode) -> bool {
        self.priority.is_none_or(|p| p.is_visible_in(mode))
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            priority: self.priority,
            align: self.align,
            accessor: Arc::clone(&self.accessor),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("priority", &self.priority)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

/// Find a column by id.
pub(crate) fn find_column<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.id == id)
}
