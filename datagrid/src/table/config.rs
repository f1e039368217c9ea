//! Table configuration.

use std::collections::HashSet;
use std::fmt;

use crate::column::{Column, find_column};
use crate::error::TableError;
use crate::filter::{FilterDef, FilterMode, SearchConfig};
use crate::group::GroupConfig;
use crate::responsive::{Breakpoints, CardBreakpoint};
use crate::sort::SortState;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Configuration for one table session.
///
/// Columns, filters and grouping are fixed for the lifetime of the session.
///
/// # Example
///
/// ```
/// use datagrid::{CellValue, Column, SortState, TableConfig};
///
/// #[derive(Clone)]
/// struct Host {
///     domain: String,
/// }
///
/// let config = TableConfig::new("proxy_hosts")
///     .with_columns(vec![
///         Column::new("domain", "Domain", |h: &Host| CellValue::from(h.domain.as_str())).sortable(),
///     ])
///     .with_default_sort(SortState::asc("domain"))
///     .with_page_size(10);
/// assert!(config.validate().is_ok());
/// ```
pub struct TableConfig<T> {
    /// Name used in logs and as the default preference namespace.
    pub name: String,
    pub columns: Vec<Column<T>>,
    pub filters: Vec<FilterDef>,
    pub filter_mode: FilterMode<T>,
    pub search: SearchConfig<T>,
    pub group: Option<GroupConfig<T>>,
    pub default_sort: SortState,
    /// Default: 25
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Whether grouping starts enabled (unless a stored preference says otherwise).
    pub grouping_enabled: bool,
    /// Preference key remembering the grouping toggle.
    pub grouping_preference_key: Option<String>,
    pub breakpoints: Breakpoints,
    pub card_breakpoint: CardBreakpoint,
}

impl<T> TableConfig<T> {
    /// Creates an empty configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            filter_mode: FilterMode::default(),
            search: SearchConfig::default(),
            group: None,
            default_sort: SortState::none(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            grouping_enabled: false,
            grouping_preference_key: None,
            breakpoints: Breakpoints::default(),
            card_breakpoint: CardBreakpoint::default(),
        }
    }

    /// Sets the columns.
    pub fn with_columns(mut self, columns: Vec<Column<T>>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the filter definitions.
    pub fn with_filters(mut self, filters: Vec<FilterDef>) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the filter mode.
    pub fn with_filter_mode(mut self, mode: impl Into<FilterMode<T>>) -> Self {
        self.filter_mode = mode.into();
        self
    }

    /// Sets the search configuration.
    pub fn with_search(mut self, search: SearchConfig<T>) -> Self {
        self.search = search;
        self
    }

    /// Sets the grouping configuration.
    pub fn with_group(mut self, group: GroupConfig<T>) -> Self {
        self.group = Some(group);
        self
    }

    /// Sets the default sort.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = sort;
        self
    }

    /// Sets the default page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets whether grouping starts enabled.
    pub fn with_grouping_enabled(mut self, enabled: bool) -> Self {
        self.grouping_enabled = enabled;
        self
    }

    /// Remembers the grouping toggle under `key`.
    pub fn with_grouping_preference(mut self, key: impl Into<String>) -> Self {
        self.grouping_preference_key = Some(key.into());
        self
    }

    /// Sets the responsive breakpoints.
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Sets the card breakpoint.
    pub fn with_card_breakpoint(mut self, card_breakpoint: CardBreakpoint) -> Self {
        self.card_breakpoint = card_breakpoint;
        self
    }

    /// Checks the configuration for contradictions.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }

        if !self.breakpoints.is_valid() {
            return Err(TableError::InvalidBreakpoints {
                mobile_max: self.breakpoints.mobile_max,
                compact_max: self.breakpoints.compact_max,
            });
        }

        if let Some(field) = &self.default_sort.field
            && find_column(&self.columns, field).is_none()
        {
            return Err(TableError::UnknownSortColumn(field.clone()));
        }

        if self.grouping_enabled && self.group.is_none() {
            return Err(TableError::GroupingWithoutConfig);
        }

        Ok(())
    }
}

impl<T> fmt::Debug for TableConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .field("filter_mode", &self.filter_mode)
            .field("search", &self.search)
            .field("group", &self.group)
            .field("default_sort", &self.default_sort)
            .field("page_size", &self.page_size)
            .field("grouping_enabled", &self.grouping_enabled)
            .field("breakpoints", &self.breakpoints)
            .field("card_breakpoint", &self.card_breakpoint)
            .finish_non_exhaustive()
    }
}
