//! Data table state machine.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace, warn};

use crate::bulk::{self, BulkAction, BulkRequest};
use crate::column::{Column, GridRow};
use crate::error::{BulkError, TableError};
use crate::filter::{self, FilterDef, FilterState, FilterValue, default_filter_state};
use crate::group::{GroupExpansion, flatten, group_items};
use crate::page::PageInfo;
use crate::preferences::Preferences;
use crate::responsive::{ResponsiveLayout, ResponsiveMode};
use crate::selection::{Selection, SelectionStatus};
use crate::sort::{self, SortState};
use crate::value::RowKey;

use super::config::TableConfig;
use super::patch::{PatchLedger, PatchState};
use super::view::TableView;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Interactive state of a table.
///
/// Everything the user can change lives here; everything shown is derived
/// from it plus the input collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub search: String,
    pub filters: FilterState,
    pub sort: SortState,
    pub page_index: usize,
    pub page_size: usize,
    pub selection: Selection<RowKey>,
    pub grouping_enabled: bool,
    pub expansion: GroupExpansion,
}

impl TableState {
    /// The configured defaults.
    pub fn defaults<T>(config: &TableConfig<T>) -> Self {
        let default_expanded = config.group.as_ref().is_none_or(|g| g.default_expanded);
        Self {
            search: String::new(),
            filters: default_filter_state(&config.filters),
            sort: config.default_sort.clone(),
            page_index: 0,
            page_size: config.page_size,
            selection: Selection::new(),
            grouping_enabled: config.grouping_enabled,
            expansion: GroupExpansion::new(default_expanded),
        }
    }
}

/// A client-side data table session.
///
/// `DataTable<T>` owns an in-memory collection and the interactive state
/// over it:
/// - Free text search and named filters
/// - Single-column sorting with nulls last
/// - Optional grouping with per-group expand/collapse
/// - Pagination
/// - Key-based selection that survives paging and filtering
///
/// Every transition runs synchronously; [`view`](Self::view) runs the
/// pipeline (filter, sort, group and flatten, paginate) against the current
/// state and collection.
///
/// # Example
///
/// ```
/// use datagrid::{CellValue, Column, DataTable, GridRow, RowKey, TableConfig};
///
/// #[derive(Clone)]
/// struct Host {
///     id: i64,
///     domain: String,
/// }
///
/// impl GridRow for Host {
///     fn key(&self) -> RowKey {
///         RowKey::Int(self.id)
///     }
/// }
///
/// let config = TableConfig::new("hosts").with_columns(vec![
///     Column::new("domain", "Domain", |h: &Host| CellValue::from(h.domain.as_str())).sortable(),
/// ]);
/// let mut table = DataTable::new(config).unwrap();
/// table.set_items(vec![
///     Host { id: 1, domain: "b.example.com".into() },
///     Host { id: 2, domain: "a.example.com".into() },
/// ]);
/// table.set_sort("domain");
/// let view = table.view();
/// assert_eq!(view.page_items()[0].id, 2);
/// ```
pub struct DataTable<T: GridRow> {
    id: TableId,
    config: TableConfig<T>,
    items: Vec<T>,
    state: TableState,
    defaults: TableState,
    patches: PatchLedger<T>,
    preferences: Option<Preferences>,
    loading: bool,
    error: Option<String>,
}

impl<T: GridRow> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T: GridRow> DataTable<T> {
    /// Create a table session.
    pub fn new(config: TableConfig<T>) -> Result<Self, TableError> {
        Self::build(config, None)
    }

    /// Create a table session that remembers the grouping toggle.
    ///
    /// The stored value, if any, overrides the configured grouping default.
    pub fn with_preferences(config: TableConfig<T>, preferences: Preferences) -> Result<Self, TableError> {
        Self::build(config, Some(preferences))
    }

    fn build(config: TableConfig<T>, preferences: Option<Preferences>) -> Result<Self, TableError> {
        config.validate()?;

        let id = TableId::new();
        let defaults = TableState::defaults(&config);
        let mut state = defaults.clone();

        if let Some(prefs) = &preferences
            && let Some(key) = &config.grouping_preference_key
            && config.group.is_some()
        {
            match prefs.get::<bool>(key) {
                Ok(Some(enabled)) => {
                    debug!("{} ({}): grouping restored from preference: {}", config.name, id, enabled);
                    state.grouping_enabled = enabled;
                }
                Ok(None) => {}
                Err(e) => warn!("{} ({}): failed to load grouping preference: {}", config.name, id, e),
            }
        }

        Ok(Self {
            id,
            config,
            items: Vec::new(),
            state,
            defaults,
            patches: PatchLedger::default(),
            preferences,
            loading: false,
            error: None,
        })
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the configuration.
    pub fn config(&self) -> &TableConfig<T> {
        &self.config
    }

    /// Get the current interactive state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Get the column definitions.
    pub fn columns(&self) -> &[Column<T>] {
        &self.config.columns
    }

    /// Get the filter definitions.
    pub fn filter_defs(&self) -> &[FilterDef] {
        &self.config.filters
    }

    // -------------------------------------------------------------------------
    // Input collection
    // -------------------------------------------------------------------------

    /// Get the input collection, unfiltered.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the input collection with a fresh snapshot.
    ///
    /// Selection is kept; keys missing from the new snapshot simply resolve
    /// to nothing. Pending speculative patches are discarded since the
    /// snapshot is authoritative.
    pub fn set_items(&mut self, items: Vec<T>) {
        let dropped = self.patches.clear();
        if dropped > 0 {
            debug!("{}: snapshot replaced {} pending patches", self.id, dropped);
        }
        debug!("{}: {} items loaded", self.id, items.len());
        self.items = items;
    }

    // -------------------------------------------------------------------------
    // Search, filters, sort
    // -------------------------------------------------------------------------

    /// Set the search query. Resets to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        debug!("{}: search {:?}", self.id, query);
        self.state.search = query;
        self.state.page_index = 0;
    }

    /// Set (or remove, with `None`) a filter value. Resets to the first page.
    pub fn set_filter(&mut self, id: impl Into<String>, value: Option<FilterValue>) {
        let id = id.into();
        debug!("{}: filter {} = {:?}", self.id, id, value);
        self.state.filters.set(id, value);
        self.state.page_index = 0;
    }

    /// Remove every filter value. Resets to the first page.
    pub fn clear_filters(&mut self) {
        debug!("{}: filters cleared", self.id);
        self.state.filters.clear();
        self.state.page_index = 0;
    }

    /// Sort by a column, flipping the direction if it is already sorted.
    /// Resets to the first page.
    ///
    /// Unknown or unsortable columns are stored but leave the order unchanged.
    pub fn set_sort(&mut self, field: &str) {
        self.state.sort.toggle(field);
        debug!("{}: sort {:?}", self.id, self.state.sort);
        self.state.page_index = 0;
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Go to a page. Out-of-range pages show no rows.
    pub fn set_page(&mut self, page_index: usize) {
        debug!("{}: page {}", self.id, page_index);
        self.state.page_index = page_index;
    }

    /// Change the page size. Resets to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        debug!("{}: page size {}", self.id, page_size);
        self.state.page_size = page_size;
        self.state.page_index = 0;
        Ok(())
    }

    /// Page sizes offered to the user.
    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    /// Flip grouping on or off. Resets to the first page.
    ///
    /// Returns the new grouping state. Tables without a group configuration
    /// never group. The new value is saved to the preference store when one
    /// is configured; a failed save is logged and otherwise ignored.
    pub fn toggle_grouping(&mut self) -> bool {
        if self.config.group.is_none() {
            debug!("{}: grouping toggled without a group configuration", self.id);
            return false;
        }

        self.state.grouping_enabled = !self.state.grouping_enabled;
        self.state.page_index = 0;
        debug!("{}: grouping {}", self.id, self.state.grouping_enabled);

        if let Some(prefs) = &self.preferences
            && let Some(key) = &self.config.grouping_preference_key
            && let Err(e) = prefs.set(key, &self.state.grouping_enabled)
        {
            warn!("{}: failed to save grouping preference: {}", self.id, e);
        }

        self.state.grouping_enabled
    }

    /// Whether grouping is active.
    pub fn is_grouping_enabled(&self) -> bool {
        self.state.grouping_enabled && self.config.group.is_some()
    }

    /// Expand or collapse one group. Returns its new expanded state.
    pub fn toggle_group(&mut self, group_id: &str) -> bool {
        let expanded = self.state.expansion.toggle(group_id);
        debug!("{}: group {:?} expanded = {}", self.id, group_id, expanded);
        expanded
    }

    /// Expand every group.
    pub fn expand_all_groups(&mut self) {
        let ids = self.current_group_ids();
        debug!("{}: expand all {} groups", self.id, ids.len());
        self.state.expansion.expand_all(ids.iter().map(String::as_str));
    }

    /// Collapse every group.
    pub fn collapse_all_groups(&mut self) {
        let ids = self.current_group_ids();
        debug!("{}: collapse all {} groups", self.id, ids.len());
        self.state.expansion.collapse_all(ids.iter().map(String::as_str));
    }

    fn current_group_ids(&self) -> Vec<String> {
        let Some(config) = &self.config.group else {
            return Vec::new();
        };
        let rows = self.sorted_rows();
        group_items(&rows, config, &self.state.expansion)
            .into_iter()
            .map(|g| g.id)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------

    /// Restore every field of the state to its configured default.
    pub fn reset_all(&mut self) {
        debug!("{}: reset", self.id);
        self.state = self.defaults.clone();
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    fn sorted_rows(&self) -> Vec<&T> {
        let filtered = filter::apply(
            &self.items,
            &self.state.search,
            &self.state.filters,
            &self.config.columns,
            &self.config.search,
            &self.config.filter_mode,
        );
        sort::apply(filtered, &self.state.sort, &self.config.columns)
    }

    /// Run the pipeline against the current state.
    pub fn view(&self) -> TableView<'_, T> {
        let rows = self.sorted_rows();

        let groups = match &self.config.group {
            Some(config) if self.state.grouping_enabled => {
                Some(group_items(&rows, config, &self.state.expansion))
            }
            _ => None,
        };
        let display = match &groups {
            Some(groups) => flatten(groups),
            None => rows.clone(),
        };
        let page = PageInfo::new(self.state.page_index, self.state.page_size, display.len());

        trace!(
            "{}: {} items -> {} matched -> {} displayed, page {}..{}",
            self.id,
            self.items.len(),
            rows.len(),
            display.len(),
            page.start,
            page.end
        );

        TableView {
            rows,
            groups,
            display,
            page,
        }
    }

    fn page_keys(&self) -> Vec<RowKey> {
        self.view().page_items().iter().map(|row| row.key()).collect()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle selection of a row by key. Returns `true` if it is now selected.
    pub fn toggle_selection(&mut self, key: RowKey) -> bool {
        let selected = self.state.selection.toggle(key);
        debug!("{}: selection toggled, {} selected", self.id, self.state.selection.len());
        selected
    }

    /// Toggle selection of a row. Returns `true` if it is now selected.
    pub fn toggle_row(&mut self, row: &T) -> bool {
        self.toggle_selection(row.key())
    }

    /// Select every row on the current page, keeping other selections.
    /// Returns the keys that were newly selected.
    pub fn select_all_on_page(&mut self) -> Vec<RowKey> {
        let keys = self.page_keys();
        let added = self.state.selection.select_many(&keys);
        debug!("{}: selected {} rows on page", self.id, added.len());
        added
    }

    /// Deselect every row on the current page, keeping other selections.
    /// Returns the keys that were deselected.
    pub fn deselect_all_on_page(&mut self) -> Vec<RowKey> {
        let keys = self.page_keys();
        let removed = self.state.selection.deselect_many(&keys);
        debug!("{}: deselected {} rows on page", self.id, removed.len());
        removed
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear_selection(&mut self) -> Vec<RowKey> {
        debug!("{}: selection cleared", self.id);
        self.state.selection.clear()
    }

    /// Check if a row is selected by key.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.state.selection.is_selected(key)
    }

    /// Selection status of the current page.
    pub fn page_selection_status(&self) -> SelectionStatus {
        let keys = self.page_keys();
        self.state.selection.status_of(&keys)
    }

    /// Every row on a non-empty current page is selected.
    pub fn is_all_selected_on_page(&self) -> bool {
        self.page_selection_status().is_all()
    }

    /// Some but not all rows on the current page are selected.
    pub fn is_indeterminate_on_page(&self) -> bool {
        self.page_selection_status().is_indeterminate()
    }

    /// Number of selected keys, including keys not currently visible.
    pub fn selected_count(&self) -> usize {
        self.state.selection.len()
    }

    /// All selected keys, sorted.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        let mut keys: Vec<_> = self.state.selection.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Selected rows, resolved from the unfiltered collection in input order.
    ///
    /// Keys whose row no longer exists are skipped.
    pub fn selected_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|row| self.state.selection.is_selected(&row.key()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Speculative patches
    // -------------------------------------------------------------------------

    /// Patch an input row immediately, pending confirmation.
    ///
    /// Returns `None` if no row has `key`. Patching a row twice keeps the
    /// first original. Patches must not change the row's key.
    pub fn speculate(&mut self, key: &RowKey, patch: impl FnOnce(&mut T)) -> Option<PatchState> {
        let index = self.items.iter().position(|row| &row.key() == key)?;
        self.patches.apply(&mut self.items, index, key.clone(), patch);
        debug!("{}: speculative patch on {}", self.id, key);
        Some(PatchState::Pending)
    }

    /// Keep a pending patch.
    pub fn confirm_patch(&mut self, key: &RowKey) -> Option<PatchState> {
        let state = self.patches.confirm(key);
        debug!("{}: patch on {} confirmed: {:?}", self.id, key, state);
        state
    }

    /// Revert a pending patch to the original row.
    pub fn rollback_patch(&mut self, key: &RowKey) -> Option<PatchState> {
        let state = self.patches.rollback(&mut self.items, key);
        debug!("{}: patch on {} rolled back: {:?}", self.id, key, state);
        state
    }

    /// Whether a patch on `key` is pending.
    pub fn is_patch_pending(&self, key: &RowKey) -> bool {
        self.patches.is_pending(key)
    }

    /// Keys with pending patches, sorted.
    pub fn pending_patches(&self) -> Vec<RowKey> {
        self.patches.pending()
    }

    // -------------------------------------------------------------------------
    // Display flags
    // -------------------------------------------------------------------------

    /// Set the pass-through loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Pass-through loading flag.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set the pass-through error message.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Pass-through error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -------------------------------------------------------------------------
    // Responsive layout
    // -------------------------------------------------------------------------

    /// Classify a viewport width with this table's breakpoints.
    pub fn mode_for_width(&self, width: u32) -> ResponsiveMode {
        self.config.breakpoints.classify(width)
    }

    /// Visible columns and table/card choice for a mode.
    pub fn layout(&self, mode: ResponsiveMode) -> ResponsiveLayout<'_, T> {
        ResponsiveLayout::new(&self.config.columns, mode, self.config.card_breakpoint)
    }
}

impl<T: GridRow + Send + Sync + 'static> DataTable<T> {
    /// Resolve the selection for a bulk action.
    ///
    /// The request carries clones of the selected rows and the confirmation
    /// prompt. Selection is left untouched.
    pub fn prepare_bulk(&self, action: &dyn BulkAction<T>) -> Result<BulkRequest<T>, BulkError> {
        let selected: Vec<T> = self.selected_items().into_iter().cloned().collect();
        bulk::prepare(action, selected)
    }
}
