//! Client-side data table engine
//!
//! Search, filter, sort, group, paginate and select over an in-memory
//! collection, with responsive column visibility and bulk actions on the
//! selection. Rendering is left to the caller; [`DataTable::view`] produces
//! everything a renderer needs.

pub mod bulk;
pub mod column;
pub mod error;
pub mod filter;
pub mod group;
pub mod page;
pub mod preferences;
pub mod responsive;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;

pub use column::{Alignment, Column, GridRow, Priority};
pub use error::{BulkActionError, BulkError, PreferenceError, TableError};
pub use responsive::{Breakpoints, CardBreakpoint, ResponsiveMode};
pub use sort::{SortDirection, SortState};
pub use table::{DataTable, TableConfig, TableState, TableView};
pub use value::{CellValue, RowKey};

pub mod prelude {
    pub use crate::bulk::{BulkAction, BulkRequest};
    pub use crate::column::{Alignment, Column, GridRow, Priority};
    pub use crate::error::{BulkActionError, BulkError, PreferenceError, TableError};
    pub use crate::filter::{
        FilterDef, FilterKind, FilterMode, FilterState, FilterStrategies, FilterValue,
        SearchConfig,
    };
    pub use crate::group::{Group, GroupConfig};
    pub use crate::page::PageInfo;
    pub use crate::preferences::{MemoryPreferences, PreferenceStore, Preferences};
    pub use crate::responsive::{
        Breakpoints, CardBreakpoint, ResponsiveLayout, ResponsiveMode, Viewport,
    };
    pub use crate::selection::{Selection, SelectionStatus};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::table::{
        DataTable, PageSection, PatchState, TableConfig, TableId, TableState, TableView,
    };
    pub use crate::value::{CellValue, RowKey};
}
