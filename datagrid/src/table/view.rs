//! Derived view of a table: the result of running the pipeline once.

use crate::group::Group;
use crate::page::PageInfo;

/// What the user sees for the current state.
///
/// Produced by [`DataTable::view`](super::DataTable::view): filter and
/// search, then sort, then (when grouping is on) group and flatten, then
/// paginate.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Rows surviving search and filters, sorted.
    pub rows: Vec<&'a T>,
    /// Groups over `rows`, when grouping is enabled.
    pub groups: Option<Vec<Group<'a, T>>>,
    /// The paginated sequence: `rows`, or the flattened expanded groups.
    pub display: Vec<&'a T>,
    /// Position of the current page within `display`.
    pub page: PageInfo,
}

/// A group header together with the group's rows on the current page.
#[derive(Debug)]
pub struct PageSection<'v, 'a, T> {
    pub group: &'v Group<'a, T>,
    pub items: &'v [&'a T],
}

impl<'a, T> TableView<'a, T> {
    /// Rows on the current page.
    pub fn page_items(&self) -> &[&'a T] {
        &self.display[self.page.start..self.page.end]
    }

    /// Rows matching search and filters, regardless of grouping or paging.
    pub fn total_filtered(&self) -> usize {
        self.rows.len()
    }

    /// Whether grouping is active for this view.
    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Group headers to show on the current page, with their rows.
    ///
    /// Expanded groups appear when they have rows on this page. Collapsed
    /// groups consume no page capacity; their header is shown on the page
    /// where their rows would have started. Empty when grouping is off.
    pub fn page_sections(&self) -> Vec<PageSection<'_, 'a, T>> {
        let Some(groups) = &self.groups else {
            return Vec::new();
        };

        let (start, end) = (self.page.start, self.page.end);
        let total = self.display.len();
        let last_page = self.page.page_index.saturating_add(1) == self.page.page_count.max(1);
        let mut sections = Vec::new();
        let mut cursor = 0;

        for group in groups {
            if group.is_expanded {
                let group_start = cursor;
                let group_end = cursor + group.items.len();
                cursor = group_end;

                let from = group_start.max(start);
                let to = group_end.min(end);
                if from < to {
                    sections.push(PageSection {
                        group,
                        items: &self.display[from..to],
                    });
                }
            } else {
                let on_page = (start <= cursor && cursor < end) || (cursor == total && last_page);
                if on_page {
                    sections.push(PageSection { group, items: &[] });
                }
            }
        }

        sections
    }
}
