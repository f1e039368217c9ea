//! Row grouping with per-group expand/collapse state.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Derives a group id from a row.
pub type GroupBy<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Builds a group's label from its id and members.
pub type GroupLabel<T> = Arc<dyn Fn(&str, &[&T]) -> String + Send + Sync>;

/// How a table partitions its rows into groups.
pub struct GroupConfig<T> {
    group_by: GroupBy<T>,
    group_label: Option<GroupLabel<T>>,
    /// Whether groups start expanded. Decides what the tracked id set means.
    pub default_expanded: bool,
}

impl<T> GroupConfig<T> {
    /// Groups by `group_by`, labelled by id, expanded by default.
    pub fn new(group_by: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            group_by: Arc::new(group_by),
            group_label: None,
            default_expanded: true,
        }
    }

    /// Sets the label builder.
    pub fn label(mut self, label: impl Fn(&str, &[&T]) -> String + Send + Sync + 'static) -> Self {
        self.group_label = Some(Arc::new(label));
        self
    }

    /// Sets the default expansion policy.
    pub fn default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    /// Group id of a row.
    pub fn group_id(&self, row: &T) -> String {
        (self.group_by)(row)
    }

    fn group_label(&self, id: &str, items: &[&T]) -> String {
        match &self.group_label {
            Some(label) => label(id, items),
            None => id.to_string(),
        }
    }
}

impl<T> Clone for GroupConfig<T> {
    fn clone(&self) -> Self {
        Self {
            group_by: Arc::clone(&self.group_by),
            group_label: self.group_label.clone(),
            default_expanded: self.default_expanded,
        }
    }
}

impl<T> fmt::Debug for GroupConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupConfig")
            .field("default_expanded", &self.default_expanded)
            .finish_non_exhaustive()
    }
}

/// Expansion state of groups.
///
/// Under the default-expanded policy `tracked` lists collapsed group ids;
/// under the default-collapsed policy it lists expanded ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupExpansion {
    tracked: HashSet<String>,
    default_expanded: bool,
}

impl GroupExpansion {
    /// Creates an empty expansion state under the given policy.
    pub fn new(default_expanded: bool) -> Self {
        Self {
            tracked: HashSet::new(),
            default_expanded,
        }
    }

    /// Whether the group is currently expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.tracked.contains(id) != self.default_expanded
    }

    /// Flips one group. Returns the new expanded state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.tracked.remove(id) {
            self.tracked.insert(id.to_string());
        }
        self.is_expanded(id)
    }

    /// Expands every group among `ids`.
    pub fn expand_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        if self.default_expanded {
            self.tracked.clear();
        } else {
            self.tracked.extend(ids.into_iter().map(str::to_string));
        }
    }

    /// Collapses every group among `ids`.
    pub fn collapse_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        if self.default_expanded {
            self.tracked.extend(ids.into_iter().map(str::to_string));
        } else {
            self.tracked.clear();
        }
    }

    /// Ids in the tracking set.
    pub fn tracked(&self) -> &HashSet<String> {
        &self.tracked
    }
}

/// A transient bucket of rows sharing a group id.
#[derive(Debug)]
pub struct Group<'a, T> {
    pub id: String,
    pub label: String,
    pub items: Vec<&'a T>,
    pub is_expanded: bool,
}

impl<T> Clone for Group<'_, T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            items: self.items.clone(),
            is_expanded: self.is_expanded,
        }
    }
}

/// Partitions rows into groups in order of first appearance.
///
/// Rows keep their relative order inside each group; groups are not sorted
/// by label.
pub fn group_items<'a, T>(
    items: &[&'a T],
    config: &GroupConfig<T>,
    expansion: &GroupExpansion,
) -> Vec<Group<'a, T>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<&'a T>)> = Vec::new();

    for &item in items {
        let id = config.group_id(item);
        match index.get(&id) {
            Some(&i) => buckets[i].1.push(item),
            None => {
                index.insert(id.clone(), buckets.len());
                buckets.push((id, vec![item]));
            }
        }
    }

    buckets
        .into_iter()
        .map(|(id, items)| Group {
            label: config.group_label(&id, &items),
            is_expanded: expansion.is_expanded(&id),
            id,
            items,
        })
        .collect()
}

/// Concatenates the rows of expanded groups, in group order.
pub fn flatten<'a, T>(groups: &[Group<'a, T>]) -> Vec<&'a T> {
    groups
        .iter()
        .filter(|g| g.is_expanded)
        .flat_map(|g| g.items.iter().copied())
        .collect()
}
