//! Named filter strategies and per-table filter modes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::column::{Column, find_column};

use super::{FilterState, FilterValue};

/// Predicate for one named filter, given the item and the active value.
pub type FilterPredicate<T> = Arc<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

/// Predicate owning the whole filter decision for an item.
pub type CustomFilter<T> = Arc<dyn Fn(&T, &FilterState) -> bool + Send + Sync>;

/// Lookup table of named filter predicates.
///
/// Active filters whose id has a registered strategy use it; every other
/// active filter falls back to strict equality against the column with the
/// same id. Filters naming neither are ignored.
///
/// # Example
///
/// ```
/// use datagrid::filter::{FilterStrategies, bool_field};
///
/// #[derive(Clone)]
/// struct User {
///     is_disabled: bool,
/// }
///
/// let strategies = FilterStrategies::new()
///     .with("is_disabled", bool_field(|u: &User| u.is_disabled));
/// assert!(strategies.contains("is_disabled"));
/// ```
pub struct FilterStrategies<T> {
    strategies: HashMap<String, FilterPredicate<T>>,
}

impl<T> Default for FilterStrategies<T> {
    fn default() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }
}

impl<T> Clone for FilterStrategies<T> {
    fn clone(&self) -> Self {
        Self {
            strategies: self.strategies.clone(),
        }
    }
}

impl<T> fmt::Debug for FilterStrategies<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.strategies.keys().collect();
        ids.sort();
        f.debug_struct("FilterStrategies").field("ids", &ids).finish()
    }
}

impl<T> FilterStrategies<T> {
    /// Creates an empty table (generic column equality only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a strategy, builder style.
    pub fn with(mut self, id: impl Into<String>, predicate: FilterPredicate<T>) -> Self {
        self.register(id, predicate);
        self
    }

    /// Registers a strategy, replacing any previous one with the same id.
    pub fn register(&mut self, id: impl Into<String>, predicate: FilterPredicate<T>) {
        self.strategies.insert(id.into(), predicate);
    }

    /// Returns `true` if a strategy is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.strategies.contains_key(id)
    }

    /// Whether `item` passes every active filter.
    pub fn matches(&self, item: &T, filters: &FilterState, columns: &[Column<T>]) -> bool {
        filters.active().all(|(id, value)| match self.strategies.get(id) {
            Some(predicate) => predicate(item, value),
            None => match find_column(columns, id) {
                Some(column) => value.matches_cell(&column.value(item)),
                None => true,
            },
        })
    }
}

/// How a table decides which items pass its filters.
///
/// The two modes are mutually exclusive: a custom function replaces the
/// built-in strategies entirely and is called for every item, even when no
/// filter is active.
pub enum FilterMode<T> {
    /// Named strategies with generic column equality as fallback.
    Builtin(FilterStrategies<T>),
    /// A single function owning every filter decision.
    Custom(CustomFilter<T>),
}

impl<T> Default for FilterMode<T> {
    fn default() -> Self {
        FilterMode::Builtin(FilterStrategies::new())
    }
}

impl<T> Clone for FilterMode<T> {
    fn clone(&self) -> Self {
        match self {
            FilterMode::Builtin(s) => FilterMode::Builtin(s.clone()),
            FilterMode::Custom(f) => FilterMode::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for FilterMode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Builtin(s) => f.debug_tuple("Builtin").field(s).finish(),
            FilterMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T> FilterMode<T> {
    /// Wraps a custom filter function.
    pub fn custom(f: impl Fn(&T, &FilterState) -> bool + Send + Sync + 'static) -> Self {
        FilterMode::Custom(Arc::new(f))
    }

    /// Whether `item` passes the filters.
    pub fn matches(&self, item: &T, filters: &FilterState, columns: &[Column<T>]) -> bool {
        match self {
            FilterMode::Builtin(strategies) => strategies.matches(item, filters, columns),
            FilterMode::Custom(f) => f(item, filters),
        }
    }
}

impl<T> From<FilterStrategies<T>> for FilterMode<T> {
    fn from(strategies: FilterStrategies<T>) -> Self {
        FilterMode::Builtin(strategies)
    }
}

// =============================================================================
// Stock strategies
// =============================================================================

/// Compares the stringified boolean field with the stringified filter value.
///
/// Matches `"true"`/`"false"` select options as well as checkbox values.
pub fn bool_field<T: 'static>(field: impl Fn(&T) -> bool + Send + Sync + 'static) -> FilterPredicate<T> {
    Arc::new(move |item: &T, value: &FilterValue| value.as_text() == field(item).to_string())
}

/// Role membership: the value `role` keeps items having that role, any other
/// value keeps items without it.
pub fn role_membership<T: 'static, F>(role: impl Into<String>, roles: F) -> FilterPredicate<T>
where
    F: Fn(&T) -> &[String] + Send + Sync + 'static,
{
    let role = role.into();
    Arc::new(move |item: &T, value: &FilterValue| {
        let has_role = roles(item).iter().any(|r| *r == role);
        if value.as_text() == role {
            has_role
        } else {
            !has_role
        }
    })
}

/// Exact string comparison; `Many` values test membership.
pub fn text_equals<T: 'static>(field: impl Fn(&T) -> String + Send + Sync + 'static) -> FilterPredicate<T> {
    Arc::new(move |item: &T, value: &FilterValue| {
        let actual = field(item);
        match value {
            FilterValue::Many(values) => values.iter().any(|v| v.as_text() == actual),
            other => other.as_text() == actual,
        }
    })
}

/// Wraps an arbitrary predicate.
pub fn predicate<T: 'static>(
    f: impl Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
) -> FilterPredicate<T> {
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[derive(Clone)]
    struct User {
        roles: Vec<String>,
        is_disabled: bool,
        name: String,
    }

    fn user(roles: &[&str], is_disabled: bool) -> User {
        User {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            is_disabled,
            name: "x".into(),
        }
    }

    fn strategies() -> FilterStrategies<User> {
        FilterStrategies::new()
            .with("roles", role_membership("admin", |u: &User| u.roles.as_slice()))
            .with("is_disabled", bool_field(|u: &User| u.is_disabled))
    }

    #[test]
    fn test_role_membership() {
        let admin = user(&["admin"], false);
        let plain = user(&[], false);
        let s = strategies();

        let filters: FilterState = [("roles", "admin")].into_iter().collect();
        assert!(s.matches(&admin, &filters, &[]));
        assert!(!s.matches(&plain, &filters, &[]));

        let filters: FilterState = [("roles", "user")].into_iter().collect();
        assert!(!s.matches(&admin, &filters, &[]));
        assert!(s.matches(&plain, &filters, &[]));
    }

    #[test]
    fn test_bool_field_accepts_text_and_bool() {
        let disabled = user(&[], true);
        let s = strategies();

        let filters: FilterState = [("is_disabled", "true")].into_iter().collect();
        assert!(s.matches(&disabled, &filters, &[]));

        let filters: FilterState = [("is_disabled", false)].into_iter().collect();
        assert!(!s.matches(&disabled, &filters, &[]));
    }

    #[test]
    fn test_fallback_uses_column_equality() {
        let columns = vec![Column::new("name", "Name", |u: &User| {
            CellValue::from(u.name.as_str())
        })];
        let filters: FilterState = [("name", "x")].into_iter().collect();
        assert!(strategies().matches(&user(&[], false), &filters, &columns));

        let filters: FilterState = [("name", "y")].into_iter().collect();
        assert!(!strategies().matches(&user(&[], false), &filters, &columns));
    }

    #[test]
    fn test_custom_mode_replaces_builtin() {
        let mode: FilterMode<User> = FilterMode::custom(|u: &User, _| !u.is_disabled);
        let filters: FilterState = [("roles", "admin")].into_iter().collect();
        // Custom function ignores the roles filter and is called with no filters too.
        assert!(mode.matches(&user(&[], false), &filters, &[]));
        assert!(!mode.matches(&user(&["admin"], true), &FilterState::new(), &[]));
    }

    #[test]
    fn test_text_equals_membership() {
        let p = text_equals(|u: &User| u.name.clone());
        assert!(p(&user(&[], false), &FilterValue::from(vec!["y", "x"])));
        assert!(!p(&user(&[], false), &FilterValue::from("y")));
    }
}
