//! One table session driven by command-line flags.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use datagrid::bulk::{self, BulkAction};
use datagrid::preferences::Preferences;
use datagrid::{Breakpoints, DataTable, GridRow, RowKey, TableConfig};
use proxyadmin_lib::api::{DeleteAction, DisableAction, EnableAction, EntityApi};
use proxyadmin_lib::error::ApiError;
use proxyadmin_lib::model::{
    AccessList, AuditLogEntry, HostLike, ProxyHost, RedirectionHost, Setting, User,
    parse_snapshot,
};
use proxyadmin_lib::pages::{
    Page, access_lists, audit_log, proxy_hosts, redirection_hosts, settings, users,
};

use crate::args::{Cli, parse_filter};
use crate::error::CliError;
use crate::render::{Frame, render};

/// Stands in for the backend: every call succeeds and is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunApi;

#[async_trait]
impl<T: GridRow + Send + Sync + 'static> EntityApi<T> for DryRunApi {
    async fn enable(&self, item: &T) -> Result<(), ApiError> {
        log::info!("dry run: enable {}", item.key());
        Ok(())
    }

    async fn disable(&self, item: &T) -> Result<(), ApiError> {
        log::info!("dry run: disable {}", item.key());
        Ok(())
    }

    async fn delete(&self, item: &T) -> Result<(), ApiError> {
        log::info!("dry run: delete {}", item.key());
        Ok(())
    }
}

/// Bulk actions of a page, plus the local effect of each on a record.
pub struct PageActions<T: Send + Sync + 'static> {
    actions: Vec<Box<dyn BulkAction<T>>>,
    effect: Option<fn(&mut T, &str)>,
}

impl<T: Send + Sync + 'static> PageActions<T> {
    pub fn none() -> Self {
        Self {
            actions: Vec::new(),
            effect: None,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.label()).collect()
    }

    fn find(&self, id: &str) -> Option<&dyn BulkAction<T>> {
        self.actions.iter().find(|a| a.id() == id).map(|a| a.as_ref())
    }
}

fn host_effect<T: HostLike>(host: &mut T, action: &str) {
    match action {
        "enable" => host.set_enabled(true),
        "disable" => host.set_enabled(false),
        _ => {}
    }
}

/// Enable, disable and delete.
pub fn host_actions<T: HostLike>(api: Arc<dyn EntityApi<T>>) -> PageActions<T> {
    let actions: Vec<Box<dyn BulkAction<T>>> = vec![
        Box::new(EnableAction::new(api.clone())),
        Box::new(DisableAction::new(api.clone())),
        Box::new(DeleteAction::new(api)),
    ];
    PageActions {
        actions,
        effect: Some(host_effect::<T> as fn(&mut T, &str)),
    }
}

/// Delete only.
pub fn delete_actions<T: GridRow + Send + Sync + 'static>(api: Arc<dyn EntityApi<T>>) -> PageActions<T> {
    let actions: Vec<Box<dyn BulkAction<T>>> = vec![Box::new(DeleteAction::new(api))];
    PageActions {
        actions,
        effect: None,
    }
}

fn load_breakpoints(path: &Path) -> Result<Breakpoints, CliError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(CliError::Breakpoints)
}

/// Loads the snapshot named by `cli`, drives the page and renders it.
pub fn run(cli: &Cli, preferences: Option<Preferences>) -> Result<String, CliError> {
    let raw = fs::read_to_string(&cli.input)?;
    let breakpoints = match &cli.breakpoints {
        Some(path) => load_breakpoints(path)?,
        None => Breakpoints::default(),
    };
    let page = cli.entity;

    match page {
        Page::ProxyHosts => drive(
            cli,
            page,
            proxy_hosts::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<ProxyHost>(&raw)?,
            host_actions::<ProxyHost>(Arc::new(DryRunApi)),
            preferences,
        ),
        Page::RedirectionHosts => drive(
            cli,
            page,
            redirection_hosts::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<RedirectionHost>(&raw)?,
            host_actions::<RedirectionHost>(Arc::new(DryRunApi)),
            preferences,
        ),
        Page::AccessLists => drive(
            cli,
            page,
            access_lists::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<AccessList>(&raw)?,
            delete_actions::<AccessList>(Arc::new(DryRunApi)),
            preferences,
        ),
        Page::Users => drive(
            cli,
            page,
            users::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<User>(&raw)?,
            delete_actions::<User>(Arc::new(DryRunApi)),
            preferences,
        ),
        Page::AuditLog => drive(
            cli,
            page,
            audit_log::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<AuditLogEntry>(&raw)?,
            PageActions::none(),
            preferences,
        ),
        Page::Settings => drive(
            cli,
            page,
            settings::table_config().with_breakpoints(breakpoints),
            parse_snapshot::<Setting>(&raw)?,
            PageActions::none(),
            preferences,
        ),
    }
}

/// Runs one session over `items` and renders the result.
pub fn drive<T: GridRow + Send + Sync + 'static>(
    cli: &Cli,
    page: Page,
    config: TableConfig<T>,
    items: Vec<T>,
    actions: PageActions<T>,
    preferences: Option<Preferences>,
) -> Result<String, CliError> {
    let mut table = match preferences {
        Some(prefs) => DataTable::with_preferences(config, prefs)?,
        None => DataTable::new(config)?,
    };
    table.set_items(items);

    apply_flags(&mut table, cli)?;

    let notice = match cli.action {
        Some(kind) => Some(run_action(&mut table, &actions, kind.id(), cli.yes)?),
        None => None,
    };

    let frame = Frame {
        title: page.title(),
        width: cli.width,
        actions: actions.labels(),
        notice,
    };
    Ok(render(&table, &frame))
}

/// Replays the flags as user interactions, in the order a user would click.
pub fn apply_flags<T: GridRow>(table: &mut DataTable<T>, cli: &Cli) -> Result<(), CliError> {
    if cli.toggle_grouping {
        table.toggle_grouping();
    }
    if let Some(query) = &cli.search {
        table.set_search(query.as_str());
    }
    for raw in &cli.filters {
        let (id, value) = parse_filter(raw)?;
        table.set_filter(id, value);
    }
    for field in &cli.sort {
        table.set_sort(field);
    }
    if let Some(size) = cli.page_size {
        table.set_page_size(size)?;
    }

    if cli.collapse_all {
        table.collapse_all_groups();
    }
    for group in &cli.collapse {
        if table.toggle_group(group) {
            // Already collapsed; toggling re-expanded it.
            table.toggle_group(group);
        }
    }

    table.set_page(cli.page.saturating_sub(1));

    for raw in &cli.select {
        table.toggle_selection(RowKey::parse(raw));
    }
    if cli.select_page {
        table.select_all_on_page();
    }
    Ok(())
}

/// Runs a bulk action with optimistic local updates.
///
/// Records are patched before the call and rolled back if it fails. A
/// successful delete removes the records from the collection. Selection is
/// cleared only on success.
pub fn run_action<T: GridRow + Send + Sync + 'static>(
    table: &mut DataTable<T>,
    actions: &PageActions<T>,
    id: &str,
    confirmed: bool,
) -> Result<String, CliError> {
    let action = actions
        .find(id)
        .ok_or_else(|| CliError::UnsupportedAction(id.to_string()))?;
    let request = table.prepare_bulk(action)?;

    if let Some(prompt) = &request.confirmation
        && !confirmed
    {
        return Err(CliError::ConfirmationRequired(prompt.clone()));
    }

    let keys: Vec<RowKey> = request.items.iter().map(|row| row.key()).collect();
    if let Some(effect) = actions.effect {
        for key in &keys {
            table.speculate(key, |row| effect(row, id));
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(bulk::run(action, request)) {
        Ok(count) => {
            for key in &keys {
                table.confirm_patch(key);
            }
            if id == "delete" {
                let remaining: Vec<T> = table
                    .items()
                    .iter()
                    .filter(|row| !keys.contains(&row.key()))
                    .cloned()
                    .collect();
                table.set_items(remaining);
            }
            table.clear_selection();
            Ok(format!("{}: {} record(s) done", action.label(), count))
        }
        Err(e) => {
            for key in &keys {
                table.rollback_patch(key);
            }
            table.set_error(Some(e.to_string()));
            Ok(format!("{} failed", action.label()))
        }
    }
}
