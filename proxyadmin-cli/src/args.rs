use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use datagrid::filter::FilterValue;
use log::LevelFilter;
use proxyadmin_lib::pages::Page;

use crate::error::CliError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "proxyadmin",
    version,
    about = "Browse proxy manager collections from a JSON snapshot",
    long_about = "Loads a JSON snapshot of one admin collection and renders it the way the admin table shows it: searched, filtered, sorted, grouped and paginated.\n\nExamples:\n  proxyadmin proxy-hosts -i hosts.json --filter ssl=forced --sort domain\n  proxyadmin users -i users.json --width 400\n  proxyadmin proxy-hosts -i hosts.json --select 3 --select 7 --action disable"
)]
pub struct Cli {
    #[arg(
        value_name = "PAGE",
        help = "Page to show: proxy-hosts, redirection-hosts, access-lists, users, audit-log, settings."
    )]
    pub entity: Page,

    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help_heading = "Input",
        help = "JSON array of records for the page."
    )]
    pub input: PathBuf,

    #[arg(
        short = 'w',
        long = "width",
        value_name = "PX",
        default_value_t = 1280,
        help_heading = "Layout",
        help = "Viewport width used to pick the responsive mode."
    )]
    pub width: u32,

    #[arg(
        long = "breakpoints",
        value_name = "FILE",
        help_heading = "Layout",
        help = "JSON file with mobile_max and compact_max widths."
    )]
    pub breakpoints: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "Table",
        help = "Free text search."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'f',
        long = "filter",
        value_name = "ID=VALUE",
        action = ArgAction::Append,
        help_heading = "Table",
        help = "Set a filter (repeatable). Comma-separated values match any of them."
    )]
    pub filters: Vec<String>,

    #[arg(
        long = "sort",
        value_name = "COLUMN",
        action = ArgAction::Append,
        help_heading = "Table",
        help = "Click a column header (repeatable; clicking twice sorts descending)."
    )]
    pub sort: Vec<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        default_value_t = 1,
        help_heading = "Table",
        help = "Page number, starting at 1."
    )]
    pub page: usize,

    #[arg(
        long = "page-size",
        value_name = "N",
        help_heading = "Table",
        help = "Rows per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'g',
        long = "toggle-grouping",
        help_heading = "Table",
        help = "Flip group-by-domain. The choice is remembered."
    )]
    pub toggle_grouping: bool,

    #[arg(
        long = "collapse",
        value_name = "GROUP",
        action = ArgAction::Append,
        help_heading = "Table",
        help = "Collapse a group (repeatable)."
    )]
    pub collapse: Vec<String>,

    #[arg(long = "collapse-all", help_heading = "Table", help = "Collapse every group.")]
    pub collapse_all: bool,

    #[arg(
        long = "select",
        value_name = "KEY",
        action = ArgAction::Append,
        help_heading = "Selection",
        help = "Toggle selection of a record by id (repeatable)."
    )]
    pub select: Vec<String>,

    #[arg(
        long = "select-page",
        help_heading = "Selection",
        help = "Select every record on the current page."
    )]
    pub select_page: bool,

    #[arg(
        long = "action",
        value_enum,
        help_heading = "Selection",
        help = "Run a bulk action on the selection."
    )]
    pub action: Option<ActionKind>,

    #[arg(
        short = 'y',
        long = "yes",
        help_heading = "Selection",
        help = "Confirm bulk actions that ask for confirmation."
    )]
    pub yes: bool,

    #[arg(
        long = "no-persist",
        help_heading = "Output",
        help = "Do not read or write remembered preferences."
    )]
    pub no_persist: bool,

    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value_t = LevelFilter::Info,
        help_heading = "Output",
        help = "Log file verbosity (off, error, warn, info, debug, trace)."
    )]
    pub log_level: LevelFilter,
}

/// Bulk actions offered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionKind {
    Enable,
    Disable,
    Delete,
}

impl ActionKind {
    /// Id of the matching bulk action.
    pub fn id(self) -> &'static str {
        match self {
            ActionKind::Enable => "enable",
            ActionKind::Disable => "disable",
            ActionKind::Delete => "delete",
        }
    }
}

/// Numbers and booleans keep their type; text columns still match them by
/// their string form.
fn parse_scalar(raw: &str) -> FilterValue {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return FilterValue::Int(n);
    }
    match raw {
        "true" => FilterValue::Bool(true),
        "false" => FilterValue::Bool(false),
        other => FilterValue::Text(other.to_string()),
    }
}

/// Parses `ID=VALUE`. An empty value clears the filter.
pub fn parse_filter(raw: &str) -> Result<(String, Option<FilterValue>), CliError> {
    let Some((id, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidFilter(raw.to_string()));
    };
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::InvalidFilter(raw.to_string()));
    }

    let value = if value.trim().is_empty() {
        None
    } else if value.contains(',') {
        Some(FilterValue::Many(value.split(',').map(parse_scalar).collect()))
    } else {
        Some(parse_scalar(value))
    };
    Ok((id.to_string(), value))
}
