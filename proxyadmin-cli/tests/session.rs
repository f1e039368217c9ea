use clap::Parser;
use datagrid::preferences::{MemoryPreferences, Preferences};
use proxyadmin_cli::args::Cli;
use proxyadmin_cli::error::CliError;
use proxyadmin_cli::session;

fn fixture(name: &str) -> String {
    format!(
        "{}/../proxyadmin-lib/tests/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

fn cli(page: &str, fixture_name: &str, extra: &[&str]) -> Cli {
    let input = fixture(fixture_name);
    let mut argv = vec!["proxyadmin", page, "--input", input.as_str(), "--no-persist"];
    argv.extend_from_slice(extra);
    Cli::try_parse_from(argv).unwrap()
}

fn run(page: &str, fixture_name: &str, extra: &[&str]) -> String {
    session::run(&cli(page, fixture_name, extra), None).unwrap()
}

fn line_with<'a>(output: &'a str, needle: &str) -> &'a str {
    output.lines().find(|l| l.contains(needle)).unwrap()
}

#[test]
fn test_full_width_table() {
    let output = run("proxy-hosts", "proxy_hosts", &[]);
    assert!(output.starts_with("Proxy Hosts (full view)"));
    assert!(output.contains("SSL: all | Status: all | Group by domain: off"));
    assert!(line_with(&output, "Domain ↑").contains("Destination"));
    assert!(output.contains("1-4 of 4 | page 1 of 1 | per page: 10 [25] 50 100"));

    let rows: Vec<&str> = output.lines().filter(|l| l.starts_with('□')).collect();
    assert_eq!(rows.len(), 5);
    assert!(rows[1].contains("api.example.com"));
}

#[test]
fn test_mobile_width_renders_cards() {
    let output = run("proxy-hosts", "proxy_hosts", &["--width", "375"]);
    assert!(output.starts_with("Proxy Hosts (mobile view)"));
    assert!(output.contains("□ app.example.com, www.app.example.com"));
    assert!(output.contains("    Status: Online"));
    assert!(!output.contains("Destination"));
}

#[test]
fn test_filters_and_empty_state() {
    let output = run("proxy-hosts", "proxy_hosts", &["--filter", "ssl=forced"]);
    assert!(output.contains("SSL: forced"));
    assert!(output.contains("1-1 of 1"));

    let output = run("proxy-hosts", "proxy_hosts", &["--search", "nothing-matches"]);
    assert!(output.contains("No records match the current search and filters."));
    assert!(output.contains("0 of 0"));
}

#[test]
fn test_disable_selected_hosts() {
    let output = run(
        "proxy-hosts",
        "proxy_hosts",
        &["--select", "1", "--select", "4", "--action", "disable"],
    );
    assert!(output.contains("Disable: 2 record(s) done"));
    assert!(line_with(&output, "app.example.com").contains("Disabled"));
    assert!(line_with(&output, "status.internal.net").contains("Disabled"));
    assert!(!output.contains("selected"));
}

#[test]
fn test_delete_requires_confirmation() {
    let err = session::run(
        &cli("proxy-hosts", "proxy_hosts", &["--select", "2", "--action", "delete"]),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::ConfirmationRequired(_)));

    let output = run(
        "proxy-hosts",
        "proxy_hosts",
        &["--select", "2", "--action", "delete", "--yes"],
    );
    assert!(output.contains("1-3 of 3"));
    assert!(!output.contains("grafana.internal.net"));
}

#[test]
fn test_action_unavailable_on_page() {
    let err = session::run(
        &cli("audit-log", "audit_log", &["--select", "1", "--action", "delete"]),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CliError::UnsupportedAction(_)));
}

#[test]
fn test_selection_bar_lists_actions() {
    let output = run("users", "users", &["--select-page"]);
    assert!(output.contains("3 selected: Delete"));
    assert!(line_with(&output, "Name ↑").starts_with('■'));
}

#[test]
fn test_grouping_is_remembered() {
    let prefs = Preferences::new(MemoryPreferences::new());

    let first = session::run(
        &cli("proxy-hosts", "proxy_hosts", &["--toggle-grouping"]),
        Some(prefs.clone()),
    )
    .unwrap();
    assert!(first.contains("▼ example.com (2 hosts)"));

    let second = session::run(
        &cli("proxy-hosts", "proxy_hosts", &["--collapse", "internal.net"]),
        Some(prefs),
    )
    .unwrap();
    assert!(second.contains("Group by domain: on"));
    assert!(second.contains("▶ internal.net (2 hosts)"));
    assert!(!second.contains("grafana.internal.net"));
}
