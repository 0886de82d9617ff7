use super::*;

use std::io::Cursor;

use reqwest::Method;
use serde_json::json;

use crate::console::state::View;
use crate::net::api::CatalogApi;
use crate::net::test_helpers::{ADMIN, FakeCatalog, PUBLIC};

type TestTerminal = Terminal<Cursor<Vec<u8>>, Vec<u8>>;

fn catalog() -> Arc<FakeCatalog> {
    Arc::new(FakeCatalog::new(vec![
        json!({ "id": 1, "name": "Mug", "price": 9.5, "image": "mug.png", "description": "ceramic" }),
    ]))
}

fn shell_for(
    script: &str,
    catalog: &Arc<FakeCatalog>,
    default_username: Option<&str>,
) -> (Shell<Cursor<Vec<u8>>, Vec<u8>>, Arc<TestTerminal>) {
    let terminal = Arc::new(Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()));
    let console = AdminConsole::new(CatalogApi::new(catalog.clone(), ADMIN, PUBLIC), terminal.clone());
    let shell = Shell::new(console, terminal.clone(), default_username.map(ToOwned::to_owned));
    (shell, terminal)
}

fn output(terminal: &TestTerminal) -> String {
    terminal.with_output(|w| String::from_utf8_lossy(w).into_owned())
}

// =============================================================================
// parse_command
// =============================================================================

#[test]
fn parse_blank_line() {
    assert_eq!(parse_command(""), Ok(None));
    assert_eq!(parse_command("   \t"), Ok(None));
}

#[test]
fn parse_simple_commands() {
    let cases = [
        ("logout", ShellCommand::Logout),
        ("list", ShellCommand::List),
        ("ls", ShellCommand::List),
        ("add", ShellCommand::Add),
        ("submit", ShellCommand::Submit),
        ("cancel", ShellCommand::Cancel),
        ("show", ShellCommand::Show),
        ("help", ShellCommand::Help),
        ("?", ShellCommand::Help),
        ("quit", ShellCommand::Quit),
        ("EXIT", ShellCommand::Quit),
    ];
    for (line, expected) in cases {
        assert_eq!(parse_command(line), Ok(Some(expected)), "line {line:?}");
    }
}

#[test]
fn parse_commands_with_arguments() {
    assert_eq!(parse_command("login"), Ok(Some(ShellCommand::Login { username: None })));
    assert_eq!(parse_command("login admin"), Ok(Some(ShellCommand::Login { username: Some("admin".into()) })));
    assert_eq!(parse_command(" edit 7 "), Ok(Some(ShellCommand::Edit { id: "7".into() })));
    assert_eq!(parse_command("delete 3"), Ok(Some(ShellCommand::Delete { id: "3".into() })));
    assert_eq!(parse_command("rm abc"), Ok(Some(ShellCommand::Delete { id: "abc".into() })));
}

#[test]
fn parse_usage_errors() {
    assert_eq!(parse_command("edit"), Err(ParseError::Usage("edit <id>")));
    assert_eq!(parse_command("delete 1 2"), Err(ParseError::Usage("delete <id>")));
    assert_eq!(parse_command("login a b"), Err(ParseError::Usage("login [username]")));
    assert_eq!(parse_command("list now"), Err(ParseError::Usage("list")));
    assert_eq!(parse_command("submit 1"), Err(ParseError::Usage("submit")));
}

#[test]
fn parse_unknown_command() {
    let err = parse_command("frobnicate").unwrap_err();
    assert_eq!(err, ParseError::Unknown("frobnicate".into()));
    assert!(err.to_string().contains("help"));
}

// =============================================================================
// Terminal
// =============================================================================

#[test]
fn terminal_confirm_accepts_yes_variants() {
    let terminal = Terminal::new(Cursor::new(b"y\nYES\nno\n\n".to_vec()), Vec::new());
    assert!(terminal.confirm("Delete?"));
    assert!(terminal.confirm("Delete?"));
    assert!(!terminal.confirm("Delete?"));
    assert!(!terminal.confirm("Delete?"));
    assert!(!terminal.confirm("Delete?"));
    assert!(output(&terminal).contains("Delete? [y/N] "));
}

#[test]
fn terminal_alert_is_written() {
    let terminal = Terminal::new(Cursor::new(Vec::new()), Vec::new());
    terminal.alert("Product deleted.");
    assert_eq!(output(&terminal), "** Product deleted.\n");
}

#[test]
fn terminal_read_line_strips_terminators() {
    let terminal = Terminal::new(Cursor::new(b"hello\r\nlast".to_vec()), Vec::new());
    assert_eq!(terminal.read_line("").unwrap().as_deref(), Some("hello"));
    assert_eq!(terminal.read_line("").unwrap().as_deref(), Some("last"));
    assert_eq!(terminal.read_line("").unwrap(), None);
}

// =============================================================================
// Shell sessions
// =============================================================================

#[tokio::test]
async fn starts_at_login_view_and_stops_at_eof() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("", &catalog, None);
    shell.run().await.unwrap();

    let out = output(&terminal);
    assert!(out.starts_with("== Admin Login =="));
    assert!(catalog.sent().is_empty());
}

#[tokio::test]
async fn dashboard_commands_require_login() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("list\ndelete 1\nquit\n", &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(output(&terminal).matches("Please log in first.").count(), 2);
    assert!(catalog.sent().is_empty());
}

#[tokio::test]
async fn login_then_table_is_shown() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login admin\nhunter2\nquit\n", &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(shell.console().state().view, View::LoggedIn);
    let out = output(&terminal);
    assert!(out.contains("== Product Catalog =="));
    assert!(out.contains("$9.50"));
}

#[tokio::test]
async fn login_uses_default_username() {
    let catalog = catalog();
    let (mut shell, _terminal) = shell_for("login\nhunter2\n", &catalog, Some("admin"));
    shell.run().await.unwrap();

    assert!(shell.console().state().logged_in());
}

#[tokio::test]
async fn login_prompts_for_username() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login\nadmin\nhunter2\n", &catalog, None);
    shell.run().await.unwrap();

    assert!(shell.console().state().logged_in());
    assert!(output(&terminal).contains("username: "));
}

#[tokio::test]
async fn failed_login_shows_error() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login admin\nwrong\n", &catalog, None);
    shell.run().await.unwrap();

    assert!(!shell.console().state().logged_in());
    assert!(output(&terminal).contains("! Invalid credentials"));
}

#[tokio::test]
async fn add_product_flow() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nadd\nLamp\n30\nlamp.png\nbright\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(catalog.product_count(), 2);
    let out = output(&terminal);
    assert!(out.contains("-- Add New Product --"));
    assert!(out.contains("** Product added!"));
    assert!(out.contains("$30.00"));
}

#[tokio::test]
async fn add_with_bad_price_shows_validation() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nadd\nLamp\nfree\n\n\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(catalog.count(&Method::POST, &format!("{ADMIN}/products")), 0);
    assert!(output(&terminal).contains("! Price must be a positive number."));
}

#[tokio::test]
async fn resubmit_after_bad_price_posts_once() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nadd\nLamp\nfree\nlamp.png\n\nsubmit\n\n30\n\n\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    let posts: Vec<_> = catalog
        .sent()
        .into_iter()
        .filter(|e| e.method == Method::POST && e.url == format!("{ADMIN}/products"))
        .collect();
    assert_eq!(posts.len(), 1);
    let body = posts[0].body.as_ref().unwrap();
    assert_eq!(body["name"], "Lamp");
    assert_eq!(body["price"], 30.0);
    assert_eq!(body["image"], "lamp.png");
    assert_eq!(catalog.product_count(), 2);
    assert!(!shell.console().state().form_visible);
    let out = output(&terminal);
    assert!(out.contains("name [Lamp]: "));
    assert!(out.contains("price [free]: "));
    assert!(out.contains("** Product added!"));
}

#[tokio::test]
async fn cancel_discards_rejected_form() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nadd\nLamp\nfree\n\n\ncancel\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(catalog.count(&Method::POST, &format!("{ADMIN}/products")), 0);
    let state = shell.console().state();
    assert!(!state.form_visible);
    assert!(state.form_error.is_empty());
    assert!(output(&terminal).contains("Form: submit to retry, cancel to discard"));
}

#[tokio::test]
async fn submit_without_open_form() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login admin\nhunter2\nsubmit\ncancel\nquit\n", &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(output(&terminal).matches("No product form is open.").count(), 2);
    assert!(catalog.sent().iter().all(|e| e.url != format!("{ADMIN}/products")));
}

#[tokio::test]
async fn add_can_be_cancelled() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nadd\nLamp\n:cancel\nquit\n";
    let (mut shell, _terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(catalog.count(&Method::POST, &format!("{ADMIN}/products")), 0);
    assert!(!shell.console().state().form_visible);
}

#[tokio::test]
async fn edit_keeps_unchanged_fields() {
    let catalog = catalog();
    let script = "login admin\nhunter2\nedit 1\n\n11\n\n\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    let puts: Vec<_> = catalog.sent().into_iter().filter(|e| e.method == Method::PUT).collect();
    assert_eq!(puts.len(), 1);
    let body = puts[0].body.as_ref().unwrap();
    assert_eq!(body["name"], "Mug");
    assert_eq!(body["price"], 11.0);
    assert_eq!(body["description"], "ceramic");
    let out = output(&terminal);
    assert!(out.contains("name [Mug]: "));
    assert!(out.contains("** Product updated!"));
}

#[tokio::test]
async fn edit_unknown_id() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login admin\nhunter2\nedit 9\nquit\n", &catalog, None);
    shell.run().await.unwrap();

    assert!(output(&terminal).contains("No product with ID 9."));
}

#[tokio::test]
async fn delete_declined_then_confirmed() {
    let catalog = catalog();
    let script = "login admin\nhunter2\ndelete 1\nn\ndelete 1\ny\nquit\n";
    let (mut shell, terminal) = shell_for(script, &catalog, None);
    shell.run().await.unwrap();

    assert_eq!(catalog.count(&Method::DELETE, &format!("{ADMIN}/products/1")), 1);
    assert_eq!(catalog.product_count(), 0);
    let out = output(&terminal);
    assert!(out.contains("Delete product ID 1? [y/N] "));
    assert!(out.contains("** Product deleted successfully"));
    assert!(out.contains("No products available."));
}

#[tokio::test]
async fn expired_session_returns_to_login() {
    let catalog = catalog();
    let (mut shell, _terminal) = shell_for("login admin\nhunter2\n", &catalog, None);
    shell.run().await.unwrap();
    assert!(shell.console().state().logged_in());

    catalog.expire_session();
    let terminal = Arc::new(Terminal::new(Cursor::new(b"delete 1\ny\n".to_vec()), Vec::new()));
    let mut console = AdminConsole::new(CatalogApi::new(catalog.clone(), ADMIN, PUBLIC), terminal.clone());
    console.show_dashboard();
    let mut shell = Shell::new(console, terminal.clone(), None);
    shell.run().await.unwrap();

    assert_eq!(shell.console().state().view, View::LoggedOut);
    assert!(output(&terminal).contains("** Unauthorized: admin login required"));
}

#[tokio::test]
async fn logout_and_unknown_commands() {
    let catalog = catalog();
    let (mut shell, terminal) = shell_for("login admin\nhunter2\nbogus\nlogout\n", &catalog, None);
    shell.run().await.unwrap();

    assert!(!shell.console().state().logged_in());
    let out = output(&terminal);
    assert!(out.contains("unknown command `bogus`"));
    assert!(out.ends_with("Commands: login [username], help, quit\n> "));
}
