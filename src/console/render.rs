//! Text rendering of the view model.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write;

use crate::net::types::Product;

use super::state::{ConsoleState, ProductList, View};

pub const LOGIN_PROMPT: &str = "Please log in to manage products.";
pub const LOADING: &str = "Loading products...";
pub const NO_PRODUCTS: &str = "No products available.";

const HEADERS: [&str; 5] = ["ID", "Name", "Price", "Image", "Actions"];

/// Format a price the way the table shows it: `$` plus two decimals.
/// Exact half-cent ties round away from zero; values stored just below a
/// tie (2.675) round down.
#[must_use]
pub fn format_price(price: f64) -> String {
    let cents = price * 100.0;
    // Only multiples of 1/8 sit exactly on a half cent, and for those
    // `price * 8.0` and `price * 100.0` are exact.
    if (price * 8.0).fract() == 0.0 && cents.fract().abs() == 0.5 {
        return format!("${:.2}", cents.round() / 100.0);
    }
    format!("${price:.2}")
}

/// Render the whole console for the current view.
#[must_use]
pub fn render(state: &ConsoleState) -> String {
    let mut out = String::new();
    match state.view {
        View::LoggedOut => {
            out.push_str("== Admin Login ==\n");
            if !state.login_error.is_empty() {
                let _ = writeln!(out, "! {}", state.login_error);
            }
            out.push_str(&render_product_list(&state.product_list));
            out.push_str("Commands: login [username], help, quit\n");
        }
        View::LoggedIn => {
            out.push_str("== Product Catalog ==\n");
            out.push_str(&render_product_list(&state.product_list));
            if state.form_visible {
                out.push_str(&render_form(state));
            }
            out.push_str("Commands: list, add, edit <id>, delete <id>, logout, help, quit\n");
        }
    }
    out
}

#[must_use]
pub fn render_product_list(list: &ProductList) -> String {
    match list {
        ProductList::LoginPrompt => format!("{LOGIN_PROMPT}\n"),
        ProductList::Loading => format!("{LOADING}\n"),
        ProductList::Empty => format!("{NO_PRODUCTS}\n"),
        ProductList::Error(message) => format!("Could not load products: {message}\n"),
        ProductList::Table(products) if products.is_empty() => format!("{NO_PRODUCTS}\n"),
        ProductList::Table(products) => render_table(products),
    }
}

fn render_table(products: &[Product]) -> String {
    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|p| [p.id.to_string(), p.name.clone(), format_price(p.price), p.image.clone(), row_actions(p)])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn row_actions(product: &Product) -> String {
    format!("edit {id}, delete {id}", id = product.id)
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

fn render_form(state: &ConsoleState) -> String {
    let form = &state.form;
    let mut out = format!("-- {} --\n", state.form_mode.title());
    if !form.id.is_empty() {
        let _ = writeln!(out, "  id:          {}", form.id);
    }
    let _ = writeln!(out, "  name:        {}", form.name);
    let _ = writeln!(out, "  price:       {}", form.price);
    let _ = writeln!(out, "  image:       {}", form.image);
    let _ = writeln!(out, "  description: {}", form.description);
    if !state.form_error.is_empty() {
        let _ = writeln!(out, "! {}", state.form_error);
    }
    out.push_str("Form: submit to retry, cancel to discard\n");
    out
}
