//! In-memory view model. Nothing here is persisted or verified against the
//! server: it reflects the last response the console saw.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::net::types::Product;

use super::form::{FormMode, ProductForm};

/// Which top-level view is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// What the product list area currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProductList {
    #[default]
    LoginPrompt,
    Loading,
    Empty,
    Table(Vec<Product>),
    Error(String),
}

impl ProductList {
    /// Products from the last successful fetch, if the table is showing.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Table(products) => products,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConsoleState {
    pub view: View,
    pub login_error: String,
    pub product_list: ProductList,
    pub form: ProductForm,
    pub form_mode: FormMode,
    pub form_visible: bool,
    pub form_error: String,
}

impl ConsoleState {
    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.view == View::LoggedIn
    }

    /// The logout action is only offered on the dashboard.
    #[must_use]
    pub fn logout_visible(&self) -> bool {
        self.logged_in()
    }
}
