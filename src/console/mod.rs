//! Admin console view-controller.
//!
//! DESIGN
//! ======
//! `AdminConsole` owns the view model and drives the catalog API. Every
//! operation catches its own failures and turns them into visible state (an
//! inline message or an alert), so no operation returns an error and the
//! console is always left re-enterable.
//!
//! Session state is optimistic: `LoggedIn` after a successful login
//! response, back to `LoggedOut` on logout or on any 401 from an admin call.
//! There is no session check on startup.

pub mod form;
pub mod render;
pub mod state;

use std::sync::Arc;

use crate::net::api::CatalogApi;
use crate::net::request::ApiResponse;
use crate::net::types::{Product, ProductId, error_field, message_field};

use form::{FormMode, ProductForm};
use state::{ConsoleState, ProductList, View};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please log in again.";

/// Blocking user dialogs. Enables fakes in tests.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question; `false` unless the user explicitly agrees.
    fn confirm(&self, message: &str) -> bool;
    /// Show a message the user must see.
    fn alert(&self, message: &str);
}

pub struct AdminConsole {
    api: CatalogApi,
    prompter: Arc<dyn Prompter>,
    state: ConsoleState,
}

impl AdminConsole {
    /// New console, always starting at the login view.
    #[must_use]
    pub fn new(api: CatalogApi, prompter: Arc<dyn Prompter>) -> Self {
        let mut console = Self { api, prompter, state: ConsoleState::default() };
        console.show_login();
        console
    }

    #[must_use]
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Mutable access to the form fields being edited.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.state.form
    }

    // =========================================================================
    // VIEW TRANSITIONS
    // =========================================================================

    pub fn show_login(&mut self) {
        self.state.view = View::LoggedOut;
        self.state.form_visible = false;
        self.state.product_list = ProductList::LoginPrompt;
    }

    pub fn show_dashboard(&mut self) {
        self.state.view = View::LoggedIn;
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    pub async fn login(&mut self, username: &str, password: &str) {
        self.state.login_error.clear();

        match self.api.login(username, password).await {
            Ok(response) if response.ok() => {
                tracing::info!(username, "login successful");
                self.show_dashboard();
                self.list_products().await;
            }
            Ok(response) => {
                tracing::info!(username, status = response.status, "login rejected");
                self.state.login_error = error_field(response.data.as_ref())
                    .unwrap_or_else(|| format!("Login failed (Status: {}).", response.status));
            }
            Err(e) => {
                tracing::error!(error = %e, "login error");
                self.state.login_error = format!("An error occurred during login: {e}");
            }
        }
    }

    /// Always lands on the login view, whatever the server says.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            tracing::error!(error = %e, "logout error");
            self.prompter.alert("Logout failed.");
        }
        self.show_login();
    }

    // =========================================================================
    // PRODUCTS
    // =========================================================================

    /// Fetch the public catalog and replace the list. Never fails outward.
    pub async fn list_products(&mut self) {
        self.state.product_list = ProductList::Loading;

        self.state.product_list = match self.api.list_products().await {
            Ok(response) if response.ok() => parse_product_list(&response),
            Ok(response) => {
                let reason =
                    error_field(response.data.as_ref()).unwrap_or_else(|| format!("Status {}", response.status));
                ProductList::Error(reason)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching products");
                ProductList::Error(e.to_string())
            }
        };
    }

    pub fn open_add_form(&mut self) {
        self.state.form_mode = FormMode::Add;
        self.state.form.reset();
        self.state.form_error.clear();
        self.state.form_visible = true;
    }

    /// Prefill the form from the last fetched list. Unknown id: no change,
    /// returns `false`.
    pub fn open_edit_form(&mut self, id: &str) -> bool {
        let Some(product) = self.find_product(id) else {
            return false;
        };
        let form = ProductForm::from_product(product);
        self.state.form = form;
        self.state.form_mode = FormMode::Edit;
        self.state.form_error.clear();
        self.state.form_visible = true;
        true
    }

    pub fn cancel_form(&mut self) {
        self.state.form_visible = false;
        self.state.form.reset();
        self.state.form_error.clear();
    }

    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.state.product_list.products().iter().find(|p| p.id.matches(id))
    }

    /// Validate and save the current form: create when it has no id,
    /// update otherwise.
    pub async fn submit_product(&mut self) {
        self.state.form_error.clear();

        let draft = match self.state.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.state.form_error = e.to_string();
                return;
            }
        };
        let id = self.state.form.target_id();
        let mode = if id.is_some() { FormMode::Edit } else { FormMode::Add };

        match self.api.save_product(id.as_ref(), &draft).await {
            Ok(response) if response.ok() => {
                tracing::info!(id = ?id, "product saved");
                self.state.form_visible = false;
                self.state.form.reset();
                self.list_products().await;
                self.prompter.alert(mode.success_message());
            }
            Ok(response) => {
                let reason = unauthorized_reason(&response);
                tracing::warn!(status = response.status, "product save rejected; returning to login");
                self.state.form_error.clone_from(&reason);
                // The form is hidden by `show_login`; repeat the reason where it stays visible.
                self.state.login_error = reason;
                self.show_login();
            }
            Err(e) => {
                tracing::error!(error = %e, "product form error");
                self.state.form_error = format!("An error occurred: {e}");
            }
        }
    }

    /// Delete after confirmation. Declining sends nothing.
    pub async fn delete_product(&mut self, id: &str) {
        let id = ProductId::new(id.trim());
        if !self.prompter.confirm(&format!("Delete product ID {id}?")) {
            return;
        }

        match self.api.delete_product(&id).await {
            Ok(response) if response.ok() => {
                tracing::info!(%id, "product deleted");
                self.list_products().await;
                let message = message_field(response.data.as_ref()).unwrap_or_else(|| "Product deleted.".to_owned());
                self.prompter.alert(&message);
            }
            Ok(response) => {
                self.prompter.alert(&unauthorized_reason(&response));
                self.show_login();
            }
            Err(e) => {
                tracing::error!(error = %e, "delete error");
                self.prompter.alert(&format!("Error deleting: {e}"));
            }
        }
    }
}

/// A non-OK response that reached the caller is a 401; see `net::request`.
fn unauthorized_reason(response: &ApiResponse) -> String {
    error_field(response.data.as_ref()).unwrap_or_else(|| UNAUTHORIZED_MESSAGE.to_owned())
}

fn parse_product_list(response: &ApiResponse) -> ProductList {
    let Some(data) = response.data.clone() else {
        return ProductList::Empty;
    };
    if data.is_null() {
        return ProductList::Empty;
    }
    match serde_json::from_value::<Vec<Product>>(data) {
        Ok(products) if products.is_empty() => ProductList::Empty,
        Ok(products) => ProductList::Table(products),
        Err(e) => {
            tracing::warn!(error = %e, "could not decode products");
            ProductList::Error(format!("malformed product list: {e}"))
        }
    }
}
