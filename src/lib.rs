//! # catalog-admin
//!
//! Terminal admin console for a product catalog backend. Logs in against a
//! cookie-session admin API, lists products from the public API, and
//! creates, edits and deletes them through the admin API.
//!
//! `net` talks HTTP, `console` holds the view-controller and view model,
//! `shell` turns typed commands into controller calls.

pub mod config;
pub mod console;
pub mod error;
pub mod net;
pub mod shell;
