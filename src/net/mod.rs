//! Networking: transport seam, request helper, typed catalog API.
//!
//! DESIGN
//! ======
//! Layered bottom-up: `transport` moves bytes, `request` classifies
//! responses (2xx / 401 / failure), `api` knows the backend's routes.

pub mod api;
pub mod request;
pub mod transport;
pub mod types;

// =============================================================================
// TEST HELPERS
// =============================================================================
