//! Console configuration: backend base URLs and an optional default login.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_ADMIN_URL: &str = "http://127.0.0.1:5000/admin/api";
pub const DEFAULT_PUBLIC_URL: &str = "http://127.0.0.1:5000/api";

pub const ADMIN_URL_ENV: &str = "ADMIN_API_BASE_URL";
pub const PUBLIC_URL_ENV: &str = "PUBLIC_API_BASE_URL";
pub const USERNAME_ENV: &str = "ADMIN_USERNAME";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL for {name}: {value:?} (expected http:// or https://)")]
    InvalidBaseUrl { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub admin_url: String,
    pub public_url: String,
    /// Prefilled username for `login` without an argument.
    pub username: Option<String>,
}

impl ConsoleConfig {
    /// Validate and normalize (trailing slashes trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if either URL is not http(s).
    pub fn new(admin_url: &str, public_url: &str, username: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            admin_url: normalize_base_url("admin", admin_url)?,
            public_url: normalize_base_url("public", public_url)?,
            username: username.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty()),
        })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `ADMIN_API_BASE_URL`: default `http://127.0.0.1:5000/admin/api`
    /// - `PUBLIC_API_BASE_URL`: default `http://127.0.0.1:5000/api`
    /// - `ADMIN_USERNAME`: no default
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if either URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let admin = lookup(ADMIN_URL_ENV).unwrap_or_else(|| DEFAULT_ADMIN_URL.to_owned());
        let public = lookup(PUBLIC_URL_ENV).unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_owned());
        Self::new(&admin, &public, lookup(USERNAME_ENV))
    }
}

fn normalize_base_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let valid = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.len() > scheme.len() && trimmed.to_ascii_lowercase().starts_with(scheme));
    if !valid {
        return Err(ConfigError::InvalidBaseUrl { name, value: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}
