//! # Console configuration — `console.toml`
//!
//! Everything the access console treats as a deployment constant: where the user
//! API lives, what a freshly created account gets by default, which routes the
//! session gate redirects to, and when the header counts as scrolled.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = ""                       # empty = same origin
//!
//! [accounts]
//! default_password = "Changeme"
//! default_program = "ONE_ZERO_ONE"
//!
//! [routes]
//! public_entry = "/"
//! admin_dashboard = "/admin/dashboard"
//! applicant_dashboard = "/applicant/dashboard"
//!
//! [shell]
//! scroll_threshold = 10.0
//! ```
//!
//! Every section derives `Default`, so a missing or partial file is equivalent to
//! the defaults above.

use serde::{Deserialize, Serialize};

use crate::models::Program;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub accounts: AccountDefaults,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for `/api/...` requests. Empty means the page's own origin.
    #[serde(default)]
    pub base_url: String,
}

/// Values pre-filled into the create-user and reset-password dialogs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountDefaults {
    #[serde(rename = "default_password", default = "default_password")]
    pub password: String,
    #[serde(rename = "default_program", default)]
    pub program: Program,
}

fn default_password() -> String {
    "Changeme".to_string()
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self {
            password: default_password(),
            program: Program::default(),
        }
    }
}

/// Targets of the session gate's redirects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_public_entry")]
    pub public_entry: String,
    #[serde(default = "default_admin_dashboard")]
    pub admin_dashboard: String,
    #[serde(default = "default_applicant_dashboard")]
    pub applicant_dashboard: String,
}

fn default_public_entry() -> String {
    "/".to_string()
}

fn default_admin_dashboard() -> String {
    "/admin/dashboard".to_string()
}

fn default_applicant_dashboard() -> String {
    "/applicant/dashboard".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_entry: default_public_entry(),
            admin_dashboard: default_admin_dashboard(),
            applicant_dashboard: default_applicant_dashboard(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Vertical scroll offset, in pixels, past which the header is "scrolled".
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

fn default_scroll_threshold() -> f64 {
    10.0
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

impl ConsoleConfig {
    /// Builder method to point the directory at another origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.accounts.password, "Changeme");
        assert_eq!(config.accounts.program, Program::OneZeroOne);
        assert_eq!(config.routes.public_entry, "/");
        assert_eq!(config.shell.scroll_threshold, 10.0);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [accounts]
            default_program = "LIFTOFF"

            [routes]
            admin_dashboard = "/staff"
            "#,
        )
        .unwrap();
        assert_eq!(config.accounts.program, Program::Liftoff);
        assert_eq!(config.accounts.password, "Changeme");
        assert_eq!(config.routes.admin_dashboard, "/staff");
        assert_eq!(config.routes.applicant_dashboard, "/applicant/dashboard");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ConsoleConfig::default().with_base_url("https://console.example.org");
        let text = config.to_toml().unwrap();
        assert!(text.contains("default_password = \"Changeme\""));
        assert_eq!(ConsoleConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_program_is_an_error() {
        assert!(ConsoleConfig::from_toml("[accounts]\ndefault_program = \"PHD\"").is_err());
    }
}
