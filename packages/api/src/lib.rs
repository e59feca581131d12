//! # API crate — HTTP access to the recruiting backend
//!
//! The console does not own any data; users, applications and the signed-in
//! session all live behind the backend's `/api/...` routes. This crate wraps
//! those routes with a `reqwest` client that runs both natively and in the
//! browser.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`directory`] | [`HttpDirectory`], the [`access::UserDirectory`] implementation over the users/applicants endpoints |
//! | [`session`] | [`fetch_session`], reading the signed-in identity from the session provider |
//!
//! Response envelopes are decoded here and every failure is mapped into
//! [`access::AccessError`] (directory) or [`SessionError`] (session) so callers
//! never see `reqwest` types.

pub mod directory;
pub mod session;

pub use directory::HttpDirectory;
pub use session::{fetch_session, SessionError};

/// Join a base URL and an absolute path without doubling the slash.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
