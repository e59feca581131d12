//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;
pub use views::{ApplicantProfileModal, DashboardLayout, ModalOverlay, UserAccessManager};

pub const THEME_CSS: Asset = asset!("/assets/theme.css");

mod console;
pub use console::{use_console_config, use_directory, ConsoleProvider};

mod auth;
pub use auth::{use_session, AuthProvider};
