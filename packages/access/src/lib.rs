//! Domain core of the admin access console.
//!
//! Holds the user cache and its reconciliation rules ([`AccessList`]), the
//! session gate and shell chrome state, and configuration. Nothing here touches
//! the DOM or the network; the `api` crate supplies an HTTP [`UserDirectory`] and
//! the `ui` crate drives these types from Dioxus signals.

pub mod access_list;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod gate;
pub mod models;
pub mod notice;
pub mod shell;

mod memory;
pub use memory::{DirectoryCall, MemoryDirectory};

pub use access_list::{
    AccessList, Completion, MutationField, MutationStatus, Outcome, PendingMutation,
};
pub use config::{AccountDefaults, ConsoleConfig, RouteConfig};
pub use directory::UserDirectory;
pub use error::AccessError;
pub use filter::ViewTab;
pub use gate::{Gate, GatePhase, Redirect, RequiredRole, SessionState, SessionUser};
pub use models::{
    ApplicantProfile, ApplicationRecord, ApplicationStatus, Program, Role, StatusCounts, UserDraft,
    UserRecord,
};
pub use notice::{Notice, NoticeVariant};
pub use shell::{EmptyNotifications, Notification, NotificationSource, ShellChrome, ShellLabels};
