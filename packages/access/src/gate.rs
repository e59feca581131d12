//! # Session gate — role-based routing for the dashboard shell
//!
//! The shell is mounted with a required role (admin or applicant) and the current
//! [`SessionState`]. [`evaluate`] classifies that pair into a [`GatePhase`]:
//!
//! ```text
//! loading ──► unauthenticated   → redirect to the public entry
//!        ├──► mismatch          → redirect to the role's own dashboard
//!        └──► ready             → render chrome and children
//! ```
//!
//! [`Gate`] wraps the classification with redirect bookkeeping: a redirect is
//! emitted the first time a given target is reached and then held until the
//! phase changes, so re-renders during navigation do not push the same route
//! again.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::RouteConfig;
use crate::models::UserRecord;

/// The signed-in identity as exposed by the session provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "first_name")]
    pub first_name: String,
    #[serde(default, alias = "last_name")]
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl SessionUser {
    /// The numeric user id, when the provider's id is one.
    pub fn record_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }

    /// Id of this identity's row in `users`.
    ///
    /// Uses the numeric session id when there is one; providers with opaque
    /// string ids are matched by email instead, ignoring case.
    pub fn match_record(&self, users: &[UserRecord]) -> Option<i64> {
        if let Some(id) = self.record_id() {
            return Some(id);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        users
            .iter()
            .find(|user| user.email.trim().eq_ignore_ascii_case(email))
            .map(|user| user.id)
    }

    /// "First Last", or "User" when both are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        if name.trim().is_empty() {
            "User".to_string()
        } else {
            name
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Session context as published by the auth provider.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }
}

/// Which kind of user a shell is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequiredRole {
    Admin,
    Applicant,
}

impl RequiredRole {
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin {
            RequiredRole::Admin
        } else {
            RequiredRole::Applicant
        }
    }

    pub fn admits(&self, user: &SessionUser) -> bool {
        user.is_admin == (*self == RequiredRole::Admin)
    }
}

/// Where the gate sends a user who may not see the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Redirect {
    PublicEntry,
    AdminDashboard,
    ApplicantDashboard,
}

impl Redirect {
    pub fn path<'a>(&self, routes: &'a RouteConfig) -> &'a str {
        match self {
            Redirect::PublicEntry => &routes.public_entry,
            Redirect::AdminDashboard => &routes.admin_dashboard,
            Redirect::ApplicantDashboard => &routes.applicant_dashboard,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GatePhase {
    Loading,
    Unauthenticated,
    Mismatch(Redirect),
    Ready(SessionUser),
}

impl GatePhase {
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            GatePhase::Unauthenticated => Some(Redirect::PublicEntry),
            GatePhase::Mismatch(to) => Some(*to),
            _ => None,
        }
    }
}

/// Classify a session against the shell's required role.
pub fn evaluate(session: &SessionState, required: RequiredRole) -> GatePhase {
    if session.loading {
        return GatePhase::Loading;
    }
    let Some(user) = &session.user else {
        return GatePhase::Unauthenticated;
    };
    if required.admits(user) {
        return GatePhase::Ready(user.clone());
    }
    GatePhase::Mismatch(if user.is_admin {
        Redirect::AdminDashboard
    } else {
        Redirect::ApplicantDashboard
    })
}

/// Outcome of one gate evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct GateDecision {
    pub phase: GatePhase,
    /// Set only the first time a redirect target is reached.
    pub navigate: Option<Redirect>,
}

/// Redirect bookkeeping across re-evaluations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gate {
    issued: Option<Redirect>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, session: &SessionState, required: RequiredRole) -> GateDecision {
        let phase = evaluate(session, required);
        let navigate = match (&phase, phase.redirect()) {
            (GatePhase::Loading, _) => None,
            (_, Some(to)) if self.issued == Some(to) => None,
            (_, Some(to)) => {
                tracing::info!(?to, ?required, "session gate redirecting");
                self.issued = Some(to);
                Some(to)
            }
            (_, None) => {
                self.issued = None;
                None
            }
        };
        GateDecision { phase, navigate }
    }

    pub fn pending_redirect(&self) -> Option<Redirect> {
        self.issued
    }
}
