//! # Domain models for users, applications and applicant profiles
//!
//! Wire-compatible types for the records the console reads from and writes to the
//! remote user API. Field names follow the API's camelCase JSON, so these types
//! deserialize straight from responses and serialize straight into request bodies.
//!
//! ## Types
//!
//! | Struct / enum | Represents |
//! |---------------|-----------|
//! | [`UserRecord`] | A user account as cached by the access list: identity, profile fields, role and lifecycle flags, optional program and application summaries. |
//! | [`ApplicationRecord`] | One job application belonging to a user. Only its [`ApplicationStatus`] is used, to derive counts. |
//! | [`Program`] | The cohort a user is enrolled in. Defaults to [`Program::OneZeroOne`]. |
//! | [`UserDraft`] | The create-user form, with the configured default password and program. |
//! | [`ApplicantProfile`] | Read-only projection shown in the profile modal, including [`StatusCounts`]. |

use serde::{Deserialize, Serialize};

/// A user account as returned by `GET /api/users`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    /// Present only when the list was fetched with `includeApplications=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<ApplicationRecord>>,
}

impl UserRecord {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Upper-cased first letters of first and last name, e.g. "AL".
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Text the search box matches against.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.email)
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Applicant
        }
    }

    pub fn application_count(&self) -> usize {
        self.applications.as_ref().map_or(0, Vec::len)
    }

    /// Merge a server copy of this record into the cached one.
    ///
    /// The server is authoritative for every scalar field except the id, which
    /// stays the cached one. Endpoints that do not include applications return
    /// `None`, in which case the cached list is kept.
    pub fn merge_from(&mut self, server: UserRecord) {
        let applications = match server.applications {
            Some(apps) => Some(apps),
            None => self.applications.take(),
        };
        let program = server.program.or(self.program);
        *self = UserRecord {
            id: self.id,
            applications,
            program,
            ..server
        };
    }
}

/// Role shown in the access table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Applicant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Applicant => "Applicant",
        }
    }
}

/// Pipeline stage of a job application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Interested,
    Applied,
    PhoneScreening,
    InterviewStage,
    FinalInterviewStage,
    OfferExtended,
    Negotiation,
    OfferAccepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 9] = [
        ApplicationStatus::Interested,
        ApplicationStatus::Applied,
        ApplicationStatus::PhoneScreening,
        ApplicationStatus::InterviewStage,
        ApplicationStatus::FinalInterviewStage,
        ApplicationStatus::OfferExtended,
        ApplicationStatus::Negotiation,
        ApplicationStatus::OfferAccepted,
        ApplicationStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Interested => "Interested",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::PhoneScreening => "Phone Screening",
            ApplicationStatus::InterviewStage => "Interview Stage",
            ApplicationStatus::FinalInterviewStage => "Final Interview",
            ApplicationStatus::OfferExtended => "Offer Extended",
            ApplicationStatus::Negotiation => "Negotiation",
            ApplicationStatus::OfferAccepted => "Offer Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// A job application summary attached to a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: i64,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Cohort program a user belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Program {
    Foundations,
    #[default]
    OneZeroOne,
    Liftoff,
    Alumni,
}

impl Program {
    pub const ALL: [Program; 4] = [
        Program::Foundations,
        Program::OneZeroOne,
        Program::Liftoff,
        Program::Alumni,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Program::Foundations => "Foundations",
            Program::OneZeroOne => "101",
            Program::Liftoff => "Liftoff",
            Program::Alumni => "Alumni",
        }
    }

    /// Wire name, e.g. `"ONE_ZERO_ONE"`. Used as the `<select>` option value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Foundations => "FOUNDATIONS",
            Program::OneZeroOne => "ONE_ZERO_ONE",
            Program::Liftoff => "LIFTOFF",
            Program::Alumni => "ALUMNI",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// Create-user form contents, serialized as the `POST /api/users` body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub program: Program,
}

impl UserDraft {
    /// An empty form carrying the default password and program.
    pub fn with_defaults(password: &str, program: Program) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: password.to_string(),
            program,
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Number of applications in each status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub interested: usize,
    pub applied: usize,
    pub phone_screening: usize,
    pub interview_stage: usize,
    pub final_interview: usize,
    pub offer_extended: usize,
    pub negotiation: usize,
    pub offer_accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn tally<'a>(applications: impl IntoIterator<Item = &'a ApplicationRecord>) -> Self {
        let mut counts = Self::default();
        for app in applications {
            *counts.slot_mut(app.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Interested => self.interested,
            ApplicationStatus::Applied => self.applied,
            ApplicationStatus::PhoneScreening => self.phone_screening,
            ApplicationStatus::InterviewStage => self.interview_stage,
            ApplicationStatus::FinalInterviewStage => self.final_interview,
            ApplicationStatus::OfferExtended => self.offer_extended,
            ApplicationStatus::Negotiation => self.negotiation,
            ApplicationStatus::OfferAccepted => self.offer_accepted,
            ApplicationStatus::Rejected => self.rejected,
        }
    }

    fn slot_mut(&mut self, status: ApplicationStatus) -> &mut usize {
        match status {
            ApplicationStatus::Interested => &mut self.interested,
            ApplicationStatus::Applied => &mut self.applied,
            ApplicationStatus::PhoneScreening => &mut self.phone_screening,
            ApplicationStatus::InterviewStage => &mut self.interview_stage,
            ApplicationStatus::FinalInterviewStage => &mut self.final_interview,
            ApplicationStatus::OfferExtended => &mut self.offer_extended,
            ApplicationStatus::Negotiation => &mut self.negotiation,
            ApplicationStatus::OfferAccepted => &mut self.offer_accepted,
            ApplicationStatus::Rejected => &mut self.rejected,
        }
    }
}

/// Read-only applicant view derived from a cached [`UserRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub id: i64,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub applications: usize,
    pub program: Program,
    pub is_archived: bool,
    pub application_status_count: StatusCounts,
}

impl From<&UserRecord> for ApplicantProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            user_id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role(),
            applications: user.application_count(),
            program: user.program.unwrap_or_default(),
            is_archived: user.is_archived,
            application_status_count: StatusCounts::tally(user.applications.iter().flatten()),
        }
    }
}
