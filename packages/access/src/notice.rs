//! User-visible transient notifications raised by access-list operations.

use crate::error::AccessError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast: short title, one-line description, and a style variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// The operations that report back to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ToggleAdmin,
    CreateUser,
    ResetPassword,
    LoadApplications,
    Refresh,
}

impl Operation {
    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::ToggleAdmin => "Admin status updated successfully",
            Operation::CreateUser => "User created successfully",
            Operation::ResetPassword => "Password reset successfully",
            Operation::LoadApplications => "Applications loaded",
            Operation::Refresh => "User list refreshed",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ToggleAdmin => "Failed to update admin status. Please try again.",
            Operation::CreateUser => "Failed to create user. Please try again.",
            Operation::ResetPassword => "Failed to reset password. Please try again.",
            Operation::LoadApplications => {
                "Failed to load applicant's job applications. Please try again."
            }
            Operation::Refresh => "Failed to refresh user list. Please try again.",
        }
    }

    pub fn succeeded(&self) -> Notice {
        Notice::success(self.success_message())
    }

    /// Map an error to the message shown for this operation.
    ///
    /// Remote failures collapse to one generic message per operation; local
    /// guard failures get a specific hint.
    pub fn failed(&self, err: &AccessError) -> Notice {
        let description = match (self, err) {
            (Operation::CreateUser, AccessError::Validation(_)) => {
                "Please fill out all required fields."
            }
            (Operation::ResetPassword, AccessError::Validation(_)) => {
                "Please provide a new password."
            }
            (_, AccessError::SelfDemotion(_)) => "You cannot change your own admin status.",
            (_, AccessError::Archived(_)) => "Archived users cannot be modified.",
            (_, AccessError::AlreadyPending(_)) => "An update for this user is already in progress.",
            (_, AccessError::NotApplicant(_)) => "Only applicants have a profile to view.",
            (_, AccessError::NotFound(_)) => "That user is no longer in the list.",
            _ => self.failure_message(),
        };
        Notice::error(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_failures_use_generic_message() {
        let notice = Operation::ToggleAdmin.failed(&AccessError::Rejected("boom".into()));
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.description, "Failed to update admin status. Please try again.");
        assert!(notice.is_error());
    }

    #[test]
    fn test_validation_messages_are_operation_specific() {
        let err = AccessError::Validation(vec!["email"]);
        assert_eq!(
            Operation::CreateUser.failed(&err).description,
            "Please fill out all required fields."
        );
        let err = AccessError::Validation(vec!["new password"]);
        assert_eq!(
            Operation::ResetPassword.failed(&err).description,
            "Please provide a new password."
        );
    }

    #[test]
    fn test_success_notice() {
        let notice = Operation::CreateUser.succeeded();
        assert_eq!(notice.title, "Success");
        assert!(!notice.is_error());
    }
}
