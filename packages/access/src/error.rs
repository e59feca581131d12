//! Error taxonomy for access-list operations.
//!
//! Errors never propagate past the presentation boundary: each one is logged and
//! turned into a [`Notice`](crate::notice::Notice) by the operation that hit it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A required field was blank. Raised before any network call.
    #[error("missing required field(s): {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx status or a `success: false` body.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("user {0} is not in the list")]
    NotFound(i64),

    #[error("user {0} is the signed-in account")]
    SelfDemotion(i64),

    #[error("user {0} is archived")]
    Archived(i64),

    #[error("an update for user {0} is already in flight")]
    AlreadyPending(i64),

    #[error("user {0} is an admin and has no applicant profile")]
    NotApplicant(i64),
}

impl AccessError {
    /// True for failures caught before any request was sent.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            AccessError::Transport(_) | AccessError::Rejected(_) | AccessError::Decode(_)
        )
    }
}
