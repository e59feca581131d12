//! The remote user directory the access list reconciles against.

use std::future::Future;

use crate::error::AccessError;
use crate::models::{ApplicationRecord, UserDraft, UserRecord};

/// Async interface to the external user API.
///
/// Implemented over HTTP by `api::HttpDirectory` and in memory by
/// [`crate::MemoryDirectory`]. Any non-success response is an `Err`.
pub trait UserDirectory {
    /// Full user list including application summaries.
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, AccessError>>;

    /// Set the admin flag. The server may or may not echo the updated record.
    fn set_admin(
        &self,
        user_id: i64,
        is_admin: bool,
    ) -> impl Future<Output = Result<Option<UserRecord>, AccessError>>;

    /// Create a user from a validated draft.
    fn create_user(
        &self,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<Option<UserRecord>, AccessError>>;

    fn reset_password(
        &self,
        user_id: i64,
        new_password: &str,
    ) -> impl Future<Output = Result<(), AccessError>>;

    /// Detailed applications for one applicant.
    fn list_applications(
        &self,
        applicant_id: i64,
    ) -> impl Future<Output = Result<Vec<ApplicationRecord>, AccessError>>;
}
