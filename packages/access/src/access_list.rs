//! # AccessList — cached user table with confirmed-only reconciliation
//!
//! [`AccessList`] owns the console's copy of the user collection and mediates every
//! admin and account-lifecycle mutation against a [`UserDirectory`]. The cache is
//! only written after the server confirms a change; a failed call leaves it exactly
//! as it was.
//!
//! ## Two-phase operations
//!
//! Every remote operation is split into a synchronous `begin_*` step and a
//! `finish_*` step:
//!
//! | Phase | Does |
//! |-------|------|
//! | `begin_*` | Validates the request, records a [`PendingMutation`] where relevant, and hands back a one-shot ticket. No network. |
//! | `finish_*` | Consumes the ticket together with the remote result, merges or discards, clears the pending mark, and returns a [`Completion`]. |
//!
//! The UI calls `begin_*` in an event handler, awaits the directory in a spawned
//! task, then calls `finish_*`. Different users' mutations can therefore be in
//! flight at once and resolve in any order (last write wins per id). The async
//! helpers ([`toggle_admin`](AccessList::toggle_admin), [`create_user`](AccessList::create_user), ...)
//! run all three steps back to back for callers that do not need interleaving.
//!
//! ## Generations
//!
//! Each ticket records the list's generation. [`teardown`](AccessList::teardown)
//! bumps it, so responses that arrive after the owning view went away are
//! discarded instead of corrupting a fresh cache.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::AccountDefaults;
use crate::directory::UserDirectory;
use crate::error::AccessError;
use crate::filter::{filter_users, ViewTab};
use crate::models::{ApplicantProfile, ApplicationRecord, UserDraft, UserRecord};
use crate::notice::{Notice, Operation};

/// Called with the reconciled record after a successful create or admin toggle.
pub type UpdateListener = Box<dyn FnMut(&UserRecord)>;

/// Which part of a user record a mutation touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MutationField {
    AdminFlag,
    Password,
}

/// Lifecycle of a [`PendingMutation`]. Entries in the pending set are always
/// `InFlight`; the settled copy handed back in [`Completion::settled`] carries
/// `Resolved` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationStatus {
    InFlight,
    Resolved,
    Failed,
}

/// A remote call that has started and not yet resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMutation {
    pub user_id: i64,
    pub field: MutationField,
    pub status: MutationStatus,
}

/// How a `finish_*` call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The server confirmed the change and it was merged.
    Resolved,
    /// Validation or the remote call failed; the cache is unchanged.
    Failed,
    /// The response belonged to an older generation or a closed view.
    Discarded,
}

/// Result of finishing an operation: what happened, and what to tell the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub outcome: Outcome,
    pub notice: Option<Notice>,
    /// The pending mutation this completion retired, with its final status.
    pub settled: Option<PendingMutation>,
}

impl Completion {
    fn resolved(notice: Option<Notice>) -> Self {
        Self {
            outcome: Outcome::Resolved,
            notice,
            settled: None,
        }
    }

    fn failed(notice: Notice) -> Self {
        Self {
            outcome: Outcome::Failed,
            notice: Some(notice),
            settled: None,
        }
    }

    fn discarded() -> Self {
        Self {
            outcome: Outcome::Discarded,
            notice: None,
            settled: None,
        }
    }

    fn settling(mut self, mutation: Option<PendingMutation>) -> Self {
        self.settled = mutation;
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome == Outcome::Resolved
    }
}

/// Ticket for an admin-flag change.
#[derive(Debug)]
#[must_use]
pub struct AdminTicket {
    generation: u64,
    user_id: i64,
    is_admin: bool,
}

impl AdminTicket {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// The flag value being requested.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Ticket for a create-user request. Carries the validated draft.
#[derive(Debug)]
#[must_use]
pub struct CreateTicket {
    generation: u64,
    draft: UserDraft,
}

impl CreateTicket {
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }
}

/// Ticket for a password reset.
#[derive(Debug)]
#[must_use]
pub struct PasswordTicket {
    generation: u64,
    user_id: i64,
    new_password: String,
}

impl PasswordTicket {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

/// Ticket for the applicant-applications fetch behind the profile modal.
#[derive(Debug)]
#[must_use]
pub struct ProfileTicket {
    generation: u64,
    user_id: i64,
}

impl ProfileTicket {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

#[derive(Debug)]
#[must_use]
pub struct RefreshTicket {
    generation: u64,
}

/// State of the "Create New User" dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateDialog {
    pub open: bool,
    pub draft: UserDraft,
    pub submitting: bool,
}

/// State of the "Reset Password" dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResetDialog {
    pub open: bool,
    pub user_id: Option<i64>,
    pub new_password: String,
}

/// The applicant profile modal: projection plus independently loaded applications.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub profile: ApplicantProfile,
    pub applications: Vec<ApplicationRecord>,
    pub loading: bool,
}

/// Client-side cache of user records plus the dialogs that mutate them.
pub struct AccessList {
    users: Vec<UserRecord>,
    current_user_id: Option<i64>,
    tab: ViewTab,
    query: String,
    pending: BTreeMap<(i64, MutationField), PendingMutation>,
    generation: u64,
    refreshing: bool,
    defaults: AccountDefaults,
    create: CreateDialog,
    reset: ResetDialog,
    profile: Option<ProfileView>,
    listener: Option<UpdateListener>,
}

impl fmt::Debug for AccessList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessList")
            .field("users", &self.users.len())
            .field("current_user_id", &self.current_user_id)
            .field("tab", &self.tab)
            .field("query", &self.query)
            .field("pending", &self.pending.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl AccessList {
    pub fn new(users: Vec<UserRecord>, current_user_id: Option<i64>) -> Self {
        let defaults = AccountDefaults::default();
        Self {
            users: dedup_by_id(users),
            current_user_id,
            tab: ViewTab::default(),
            query: String::new(),
            pending: BTreeMap::new(),
            generation: 0,
            refreshing: false,
            create: CreateDialog {
                open: false,
                draft: UserDraft::with_defaults(&defaults.password, defaults.program),
                submitting: false,
            },
            reset: ResetDialog::default(),
            profile: None,
            listener: None,
            defaults,
        }
    }

    /// Use these defaults for the create form and the reset dialog.
    pub fn with_defaults(mut self, defaults: AccountDefaults) -> Self {
        self.create.draft = UserDraft::with_defaults(&defaults.password, defaults.program);
        self.defaults = defaults;
        self
    }

    /// Register the upward `onUserUpdate` callback.
    pub fn on_user_update(mut self, listener: impl FnMut(&UserRecord) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_update_listener(&mut self, listener: Option<UpdateListener>) {
        self.listener = listener;
    }

    // -- cache ---------------------------------------------------------------

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, user_id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == user_id)
    }

    fn get_mut(&mut self, user_id: i64) -> Option<&mut UserRecord> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    /// Insert or replace by id.
    fn upsert(&mut self, record: UserRecord) {
        match self.get_mut(record.id) {
            Some(existing) => existing.merge_from(record),
            None => self.users.push(record),
        }
    }

    /// Replace the cache with a collection supplied by the embedding view.
    pub fn replace_users(&mut self, users: Vec<UserRecord>) {
        self.users = dedup_by_id(users);
        self.reproject_profile();
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user_id
    }

    pub fn set_current_user(&mut self, user_id: Option<i64>) {
        self.current_user_id = user_id;
    }

    pub fn is_current_user(&self, user_id: i64) -> bool {
        self.current_user_id == Some(user_id)
    }

    // -- filtering -----------------------------------------------------------

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn select_view(&mut self, tab: ViewTab) {
        self.tab = tab;
    }

    pub fn tab(&self) -> ViewTab {
        self.tab
    }

    /// Records matching the active tab and search query.
    pub fn visible(&self) -> Vec<&UserRecord> {
        filter_users(&self.users, self.tab, &self.query)
    }

    // -- pending mutations ---------------------------------------------------

    pub fn pending(&self) -> impl Iterator<Item = &PendingMutation> + '_ {
        self.pending.values()
    }

    pub fn is_pending(&self, user_id: i64, field: MutationField) -> bool {
        self.pending.contains_key(&(user_id, field))
    }

    fn mark_pending(&mut self, user_id: i64, field: MutationField) {
        self.pending.insert(
            (user_id, field),
            PendingMutation {
                user_id,
                field,
                status: MutationStatus::InFlight,
            },
        );
    }

    /// Retire the pending entry for `(user_id, field)`, stamped with its final status.
    fn settle(
        &mut self,
        user_id: i64,
        field: MutationField,
        status: MutationStatus,
    ) -> Option<PendingMutation> {
        let mut mutation = self.pending.remove(&(user_id, field))?;
        mutation.status = status;
        tracing::debug!(?mutation, "mutation settled");
        Some(mutation)
    }

    /// Whether the admin switch for `user_id` is inert.
    pub fn admin_toggle_disabled(&self, user_id: i64) -> bool {
        self.is_current_user(user_id)
            || self.is_pending(user_id, MutationField::AdminFlag)
            || self.get(user_id).map_or(true, |u| u.is_archived)
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale response");
            return false;
        }
        true
    }

    /// Invalidate every outstanding ticket. Call when the owning view unmounts.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.pending.clear();
        self.refreshing = false;
        self.create.submitting = false;
        if let Some(view) = self.profile.as_mut() {
            view.loading = false;
        }
    }

    fn notify(&mut self, record: &UserRecord) {
        if let Some(listener) = self.listener.as_mut() {
            listener(record);
        }
    }

    // -- toggle admin --------------------------------------------------------

    pub fn begin_toggle_admin(&mut self, user_id: i64) -> Result<AdminTicket, AccessError> {
        let user = self.get(user_id).ok_or(AccessError::NotFound(user_id))?;
        if self.is_current_user(user_id) {
            return Err(AccessError::SelfDemotion(user_id));
        }
        if user.is_archived {
            return Err(AccessError::Archived(user_id));
        }
        if self.is_pending(user_id, MutationField::AdminFlag) {
            return Err(AccessError::AlreadyPending(user_id));
        }
        let is_admin = !user.is_admin;
        self.mark_pending(user_id, MutationField::AdminFlag);
        Ok(AdminTicket {
            generation: self.generation,
            user_id,
            is_admin,
        })
    }

    pub fn finish_toggle_admin(
        &mut self,
        ticket: AdminTicket,
        result: Result<Option<UserRecord>, AccessError>,
    ) -> Completion {
        if !self.is_current(ticket.generation) {
            return Completion::discarded();
        }
        match result {
            Ok(returned) => {
                let settled =
                    self.settle(ticket.user_id, MutationField::AdminFlag, MutationStatus::Resolved);
                let done = Completion::resolved(Some(Operation::ToggleAdmin.succeeded()))
                    .settling(settled);
                // An echo for some other id must not overwrite this slot.
                let returned = returned.filter(|record| {
                    let matches = record.id == ticket.user_id;
                    if !matches {
                        tracing::warn!(
                            user_id = ticket.user_id,
                            echoed_id = record.id,
                            "admin update echoed a different user; applying requested flag"
                        );
                    }
                    matches
                });
                let Some(cached) = self.get_mut(ticket.user_id) else {
                    tracing::warn!(user_id = ticket.user_id, "admin update for a user no longer cached");
                    return done;
                };
                match returned {
                    Some(record) => {
                        cached.merge_from(record);
                        let merged = cached.clone();
                        self.notify(&merged);
                    }
                    None => cached.is_admin = ticket.is_admin,
                }
                tracing::info!(user_id = ticket.user_id, is_admin = ticket.is_admin, "admin status updated");
                done
            }
            Err(err) => {
                let settled =
                    self.settle(ticket.user_id, MutationField::AdminFlag, MutationStatus::Failed);
                tracing::warn!(user_id = ticket.user_id, error = %err, "admin status update failed");
                Completion::failed(Operation::ToggleAdmin.failed(&err)).settling(settled)
            }
        }
    }

    /// Flip a user's admin flag and wait for the server.
    pub async fn toggle_admin<D: UserDirectory>(&mut self, directory: &D, user_id: i64) -> Completion {
        let ticket = match self.begin_toggle_admin(user_id) {
            Ok(ticket) => ticket,
            Err(err) => return Completion::failed(Operation::ToggleAdmin.failed(&err)),
        };
        let result = directory.set_admin(ticket.user_id, ticket.is_admin).await;
        self.finish_toggle_admin(ticket, result)
    }

    // -- create user ---------------------------------------------------------

    pub fn create_dialog(&self) -> &CreateDialog {
        &self.create
    }

    pub fn open_create_dialog(&mut self) {
        self.create.open = true;
    }

    /// Hide the dialog. The draft is kept for the next time it opens.
    pub fn close_create_dialog(&mut self) {
        self.create.open = false;
    }

    pub fn draft_mut(&mut self) -> &mut UserDraft {
        &mut self.create.draft
    }

    pub fn begin_create_user(&mut self) -> Result<CreateTicket, AccessError> {
        let missing = self.create.draft.missing_fields();
        if !missing.is_empty() {
            return Err(AccessError::Validation(missing));
        }
        self.create.submitting = true;
        Ok(CreateTicket {
            generation: self.generation,
            draft: self.create.draft.clone(),
        })
    }

    pub fn finish_create_user(
        &mut self,
        ticket: CreateTicket,
        result: Result<Option<UserRecord>, AccessError>,
    ) -> Completion {
        if !self.is_current(ticket.generation) {
            return Completion::discarded();
        }
        self.create.submitting = false;
        match result {
            Ok(created) => {
                if let Some(record) = created {
                    tracing::info!(user_id = record.id, "user created");
                    self.upsert(record.clone());
                    self.notify(&record);
                }
                self.create.draft =
                    UserDraft::with_defaults(&self.defaults.password, self.defaults.program);
                self.create.open = false;
                Completion::resolved(Some(Operation::CreateUser.succeeded()))
            }
            Err(err) => {
                tracing::warn!(email = %ticket.draft.email, error = %err, "user creation failed");
                Completion::failed(Operation::CreateUser.failed(&err))
            }
        }
    }

    /// Submit the create form and wait for the server.
    pub async fn create_user<D: UserDirectory>(&mut self, directory: &D) -> Completion {
        let ticket = match self.begin_create_user() {
            Ok(ticket) => ticket,
            Err(err) => return Completion::failed(Operation::CreateUser.failed(&err)),
        };
        let result = directory.create_user(&ticket.draft).await;
        self.finish_create_user(ticket, result)
    }

    // -- reset password ------------------------------------------------------

    pub fn reset_dialog(&self) -> &ResetDialog {
        &self.reset
    }

    /// Open the reset dialog for `user_id`, pre-filled with the default password.
    pub fn open_reset_dialog(&mut self, user_id: i64) {
        self.reset = ResetDialog {
            open: true,
            user_id: Some(user_id),
            new_password: self.defaults.password.clone(),
        };
    }

    pub fn close_reset_dialog(&mut self) {
        self.reset.open = false;
    }

    pub fn set_new_password(&mut self, password: impl Into<String>) {
        self.reset.new_password = password.into();
    }

    pub fn begin_reset_password(&mut self) -> Result<PasswordTicket, AccessError> {
        let mut missing = Vec::new();
        if self.reset.user_id.is_none() {
            missing.push("user");
        }
        if self.reset.new_password.trim().is_empty() {
            missing.push("new password");
        }
        let Some(user_id) = self.reset.user_id.filter(|_| missing.is_empty()) else {
            return Err(AccessError::Validation(missing));
        };
        if self.is_pending(user_id, MutationField::Password) {
            return Err(AccessError::AlreadyPending(user_id));
        }
        self.mark_pending(user_id, MutationField::Password);
        Ok(PasswordTicket {
            generation: self.generation,
            user_id,
            new_password: self.reset.new_password.clone(),
        })
    }

    pub fn finish_reset_password(
        &mut self,
        ticket: PasswordTicket,
        result: Result<(), AccessError>,
    ) -> Completion {
        if !self.is_current(ticket.generation) {
            return Completion::discarded();
        }
        match result {
            Ok(()) => {
                let settled =
                    self.settle(ticket.user_id, MutationField::Password, MutationStatus::Resolved);
                tracing::info!(user_id = ticket.user_id, "password reset");
                self.reset = ResetDialog::default();
                Completion::resolved(Some(Operation::ResetPassword.succeeded())).settling(settled)
            }
            Err(err) => {
                let settled =
                    self.settle(ticket.user_id, MutationField::Password, MutationStatus::Failed);
                tracing::warn!(user_id = ticket.user_id, error = %err, "password reset failed");
                Completion::failed(Operation::ResetPassword.failed(&err)).settling(settled)
            }
        }
    }

    /// Submit the reset dialog and wait for the server.
    pub async fn reset_password<D: UserDirectory>(&mut self, directory: &D) -> Completion {
        let ticket = match self.begin_reset_password() {
            Ok(ticket) => ticket,
            Err(err) => return Completion::failed(Operation::ResetPassword.failed(&err)),
        };
        let result = directory
            .reset_password(ticket.user_id, &ticket.new_password)
            .await;
        self.finish_reset_password(ticket, result)
    }

    // -- applicant profile ---------------------------------------------------

    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    /// Show the profile projection for an applicant and start loading their applications.
    pub fn begin_open_profile(&mut self, user_id: i64) -> Result<ProfileTicket, AccessError> {
        let user = self.get(user_id).ok_or(AccessError::NotFound(user_id))?;
        if user.is_admin {
            return Err(AccessError::NotApplicant(user_id));
        }
        self.profile = Some(ProfileView {
            profile: ApplicantProfile::from(user),
            applications: Vec::new(),
            loading: true,
        });
        Ok(ProfileTicket {
            generation: self.generation,
            user_id,
        })
    }

    pub fn finish_open_profile(
        &mut self,
        ticket: ProfileTicket,
        result: Result<Vec<ApplicationRecord>, AccessError>,
    ) -> Completion {
        if !self.is_current(ticket.generation) {
            return Completion::discarded();
        }
        let Some(view) = self
            .profile
            .as_mut()
            .filter(|view| view.profile.id == ticket.user_id)
        else {
            return Completion::discarded();
        };
        view.loading = false;
        match result {
            Ok(applications) => {
                view.applications = applications;
                Completion::resolved(None)
            }
            Err(err) => {
                view.applications.clear();
                tracing::warn!(user_id = ticket.user_id, error = %err, "loading applications failed");
                Completion::failed(Operation::LoadApplications.failed(&err))
            }
        }
    }

    pub async fn open_profile<D: UserDirectory>(&mut self, directory: &D, user_id: i64) -> Completion {
        let ticket = match self.begin_open_profile(user_id) {
            Ok(ticket) => ticket,
            Err(err) => return Completion::failed(Operation::LoadApplications.failed(&err)),
        };
        let result = directory.list_applications(ticket.user_id).await;
        self.finish_open_profile(ticket, result)
    }

    pub fn close_profile(&mut self) {
        self.profile = None;
    }

    /// Recompute the open profile's projection from the current cache.
    fn reproject_profile(&mut self) {
        let Some(id) = self.profile.as_ref().map(|view| view.profile.id) else {
            return;
        };
        let projection = self.get(id).map(ApplicantProfile::from);
        match (projection, self.profile.as_mut()) {
            (Some(profile), Some(view)) => view.profile = profile,
            (None, _) => self.profile = None,
            _ => {}
        }
    }

    // -- refresh -------------------------------------------------------------

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refreshing = true;
        RefreshTicket {
            generation: self.generation,
        }
    }

    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<UserRecord>, AccessError>,
    ) -> Completion {
        if !self.is_current(ticket.generation) {
            return Completion::discarded();
        }
        self.refreshing = false;
        match result {
            Ok(users) => {
                tracing::debug!(count = users.len(), "user list refreshed");
                self.replace_users(users);
                Completion::resolved(None)
            }
            Err(err) => {
                tracing::error!(error = %err, "refreshing users failed");
                Completion::failed(Operation::Refresh.failed(&err))
            }
        }
    }

    /// Reload the whole collection from the directory.
    pub async fn refresh<D: UserDirectory>(&mut self, directory: &D) -> Completion {
        let ticket = self.begin_refresh();
        let result = directory.list_users().await;
        self.finish_refresh(ticket, result)
    }
}

/// Keep the last occurrence of each id, preserving first-seen order.
fn dedup_by_id(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let mut out: Vec<UserRecord> = Vec::with_capacity(users.len());
    for user in users {
        match out.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => *slot = user,
            None => out.push(user),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::memory::{DirectoryCall, MemoryDirectory};
    use crate::models::{ApplicationStatus, Program};

    fn user(id: i64, is_admin: bool, is_archived: bool) -> UserRecord {
        UserRecord {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            email: format!("user{id}@launchpad.test"),
            is_admin,
            is_archived,
            program: None,
            applications: None,
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<UserRecord>>>, impl FnMut(&UserRecord) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |u: &UserRecord| sink.borrow_mut().push(u.clone()))
    }

    fn fill_draft(list: &mut AccessList) {
        let draft = list.draft_mut();
        draft.first_name = "Ada".into();
        draft.last_name = "Lovelace".into();
        draft.email = "ada@launchpad.test".into();
    }

    #[tokio::test]
    async fn test_toggle_admin_merges_server_record_and_notifies_once() {
        let dir = MemoryDirectory::new(vec![user(1, false, false)]);
        let (seen, listener) = recorder();
        let mut list = AccessList::new(vec![user(1, false, false)], None).on_user_update(listener);

        let done = list.toggle_admin(&dir, 1).await;

        assert_eq!(done.outcome, Outcome::Resolved);
        assert_eq!(done.notice, Some(Operation::ToggleAdmin.succeeded()));
        assert_eq!(list.users().len(), 1);
        assert!(list.users()[0].is_admin);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, 1);
        assert!(seen[0].is_admin);
        assert_eq!(list.pending().count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_admin_leaves_other_records_identical() {
        let users = vec![user(1, false, false), user(2, true, false), user(3, false, false)];
        let dir = MemoryDirectory::new(users.clone());
        let mut list = AccessList::new(users.clone(), Some(2));

        list.toggle_admin(&dir, 3).await;

        assert_eq!(list.users()[0], users[0]);
        assert_eq!(list.users()[1], users[1]);
        assert_eq!(list.users()[2], UserRecord { is_admin: true, ..users[2].clone() });
    }

    #[tokio::test]
    async fn test_toggle_admin_failure_leaves_cache_and_reenables_control() {
        let users = vec![user(1, false, false)];
        let dir = MemoryDirectory::new(users.clone());
        dir.fail(DirectoryCall::SetAdmin);
        let (seen, listener) = recorder();
        let mut list = AccessList::new(users.clone(), None).on_user_update(listener);

        let done = list.toggle_admin(&dir, 1).await;

        assert_eq!(done.outcome, Outcome::Failed);
        assert!(done.notice.unwrap().is_error());
        assert_eq!(list.users(), users.as_slice());
        assert!(!list.admin_toggle_disabled(1));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_toggle_control_disabled_while_pending() {
        let mut list = AccessList::new(vec![user(1, false, false)], None);
        let ticket = list.begin_toggle_admin(1).unwrap();
        assert!(list.admin_toggle_disabled(1));
        assert_eq!(
            list.begin_toggle_admin(1).unwrap_err(),
            AccessError::AlreadyPending(1)
        );
        let pending: Vec<_> = list.pending().copied().collect();
        assert_eq!(
            pending,
            vec![PendingMutation {
                user_id: 1,
                field: MutationField::AdminFlag,
                status: MutationStatus::InFlight,
            }]
        );
        let _ = list.finish_toggle_admin(ticket, Ok(None));
        assert!(!list.admin_toggle_disabled(1));
        assert!(list.users()[0].is_admin);
    }

    #[test]
    fn test_self_toggle_is_always_disabled_and_refused() {
        let mut list = AccessList::new(vec![user(5, true, false), user(6, false, false)], Some(5));
        assert!(list.admin_toggle_disabled(5));
        assert_eq!(list.begin_toggle_admin(5).unwrap_err(), AccessError::SelfDemotion(5));
        list.replace_users(vec![user(5, false, false)]);
        assert!(list.admin_toggle_disabled(5));
        assert!(list.pending().next().is_none());
    }

    #[test]
    fn test_toggle_refuses_archived_and_unknown_users() {
        let mut list = AccessList::new(vec![user(1, false, true)], None);
        assert_eq!(list.begin_toggle_admin(1).unwrap_err(), AccessError::Archived(1));
        assert_eq!(list.begin_toggle_admin(9).unwrap_err(), AccessError::NotFound(9));
        assert!(list.admin_toggle_disabled(1));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_resolve_independently() {
        let users = vec![user(1, false, false), user(2, false, false)];
        let dir = MemoryDirectory::new(users.clone());
        let mut list = AccessList::new(users, None);

        let first = list.begin_toggle_admin(1).unwrap();
        let second = list.begin_toggle_admin(2).unwrap();
        assert_eq!(list.pending().count(), 2);

        let second_result = dir.set_admin(second.user_id(), second.is_admin()).await;
        let first_result: Result<Option<UserRecord>, AccessError> =
            Err(AccessError::Transport("connection reset".into()));

        assert!(list.finish_toggle_admin(second, second_result).is_resolved());
        assert_eq!(list.finish_toggle_admin(first, first_result).outcome, Outcome::Failed);

        assert!(!list.get(1).unwrap().is_admin);
        assert!(list.get(2).unwrap().is_admin);
        assert_eq!(list.pending().count(), 0);
    }

    #[test]
    fn test_late_response_after_teardown_is_discarded() {
        let mut list = AccessList::new(vec![user(1, false, false)], None);
        let ticket = list.begin_toggle_admin(1).unwrap();
        list.teardown();
        let done = list.finish_toggle_admin(ticket, Ok(Some(user(1, true, false))));
        assert_eq!(done.outcome, Outcome::Discarded);
        assert!(done.notice.is_none());
        assert!(!list.get(1).unwrap().is_admin);
    }

    #[tokio::test]
    async fn test_create_user_with_any_blank_field_makes_no_call() {
        let blanks: [fn(&mut UserDraft, &str); 4] = [
            |d, v| d.first_name = v.to_string(),
            |d, v| d.last_name = v.to_string(),
            |d, v| d.email = v.to_string(),
            |d, v| d.password = v.to_string(),
        ];
        for (field, blank) in blanks.iter().enumerate() {
            for value in ["", "   "] {
                let dir = MemoryDirectory::new(Vec::new());
                let mut list = AccessList::new(Vec::new(), None);
                list.open_create_dialog();
                fill_draft(&mut list);
                blank(list.draft_mut(), value);

                let done = list.create_user(&dir).await;

                assert_eq!(done.outcome, Outcome::Failed, "field {field} = {value:?}");
                assert_eq!(
                    done.notice.unwrap().description,
                    "Please fill out all required fields."
                );
                assert_eq!(dir.calls(), 0, "field {field} = {value:?}");
                assert!(list.create_dialog().open);
                assert!(list.users().is_empty());
            }
        }
    }

    #[test]
    fn test_toggle_echo_for_another_id_keeps_ids_unique() {
        let (seen, listener) = recorder();
        let mut list = AccessList::new(vec![user(1, false, false), user(2, false, false)], None)
            .on_user_update(listener);
        let ticket = list.begin_toggle_admin(1).unwrap();

        let done = list.finish_toggle_admin(ticket, Ok(Some(user(2, true, false))));

        assert_eq!(done.outcome, Outcome::Resolved);
        let ids: Vec<i64> = list.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(list.get(1).unwrap().is_admin);
        assert!(!list.get(2).unwrap().is_admin);
        assert!(seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_completion_reports_settled_mutation_status() {
        let dir = MemoryDirectory::new(vec![user(1, false, false), user(2, false, false)]);
        let mut list = AccessList::new(vec![user(1, false, false), user(2, false, false)], None);

        let done = list.toggle_admin(&dir, 1).await;
        assert_eq!(
            done.settled,
            Some(PendingMutation {
                user_id: 1,
                field: MutationField::AdminFlag,
                status: MutationStatus::Resolved,
            })
        );

        dir.fail(DirectoryCall::SetAdmin);
        let done = list.toggle_admin(&dir, 2).await;
        assert_eq!(done.outcome, Outcome::Failed);
        assert_eq!(
            done.settled.map(|m| (m.user_id, m.status)),
            Some((2, MutationStatus::Failed))
        );
        assert_eq!(list.pending().count(), 0);
    }

    #[tokio::test]
    async fn test_create_user_success_appends_and_resets_form() {
        let dir = MemoryDirectory::new(vec![user(1, true, false)]);
        let (seen, listener) = recorder();
        let mut list = AccessList::new(vec![user(1, true, false)], Some(1)).on_user_update(listener);
        list.open_create_dialog();
        fill_draft(&mut list);
        list.draft_mut().program = Program::Liftoff;

        let done = list.create_user(&dir).await;

        assert!(done.is_resolved());
        assert_eq!(list.users().len(), 2);
        let created = &list.users()[1];
        assert_eq!(created.email, "ada@launchpad.test");
        assert_eq!(created.program, Some(Program::Liftoff));
        assert!(!list.create_dialog().open);
        assert!(!list.create_dialog().submitting);
        assert_eq!(
            list.create_dialog().draft,
            UserDraft::with_defaults("Changeme", Program::OneZeroOne)
        );
        assert_eq!(seen.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_create_user_failure_keeps_dialog_and_draft() {
        let dir = MemoryDirectory::new(Vec::new());
        dir.fail(DirectoryCall::CreateUser);
        let mut list = AccessList::new(Vec::new(), None);
        list.open_create_dialog();
        fill_draft(&mut list);
        let before = list.create_dialog().draft.clone();

        let done = list.create_user(&dir).await;

        assert_eq!(done.outcome, Outcome::Failed);
        assert_eq!(
            done.notice.unwrap().description,
            "Failed to create user. Please try again."
        );
        assert!(list.create_dialog().open);
        assert_eq!(list.create_dialog().draft, before);
        assert!(list.users().is_empty());
    }

    #[test]
    fn test_create_without_returned_record_still_closes_dialog() {
        let mut list = AccessList::new(Vec::new(), None);
        list.open_create_dialog();
        fill_draft(&mut list);
        let ticket = list.begin_create_user().unwrap();
        assert!(list.create_dialog().submitting);
        let done = list.finish_create_user(ticket, Ok(None));
        assert!(done.is_resolved());
        assert!(!list.create_dialog().open);
        assert!(list.users().is_empty());
    }

    #[test]
    fn test_custom_defaults_seed_draft_and_reset_dialog() {
        let defaults = AccountDefaults {
            password: "Welcome1".into(),
            program: Program::Foundations,
        };
        let mut list = AccessList::new(vec![user(1, true, false)], None).with_defaults(defaults);
        assert_eq!(list.create_dialog().draft.password, "Welcome1");
        assert_eq!(list.create_dialog().draft.program, Program::Foundations);
        list.open_reset_dialog(1);
        assert_eq!(list.reset_dialog().new_password, "Welcome1");
    }

    #[tokio::test]
    async fn test_reset_password_with_empty_password_makes_no_call() {
        let dir = MemoryDirectory::new(vec![user(1, true, false)]);
        let mut list = AccessList::new(vec![user(1, true, false)], None);
        list.open_reset_dialog(1);
        list.set_new_password("");

        let done = list.reset_password(&dir).await;

        assert_eq!(done.outcome, Outcome::Failed);
        assert_eq!(done.notice.unwrap().description, "Please provide a new password.");
        assert_eq!(dir.calls(), 0);
        assert!(list.reset_dialog().open);
    }

    #[tokio::test]
    async fn test_reset_password_success_closes_dialog_without_touching_cache() {
        let users = vec![user(1, true, false)];
        let dir = MemoryDirectory::new(users.clone());
        let mut list = AccessList::new(users.clone(), None);
        list.open_reset_dialog(1);
        assert_eq!(list.reset_dialog().new_password, "Changeme");
        list.set_new_password("hunter22");

        let done = list.reset_password(&dir).await;

        assert!(done.is_resolved());
        assert_eq!(list.reset_dialog(), &ResetDialog::default());
        assert_eq!(list.users(), users.as_slice());
        assert_eq!(dir.password_for(1).as_deref(), Some("hunter22"));
    }

    #[tokio::test]
    async fn test_reset_password_failure_keeps_dialog_open() {
        let dir = MemoryDirectory::new(vec![user(1, true, false)]);
        dir.fail(DirectoryCall::ResetPassword);
        let mut list = AccessList::new(vec![user(1, true, false)], None);
        list.open_reset_dialog(1);

        let done = list.reset_password(&dir).await;

        assert_eq!(done.outcome, Outcome::Failed);
        assert!(list.reset_dialog().open);
        assert_eq!(list.reset_dialog().user_id, Some(1));
        assert!(!list.is_pending(1, MutationField::Password));
    }

    #[tokio::test]
    async fn test_open_profile_projects_counts_and_loads_applications() {
        let mut applicant = user(4, false, false);
        applicant.applications = Some(vec![
            ApplicationRecord {
                id: 1,
                status: ApplicationStatus::Interested,
                company: None,
                position: None,
            },
            ApplicationRecord {
                id: 2,
                status: ApplicationStatus::OfferAccepted,
                company: Some("Acme".into()),
                position: None,
            },
        ]);
        let dir = MemoryDirectory::new(vec![applicant.clone()]);
        dir.set_applications(4, applicant.applications.clone().unwrap());
        let mut list = AccessList::new(vec![applicant], None);

        let ticket = list.begin_open_profile(4).unwrap();
        let view = list.profile().unwrap();
        assert!(view.loading);
        assert_eq!(view.profile.application_status_count.interested, 1);
        assert_eq!(view.profile.application_status_count.offer_accepted, 1);

        let result = dir.list_applications(ticket.user_id()).await;
        assert!(list.finish_open_profile(ticket, result).is_resolved());
        let view = list.profile().unwrap();
        assert!(!view.loading);
        assert_eq!(view.applications.len(), 2);
    }

    #[tokio::test]
    async fn test_open_profile_failure_yields_empty_applications() {
        let dir = MemoryDirectory::new(vec![user(4, false, false)]);
        dir.fail(DirectoryCall::ListApplications);
        let mut list = AccessList::new(vec![user(4, false, false)], None);

        let done = list.open_profile(&dir, 4).await;

        assert_eq!(done.outcome, Outcome::Failed);
        let view = list.profile().unwrap();
        assert!(!view.loading);
        assert!(view.applications.is_empty());
    }

    #[test]
    fn test_profile_refused_for_admins_and_discarded_after_close() {
        let mut list = AccessList::new(vec![user(1, true, false), user(2, false, false)], None);
        assert_eq!(list.begin_open_profile(1).unwrap_err(), AccessError::NotApplicant(1));

        let ticket = list.begin_open_profile(2).unwrap();
        list.close_profile();
        let done = list.finish_open_profile(ticket, Ok(Vec::new()));
        assert_eq!(done.outcome, Outcome::Discarded);
        assert!(list.profile().is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache_wholesale() {
        let dir = MemoryDirectory::new(vec![user(7, false, false), user(8, true, true)]);
        let mut list = AccessList::new(vec![user(1, false, false)], None);

        let done = list.refresh(&dir).await;

        assert!(done.is_resolved());
        let ids: Vec<i64> = list.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![7, 8]);
        assert!(!list.is_refreshing());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stale_data() {
        let dir = MemoryDirectory::new(Vec::new());
        dir.fail(DirectoryCall::ListUsers);
        let mut list = AccessList::new(vec![user(1, false, false)], None);

        let done = list.refresh(&dir).await;

        assert_eq!(done.outcome, Outcome::Failed);
        assert_eq!(
            done.notice.unwrap().description,
            "Failed to refresh user list. Please try again."
        );
        assert_eq!(list.users().len(), 1);
    }

    #[test]
    fn test_refresh_reprojects_open_profile() {
        let mut list = AccessList::new(vec![user(2, false, false)], None);
        let _ticket = list.begin_open_profile(2).unwrap();
        let mut archived = user(2, false, true);
        archived.first_name = "Renamed".into();
        let ticket = list.begin_refresh();
        let _ = list.finish_refresh(ticket, Ok(vec![archived]));
        let view = list.profile().unwrap();
        assert_eq!(view.profile.first_name, "Renamed");
        assert!(view.profile.is_archived);
    }

    #[test]
    fn test_visible_applies_tab_then_search() {
        let mut list = AccessList::new(
            vec![user(1, false, false), user(2, false, true), user(3, true, false)],
            None,
        );
        list.select_view(ViewTab::Archived);
        list.search("");
        let ids: Vec<i64> = list.visible().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);

        list.select_view(ViewTab::All);
        list.search("FIRST3");
        let ids: Vec<i64> = list.visible().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_duplicate_ids_collapse_to_last_copy() {
        let list = AccessList::new(vec![user(1, false, false), user(1, true, false)], None);
        assert_eq!(list.users().len(), 1);
        assert!(list.users()[0].is_admin);
    }
}
