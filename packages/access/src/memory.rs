use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::directory::UserDirectory;
use crate::error::AccessError;
use crate::models::{ApplicationRecord, UserDraft, UserRecord};

/// Directory calls that can be made to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectoryCall {
    ListUsers,
    SetAdmin,
    CreateUser,
    ResetPassword,
    ListApplications,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<UserRecord>,
    applications: HashMap<i64, Vec<ApplicationRecord>>,
    passwords: HashMap<i64, String>,
    failing: HashSet<DirectoryCall>,
    calls: Vec<DirectoryCall>,
}

/// In-memory UserDirectory for tests and offline previews.
///
/// Clones share state, so a test can keep a handle while the access list uses another.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory {
    state: Arc<Mutex<State>>,
}

impl MemoryDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        let dir = Self::default();
        dir.lock().users = users;
        dir
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent `call` fail with a rejected response.
    pub fn fail(&self, call: DirectoryCall) {
        self.lock().failing.insert(call);
    }

    pub fn recover(&self, call: DirectoryCall) {
        self.lock().failing.remove(&call);
    }

    pub fn set_applications(&self, applicant_id: i64, applications: Vec<ApplicationRecord>) {
        self.lock().applications.insert(applicant_id, applications);
    }

    /// Total number of directory calls made so far.
    pub fn calls(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn calls_to(&self, call: DirectoryCall) -> usize {
        self.lock().calls.iter().filter(|c| **c == call).count()
    }

    pub fn password_for(&self, user_id: i64) -> Option<String> {
        self.lock().passwords.get(&user_id).cloned()
    }

    pub fn users(&self) -> Vec<UserRecord> {
        self.lock().users.clone()
    }

    /// Record the call and return the state, or the injected failure.
    fn enter(&self, call: DirectoryCall) -> Result<MutexGuard<'_, State>, AccessError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing.contains(&call) {
            return Err(AccessError::Rejected(format!("{call:?} failed")));
        }
        Ok(state)
    }
}

impl UserDirectory for MemoryDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, AccessError> {
        Ok(self.enter(DirectoryCall::ListUsers)?.users.clone())
    }

    async fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<Option<UserRecord>, AccessError> {
        let mut state = self.enter(DirectoryCall::SetAdmin)?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AccessError::Rejected(format!("user {user_id} not found")))?;
        user.is_admin = is_admin;
        // The admin endpoint does not echo applications.
        Ok(Some(UserRecord {
            applications: None,
            ..user.clone()
        }))
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<Option<UserRecord>, AccessError> {
        let mut state = self.enter(DirectoryCall::CreateUser)?;
        if state.users.iter().any(|u| u.email == draft.email) {
            return Err(AccessError::Rejected(format!("{} already exists", draft.email)));
        }
        let id = state.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let record = UserRecord {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            is_admin: false,
            is_archived: false,
            program: Some(draft.program),
            applications: None,
        };
        state.users.push(record.clone());
        state.passwords.insert(id, draft.password.clone());
        Ok(Some(record))
    }

    async fn reset_password(&self, user_id: i64, new_password: &str) -> Result<(), AccessError> {
        let mut state = self.enter(DirectoryCall::ResetPassword)?;
        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(AccessError::Rejected(format!("user {user_id} not found")));
        }
        state.passwords.insert(user_id, new_password.to_string());
        Ok(())
    }

    async fn list_applications(&self, applicant_id: i64) -> Result<Vec<ApplicationRecord>, AccessError> {
        let state = self.enter(DirectoryCall::ListApplications)?;
        Ok(state
            .applications
            .get(&applicant_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Program;

    fn user(id: i64) -> UserRecord {
        UserRecord {
            id,
            first_name: "Sam".into(),
            last_name: "Lee".into(),
            email: format!("sam{id}@launchpad.test"),
            is_admin: false,
            is_archived: false,
            program: None,
            applications: None,
        }
    }

    #[tokio::test]
    async fn test_set_admin_echoes_record() {
        let dir = MemoryDirectory::new(vec![user(1)]);
        let echoed = dir.set_admin(1, true).await.unwrap().unwrap();
        assert!(echoed.is_admin);
        assert!(dir.users()[0].is_admin);
        assert_eq!(dir.calls_to(DirectoryCall::SetAdmin), 1);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id_and_rejects_duplicate_email() {
        let dir = MemoryDirectory::new(vec![user(4)]);
        let mut draft = UserDraft::with_defaults("Changeme", Program::Alumni);
        draft.first_name = "Kim".into();
        draft.last_name = "Park".into();
        draft.email = "kim@launchpad.test".into();

        let created = dir.create_user(&draft).await.unwrap().unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(dir.password_for(5).as_deref(), Some("Changeme"));
        assert!(matches!(
            dir.create_user(&draft).await,
            Err(AccessError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_injected_failure_is_counted_and_recoverable() {
        let dir = MemoryDirectory::new(vec![user(1)]);
        dir.fail(DirectoryCall::ListUsers);
        assert!(dir.list_users().await.is_err());
        dir.recover(DirectoryCall::ListUsers);
        assert_eq!(dir.list_users().await.unwrap().len(), 1);
        assert_eq!(dir.calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_applicant_has_no_applications() {
        let dir = MemoryDirectory::new(Vec::new());
        assert!(dir.list_applications(99).await.unwrap().is_empty());
    }
}
