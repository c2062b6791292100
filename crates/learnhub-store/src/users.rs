use learnhub_core::UserRole;
use learnhub_models::{NewUser, User, UserChanges};

use crate::memory::{InMemoryRepository, StoreError};

/// Users keyed by id, with email uniqueness enforced on every write.
#[derive(Clone, Default)]
pub struct UserRepository {
    inner: InMemoryRepository<User>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_all(&self) -> Vec<User> {
        self.inner.find_all()
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.inner.find_by_id(id)
    }

    /// Exact match.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.inner.find_one_by(|user| user.email == email)
    }

    pub fn find_by_role(&self, role: UserRole) -> Vec<User> {
        self.inner.find_many_by(|user| user.role == role)
    }

    pub fn email_taken_by_other(&self, email: &str, user_id: &str) -> bool {
        self.inner
            .find_one_by(|user| user.email == email && user.base.id != user_id)
            .is_some()
    }

    /// Fails with [`StoreError::Conflict`] when the email is already registered.
    pub fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let email = new_user.email.clone();
        let user = self
            .inner
            .create_unless(|existing| existing.email == email, new_user)?;

        tracing::debug!(user_id = %user.base.id, role = %user.role, "User stored");
        Ok(user)
    }

    /// `Ok(None)` when the user does not exist; [`StoreError::Conflict`] when
    /// the new email belongs to someone else.
    pub fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
        match changes.email.clone() {
            Some(email) => self
                .inner
                .update_unless(id, |other| other.email == email, changes),
            None => Ok(self.inner.update(id, changes)),
        }
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }
}
