use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use tourdesk_application::UserRepository;
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{RoleName, UserAccount, UserId, UserStatus};

/// In-memory user account repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn insert(&self, account: UserAccount) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&account.id) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                account.id
            )));
        }

        users.insert(account.id.clone(), account);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<UserAccount>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        role: &RoleName,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(user_id).map(|account| {
            account.role = role.clone();
            account.updated_at = updated_at;
            account.clone()
        }))
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(user_id).map(|account| {
            account.status = status;
            account.updated_at = updated_at;
            account.clone()
        }))
    }
}
