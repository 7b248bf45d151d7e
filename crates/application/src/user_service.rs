use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{RoleName, UserAccount, UserId, UserStatus};

use crate::{RoleRepository, UserRepository};

/// Application service for role assignment and account status.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
        }
    }

    /// Returns one account or a not-found error.
    pub async fn get(&self, user_id: &UserId) -> AppResult<UserAccount> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))
    }

    /// Lists accounts ordered by id.
    pub async fn list(&self) -> AppResult<Vec<UserAccount>> {
        let mut users = self.user_repository.list().await?;
        users.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(users)
    }

    /// Assigns a different role. The role must exist.
    pub async fn change_role(&self, user_id: &UserId, role: &RoleName) -> AppResult<UserAccount> {
        if self.role_repository.find_by_name(role).await?.is_none() {
            return Err(AppError::NotFound(format!("role '{role}' was not found")));
        }

        let account = self
            .user_repository
            .update_role(user_id, role, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))?;

        info!(user = %user_id, role = %role, "user role changed");
        Ok(account)
    }

    /// Changes the account status.
    pub async fn change_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
    ) -> AppResult<UserAccount> {
        let account = self
            .user_repository
            .update_status(user_id, status, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))?;

        info!(user = %user_id, status = status.as_str(), "user status changed");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use tourdesk_core::AppError;
    use tourdesk_domain::{Role, UserStatus};

    use crate::test_support::{FakeRoleRepository, FakeUserRepository, role_name, user_id};

    use super::UserService;

    async fn service() -> (UserService, Arc<FakeUserRepository>) {
        let users = Arc::new(FakeUserRepository::default());
        users.seed("uid-b", "customer", UserStatus::Active).await;
        users.seed("uid-a", "customer", UserStatus::Active).await;

        let roles = Arc::new(FakeRoleRepository::default());
        for name in ["customer", "staff"] {
            let role = Role::new(role_name(name), name, None, true, std::iter::empty(), Utc::now())
                .unwrap_or_else(|error| panic!("invalid role fixture: {error}"));
            roles.roles.lock().await.push(role);
        }

        (UserService::new(users.clone(), roles), users)
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let (service, _) = service().await;

        let users = service
            .list()
            .await
            .unwrap_or_else(|error| panic!("list failed: {error}"));

        let ids = users
            .iter()
            .map(|account| account.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["uid-a", "uid-b"]);
    }

    #[tokio::test]
    async fn change_role_assigns_existing_role() {
        let (service, users) = service().await;

        let account = service
            .change_role(&user_id("uid-a"), &role_name("staff"))
            .await
            .unwrap_or_else(|error| panic!("change_role failed: {error}"));

        assert_eq!(account.role, role_name("staff"));
        let stored = users.users.lock().await.clone();
        assert!(
            stored
                .iter()
                .any(|account| account.id == user_id("uid-a") && account.role == role_name("staff"))
        );
    }

    #[tokio::test]
    async fn change_role_rejects_unknown_role() {
        let (service, _) = service().await;

        let result = service
            .change_role(&user_id("uid-a"), &role_name("pilot"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn change_role_rejects_unknown_user() {
        let (service, _) = service().await;

        let result = service
            .change_role(&user_id("uid-zzz"), &role_name("staff"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn change_status_bans_user() {
        let (service, _) = service().await;

        let account = service
            .change_status(&user_id("uid-b"), UserStatus::Banned)
            .await
            .unwrap_or_else(|error| panic!("change_status failed: {error}"));

        assert_eq!(account.status, UserStatus::Banned);
        assert!(matches!(
            service.get(&user_id("uid-b")).await,
            Ok(stored) if stored.status == UserStatus::Banned
        ));
    }
}
