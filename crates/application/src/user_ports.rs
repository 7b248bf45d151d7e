use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tourdesk_core::{AppResult, UserIdentity};
use tourdesk_domain::{RoleName, UserAccount, UserId, UserStatus};

/// Port verifying bearer tokens against the external identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Returns the identity behind a token.
    ///
    /// Invalid or expired tokens yield `AppError::Unauthorized`.
    async fn verify(&self, token: &str) -> AppResult<UserIdentity>;
}

/// Repository port for locally owned user account data.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user account by identity provider id.
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserAccount>>;

    /// Inserts a new user account.
    async fn insert(&self, account: UserAccount) -> AppResult<()>;

    /// Lists all user accounts.
    async fn list(&self) -> AppResult<Vec<UserAccount>>;

    /// Replaces the assigned role, returning the updated account.
    async fn update_role(
        &self,
        user_id: &UserId,
        role: &RoleName,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>>;

    /// Replaces the account status, returning the updated account.
    async fn update_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>>;
}
