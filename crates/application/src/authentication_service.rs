use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use tourdesk_core::{AppError, AppResult, UserIdentity};
use tourdesk_domain::{Principal, RoleName, UserAccount, UserId, UserStatus};

use crate::{IdentityVerifier, UserRepository};


/// Application service turning bearer tokens into principals.
#[derive(Clone)]
pub struct AuthenticationService {
    verifier: Arc<dyn IdentityVerifier>,
    user_repository: Arc<dyn UserRepository>,
    default_role: RoleName,
}

impl AuthenticationService {
    /// Creates a new authentication service.
    #[must_use]
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        user_repository: Arc<dyn UserRepository>,
        default_role: RoleName,
    ) -> Self {
        Self {
            verifier,
            user_repository,
            default_role,
        }
    }

    /// Verifies a token and returns the caller's principal.
    ///
    /// First-seen identities are provisioned with the default role. Accounts
    /// that are not active are rejected with `Forbidden`.
    pub async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("missing bearer token".to_owned()));
        }

        let identity = self.verifier.verify(token).await?;
        let user_id = UserId::new(identity.subject()).map_err(|_| {
            AppError::Unauthorized("identity provider returned an empty subject".to_owned())
        })?;

        let account = match self.user_repository.find_by_id(&user_id).await? {
            Some(account) => account,
            None => self.provision(user_id, &identity).await?,
        };

        if !account.status.is_active() {
            warn!(user = %account.id, status = account.status.as_str(), "rejected non-active user");
            return Err(AppError::Forbidden(format!(
                "user '{}' is {}",
                account.id,
                account.status.as_str()
            )));
        }

        Ok(account.principal())
    }

    async fn provision(&self, user_id: UserId, identity: &UserIdentity) -> AppResult<UserAccount> {
        let now = Utc::now();
        let account = UserAccount {
            id: user_id,
            email: identity.email().map(str::to_owned),
            display_name: identity.display_name().map(str::to_owned),
            role: self.default_role.clone(),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        match self.user_repository.insert(account.clone()).await {
            Ok(()) => {
                info!(user = %account.id, role = %account.role, "provisioned user account");
                Ok(account)
            }
            Err(AppError::Conflict(_)) => self
                .user_repository
                .find_by_id(&account.id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "user '{}' conflicted on insert but could not be read",
                        account.id
                    ))
                }),
            Err(error) => Err(error),
        }
    }
}
