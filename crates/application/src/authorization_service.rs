use std::sync::Arc;

use tracing::{debug, warn};

use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{
    EffectivePermissions, PermissionName, Principal, RequiredAccess, RoleName,
};

use crate::{PermissionRegistry, RoleRepository};

#[cfg(test)]
mod tests;

/// Application service resolving roles into effective permissions and
/// enforcing route requirements.
///
/// Resolution is recomputed on every call; nothing is cached, so role and
/// permission edits take effect on the next request.
#[derive(Clone)]
pub struct AuthorizationService {
    role_repository: Arc<dyn RoleRepository>,
    permission_registry: PermissionRegistry,
}

impl AuthorizationService {
    /// Creates a new authorization service from injected dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        permission_registry: PermissionRegistry,
    ) -> Self {
        Self {
            role_repository,
            permission_registry,
        }
    }

    /// Resolves the effective permission set of a role.
    ///
    /// An unknown role resolves to the empty set rather than an error.
    pub async fn resolve(&self, role_name: &RoleName) -> AppResult<EffectivePermissions> {
        let Some(role) = self.role_repository.find_by_name(role_name).await? else {
            debug!(role = %role_name, "role not found, resolving to empty permission set");
            return Ok(EffectivePermissions::empty());
        };

        let names = role.permissions().iter().cloned().collect::<Vec<_>>();
        let permissions = self.permission_registry.find_by_names(&names).await?;

        debug!(
            role = %role_name,
            listed = names.len(),
            resolved = permissions.len(),
            "resolved effective permissions"
        );
        Ok(EffectivePermissions::new(role, permissions))
    }

    /// Returns whether the principal's role grants the permission.
    pub async fn has_permission(
        &self,
        principal: &Principal,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        Ok(self.resolve(principal.role()).await?.contains(permission))
    }

    /// Returns whether the principal's role grants at least one permission.
    pub async fn has_any_permission(
        &self,
        principal: &Principal,
        permissions: &[PermissionName],
    ) -> AppResult<bool> {
        Ok(self
            .resolve(principal.role())
            .await?
            .contains_any(permissions))
    }

    /// Returns whether the principal's role grants every permission.
    pub async fn has_all_permissions(
        &self,
        principal: &Principal,
        permissions: &[PermissionName],
    ) -> AppResult<bool> {
        Ok(self
            .resolve(principal.role())
            .await?
            .contains_all(permissions))
    }

    /// Returns whether the principal holds exactly this role.
    #[must_use]
    pub fn has_role(&self, principal: &Principal, role_name: &RoleName) -> bool {
        principal.role() == role_name
    }

    /// Admits or rejects a caller against a route requirement.
    ///
    /// A missing principal is `Unauthorized`; an authenticated principal that
    /// does not satisfy the requirement is `Forbidden`.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        access: &RequiredAccess,
    ) -> AppResult<()> {
        let Some(principal) = principal else {
            return Err(AppError::Unauthorized("authentication required".to_owned()));
        };

        if !principal.status().is_active() {
            return Err(AppError::Forbidden(format!(
                "user '{}' is {}",
                principal.user_id(),
                principal.status().as_str()
            )));
        }

        let granted = match access {
            RequiredAccess::Permission(permission) => {
                self.has_permission(principal, permission).await?
            }
            RequiredAccess::AnyOf(permissions) => {
                self.has_any_permission(principal, permissions).await?
            }
            RequiredAccess::AllOf(permissions) => {
                self.has_all_permissions(principal, permissions).await?
            }
            RequiredAccess::Role(role_name) => self.has_role(principal, role_name),
        };

        if granted {
            return Ok(());
        }

        warn!(
            user = %principal.user_id(),
            role = %principal.role(),
            required = %access,
            "authorization denied"
        );
        Err(AppError::Forbidden(format!(
            "user '{}' with role '{}' requires {access}",
            principal.user_id(),
            principal.role()
        )))
    }
}
