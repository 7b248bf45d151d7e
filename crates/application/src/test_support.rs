use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use tourdesk_core::{AppError, AppResult, UserIdentity};
use tourdesk_domain::{
    Permission, PermissionId, PermissionName, Role, RoleId, RoleName, UserAccount, UserId,
    UserStatus,
};

use crate::{IdentityVerifier, PermissionRepository, RoleRepository, UserRepository};

pub(crate) fn permission_name(value: &str) -> PermissionName {
    PermissionName::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
}

pub(crate) fn role_name(value: &str) -> RoleName {
    RoleName::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
}

pub(crate) fn user_id(value: &str) -> UserId {
    UserId::new(value).unwrap_or_else(|error| panic!("invalid fixture: {error}"))
}

/// Document-store fake that refuses batches above its cap.
pub(crate) struct FakePermissionRepository {
    pub(crate) permissions: Mutex<Vec<Permission>>,
    pub(crate) batch_calls: Mutex<Vec<usize>>,
    pub(crate) max_batch_size: usize,
    pub(crate) failing_name: Option<PermissionName>,
}

impl FakePermissionRepository {
    pub(crate) fn with_cap(max_batch_size: usize) -> Self {
        Self {
            permissions: Mutex::new(Vec::new()),
            batch_calls: Mutex::new(Vec::new()),
            max_batch_size,
            failing_name: None,
        }
    }

    pub(crate) async fn seed(&self, names: &[&str]) {
        let mut permissions = self.permissions.lock().await;
        for name in names {
            permissions.push(Permission::new(permission_name(name), None, Utc::now()));
        }
    }
}

impl Default for FakePermissionRepository {
    fn default() -> Self {
        Self::with_cap(10)
    }
}

#[async_trait]
impl PermissionRepository for FakePermissionRepository {
    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    async fn insert(&self, permission: Permission) -> AppResult<()> {
        self.permissions.lock().await.push(permission);
        Ok(())
    }

    async fn find_by_id(&self, id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .find(|permission| permission.id() == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &PermissionName) -> AppResult<Option<Permission>> {
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .find(|permission| permission.name() == name)
            .cloned())
    }

    async fn find_by_name_batch(&self, names: &[PermissionName]) -> AppResult<Vec<Permission>> {
        if names.len() > self.max_batch_size {
            return Err(AppError::Internal(format!(
                "batch of {} names exceeds limit of {}",
                names.len(),
                self.max_batch_size
            )));
        }

        if let Some(failing_name) = &self.failing_name
            && names.contains(failing_name)
        {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        self.batch_calls.lock().await.push(names.len());
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .filter(|permission| names.contains(permission.name()))
            .cloned()
            .collect())
    }

    async fn list(&self) -> AppResult<Vec<Permission>> {
        Ok(self.permissions.lock().await.clone())
    }

    async fn list_by_resource(&self, resource: &str) -> AppResult<Vec<Permission>> {
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .filter(|permission| permission.resource() == resource)
            .cloned()
            .collect())
    }

    async fn save(&self, permission: Permission) -> AppResult<()> {
        let mut permissions = self.permissions.lock().await;
        if let Some(stored) = permissions
            .iter_mut()
            .find(|stored| stored.id() == permission.id())
        {
            *stored = permission;
        }
        Ok(())
    }

    async fn delete(&self, id: PermissionId) -> AppResult<bool> {
        let mut permissions = self.permissions.lock().await;
        let before = permissions.len();
        permissions.retain(|permission| permission.id() != id);
        Ok(permissions.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeRoleRepository {
    pub(crate) roles: Mutex<Vec<Role>>,
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn insert(&self, role: Role) -> AppResult<()> {
        self.roles.lock().await.push(role);
        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.id() == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.name() == name)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.clone())
    }

    async fn save(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if let Some(stored) = roles.iter_mut().find(|stored| stored.id() == role.id()) {
            *stored = role;
        }
        Ok(())
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|role| role.id() != id);
        Ok(roles.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub(crate) users: Mutex<Vec<UserAccount>>,
}

impl FakeUserRepository {
    pub(crate) async fn seed(&self, id: &str, role: &str, status: UserStatus) {
        let now = Utc::now();
        self.users.lock().await.push(UserAccount {
            id: user_id(id),
            email: None,
            display_name: None,
            role: role_name(role),
            status,
            created_at: now,
            updated_at: now,
        });
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|account| &account.id == user_id)
            .cloned())
    }

    async fn insert(&self, account: UserAccount) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if users.iter().any(|stored| stored.id == account.id) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                account.id
            )));
        }
        users.push(account);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<UserAccount>> {
        Ok(self.users.lock().await.clone())
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        role: &RoleName,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserAccount>> {
        let mut users = self.users.lock().await;
        Ok(users
            .iter_mut()
            .find(|account| &account.id == user_id)
            .map(|account| {
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
        let mut users = self.users.lock().await;
        Ok(users
            .iter_mut()
            .find(|account| &account.id == user_id)
            .map(|account| {
                account.status = status;
                account.updated_at = updated_at;
                account.clone()
            }))
    }
}

pub(crate) struct FakeIdentityVerifier {
    pub(crate) tokens: HashMap<String, UserIdentity>,
}

#[async_trait]
impl IdentityVerifier for FakeIdentityVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("invalid token".to_owned()))
    }
}
