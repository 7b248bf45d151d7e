use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tourdesk_application::RoleRepository;
use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{Role, RoleId, RoleName};

/// In-memory role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn insert(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;

        if roles.values().any(|stored| stored.name() == role.name()) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        roles.insert(role.id(), role);
        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|role| role.name() == name)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn save(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;

        if roles
            .values()
            .any(|stored| stored.id() != role.id() && stored.name() == role.name())
        {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        let Some(stored) = roles.get_mut(&role.id()) else {
            return Err(AppError::NotFound(format!(
                "role '{}' was not found",
                role.id()
            )));
        };

        *stored = role;
        Ok(())
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        Ok(self.roles.write().await.remove(&id).is_some())
    }
}
