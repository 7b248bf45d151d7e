use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use tourdesk_core::{AppError, AppResult};
use tourdesk_domain::{Role, RoleId, RoleName};

use crate::{CreateRoleInput, RolePatch, RoleRepository};

mod seed;


/// Application service owning the role registry.
#[derive(Clone)]
pub struct RoleRegistry {
    repository: Arc<dyn RoleRepository>,
}

impl RoleRegistry {
    /// Creates a registry over a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self { repository }
    }

    /// Creates a role. Listed permission names are not checked for existence.
    pub async fn create(&self, input: CreateRoleInput) -> AppResult<Role> {
        self.ensure_name_available(&input.name).await?;

        let role = Role::new(
            input.name,
            input.display_name,
            input.description,
            input.is_system,
            input.permissions,
            Utc::now(),
        )?;
        self.repository.insert(role.clone()).await?;

        info!(role = %role.name(), is_system = role.is_system(), "role created");
        Ok(role)
    }

    /// Finds a role by name.
    pub async fn find_by_name(&self, name: &RoleName) -> AppResult<Option<Role>> {
        self.repository.find_by_name(name).await
    }

    /// Finds a role by identifier.
    pub async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        self.repository.find_by_id(id).await
    }

    /// Returns a role by identifier or a not-found error.
    pub async fn get_by_id(&self, id: RoleId) -> AppResult<Role> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{id}' was not found")))
    }

    /// Returns a role by name or a not-found error.
    pub async fn get_by_name(&self, name: &RoleName) -> AppResult<Role> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{name}' was not found")))
    }

    /// Lists all roles ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        let mut roles = self.repository.list().await?;
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    /// Merges a patch into a role. A provided permission list replaces the set.
    pub async fn update(&self, id: RoleId, patch: RolePatch) -> AppResult<Role> {
        let mut role = self.get_by_id(id).await?;
        let now = Utc::now();

        if let Some(name) = patch.name
            && &name != role.name()
        {
            if role.is_system() {
                return Err(AppError::Protected(format!(
                    "system role '{}' cannot be renamed",
                    role.name()
                )));
            }

            self.ensure_name_available(&name).await?;
            role.rename(name, now);
        }

        if let Some(display_name) = patch.display_name {
            role.set_display_name(display_name, now)?;
        }

        if let Some(description) = patch.description {
            role.set_description(Some(description), now);
        }

        if let Some(permissions) = patch.permissions {
            role.replace_permissions(permissions, now);
        }

        self.repository.save(role.clone()).await?;

        info!(role = %role.name(), permissions = role.permissions().len(), "role updated");
        Ok(role)
    }

    /// Deletes a custom role. System roles are protected.
    pub async fn delete(&self, id: RoleId) -> AppResult<()> {
        let role = self.get_by_id(id).await?;
        if role.is_system() {
            return Err(AppError::Protected(format!(
                "system role '{}' cannot be deleted",
                role.name()
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("role '{id}' was not found")));
        }

        info!(role = %role.name(), "role deleted");
        Ok(())
    }

    async fn ensure_name_available(&self, name: &RoleName) -> AppResult<()> {
        if self.repository.find_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!("role '{name}' already exists")));
        }

        Ok(())
    }
}
