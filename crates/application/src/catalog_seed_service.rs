use tracing::info;

use tourdesk_core::AppResult;
use tourdesk_domain::{PermissionSeed, RoleSeed, builtin_permissions, builtin_roles};

use crate::{
    CreatePermissionInput, PermissionRegistry, RoleRegistry, SeedReport, UpdatePermissionInput,
};

/// Outcome of seeding the permission and role catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSeedReport {
    /// Permissions created because their name was absent.
    pub permissions_created: usize,
    /// Permissions whose description was refreshed.
    pub permissions_updated: usize,
    /// Role seeding outcome.
    pub roles: SeedReport,
}

/// Seeds the built-in permission catalog and role definitions.
#[derive(Clone)]
pub struct CatalogSeedService {
    permission_registry: PermissionRegistry,
    role_registry: RoleRegistry,
}

impl CatalogSeedService {
    /// Creates a seeder over both registries.
    #[must_use]
    pub fn new(permission_registry: PermissionRegistry, role_registry: RoleRegistry) -> Self {
        Self {
            permission_registry,
            role_registry,
        }
    }

    /// Seeds the built-in catalog.
    pub async fn seed_builtin(&self) -> AppResult<CatalogSeedReport> {
        self.seed(&builtin_permissions()?, &builtin_roles()?).await
    }

    /// Applies permission and role definitions idempotently.
    pub async fn seed(
        &self,
        permissions: &[PermissionSeed],
        roles: &[RoleSeed],
    ) -> AppResult<CatalogSeedReport> {
        let mut report = CatalogSeedReport::default();

        for definition in permissions {
            match self.permission_registry.find_by_name(&definition.name).await? {
                Some(permission) => {
                    if permission.description() != Some(definition.description.as_str()) {
                        self.permission_registry
                            .update(
                                permission.id(),
                                UpdatePermissionInput {
                                    description: Some(definition.description.clone()),
                                },
                            )
                            .await?;
                        report.permissions_updated += 1;
                    }
                }
                None => {
                    self.permission_registry
                        .create(CreatePermissionInput {
                            name: definition.name.clone(),
                            description: Some(definition.description.clone()),
                        })
                        .await?;
                    report.permissions_created += 1;
                }
            }
        }

        report.roles = self.role_registry.seed(roles).await?;

        info!(
            permissions_created = report.permissions_created,
            permissions_updated = report.permissions_updated,
            roles_created = report.roles.created,
            roles_updated = report.roles.updated,
            "catalog seeding finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tourdesk_domain::{ADMIN_ROLE, BUILTIN_PERMISSIONS, DEFAULT_ROLE};

    use crate::test_support::{FakePermissionRepository, FakeRoleRepository, role_name};
    use crate::{PermissionRegistry, RoleRegistry};

    use super::CatalogSeedService;

    fn seeder() -> (CatalogSeedService, PermissionRegistry, RoleRegistry) {
        let permission_registry =
            PermissionRegistry::new(Arc::new(FakePermissionRepository::default()));
        let role_registry = RoleRegistry::new(Arc::new(FakeRoleRepository::default()));
        (
            CatalogSeedService::new(permission_registry.clone(), role_registry.clone()),
            permission_registry,
            role_registry,
        )
    }

    #[tokio::test]
    async fn builtin_seed_is_idempotent() {
        let (seeder, permissions, roles) = seeder();

        let first = seeder
            .seed_builtin()
            .await
            .unwrap_or_else(|error| panic!("seed failed: {error}"));
        let second = seeder
            .seed_builtin()
            .await
            .unwrap_or_else(|error| panic!("seed failed: {error}"));

        assert_eq!(first.permissions_created, BUILTIN_PERMISSIONS.len());
        assert_eq!(first.roles.created, 3);
        assert_eq!(second.permissions_created, 0);
        assert_eq!(second.permissions_updated, 0);
        assert_eq!(second.roles.created, 0);
        assert_eq!(second.roles.updated, 3);

        let listed = permissions
            .list()
            .await
            .unwrap_or_else(|error| panic!("list failed: {error}"));
        assert_eq!(listed.len(), BUILTIN_PERMISSIONS.len());
        assert_eq!(
            roles
                .list()
                .await
                .unwrap_or_else(|error| panic!("list failed: {error}"))
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn admin_role_grants_every_builtin_permission() {
        let (seeder, _, roles) = seeder();
        seeder
            .seed_builtin()
            .await
            .unwrap_or_else(|error| panic!("seed failed: {error}"));

        let admin = roles
            .get_by_name(&role_name(ADMIN_ROLE))
            .await
            .unwrap_or_else(|error| panic!("lookup failed: {error}"));
        let customer = roles
            .get_by_name(&role_name(DEFAULT_ROLE))
            .await
            .unwrap_or_else(|error| panic!("lookup failed: {error}"));

        assert_eq!(admin.permissions().len(), BUILTIN_PERMISSIONS.len());
        assert!(admin.is_system());
        assert!(customer.permissions().len() < admin.permissions().len());
    }
}
