use std::sync::Arc;

use tourdesk_application::{PermissionRepository, RoleRepository, UserRepository};
use tourdesk_infrastructure::{
    InMemoryPermissionRepository, InMemoryRoleRepository, InMemoryUserRepository,
    PostgresPermissionRepository, PostgresRoleRepository, PostgresUserRepository,
};
use sqlx::PgPool;

/// Repository adapters shared by every service.
#[derive(Clone)]
pub struct RepositorySet {
    pub permission_repository: Arc<dyn PermissionRepository>,
    pub role_repository: Arc<dyn RoleRepository>,
    pub user_repository: Arc<dyn UserRepository>,
}

/// Builds PostgreSQL adapters when a pool is given, in-memory adapters otherwise.
pub fn build_repository_set(pool: Option<&PgPool>) -> RepositorySet {
    match pool {
        Some(pool) => RepositorySet {
            permission_repository: Arc::new(PostgresPermissionRepository::new(pool.clone())),
            role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
            user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        },
        None => RepositorySet {
            permission_repository: Arc::new(InMemoryPermissionRepository::new()),
            role_repository: Arc::new(InMemoryRoleRepository::new()),
            user_repository: Arc::new(InMemoryUserRepository::new()),
        },
    }
}
