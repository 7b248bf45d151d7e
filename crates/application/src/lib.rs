//! Application services and ports.

#![forbid(unsafe_code)]

mod authentication_service;
mod authorization_service;
mod catalog_seed_service;
mod permission_ports;
mod permission_registry;
mod role_ports;
mod role_registry;
mod user_ports;
mod user_service;

#[cfg(test)]
mod test_support;

pub use authentication_service::AuthenticationService;
pub use authorization_service::AuthorizationService;
pub use catalog_seed_service::{CatalogSeedReport, CatalogSeedService};
pub use permission_ports::{CreatePermissionInput, PermissionRepository, UpdatePermissionInput};
pub use permission_registry::{DEFAULT_PERMISSION_BATCH_SIZE, PermissionRegistry};
pub use role_ports::{CreateRoleInput, RolePatch, RoleRepository, SeedReport};
pub use role_registry::RoleRegistry;
pub use user_ports::{IdentityVerifier, UserRepository};
pub use user_service::UserService;
