//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod firebase_identity_verifier;
mod in_memory_permission_repository;
mod in_memory_role_repository;
mod in_memory_user_repository;
mod postgres_permission_repository;
mod postgres_role_repository;
mod postgres_user_repository;
mod static_identity_verifier;

pub use firebase_identity_verifier::FirebaseIdentityVerifier;
pub use in_memory_permission_repository::InMemoryPermissionRepository;
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use static_identity_verifier::StaticIdentityVerifier;
