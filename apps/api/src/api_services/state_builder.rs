use std::sync::Arc;

use tourdesk_application::{
    AuthenticationService, AuthorizationService, CatalogSeedService, IdentityVerifier,
    PermissionRegistry, RoleRegistry, UserService,
};
use tourdesk_core::AppError;
use tourdesk_domain::RoleName;

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod identity;
mod repositories;

pub use repositories::{RepositorySet, build_repository_set};

pub fn build_app_state(
    repositories: RepositorySet,
    config: &ApiConfig,
) -> Result<AppState, AppError> {
    let verifier = identity::build_identity_verifier(&config.identity_provider)?;

    Ok(assemble_app_state(
        repositories,
        verifier,
        config.default_user_role.clone(),
        config.permission_lookup_batch_size,
    ))
}

/// Wires services over already built adapters.
pub(crate) fn assemble_app_state(
    repositories: RepositorySet,
    verifier: Arc<dyn IdentityVerifier>,
    default_user_role: RoleName,
    permission_lookup_batch_size: usize,
) -> AppState {
    let permission_registry = PermissionRegistry::new(repositories.permission_repository)
        .with_batch_size(permission_lookup_batch_size);
    let role_registry = RoleRegistry::new(repositories.role_repository.clone());

    AppState {
        authorization_service: AuthorizationService::new(
            repositories.role_repository.clone(),
            permission_registry.clone(),
        ),
        authentication_service: AuthenticationService::new(
            verifier,
            repositories.user_repository.clone(),
            default_user_role,
        ),
        user_service: UserService::new(
            repositories.user_repository,
            repositories.role_repository,
        ),
        catalog_seed_service: CatalogSeedService::new(
            permission_registry.clone(),
            role_registry.clone(),
        ),
        permission_registry,
        role_registry,
    }
}
