use tourdesk_application::{
    AuthenticationService, AuthorizationService, CatalogSeedService, PermissionRegistry,
    RoleRegistry, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub permission_registry: PermissionRegistry,
    pub role_registry: RoleRegistry,
    pub authorization_service: AuthorizationService,
    pub authentication_service: AuthenticationService,
    pub user_service: UserService,
    pub catalog_seed_service: CatalogSeedService,
}
