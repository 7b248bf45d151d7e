use tourdesk_core::AppResult;
use tracing::info;

use crate::state::AppState;

/// Seeds the built-in permission catalog and system roles.
pub async fn run(app_state: &AppState) -> AppResult<()> {
    let report = app_state.catalog_seed_service.seed_builtin().await?;

    info!(
        permissions_created = report.permissions_created,
        permissions_updated = report.permissions_updated,
        roles_created = report.roles.created,
        roles_updated = report.roles.updated,
        "built-in catalog seeded"
    );
    Ok(())
}
