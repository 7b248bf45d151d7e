use chrono::Utc;
use tracing::info;

use tourdesk_core::AppResult;
use tourdesk_domain::RoleSeed;

use crate::{CreateRoleInput, SeedReport};

use super::RoleRegistry;

impl RoleRegistry {
    /// Applies role definitions idempotently, keyed by role name.
    ///
    /// Existing roles are overwritten to match their definition; absent roles
    /// are created.
    pub async fn seed(&self, definitions: &[RoleSeed]) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for definition in definitions {
            match self.repository.find_by_name(&definition.name).await? {
                Some(mut role) => {
                    let now = Utc::now();
                    role.set_display_name(definition.display_name.clone(), now)?;
                    role.set_description(definition.description.clone(), now);
                    role.set_system(definition.is_system, now);
                    role.replace_permissions(definition.permissions.iter().cloned(), now);
                    self.repository.save(role).await?;
                    report.updated += 1;
                }
                None => {
                    self.create(CreateRoleInput {
                        name: definition.name.clone(),
                        display_name: definition.display_name.clone(),
                        description: definition.description.clone(),
                        is_system: definition.is_system,
                        permissions: definition.permissions.clone(),
                    })
                    .await?;
                    report.created += 1;
                }
            }
        }

        info!(
            created = report.created,
            updated = report.updated,
            "role seeding finished"
        );
        Ok(report)
    }
}
