use std::sync::Arc;

use tourdesk_application::IdentityVerifier;
use tourdesk_core::AppError;
use tourdesk_infrastructure::{FirebaseIdentityVerifier, StaticIdentityVerifier};
use tracing::{info, warn};

use crate::api_config::IdentityProviderConfig;

pub(super) fn build_identity_verifier(
    config: &IdentityProviderConfig,
) -> Result<Arc<dyn IdentityVerifier>, AppError> {
    match config {
        IdentityProviderConfig::Firebase { api_key, base_url } => {
            info!(base_url = %base_url, "using firebase identity provider");
            Ok(Arc::new(FirebaseIdentityVerifier::new(
                reqwest::Client::new(),
                base_url,
                api_key,
            )?))
        }
        IdentityProviderConfig::Static { tokens } => {
            let verifier = StaticIdentityVerifier::parse(tokens)?;
            warn!(
                tokens = verifier.len(),
                "using static identity provider; do not use in production"
            );
            Ok(Arc::new(verifier))
        }
    }
}
