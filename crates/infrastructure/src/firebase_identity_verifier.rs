use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use tourdesk_application::IdentityVerifier;
use tourdesk_core::{AppError, AppResult, UserIdentity};

/// Identity verifier backed by the Firebase Identity Toolkit REST API.
///
/// Tokens are checked with `accounts:lookup`, which rejects expired and
/// revoked ID tokens.
pub struct FirebaseIdentityVerifier {
    http_client: reqwest::Client,
    lookup_url: Url,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl FirebaseIdentityVerifier {
    /// Creates a verifier for one Firebase project API key.
    pub fn new(http_client: reqwest::Client, base_url: &str, api_key: &str) -> AppResult<Self> {
        let base = format!("{}/", base_url.trim_end_matches('/'));
        let mut lookup_url = Url::parse(&base)
            .and_then(|base| base.join("v1/accounts:lookup"))
            .map_err(|error| {
                AppError::Validation(format!("invalid identity provider url '{base_url}': {error}"))
            })?;
        lookup_url.query_pairs_mut().append_pair("key", api_key);

        Ok(Self {
            http_client,
            lookup_url,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        let response = self
            .http_client
            .post(self.lookup_url.clone())
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("identity provider request failed: {error}"))
            })?;

        check_lookup_status(response.status())?;

        let payload = response.json::<LookupResponse>().await.map_err(|error| {
            AppError::Internal(format!("failed to decode identity provider response: {error}"))
        })?;

        identity_from_lookup(payload)
    }
}

/// Only 400 and 401 mean the token itself was rejected. Rate limits and key
/// or quota problems are provider failures.
fn check_lookup_status(status: StatusCode) -> AppResult<()> {
    if status.is_success() {
        return Ok(());
    }

    if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
        debug!(%status, "identity provider rejected token");
        return Err(AppError::Unauthorized("invalid or expired token".to_owned()));
    }

    Err(AppError::Internal(format!("identity provider returned status {status}")))
}

fn identity_from_lookup(payload: LookupResponse) -> AppResult<UserIdentity> {
    let user = payload
        .users
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Unauthorized("token does not belong to a user".to_owned()))?;

    if user.disabled {
        return Err(AppError::Unauthorized(
            "identity provider account is disabled".to_owned(),
        ));
    }

    Ok(UserIdentity::new(user.local_id, user.email, user.display_name))
}
