use std::collections::HashMap;

use async_trait::async_trait;

use tourdesk_application::IdentityVerifier;
use tourdesk_core::{AppError, AppResult, UserIdentity};

/// Identity verifier over a fixed token table, for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityVerifier {
    tokens: HashMap<String, UserIdentity>,
}

impl StaticIdentityVerifier {
    /// Creates a verifier from explicit token to identity pairs.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = (String, UserIdentity)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Parses `token=user_id[:email]` entries separated by commas.
    pub fn parse(spec: &str) -> AppResult<Self> {
        let mut tokens = HashMap::new();

        for entry in spec.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (token, identity) = entry.split_once('=').ok_or_else(|| {
                AppError::Validation(format!(
                    "static identity entry '{entry}' must look like token=user_id[:email]"
                ))
            })?;
            let (subject, email) = match identity.split_once(':') {
                Some((subject, email)) => (subject.trim(), Some(email.trim().to_owned())),
                None => (identity.trim(), None),
            };

            let token = token.trim();
            if token.is_empty() || subject.is_empty() {
                return Err(AppError::Validation(format!(
                    "static identity entry '{entry}' has an empty token or user id"
                )));
            }

            tokens.insert(token.to_owned(), UserIdentity::new(subject, email, None));
        }

        Ok(Self { tokens })
    }

    /// Returns the number of configured tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether no tokens are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_owned()))
    }
}
