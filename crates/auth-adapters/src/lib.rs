//! # auth-adapters
//!
//! Shared-secret admin authentication: one pre-shared key, equality-compared,
//! with no per-user identity. When no key is configured server-side, every
//! request is denied rather than letting the endpoint fail open.

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use domains::AuthError;

pub struct AdminKeyAuth {
    key: Option<SecretString>,
}

impl AdminKeyAuth {
    pub fn new(key: Option<SecretString>) -> Self {
        Self { key }
    }

    /// Authorizes a request carrying the key in the `x-api-key` header or
    /// the `api_key` query parameter. Either one matching is sufficient.
    pub fn authorize(
        &self,
        header_key: Option<&str>,
        query_key: Option<&str>,
    ) -> Result<(), AuthError> {
        let Some(configured) = &self.key else {
            warn!("admin API key not configured, denying admin access");
            return Err(AuthError::NotConfigured);
        };
        let configured = configured.expose_secret();

        for candidate in [header_key, query_key].into_iter().flatten() {
            if !candidate.is_empty() && candidate == configured {
                return Ok(());
            }
        }
        Err(AuthError::InvalidKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(key: Option<&str>) -> AdminKeyAuth {
        AdminKeyAuth::new(key.map(|k| SecretString::from(k.to_string())))
    }

    #[test]
    fn accepts_matching_header_key() {
        assert!(auth(Some("s3cret")).authorize(Some("s3cret"), None).is_ok());
    }

    #[test]
    fn accepts_matching_query_key_even_with_wrong_header() {
        assert!(auth(Some("s3cret"))
            .authorize(Some("wrong"), Some("s3cret"))
            .is_ok());
    }

    #[test]
    fn rejects_missing_and_wrong_keys() {
        let auth = auth(Some("s3cret"));
        assert_eq!(auth.authorize(None, None), Err(AuthError::InvalidKey));
        assert_eq!(
            auth.authorize(Some("nope"), Some("also-nope")),
            Err(AuthError::InvalidKey)
        );
        assert_eq!(auth.authorize(Some(""), None), Err(AuthError::InvalidKey));
    }

    #[test]
    fn denies_everything_when_no_key_is_configured() {
        assert_eq!(
            auth(None).authorize(Some("anything"), Some("anything")),
            Err(AuthError::NotConfigured)
        );
    }
}
