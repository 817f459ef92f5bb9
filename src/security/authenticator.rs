use thiserror::Error;

use crate::security::credentials::CredentialStore;

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Invalid API key")]
    InvalidCredential,
}

/// Request-scoped identity resolved from an API key. Never persisted or
/// cached across requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub tenant_id: String,
    pub api_key: String,
}

/// Resolves a presented API key to exactly one tenant.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: CredentialStore,
}

impl Authenticator {
    pub fn new(credentials: CredentialStore) -> Self {
        Self { credentials }
    }

    /// Pure function of (key, credential snapshot); no side effects beyond
    /// constructing the principal.
    pub fn authenticate(
        &self,
        raw_api_key: &str,
    ) -> Result<AuthenticatedPrincipal, AuthenticationError> {
        if raw_api_key.trim().is_empty() {
            return Err(AuthenticationError::InvalidCredential);
        }

        let tenant_id = self
            .credentials
            .lookup_tenant(raw_api_key)
            .ok_or(AuthenticationError::InvalidCredential)?;

        Ok(AuthenticatedPrincipal {
            tenant_id: tenant_id.to_string(),
            api_key: raw_api_key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn authenticator() -> Authenticator {
        let mut entries = HashMap::new();
        entries.insert("tenant-a".to_string(), "key-a".to_string());
        Authenticator::new(CredentialStore::from_entries(&entries))
    }

    #[test]
    fn known_key_resolves_to_tenant() {
        let principal = authenticator().authenticate("key-a").unwrap();
        assert_eq!(principal.tenant_id, "tenant-a");
        assert_eq!(principal.api_key, "key-a");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            authenticator().authenticate("other"),
            Err(AuthenticationError::InvalidCredential)
        ));
    }

    #[test]
    fn empty_and_blank_keys_are_rejected() {
        assert!(authenticator().authenticate("").is_err());
        assert!(authenticator().authenticate("   ").is_err());
    }
}
