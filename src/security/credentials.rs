use std::collections::HashMap;

/// Read-only mapping of API key to tenant id, built once at startup.
///
/// Configuration supplies tenant -> key entries; lookups go the other way, so
/// the map is inverted here. Immutable after construction and safe to share
/// across request workers.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    tenant_by_key: HashMap<String, String>,
}

impl CredentialStore {
    /// Build the reverse index from tenant -> api-key configuration entries.
    pub fn from_entries(api_keys: &HashMap<String, String>) -> Self {
        let tenant_by_key = api_keys
            .iter()
            .map(|(tenant_id, api_key)| (api_key.clone(), tenant_id.clone()))
            .collect();

        Self { tenant_by_key }
    }

    pub fn lookup_tenant(&self, api_key: &str) -> Option<&str> {
        self.tenant_by_key.get(api_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tenant_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenant_by_key.is_empty()
    }
}
