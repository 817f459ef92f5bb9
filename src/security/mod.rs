//! API-key authentication: credential lookup, tenant resolution, request gate.

pub mod authenticator;
pub mod credentials;
pub mod middleware;

pub use authenticator::{AuthenticatedPrincipal, Authenticator};
pub use credentials::CredentialStore;
pub use middleware::{require_api_key, CurrentTenant, API_KEY_HEADER};
