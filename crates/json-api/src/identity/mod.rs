//! Caller identity asserted by the upstream identity provider.

pub(crate) mod middleware;

use crate::config::identity::IdentityConfig;

const DEFAULT_USER_HEADER: &str = "x-user-uuid";
const DEFAULT_ADMIN_HEADER: &str = "x-user-admin";

/// Names of the trusted identity headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IdentityHeaders {
    pub(crate) user: String,
    pub(crate) admin: String,
}

impl Default for IdentityHeaders {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_HEADER.to_string(),
            admin: DEFAULT_ADMIN_HEADER.to_string(),
        }
    }
}

impl From<&IdentityConfig> for IdentityHeaders {
    fn from(config: &IdentityConfig) -> Self {
        Self {
            user: config.user_header.to_ascii_lowercase(),
            admin: config.admin_header.to_ascii_lowercase(),
        }
    }
}
