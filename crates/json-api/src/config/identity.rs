//! Identity Config

use clap::Args;

/// Headers carrying the caller identity asserted by the upstream identity provider.
#[derive(Debug, Clone, Args)]
pub struct IdentityConfig {
    /// Header holding the authenticated user UUID
    #[arg(long, env = "IDENTITY_USER_HEADER", default_value = "x-user-uuid")]
    pub user_header: String,

    /// Header holding the administrator flag (`true`/`false`)
    #[arg(long, env = "IDENTITY_ADMIN_HEADER", default_value = "x-user-admin")]
    pub admin_header: String,
}
