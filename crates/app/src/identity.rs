//! Caller identity supplied by the external identity provider.

use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for user identifiers. Users are owned by the identity provider.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub is_admin: bool,
}

impl Identity {
    #[must_use]
    pub const fn customer(user: UserUuid) -> Self {
        Self {
            user,
            is_admin: false,
        }
    }

    #[must_use]
    pub const fn admin(user: UserUuid) -> Self {
        Self {
            user,
            is_admin: true,
        }
    }
}

/// No identity accompanied the call; the caller must sign in rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authentication required")]
pub struct Unauthenticated;

/// Resolve the caller, failing with [`Unauthenticated`] when absent.
///
/// # Errors
///
/// Returns [`Unauthenticated`] when `identity` is `None`.
pub fn require(identity: Option<Identity>) -> Result<Identity, Unauthenticated> {
    identity.ok_or(Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_identity() {
        assert_eq!(require(None), Err(Unauthenticated));
    }

    #[test]
    fn require_passes_identity_through() {
        let identity = Identity::admin(UserUuid::new());

        assert_eq!(require(Some(identity)), Ok(identity));
        assert!(identity.is_admin);
    }
}
