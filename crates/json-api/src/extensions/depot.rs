//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::identity::Identity;

/// Helpers for mapping depot extraction failures to HTTP errors and for
/// carrying the caller identity between middleware and handlers.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The caller identity, when the request carried one.
    fn identity(&self) -> Option<Identity>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity(&self) -> Option<Identity> {
        self.obtain::<Identity>().ok().copied()
    }
}
