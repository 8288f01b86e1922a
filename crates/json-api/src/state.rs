//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::identity::IdentityHeaders;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) identity_headers: IdentityHeaders,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, identity_headers: IdentityHeaders) -> Self {
        Self {
            app,
            identity_headers,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, identity_headers: IdentityHeaders) -> Arc<Self> {
        Arc::new(Self::new(app, identity_headers))
    }
}
