//! Request monitoring settings, fixed once at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    pub(super) slow_request_threshold: Duration,
    pub(super) propagate_parent: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            propagate_parent: false,
        }
    }
}

impl From<&ObservabilityConfig> for RequestSettings {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: config.slow_request_threshold(),
            propagate_parent: config.propagates_parent(),
        }
    }
}

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// Install settings for the process. Later calls are ignored.
pub(super) fn install(settings: RequestSettings) {
    if SETTINGS.set(settings).is_err() {
        tracing::debug!("request settings already installed");
    }
}

/// Installed settings, or defaults when none were installed (tests).
pub(super) fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or_default()
}
