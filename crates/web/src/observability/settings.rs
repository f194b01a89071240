//! Process-global request logging settings.

use std::{sync::OnceLock, time::Duration};

use crate::config::ServerConfig;

const DEFAULT_SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(1);

static SLOW_REQUEST_THRESHOLD: OnceLock<Duration> = OnceLock::new();

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let threshold = Duration::from_millis(config.logging.slow_request_threshold_ms);

    // A second init keeps the first value.
    _ = SLOW_REQUEST_THRESHOLD.set(threshold);
}

pub(super) fn slow_request_threshold() -> Duration {
    SLOW_REQUEST_THRESHOLD
        .get()
        .copied()
        .unwrap_or(DEFAULT_SLOW_REQUEST_THRESHOLD)
}
