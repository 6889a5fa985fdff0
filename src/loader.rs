//! Loading-screen gate.
//!
//! The loader is shown for a fixed minimum duration rather than until some
//! readiness signal fires. [`run_gate`] holds the gate open while the glitch
//! loop animates, then disposes the loader's scope so the page behind it can
//! take over with no frames left running.

use tokio::time::{sleep, Duration};

use crate::config::LoaderConfig;
use crate::lifecycle::LifecycleBinder;

/// Hold the loading screen for the configured minimum duration, then tear
/// down everything bound to its scope.
///
/// Returns only after the scope is fully disposed: by then the glitch frame
/// loop is stopped and its pending frame cancelled.
pub async fn run_gate(mut binder: LifecycleBinder, mut config: LoaderConfig) {
    config.validate();
    log::debug!("[LOADER] gate open for {}ms", config.min_duration_ms);
    sleep(Duration::from_millis(config.min_duration_ms)).await;
    binder.dispose();
    log::debug!("[LOADER] gate closed");
}
