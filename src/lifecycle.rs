//! Page-scope lifecycle binding.
//!
//! Each page owns a [`LifecycleBinder`]: reveal registrations made through it
//! belong to one [`ScopeId`], and an optional glitch renderer rides along.
//! [`dispose`](LifecycleBinder::dispose) releases everything the scope
//! acquired -- pending animation frames, trigger registrations, in-flight
//! style transitions -- synchronously and exactly once, and also runs from
//! `Drop` so a page replaced mid-animation still tears down cleanly.

use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::glitch::GlitchRenderer;
use crate::reveal::{RevealController, TargetId, TriggerConfig, TriggerId};

/// Identity of one page scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Ties reveal registrations and an optional glitch renderer to one page's
/// mount/unmount boundary.
pub struct LifecycleBinder {
    controller: Arc<Mutex<RevealController>>,
    scope: ScopeId,
    glitch: Option<GlitchRenderer>,
    disposed: bool,
}

impl LifecycleBinder {
    /// Open a fresh scope against the shared controller.
    pub fn start(controller: Arc<Mutex<RevealController>>) -> Self {
        let scope = ScopeId::new();
        log::debug!("[LIFECYCLE] scope {} started", scope);
        Self {
            controller,
            scope,
            glitch: None,
            disposed: false,
        }
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Register a single-element trigger under this scope. No-op after
    /// dispose or when the target does not exist yet.
    pub fn register(&self, target: TargetId, config: TriggerConfig) -> Option<TriggerId> {
        if self.disposed {
            return None;
        }
        self.controller.lock().register(self.scope, target, config)
    }

    /// Idempotently bind group children under this scope. Returns the number
    /// of newly bound children; zero after dispose.
    pub fn rebind_group(
        &self,
        container: TargetId,
        children: &[TargetId],
        config: TriggerConfig,
    ) -> usize {
        if self.disposed {
            return 0;
        }
        self.controller
            .lock()
            .rebind_group(self.scope, container, children, config)
    }

    /// Hand the loading screen's renderer to this scope; it will be stopped
    /// on dispose. A renderer attached after dispose is stopped immediately.
    pub fn attach_glitch(&mut self, renderer: GlitchRenderer) {
        if self.disposed {
            renderer.stop();
            return;
        }
        self.glitch = Some(renderer);
    }

    /// Tear the scope down: stop the glitch loop (cancelling its pending
    /// frame), drop every trigger registration, and settle every target on a
    /// stable terminal style. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if let Some(glitch) = self.glitch.take() {
            glitch.stop();
        }
        self.controller.lock().remove_scope(self.scope);
        log::debug!("[LIFECYCLE] scope {} disposed", self.scope);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for LifecycleBinder {
    fn drop(&mut self) {
        self.dispose();
    }
}
