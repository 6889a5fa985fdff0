//! Reveal controller: crossing evaluation and trigger registry.
//!
//! The controller does not poll. The host forwards scroll/resize
//! notifications to [`RevealController::on_viewport_change`], which walks the
//! registry once, reads positions from the [`ViewportProbe`], and applies at
//! most one state transition per trigger through the [`StyleSink`] before
//! returning.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use super::trigger::{
    RevealStyle, RevealTargetKind, RevealTrigger, TargetId, TransitionSpec, TriggerConfig,
    TriggerId, TriggerState,
};
use crate::lifecycle::ScopeId;

/// Host viewport access: current height and element positions.
pub trait ViewportProbe: Send + Sync {
    /// Current viewport height in pixels.
    fn viewport_height(&self) -> f64;

    /// Distance of the element's leading edge from the viewport top, in
    /// pixels, or None if the element does not exist.
    fn element_top(&self, id: &TargetId) -> Option<f64>;
}

/// Host style application: timed transitions and immediate snaps.
pub trait StyleSink: Send {
    /// Animate `target` to the spec's terminal style.
    fn transition(&mut self, target: &TargetId, spec: &TransitionSpec);

    /// Apply `style` immediately, interrupting any in-flight transition.
    fn snap(&mut self, target: &TargetId, style: &RevealStyle);
}

/// Registry of reveal triggers plus the crossing state machine.
pub struct RevealController {
    probe: Arc<dyn ViewportProbe>,
    sink: Arc<Mutex<dyn StyleSink>>,
    triggers: Vec<RevealTrigger>,
    /// Group children bound in any earlier pass; rebinding is idempotent per
    /// child identity.
    bound_children: HashSet<TargetId>,
    next_id: u64,
}

impl RevealController {
    pub fn new(probe: Arc<dyn ViewportProbe>, sink: Arc<Mutex<dyn StyleSink>>) -> Self {
        Self {
            probe,
            sink,
            triggers: Vec::new(),
            bound_children: HashSet::new(),
            next_id: 0,
        }
    }

    /// Register a single-element trigger under `scope`.
    ///
    /// The target is snapped to its hidden style immediately. If the probe
    /// cannot locate the target yet, the call is a no-op: the caller rebinds
    /// once the element exists (the controller never polls for it).
    pub fn register(
        &mut self,
        scope: ScopeId,
        target: TargetId,
        mut config: TriggerConfig,
    ) -> Option<TriggerId> {
        config.validate();
        if self.probe.element_top(&target).is_none() {
            log::debug!("[REVEAL] target {} not present, bind skipped", target);
            return None;
        }

        self.sink.lock().snap(&target, &config.hidden);
        let id = self.push_trigger(scope, RevealTargetKind::Single(target), config);
        Some(id)
    }

    /// Register a group trigger for exactly the children not bound in any
    /// earlier pass. Returns the number of newly bound children.
    ///
    /// Safe to call on every content change: an empty group binds nothing,
    /// and repeating a bind for the same child identities binds nothing more,
    /// so late-arriving content can transition 0 -> N more than once without
    /// duplicate triggers.
    pub fn rebind_group(
        &mut self,
        scope: ScopeId,
        container: TargetId,
        children: &[TargetId],
        mut config: TriggerConfig,
    ) -> usize {
        config.validate();
        let fresh: Vec<TargetId> = children
            .iter()
            .filter(|child| !self.bound_children.contains(*child))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return 0;
        }
        if self.probe.element_top(&container).is_none() {
            log::debug!("[REVEAL] container {} not present, bind skipped", container);
            return 0;
        }

        {
            let mut sink = self.sink.lock();
            for child in &fresh {
                sink.snap(child, &config.hidden);
            }
        }
        self.bound_children.extend(fresh.iter().cloned());

        let count = fresh.len();
        log::debug!("[REVEAL] bound {} new children under {}", count, container);
        self.push_trigger(
            scope,
            RevealTargetKind::Group {
                container,
                children: fresh,
            },
            config,
        );
        count
    }

    /// Evaluate every trigger against the current viewport. O(triggers); at
    /// most one state transition per trigger per notification.
    pub fn on_viewport_change(&mut self) {
        let viewport_height = self.probe.viewport_height();
        let mut sink = self.sink.lock();

        for trigger in &mut self.triggers {
            let Some(top) = self.probe.element_top(trigger.kind.leading()) else {
                continue;
            };
            let entered = top <= f64::from(trigger.config.threshold) * viewport_height;

            match (trigger.state, entered) {
                (TriggerState::Hidden, true) => {
                    apply_enter(&mut *sink, trigger);
                    trigger.state = TriggerState::Visible;
                }
                (TriggerState::Visible, false) => {
                    apply_exit(&mut *sink, trigger);
                    trigger.state = TriggerState::Hidden;
                }
                // Repeated crossings in the same direction are no-ops.
                _ => {}
            }
        }
    }

    /// Remove every trigger belonging to `scope`, snapping each target to the
    /// terminal style of its current state so nothing is left mid-transition.
    pub fn remove_scope(&mut self, scope: ScopeId) {
        let mut sink = self.sink.lock();
        let bound_children = &mut self.bound_children;
        let before = self.triggers.len();

        self.triggers.retain(|trigger| {
            if trigger.scope != scope {
                return true;
            }
            let style = trigger.terminal_style();
            match &trigger.kind {
                RevealTargetKind::Single(target) => sink.snap(target, &style),
                RevealTargetKind::Group { children, .. } => {
                    for child in children {
                        sink.snap(child, &style);
                        bound_children.remove(child);
                    }
                }
            }
            false
        });

        let removed = before - self.triggers.len();
        if removed > 0 {
            log::debug!("[REVEAL] removed {} triggers for scope {}", removed, scope);
        }
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn scope_trigger_count(&self, scope: ScopeId) -> usize {
        self.triggers
            .iter()
            .filter(|trigger| trigger.scope == scope)
            .count()
    }

    fn push_trigger(
        &mut self,
        scope: ScopeId,
        kind: RevealTargetKind,
        config: TriggerConfig,
    ) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        self.triggers.push(RevealTrigger {
            id,
            scope,
            kind,
            config,
            state: TriggerState::Hidden,
        });
        id
    }
}

/// Animate a trigger's target(s) in. Group children start at
/// `index * stagger_ms` after the group's own crossing.
fn apply_enter(sink: &mut dyn StyleSink, trigger: &RevealTrigger) {
    let config = &trigger.config;
    match &trigger.kind {
        RevealTargetKind::Single(target) => {
            sink.transition(
                target,
                &TransitionSpec {
                    style: RevealStyle::VISIBLE,
                    duration_ms: config.duration_ms,
                    delay_ms: 0,
                    ease: config.ease,
                },
            );
        }
        RevealTargetKind::Group { children, .. } => {
            for (index, child) in children.iter().enumerate() {
                sink.transition(
                    child,
                    &TransitionSpec {
                        style: RevealStyle::VISIBLE,
                        duration_ms: config.duration_ms,
                        delay_ms: index as u32 * config.stagger_ms,
                        ease: config.ease,
                    },
                );
            }
        }
    }
}

/// Animate a trigger's target(s) back to hidden. The reverse plays without
/// stagger: the whole group retreats together.
fn apply_exit(sink: &mut dyn StyleSink, trigger: &RevealTrigger) {
    let config = &trigger.config;
    let spec = TransitionSpec {
        style: config.hidden,
        duration_ms: config.duration_ms,
        delay_ms: 0,
        ease: config.ease,
    };
    match &trigger.kind {
        RevealTargetKind::Single(target) => sink.transition(target, &spec),
        RevealTargetKind::Group { children, .. } => {
            for child in children {
                sink.transition(child, &spec);
            }
        }
    }
}
