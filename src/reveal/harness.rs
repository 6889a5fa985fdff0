//! Shared test doubles for the reveal system.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::controller::{StyleSink, ViewportProbe};
use super::trigger::{RevealStyle, TargetId, TransitionSpec};

/// Probe with scriptable element positions.
#[derive(Default)]
pub(crate) struct TestProbe {
    viewport_height: Mutex<f64>,
    tops: Mutex<HashMap<TargetId, f64>>,
}

impl TestProbe {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height: Mutex::new(viewport_height),
            tops: Mutex::new(HashMap::new()),
        }
    }

    /// Place an element's leading edge at `top` pixels from the viewport top.
    pub fn set_top(&self, id: &TargetId, top: f64) {
        self.tops.lock().insert(id.clone(), top);
    }

    pub fn remove(&self, id: &TargetId) {
        self.tops.lock().remove(id);
    }
}

impl ViewportProbe for TestProbe {
    fn viewport_height(&self) -> f64 {
        *self.viewport_height.lock()
    }

    fn element_top(&self, id: &TargetId) -> Option<f64> {
        self.tops.lock().get(id).copied()
    }
}

/// Everything a controller asked the host to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SinkEvent {
    Transition { target: TargetId, spec: TransitionSpec },
    Snap { target: TargetId, style: RevealStyle },
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    /// Transitions applied to `id`, in application order.
    pub fn transitions_for(&self, id: &TargetId) -> Vec<TransitionSpec> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Transition { target, spec } if target == id => Some(spec.clone()),
                _ => None,
            })
            .collect()
    }

    /// Snaps applied to `id`, in application order.
    pub fn snaps_for(&self, id: &TargetId) -> Vec<RevealStyle> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Snap { target, style } if target == id => Some(*style),
                _ => None,
            })
            .collect()
    }
}

impl StyleSink for RecordingSink {
    fn transition(&mut self, target: &TargetId, spec: &TransitionSpec) {
        self.events.push(SinkEvent::Transition {
            target: target.clone(),
            spec: spec.clone(),
        });
    }

    fn snap(&mut self, target: &TargetId, style: &RevealStyle) {
        self.events.push(SinkEvent::Snap {
            target: target.clone(),
            style: *style,
        });
    }
}
