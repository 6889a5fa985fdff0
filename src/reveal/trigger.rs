//! Reveal trigger configuration and per-trigger state.

use serde::{Deserialize, Serialize};

use crate::easing::Ease;
use crate::lifecycle::ScopeId;

/// Identity of a host element a trigger can act on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque id of a registered trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub(crate) u64);

/// A terminal visual state for a reveal target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealStyle {
    /// 0.0 (fully hidden) to 1.0 (fully visible).
    pub opacity: f32,
    /// Vertical offset in pixels, positive = pushed down.
    pub y_offset: f32,
    /// Uniform scale, 1.0 = natural size.
    pub scale: f32,
}

impl RevealStyle {
    /// The shared visible terminal state: full opacity, zero offset, natural
    /// size.
    pub const VISIBLE: RevealStyle = RevealStyle {
        opacity: 1.0,
        y_offset: 0.0,
        scale: 1.0,
    };

    pub fn hidden(y_offset: f32, scale: f32) -> Self {
        Self {
            opacity: 0.0,
            y_offset,
            scale,
        }
    }
}

/// A style change applied over time, handed to the host's style sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSpec {
    /// Terminal style the transition resolves to.
    pub style: RevealStyle,
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Start delay in milliseconds (stagger for group children).
    pub delay_ms: u32,
    /// Easing curve.
    pub ease: Ease,
}

/// What a trigger acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealTargetKind {
    /// One element, animated as a unit.
    Single(TargetId),
    /// An ordered group: the container's position drives the crossing, the
    /// children animate with a per-index stagger.
    Group {
        container: TargetId,
        children: Vec<TargetId>,
    },
}

impl RevealTargetKind {
    /// The element whose leading edge is tested against the threshold.
    pub fn leading(&self) -> &TargetId {
        match self {
            RevealTargetKind::Single(id) => id,
            RevealTargetKind::Group { container, .. } => container,
        }
    }
}

/// Crossing threshold and transition shape for one trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    /// The trigger fires when the target's leading edge crosses this fraction
    /// of viewport height.
    pub threshold: f32,
    /// Hidden terminal style (also applied at registration).
    pub hidden: RevealStyle,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// Per-child delay for groups, in milliseconds.
    pub stagger_ms: u32,
    /// Easing curve for both directions.
    pub ease: Ease,
}

impl TriggerConfig {
    /// Page-title preset: long rise from 50px below, cubic ease-out.
    pub fn title() -> Self {
        Self {
            threshold: 0.80,
            hidden: RevealStyle::hidden(50.0, 1.0),
            duration_ms: 1000,
            stagger_ms: 0,
            ease: Ease::CubicOut,
        }
    }

    /// Generic content-block preset: short rise, quadratic ease-out.
    pub fn block() -> Self {
        Self {
            threshold: 0.85,
            hidden: RevealStyle::hidden(30.0, 1.0),
            duration_ms: 800,
            stagger_ms: 0,
            ease: Ease::QuadOut,
        }
    }

    /// Card-grid preset: scale-up with overshoot and 100ms per-card stagger.
    pub fn card_grid() -> Self {
        Self {
            threshold: 0.75,
            hidden: RevealStyle::hidden(50.0, 0.9),
            duration_ms: 600,
            stagger_ms: 100,
            ease: Ease::BackOut,
        }
    }

    /// Validate and clamp settings to acceptable ranges.
    pub fn validate(&mut self) {
        self.threshold = self.threshold.clamp(0.05, 1.0);
        self.duration_ms = self.duration_ms.min(10_000);
        self.stagger_ms = self.stagger_ms.min(2_000);
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self::block()
    }
}

/// Two-state machine per trigger. No self-transitions: repeated crossings in
/// the same direction are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Hidden,
    Visible,
}

/// A registered trigger: target, config, and current state, owned by a page
/// scope.
#[derive(Debug)]
pub(crate) struct RevealTrigger {
    pub id: TriggerId,
    pub scope: ScopeId,
    pub kind: RevealTargetKind,
    pub config: TriggerConfig,
    pub state: TriggerState,
}

impl RevealTrigger {
    /// The terminal style for the trigger's current logical state.
    pub fn terminal_style(&self) -> RevealStyle {
        match self.state {
            TriggerState::Hidden => self.config.hidden,
            TriggerState::Visible => RevealStyle::VISIBLE,
        }
    }
}
