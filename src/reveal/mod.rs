//! Scroll-position-triggered reveal system.
//!
//! A [`RevealController`] owns a registry of triggers, each binding one
//! target (a single element or an ordered group of children) to a viewport
//! crossing threshold and a visual transition. Crossing forward animates the
//! target in; crossing back animates it out, any number of times.
//!
//! ## Components
//! - `trigger`: trigger configs, styles, transitions, and the two-state
//!   machine per trigger
//! - `controller`: crossing evaluation, stagger, and idempotent rebinding of
//!   late-arriving group children

pub mod controller;
pub mod trigger;

#[cfg(test)]
pub(crate) mod harness;

pub use controller::{RevealController, StyleSink, ViewportProbe};
pub use trigger::{
    RevealStyle, RevealTargetKind, TargetId, TransitionSpec, TriggerConfig, TriggerId, TriggerState,
};
