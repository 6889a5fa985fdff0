//! Motion layer for the Robosoc site: the procedural glitch text loader,
//! scroll-driven reveal animations, and the roster merge that feeds the
//! member card grid. Host integration goes through small traits
//! ([`scheduler::FramePump`], [`surface::DrawSurface`],
//! [`reveal::ViewportProbe`], [`reveal::StyleSink`],
//! [`roster::MemberStore`]) so the same orchestration runs against any
//! rendering backend.

pub mod config;
pub mod easing;
pub mod error;
pub mod glitch;
pub mod lifecycle;
pub mod loader;
pub mod reveal;
pub mod roster;
pub mod scheduler;
pub mod surface;

pub use config::{GlitchConfig, LoaderConfig};
pub use easing::Ease;
pub use error::{MotionError, MotionResult, OptionExt, ResultExt};
pub use glitch::GlitchRenderer;
pub use lifecycle::{LifecycleBinder, ScopeId};
pub use loader::run_gate;
pub use reveal::{
    RevealController, RevealStyle, RevealTargetKind, StyleSink, TargetId, TransitionSpec,
    TriggerConfig, TriggerId, ViewportProbe,
};
pub use roster::{bind_member_cards, card_target, fetch_roster, MemberRecord, MemberStore, Tier};
pub use scheduler::{AnimationScheduler, FramePump};
pub use surface::{DrawSurface, RenderSurface, TextRasterizer};
