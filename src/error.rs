//! Central error types for the animation core.
//!
//! Most failure modes here are deliberately quiet (a missing drawing surface
//! degrades to "effect does not play"), but the operations that do fail --
//! text rasterization and roster fetches -- report through typed errors.
//! All errors implement `Serialize` so a host bridge can forward them as
//! plain messages.

use serde::Serialize;
use thiserror::Error;

/// Main error type for animation-core operations.
#[derive(Error, Debug)]
pub enum MotionError {
    /// The host could not provide a 2D drawing surface.
    #[error("Drawing surface unavailable")]
    SurfaceUnavailable,

    /// Text measurement or rasterization failed.
    #[error("Raster error: {0}")]
    RasterError(String),

    /// A document-store roster query failed.
    #[error("Store error: {0}")]
    StoreError(String),

    /// A reveal target could not be located in the viewport.
    #[error("Target not found: {id}")]
    TargetNotFound { id: String },

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Serialize as the error message string so host bridges can forward errors
/// without a structured schema.
impl Serialize for MotionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for MotionError {
    fn from(msg: String) -> Self {
        MotionError::Other(msg)
    }
}

impl From<&str> for MotionError {
    fn from(msg: &str) -> Self {
        MotionError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// Similar to anyhow's `Context` trait: chains context information onto
/// errors for better debugging.
pub trait ResultExt<T> {
    /// Add context to an error, converting it to `MotionError::Other`.
    fn context(self, msg: &str) -> MotionResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> MotionResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> MotionResult<T> {
        self.map_err(|e| MotionError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> MotionResult<T> {
        self.map_err(|e| MotionError::Other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to `MotionError::Other` with the given message.
    fn context(self, msg: &str) -> MotionResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> MotionResult<T> {
        self.ok_or_else(|| MotionError::Other(msg.to_string()))
    }
}

/// Type alias for Results using MotionError.
pub type MotionResult<T> = Result<T, MotionError>;
