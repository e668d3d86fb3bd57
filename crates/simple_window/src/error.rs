//! Error types for window construction and platform operations.

use thiserror::Error;

/// Errors reported by the windowing layer.
///
/// Construction failure is fatal: there is no window object to fall back to.
/// Operation-level failures (clipboard, title) are local and non-fatal; the
/// window remains usable after one is returned. Best-effort operations
/// (cursor, geometry) do not return errors at all — they log and continue.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Native window or connection allocation failed during construction.
    #[error("window creation failed: {0}")]
    Creation(String),

    /// A platform call failed after construction. Diagnostic builds carry
    /// the native error text; release builds carry the raw error code.
    #[error("platform call failed: {0}")]
    Platform(String),

    /// The operation has no implementation on the compiled backend.
    #[error("operation not supported on this platform: {0}")]
    Unsupported(&'static str),
}
