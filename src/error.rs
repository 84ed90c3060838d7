//! Error taxonomy for the host bridge
//!
//! Programmer errors (`NotImplemented`, `InvalidPointer`) are loud: they trap
//! the calling module. Resource and fetch errors are recoverable and surface
//! through each call's normal return contract (sentinel zero).

use thiserror::Error;

/// Errors raised by the host call surface and its supporting components
#[derive(Debug, Error)]
pub enum HostError {
    /// The module imported a function the host does not implement.
    ///
    /// Always surfaced loudly; silently returning zero for an unimplemented
    /// import would corrupt module logic invisibly.
    #[error("not implemented: {name}({args})")]
    NotImplemented { name: String, args: String },

    /// A pointer argument does not reference valid module memory
    #[error("invalid pointer {ptr:#x}: {what}")]
    InvalidPointer { ptr: u32, what: &'static str },

    /// A handle does not resolve in the table it was passed to
    #[error("{kind} handle {handle} not found")]
    ResourceNotFound { kind: &'static str, handle: u32 },

    /// An asset byte/text fetch did not complete successfully
    #[error("fetch failed for '{path}': {reason}")]
    FetchFailed { path: String, reason: String },

    /// `start` was called while a frame loop is already active
    #[error("the module is already running; stop() it first")]
    AlreadyRunning,
}
