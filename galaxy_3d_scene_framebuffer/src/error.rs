//! Error types for the Galaxy3D scene framebuffer
//!
//! This module defines the error type shared by the graphics-device
//! abstraction, the headless backend and the scene framebuffer itself,
//! plus the `engine_err!` / `engine_bail!` helpers that log an error
//! before handing it back to the caller.

use std::fmt;

/// Result type for Galaxy3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (device lost, clear rejected, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (mismatched attachment sizes, unknown handle, etc.)
    InvalidResource(String),

    /// Operation called in a state where it is not allowed
    /// (e.g. clearing a scene framebuffer that was never reconciled)
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_scene_framebuffer::engine_err;
/// let err = engine_err!("galaxy3d::HeadlessGraphicsDevice", "Clear rejected: {}", 42);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Log an ERROR (with file:line) and return `Err(Error::BackendError)`
/// from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log an ERROR (with file:line) and return `Err(Error::InvalidState)`
/// from the enclosing function
///
/// Used for programmer errors (calling an operation in the wrong lifecycle
/// state) which must fail fast instead of silently doing nothing.
#[macro_export]
macro_rules! engine_state_bail {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        return Err($crate::galaxy3d::Error::InvalidState(message))
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
