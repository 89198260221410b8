/// Per-render-pass state shared between the pass orchestration and the
/// objects that record into it

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use crate::graphics_device::Framebuffer;

/// Mutable render-pass state
///
/// `framebuffer` names the current render destination; `None` means the
/// device's default drawing buffer.
#[derive(Clone, Default)]
pub struct PassState {
    pub framebuffer: Option<Arc<dyn Framebuffer>>,
}

impl PassState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framebuffer(framebuffer: Arc<dyn Framebuffer>) -> Self {
        Self { framebuffer: Some(framebuffer) }
    }

    /// Point the pass at `framebuffer` until the returned guard is dropped
    ///
    /// The previous destination is restored when the guard goes out of
    /// scope, whether the work done through it succeeded, returned an error
    /// or panicked.
    pub fn redirect(&mut self, framebuffer: Arc<dyn Framebuffer>) -> FramebufferRedirect<'_> {
        let saved = self.framebuffer.replace(framebuffer);
        FramebufferRedirect { pass_state: self, saved }
    }

    /// True if both states designate the same framebuffer (or both none)
    pub fn targets_same(&self, framebuffer: Option<&Arc<dyn Framebuffer>>) -> bool {
        match (&self.framebuffer, framebuffer) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for PassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassState")
            .field("framebuffer", &self.framebuffer.as_ref().map(|fb| fb.resource_id()))
            .finish()
    }
}

/// Scoped redirection of a `PassState` (see `PassState::redirect`)
pub struct FramebufferRedirect<'a> {
    pass_state: &'a mut PassState,
    saved: Option<Arc<dyn Framebuffer>>,
}

impl Deref for FramebufferRedirect<'_> {
    type Target = PassState;

    fn deref(&self) -> &PassState {
        &*self.pass_state
    }
}

impl Drop for FramebufferRedirect<'_> {
    fn drop(&mut self) {
        self.pass_state.framebuffer = self.saved.take();
    }
}

#[cfg(test)]
#[path = "pass_state_tests.rs"]
mod tests;
