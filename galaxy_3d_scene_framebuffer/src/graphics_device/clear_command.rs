/// Clear command - resets the attachments of the active framebuffer

use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, PassState};

/// Describes which attachments to clear and to what
///
/// A `None` field leaves the matching attachment untouched. The command is
/// meant to be kept alive and mutated between frames rather than rebuilt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearCommand {
    /// RGBA clear color
    pub color: Option<Vec4>,
    /// Depth clear value (1.0 = far plane)
    pub depth: Option<f32>,
    /// Stencil clear value
    pub stencil: Option<u32>,
    /// Name of the object issuing the clear (debugging only)
    pub owner: Option<String>,
}

impl ClearCommand {
    /// Clear the framebuffer currently designated by `pass_state`
    pub fn execute(&self, device: &mut dyn GraphicsDevice, pass_state: &PassState) -> Result<()> {
        device.clear(self, pass_state.framebuffer.as_ref())
    }
}
