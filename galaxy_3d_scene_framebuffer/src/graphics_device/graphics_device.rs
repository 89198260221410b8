/// GraphicsDevice trait - the device interface the scene framebuffer
/// allocates its GPU resources from

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    ClearCommand, Framebuffer, FramebufferDesc, Renderbuffer, RenderbufferDesc, Texture,
    TextureDesc,
};

/// Opaque identity of a live device object
///
/// Two handles with the same id refer to the same GPU object. Ids of
/// destroyed objects are never handed out again by the same device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Graphics device trait
///
/// Implemented by backend-specific devices. Every call happens on the thread
/// that owns the device; resources are destroyed when their last `Arc` drops.
pub trait GraphicsDevice: Send + Sync {
    /// Current drawing buffer width in pixels
    fn drawing_buffer_width(&self) -> u32;

    /// Current drawing buffer height in pixels
    fn drawing_buffer_height(&self) -> u32;

    /// True if depth/stencil textures can be created (and sampled)
    ///
    /// When false, depth/stencil storage must come from a renderbuffer.
    fn supports_depth_texture(&self) -> bool;

    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create an attachment-only renderbuffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Renderbuffer descriptor
    fn create_renderbuffer(&mut self, desc: &RenderbufferDesc) -> Result<Arc<dyn Renderbuffer>>;

    /// Create a framebuffer from a set of attachments
    ///
    /// # Arguments
    ///
    /// * `desc` - Framebuffer descriptor (attachments + ownership flag)
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;

    /// Execute a clear against `framebuffer`
    ///
    /// # Arguments
    ///
    /// * `command` - What to clear and to which values
    /// * `framebuffer` - Destination, `None` for the default drawing buffer
    fn clear(&mut self, command: &ClearCommand, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()>;
}
