/// Framebuffer trait - groups color and depth/stencil attachments
///
/// A framebuffer binds together the attachments that draw and clear calls
/// render into. It is created once and reused every frame; it must be
/// recreated only when its attachments change (resize, format change).

use std::fmt;
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::{Renderbuffer, ResourceId, Texture};

/// Depth/stencil attachment: either a sampled texture or an attachment-only
/// renderbuffer, never both
#[derive(Clone)]
pub enum DepthStencilAttachment {
    /// Sampled depth/stencil texture (requires depth texture support)
    Texture(Arc<dyn Texture>),
    /// Attachment-only renderbuffer (fallback)
    Renderbuffer(Arc<dyn Renderbuffer>),
}

impl DepthStencilAttachment {
    pub fn width(&self) -> u32 {
        match self {
            DepthStencilAttachment::Texture(texture) => texture.info().width,
            DepthStencilAttachment::Renderbuffer(renderbuffer) => renderbuffer.info().width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            DepthStencilAttachment::Texture(texture) => texture.info().height,
            DepthStencilAttachment::Renderbuffer(renderbuffer) => renderbuffer.info().height,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        match self {
            DepthStencilAttachment::Texture(texture) => texture.resource_id(),
            DepthStencilAttachment::Renderbuffer(renderbuffer) => renderbuffer.resource_id(),
        }
    }

    /// Destroy the underlying texture or renderbuffer now
    pub fn destroy(&self) {
        match self {
            DepthStencilAttachment::Texture(texture) => texture.destroy(),
            DepthStencilAttachment::Renderbuffer(renderbuffer) => renderbuffer.destroy(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        match self {
            DepthStencilAttachment::Texture(texture) => texture.is_destroyed(),
            DepthStencilAttachment::Renderbuffer(renderbuffer) => renderbuffer.is_destroyed(),
        }
    }

    /// True if the attachment can also be sampled in shaders
    pub fn is_sampled(&self) -> bool {
        matches!(self, DepthStencilAttachment::Texture(_))
    }

    pub fn as_texture(&self) -> Option<&Arc<dyn Texture>> {
        match self {
            DepthStencilAttachment::Texture(texture) => Some(texture),
            DepthStencilAttachment::Renderbuffer(_) => None,
        }
    }

    pub fn as_renderbuffer(&self) -> Option<&Arc<dyn Renderbuffer>> {
        match self {
            DepthStencilAttachment::Texture(_) => None,
            DepthStencilAttachment::Renderbuffer(renderbuffer) => Some(renderbuffer),
        }
    }
}

impl fmt::Debug for DepthStencilAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_sampled() { "Texture" } else { "Renderbuffer" };
        write!(f, "{}({:?}, {}x{})", kind, self.resource_id(), self.width(), self.height())
    }
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc {
    /// Color attachments, in draw-buffer order
    pub color_attachments: Vec<Arc<dyn Texture>>,
    /// Optional depth/stencil attachment
    pub depth_stencil_attachment: Option<DepthStencilAttachment>,
    /// When false the framebuffer only references its attachments: dropping
    /// it leaves them alive and their lifetime stays with the caller.
    /// When true the framebuffer takes shared ownership of them.
    pub destroy_attachments: bool,
}

impl FramebufferDesc {
    /// Common size of all attachments
    ///
    /// # Errors
    ///
    /// `InvalidResource` if there is no attachment at all or if the
    /// attachments do not share the same dimensions.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let mut sizes = self
            .color_attachments
            .iter()
            .map(|texture| (texture.info().width, texture.info().height))
            .chain(
                self.depth_stencil_attachment
                    .iter()
                    .map(|attachment| (attachment.width(), attachment.height())),
            );

        let first = sizes.next().ok_or_else(|| {
            Error::InvalidResource("Framebuffer needs at least one attachment".to_string())
        })?;

        for size in sizes {
            if size != first {
                return Err(Error::InvalidResource(format!(
                    "Framebuffer attachment size {}x{} does not match {}x{}",
                    size.0, size.1, first.0, first.1
                )));
            }
        }

        Ok(first)
    }
}

/// Framebuffer resource trait
///
/// Destroyed by `destroy` or when the last `Arc` to it is dropped. Whether
/// that also destroys the attachments depends on
/// `FramebufferDesc::destroy_attachments`.
pub trait Framebuffer: Send + Sync {
    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Number of color attachments
    fn color_attachment_count(&self) -> usize;

    /// True if a depth/stencil attachment is bound
    fn has_depth_stencil(&self) -> bool;

    /// Identity of the underlying device object
    fn resource_id(&self) -> ResourceId;

    /// Destroy the GPU object now, even if other `Arc`s are still alive
    ///
    /// Handles kept elsewhere (a `PassState`, a render graph) become dead
    /// and the device refuses to clear or draw through them.
    fn destroy(&self);

    /// True once the GPU object is gone
    fn is_destroyed(&self) -> bool;
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
