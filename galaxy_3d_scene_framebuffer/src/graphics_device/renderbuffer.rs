/// Renderbuffer trait and descriptor
///
/// A renderbuffer is an attachment-only image: it can be rendered into but
/// never sampled. Used as the depth/stencil fallback on devices without
/// depth texture support.

use crate::graphics_device::ResourceId;

/// Renderbuffer storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderbufferFormat {
    /// Combined depth + stencil
    DepthStencil,
}

/// Descriptor for creating a renderbuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderbufferDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Storage format
    pub format: RenderbufferFormat,
}

/// Read-only properties of a created renderbuffer
pub type RenderbufferInfo = RenderbufferDesc;

/// Renderbuffer resource trait
///
/// Destroyed by `destroy`, or when the last `Arc` to it is dropped.
pub trait Renderbuffer: Send + Sync {
    /// Get the read-only properties of this renderbuffer
    fn info(&self) -> &RenderbufferInfo;

    /// Identity of the underlying device object
    fn resource_id(&self) -> ResourceId;

    /// Destroy the GPU object now (see `Texture::destroy`)
    fn destroy(&self);

    /// True once the GPU object is gone
    fn is_destroyed(&self) -> bool;
}
