/// Tests for FramebufferDesc validation and DepthStencilAttachment helpers

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::graphics_device::{
    RenderbufferDesc, RenderbufferFormat, RenderbufferInfo, TextureFormat, TextureInfo,
    TextureUsage,
};

// ============================================================================
// Stub resources (no device involved)
// ============================================================================

struct StubTexture {
    info: TextureInfo,
    id: u64,
    destroyed: AtomicBool,
}

impl Texture for StubTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn resource_id(&self) -> ResourceId {
        ResourceId::from_raw(self.id)
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::Relaxed);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Relaxed)
    }
}

struct StubRenderbuffer {
    info: RenderbufferInfo,
    destroyed: AtomicBool,
}

impl Renderbuffer for StubRenderbuffer {
    fn info(&self) -> &RenderbufferInfo {
        &self.info
    }

    fn resource_id(&self) -> ResourceId {
        ResourceId::from_raw(99)
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::Relaxed);
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Relaxed)
    }
}

fn texture(width: u32, height: u32, format: TextureFormat, id: u64) -> Arc<dyn Texture> {
    Arc::new(StubTexture {
        info: TextureInfo {
            width,
            height,
            format,
            usage: TextureUsage::SAMPLED,
            sampler: None,
        },
        id,
        destroyed: AtomicBool::new(false),
    })
}

fn renderbuffer(width: u32, height: u32) -> Arc<dyn Renderbuffer> {
    Arc::new(StubRenderbuffer {
        info: RenderbufferDesc {
            width,
            height,
            format: RenderbufferFormat::DepthStencil,
        },
        destroyed: AtomicBool::new(false),
    })
}

// ============================================================================
// Tests: FramebufferDesc::dimensions
// ============================================================================

#[test]
fn test_dimensions_with_matching_attachments() {
    let desc = FramebufferDesc {
        color_attachments: vec![texture(800, 600, TextureFormat::R8G8B8A8_UNORM, 1)],
        depth_stencil_attachment: Some(DepthStencilAttachment::Renderbuffer(renderbuffer(800, 600))),
        destroy_attachments: false,
    };

    assert_eq!(desc.dimensions().unwrap(), (800, 600));
}

#[test]
fn test_dimensions_depth_only() {
    let desc = FramebufferDesc {
        color_attachments: Vec::new(),
        depth_stencil_attachment: Some(DepthStencilAttachment::Texture(
            texture(64, 32, TextureFormat::D24_UNORM_S8_UINT, 2),
        )),
        destroy_attachments: false,
    };

    assert_eq!(desc.dimensions().unwrap(), (64, 32));
}

#[test]
fn test_dimensions_mismatch_fails() {
    let desc = FramebufferDesc {
        color_attachments: vec![texture(800, 600, TextureFormat::R8G8B8A8_UNORM, 1)],
        depth_stencil_attachment: Some(DepthStencilAttachment::Renderbuffer(renderbuffer(1024, 768))),
        destroy_attachments: false,
    };

    assert!(matches!(desc.dimensions(), Err(Error::InvalidResource(_))));
}

#[test]
fn test_dimensions_without_attachments_fails() {
    let desc = FramebufferDesc {
        color_attachments: Vec::new(),
        depth_stencil_attachment: None,
        destroy_attachments: false,
    };

    assert!(desc.dimensions().is_err());
}

// ============================================================================
// Tests: DepthStencilAttachment
// ============================================================================

#[test]
fn test_depth_stencil_texture_variant() {
    let attachment = DepthStencilAttachment::Texture(texture(10, 20, TextureFormat::D24_UNORM_S8_UINT, 7));

    assert!(attachment.is_sampled());
    assert!(attachment.as_texture().is_some());
    assert!(attachment.as_renderbuffer().is_none());
    assert_eq!(attachment.resource_id(), ResourceId::from_raw(7));
    assert_eq!((attachment.width(), attachment.height()), (10, 20));
}

#[test]
fn test_depth_stencil_renderbuffer_variant() {
    let attachment = DepthStencilAttachment::Renderbuffer(renderbuffer(10, 20));

    assert!(!attachment.is_sampled());
    assert!(attachment.as_texture().is_none());
    assert!(attachment.as_renderbuffer().is_some());
    assert!(format!("{:?}", attachment).starts_with("Renderbuffer("));
}

#[test]
fn test_depth_stencil_destroy_reaches_resource() {
    let texture_attachment = DepthStencilAttachment::Texture(texture(4, 4, TextureFormat::D24_UNORM_S8_UINT, 3));
    let renderbuffer_attachment = DepthStencilAttachment::Renderbuffer(renderbuffer(4, 4));
    let shared = texture_attachment.clone();

    texture_attachment.destroy();
    renderbuffer_attachment.destroy();

    assert!(shared.is_destroyed());
    assert!(renderbuffer_attachment.is_destroyed());
}
