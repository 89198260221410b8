/// Texture trait, texture descriptor, and texture info

use bitflags::bitflags;
use crate::graphics_device::{ResourceId, SamplerDesc};

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// 4 channels, 8-bit unsigned normalized (standard precision color)
    R8G8B8A8_UNORM,
    /// 4 channels, 16-bit float (extended-range color)
    R16G16B16A16_SFLOAT,
    /// Combined 24-bit depth + 8-bit stencil
    D24_UNORM_S8_UINT,
}

/// Per-channel pixel encoding of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum PixelDatatype {
    UnsignedByte,
    HalfFloat,
    UnsignedInt24_8,
}

impl TextureFormat {
    /// Size of one texel in bytes
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::R16G16B16A16_SFLOAT => 8,
            TextureFormat::D24_UNORM_S8_UINT => 4,
        }
    }

    /// True for depth/stencil formats
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT)
    }

    pub fn pixel_datatype(&self) -> PixelDatatype {
        match self {
            TextureFormat::R8G8B8A8_UNORM => PixelDatatype::UnsignedByte,
            TextureFormat::R16G16B16A16_SFLOAT => PixelDatatype::HalfFloat,
            TextureFormat::D24_UNORM_S8_UINT => PixelDatatype::UnsignedInt24_8,
        }
    }

    /// 4-channel color format for the requested precision
    ///
    /// `hdr = false` gives 8 bits per channel, `hdr = true` half floats.
    pub fn color(hdr: bool) -> Self {
        if hdr {
            TextureFormat::R16G16B16A16_SFLOAT
        } else {
            TextureFormat::R8G8B8A8_UNORM
        }
    }
}

bitflags! {
    /// How a texture may be used by the device
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Can be sampled in shaders
        const SAMPLED = 0x01;
        /// Can be bound as a color attachment
        const COLOR_ATTACHMENT = 0x02;
        /// Can be bound as a depth/stencil attachment
        const DEPTH_STENCIL_ATTACHMENT = 0x04;
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Sampling parameters, `None` lets the backend pick its default
    pub sampler: Option<SamplerDesc>,
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Sampling parameters the texture was created with
    pub sampler: Option<SamplerDesc>,
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            sampler: desc.sampler,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types. The GPU object is
/// destroyed by `destroy`, or when the last `Arc` to it is dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;

    /// Identity of the underlying device object
    fn resource_id(&self) -> ResourceId;

    /// Destroy the GPU object now, even if other `Arc`s are still alive
    ///
    /// Remaining handles become dead: the device rejects them. Calling it
    /// again is a no-op.
    fn destroy(&self);

    /// True once the GPU object is gone
    fn is_destroyed(&self) -> bool;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
