//! Unit tests for the texture module
//!
//! Tests TextureFormat helpers and the desc -> info conversion.

use crate::graphics_device::{
    TextureDesc, TextureFormat, TextureInfo, TextureUsage, PixelDatatype, SamplerDesc,
};

// ============================================================================
// TEXTURE FORMAT
// ============================================================================

#[test]
fn test_texture_format_bytes_per_pixel() {
    assert_eq!(TextureFormat::R8G8B8A8_UNORM.bytes_per_pixel(), 4);
    assert_eq!(TextureFormat::R16G16B16A16_SFLOAT.bytes_per_pixel(), 8);
    assert_eq!(TextureFormat::D24_UNORM_S8_UINT.bytes_per_pixel(), 4);
}

#[test]
fn test_texture_format_color_selects_precision() {
    assert_eq!(TextureFormat::color(false), TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(TextureFormat::color(true), TextureFormat::R16G16B16A16_SFLOAT);
    assert_eq!(TextureFormat::color(false).pixel_datatype(), PixelDatatype::UnsignedByte);
    assert_eq!(TextureFormat::color(true).pixel_datatype(), PixelDatatype::HalfFloat);
}

#[test]
fn test_texture_format_depth_stencil() {
    assert!(TextureFormat::D24_UNORM_S8_UINT.is_depth_stencil());
    assert!(!TextureFormat::R8G8B8A8_UNORM.is_depth_stencil());
    assert!(!TextureFormat::R16G16B16A16_SFLOAT.is_depth_stencil());
    assert_eq!(
        TextureFormat::D24_UNORM_S8_UINT.pixel_datatype(),
        PixelDatatype::UnsignedInt24_8
    );
}

// ============================================================================
// TEXTURE USAGE / INFO
// ============================================================================

#[test]
fn test_texture_usage_flags_combine() {
    let usage = TextureUsage::SAMPLED | TextureUsage::COLOR_ATTACHMENT;
    assert!(usage.contains(TextureUsage::SAMPLED));
    assert!(usage.contains(TextureUsage::COLOR_ATTACHMENT));
    assert!(!usage.contains(TextureUsage::DEPTH_STENCIL_ATTACHMENT));
}

#[test]
fn test_texture_info_from_desc() {
    let desc = TextureDesc {
        width: 640,
        height: 360,
        format: TextureFormat::R16G16B16A16_SFLOAT,
        usage: TextureUsage::SAMPLED | TextureUsage::COLOR_ATTACHMENT,
        sampler: Some(SamplerDesc::nearest_clamp()),
    };

    let info = TextureInfo::from(&desc);
    assert_eq!(info.width, 640);
    assert_eq!(info.height, 360);
    assert_eq!(info.format, desc.format);
    assert_eq!(info.usage, desc.usage);
    assert_eq!(info.sampler, Some(SamplerDesc::nearest_clamp()));
}
