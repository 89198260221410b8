/// Sampler parameters attached to a texture at creation time

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    ClampToEdge,
}

/// Filter used when the texture is minified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinificationFilter {
    Nearest,
}

/// Filter used when the texture is magnified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnificationFilter {
    Nearest,
}

/// Sampling description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerDesc {
    /// Wrap mode along S (u)
    pub wrap_s: TextureWrap,
    /// Wrap mode along T (v)
    pub wrap_t: TextureWrap,
    /// Minification filter
    pub min_filter: MinificationFilter,
    /// Magnification filter
    pub mag_filter: MagnificationFilter,
}

impl SamplerDesc {
    /// Clamp-to-edge, nearest/nearest.
    ///
    /// Render targets are read back texel-exact, never smoothed or tiled.
    pub fn nearest_clamp() -> Self {
        Self {
            wrap_s: TextureWrap::ClampToEdge,
            wrap_t: TextureWrap::ClampToEdge,
            min_filter: MinificationFilter::Nearest,
            mag_filter: MagnificationFilter::Nearest,
        }
    }
}
