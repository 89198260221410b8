/// Headless graphics device - CPU-side implementation of `GraphicsDevice`
///
/// Keeps every resource in a slot map and stores real texel data, so clears
/// can be read back and resource lifetimes observed without a GPU. Used by
/// the test suites and by tools that run without a window.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::Vec4;
use half::f16;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use crate::error::{Error, Result};
use crate::graphics_device::{
    ClearCommand, DepthStencilAttachment, Framebuffer, FramebufferDesc, GraphicsDevice,
    Renderbuffer, RenderbufferDesc, RenderbufferFormat, RenderbufferInfo, ResourceId, Texture,
    TextureDesc, TextureFormat, TextureInfo, TextureUsage,
};
use crate::{engine_bail, engine_err, engine_error, engine_trace};

const SOURCE: &str = "galaxy3d::HeadlessGraphicsDevice";

new_key_type! {
    struct ResourceKey;
}

fn resource_id(key: ResourceKey) -> ResourceId {
    ResourceId::from_raw(key.data().as_ffi())
}

fn resource_key(id: ResourceId) -> ResourceKey {
    KeyData::from_ffi(id.as_raw()).into()
}

// ============================================================================
// Shared state
// ============================================================================

/// Texel storage of a texture or renderbuffer
enum Texels {
    Color { format: TextureFormat, pixels: Vec<Vec4> },
    DepthStencil { depth: Vec<f32>, stencil: Vec<u8> },
}

impl Texels {
    fn new(format: TextureFormat, texel_count: usize) -> Self {
        if format.is_depth_stencil() {
            Texels::DepthStencil {
                depth: vec![0.0; texel_count],
                stencil: vec![0; texel_count],
            }
        } else {
            Texels::Color { format, pixels: vec![Vec4::ZERO; texel_count] }
        }
    }
}

enum HeadlessResource {
    Texture(Texels),
    Renderbuffer(Texels),
    Framebuffer {
        color_attachments: Vec<ResourceKey>,
        depth_stencil_attachment: Option<ResourceKey>,
    },
}

impl HeadlessResource {
    fn texels(&self) -> Option<&Texels> {
        match self {
            HeadlessResource::Texture(texels) | HeadlessResource::Renderbuffer(texels) => Some(texels),
            HeadlessResource::Framebuffer { .. } => None,
        }
    }

    fn texels_mut(&mut self) -> Option<&mut Texels> {
        match self {
            HeadlessResource::Texture(texels) | HeadlessResource::Renderbuffer(texels) => Some(texels),
            HeadlessResource::Framebuffer { .. } => None,
        }
    }
}

/// Counters of device activity since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    pub textures_created: u64,
    pub renderbuffers_created: u64,
    pub framebuffers_created: u64,
    pub clears_executed: u64,
}

struct HeadlessState {
    resources: SlotMap<ResourceKey, HeadlessResource>,
    stats: HeadlessStats,
}

type SharedState = Arc<Mutex<HeadlessState>>;

fn lock_state(state: &SharedState) -> Result<MutexGuard<'_, HeadlessState>> {
    state
        .lock()
        .map_err(|_| engine_err!(SOURCE, "Headless device state lock poisoned"))
}

/// Remove a resource record (explicit destroy or last handle dropped)
///
/// Removing a stale key is a no-op, so destroy followed by drop is fine.
fn release_key(state: &SharedState, key: ResourceKey) {
    if let Ok(mut state) = state.lock() {
        state.resources.remove(key);
    }
}

fn is_released(state: &SharedState, key: ResourceKey) -> bool {
    state
        .lock()
        .map(|state| !state.resources.contains_key(key))
        .unwrap_or(true)
}

// ============================================================================
// Resource handles
// ============================================================================

/// Texture created by `HeadlessGraphicsDevice`
pub struct HeadlessTexture {
    info: TextureInfo,
    key: ResourceKey,
    state: SharedState,
}

impl Texture for HeadlessTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn resource_id(&self) -> ResourceId {
        resource_id(self.key)
    }

    fn destroy(&self) {
        release_key(&self.state, self.key);
    }

    fn is_destroyed(&self) -> bool {
        is_released(&self.state, self.key)
    }
}

impl Drop for HeadlessTexture {
    fn drop(&mut self) {
        release_key(&self.state, self.key);
    }
}

/// Renderbuffer created by `HeadlessGraphicsDevice`
pub struct HeadlessRenderbuffer {
    info: RenderbufferInfo,
    key: ResourceKey,
    state: SharedState,
}

impl Renderbuffer for HeadlessRenderbuffer {
    fn info(&self) -> &RenderbufferInfo {
        &self.info
    }

    fn resource_id(&self) -> ResourceId {
        resource_id(self.key)
    }

    fn destroy(&self) {
        release_key(&self.state, self.key);
    }

    fn is_destroyed(&self) -> bool {
        is_released(&self.state, self.key)
    }
}

impl Drop for HeadlessRenderbuffer {
    fn drop(&mut self) {
        release_key(&self.state, self.key);
    }
}

/// Framebuffer created by `HeadlessGraphicsDevice`
///
/// Holds strong references to its attachments only when it was created with
/// `destroy_attachments = true`; otherwise it just records their keys.
pub struct HeadlessFramebuffer {
    width: u32,
    height: u32,
    color_attachment_count: usize,
    has_depth_stencil: bool,
    key: ResourceKey,
    state: SharedState,
    owned_color_attachments: Vec<Arc<dyn Texture>>,
    owned_depth_stencil_attachment: Option<DepthStencilAttachment>,
}

impl Framebuffer for HeadlessFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_attachment_count(&self) -> usize {
        self.color_attachment_count
    }

    fn has_depth_stencil(&self) -> bool {
        self.has_depth_stencil
    }

    fn resource_id(&self) -> ResourceId {
        resource_id(self.key)
    }

    fn destroy(&self) {
        release_key(&self.state, self.key);
        for texture in &self.owned_color_attachments {
            texture.destroy();
        }
        if let Some(attachment) = &self.owned_depth_stencil_attachment {
            attachment.destroy();
        }
    }

    fn is_destroyed(&self) -> bool {
        is_released(&self.state, self.key)
    }
}

impl Drop for HeadlessFramebuffer {
    fn drop(&mut self) {
        release_key(&self.state, self.key);
    }
}

// ============================================================================
// Device
// ============================================================================

/// CPU-backed graphics device
pub struct HeadlessGraphicsDevice {
    drawing_buffer_width: u32,
    drawing_buffer_height: u32,
    depth_texture_supported: bool,
    fail_next_allocation: bool,
    fail_next_clear: bool,
    state: SharedState,
}

impl HeadlessGraphicsDevice {
    /// Create a device with a `width` x `height` drawing buffer and depth
    /// texture support enabled
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            drawing_buffer_width: width,
            drawing_buffer_height: height,
            depth_texture_supported: true,
            fail_next_allocation: false,
            fail_next_clear: false,
            state: Arc::new(Mutex::new(HeadlessState {
                resources: SlotMap::with_key(),
                stats: HeadlessStats::default(),
            })),
        }
    }

    /// Simulate a canvas resize
    pub fn set_drawing_buffer_size(&mut self, width: u32, height: u32) {
        self.drawing_buffer_width = width;
        self.drawing_buffer_height = height;
    }

    /// Toggle depth texture support (off = renderbuffer fallback only)
    pub fn set_depth_texture_support(&mut self, supported: bool) {
        self.depth_texture_supported = supported;
    }

    /// Make the next texture/renderbuffer/framebuffer creation fail with
    /// `Error::OutOfMemory`
    pub fn fail_next_allocation(&mut self) {
        self.fail_next_allocation = true;
    }

    /// Make the next clear fail with `Error::BackendError`
    pub fn fail_next_clear(&mut self) {
        self.fail_next_clear = true;
    }

    pub fn stats(&self) -> HeadlessStats {
        self.state.lock().map(|state| state.stats).unwrap_or_default()
    }

    pub fn live_texture_count(&self) -> usize {
        self.count_live(|resource| matches!(resource, HeadlessResource::Texture(_)))
    }

    pub fn live_renderbuffer_count(&self) -> usize {
        self.count_live(|resource| matches!(resource, HeadlessResource::Renderbuffer(_)))
    }

    pub fn live_framebuffer_count(&self) -> usize {
        self.count_live(|resource| matches!(resource, HeadlessResource::Framebuffer { .. }))
    }

    /// True if `id` names a resource of this device that was not destroyed
    pub fn is_live(&self, id: ResourceId) -> bool {
        self.state
            .lock()
            .map(|state| state.resources.contains_key(resource_key(id)))
            .unwrap_or(false)
    }

    /// Read back the texels of a color texture, row-major from the top-left
    pub fn read_color_pixels(&self, id: ResourceId) -> Result<Vec<Vec4>> {
        let state = lock_state(&self.state)?;
        match state.resources.get(resource_key(id)).and_then(HeadlessResource::texels) {
            Some(Texels::Color { pixels, .. }) => Ok(pixels.clone()),
            _ => Err(Error::InvalidResource(format!("{:?} is not a live color surface", id))),
        }
    }

    /// Read back the depth values of a depth/stencil texture or renderbuffer
    pub fn read_depth(&self, id: ResourceId) -> Result<Vec<f32>> {
        let state = lock_state(&self.state)?;
        match state.resources.get(resource_key(id)).and_then(HeadlessResource::texels) {
            Some(Texels::DepthStencil { depth, .. }) => Ok(depth.clone()),
            _ => Err(Error::InvalidResource(format!("{:?} is not a live depth/stencil surface", id))),
        }
    }

    /// Read back the stencil values of a depth/stencil texture or renderbuffer
    pub fn read_stencil(&self, id: ResourceId) -> Result<Vec<u8>> {
        let state = lock_state(&self.state)?;
        match state.resources.get(resource_key(id)).and_then(HeadlessResource::texels) {
            Some(Texels::DepthStencil { stencil, .. }) => Ok(stencil.clone()),
            _ => Err(Error::InvalidResource(format!("{:?} is not a live depth/stencil surface", id))),
        }
    }

    fn count_live(&self, predicate: impl Fn(&HeadlessResource) -> bool) -> usize {
        self.state
            .lock()
            .map(|state| state.resources.values().filter(|resource| predicate(resource)).count())
            .unwrap_or(0)
    }

    fn check_allocation(&mut self, what: &str) -> Result<()> {
        if std::mem::take(&mut self.fail_next_allocation) {
            engine_error!(SOURCE, "Out of memory while creating {}", what);
            return Err(Error::OutOfMemory);
        }
        Ok(())
    }

    fn reject(message: String) -> Error {
        engine_error!(SOURCE, "{}", message);
        Error::InvalidResource(message)
    }

    fn texel_count(width: u32, height: u32) -> usize {
        width as usize * height as usize
    }
}

/// Store `color` the way a texel of `format` would hold it
fn quantize(format: TextureFormat, color: Vec4) -> Vec4 {
    match format {
        TextureFormat::R8G8B8A8_UNORM => {
            (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round() / 255.0
        }
        TextureFormat::R16G16B16A16_SFLOAT => {
            Vec4::from_array(color.to_array().map(|c| f16::from_f32(c).to_f32()))
        }
        TextureFormat::D24_UNORM_S8_UINT => color,
    }
}

impl GraphicsDevice for HeadlessGraphicsDevice {
    fn drawing_buffer_width(&self) -> u32 {
        self.drawing_buffer_width
    }

    fn drawing_buffer_height(&self) -> u32 {
        self.drawing_buffer_height
    }

    fn supports_depth_texture(&self) -> bool {
        self.depth_texture_supported
    }

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<Arc<dyn Texture>> {
        self.check_allocation("texture")?;

        if desc.width == 0 || desc.height == 0 {
            return Err(Self::reject(format!(
                "Texture size {}x{} must be non-zero", desc.width, desc.height
            )));
        }

        if desc.format.is_depth_stencil() {
            if !self.depth_texture_supported {
                return Err(Self::reject(
                    "Depth textures are not supported by this device".to_string()
                ));
            }
            if desc.usage.contains(TextureUsage::COLOR_ATTACHMENT) {
                return Err(Self::reject(format!(
                    "{:?} cannot be used as a color attachment", desc.format
                )));
            }
        } else if desc.usage.contains(TextureUsage::DEPTH_STENCIL_ATTACHMENT) {
            return Err(Self::reject(format!(
                "{:?} cannot be used as a depth/stencil attachment", desc.format
            )));
        }

        let mut state = lock_state(&self.state)?;
        let texels = Texels::new(desc.format, Self::texel_count(desc.width, desc.height));
        let key = state.resources.insert(HeadlessResource::Texture(texels));
        state.stats.textures_created += 1;

        engine_trace!(SOURCE, "Created texture {:?} {}x{} {:?}",
            resource_id(key), desc.width, desc.height, desc.format);

        Ok(Arc::new(HeadlessTexture {
            info: TextureInfo::from(desc),
            key,
            state: Arc::clone(&self.state),
        }))
    }

    fn create_renderbuffer(&mut self, desc: &RenderbufferDesc) -> Result<Arc<dyn Renderbuffer>> {
        self.check_allocation("renderbuffer")?;

        if desc.width == 0 || desc.height == 0 {
            return Err(Self::reject(format!(
                "Renderbuffer size {}x{} must be non-zero", desc.width, desc.height
            )));
        }

        let format = match desc.format {
            RenderbufferFormat::DepthStencil => TextureFormat::D24_UNORM_S8_UINT,
        };

        let mut state = lock_state(&self.state)?;
        let texels = Texels::new(format, Self::texel_count(desc.width, desc.height));
        let key = state.resources.insert(HeadlessResource::Renderbuffer(texels));
        state.stats.renderbuffers_created += 1;

        engine_trace!(SOURCE, "Created renderbuffer {:?} {}x{}",
            resource_id(key), desc.width, desc.height);

        Ok(Arc::new(HeadlessRenderbuffer {
            info: desc.clone(),
            key,
            state: Arc::clone(&self.state),
        }))
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        self.check_allocation("framebuffer")?;

        let (width, height) = desc.dimensions().map_err(|err| {
            engine_error!(SOURCE, "{}", err);
            err
        })?;

        let mut state = lock_state(&self.state)?;

        let mut color_keys = Vec::with_capacity(desc.color_attachments.len());
        for texture in &desc.color_attachments {
            let key = resource_key(texture.resource_id());
            let is_color = matches!(
                state.resources.get(key),
                Some(HeadlessResource::Texture(Texels::Color { .. }))
            );
            if !is_color || !texture.info().usage.contains(TextureUsage::COLOR_ATTACHMENT) {
                return Err(Self::reject(format!(
                    "{:?} is not a live color attachment texture", texture.resource_id()
                )));
            }
            color_keys.push(key);
        }

        let depth_stencil_key = match &desc.depth_stencil_attachment {
            Some(attachment) => {
                let key = resource_key(attachment.resource_id());
                let is_depth_stencil = matches!(
                    state.resources.get(key).and_then(HeadlessResource::texels),
                    Some(Texels::DepthStencil { .. })
                );
                if !is_depth_stencil {
                    return Err(Self::reject(format!(
                        "{:?} is not a live depth/stencil surface", attachment
                    )));
                }
                Some(key)
            }
            None => None,
        };

        let key = state.resources.insert(HeadlessResource::Framebuffer {
            color_attachments: color_keys,
            depth_stencil_attachment: depth_stencil_key,
        });
        state.stats.framebuffers_created += 1;

        engine_trace!(SOURCE, "Created framebuffer {:?} {}x{} ({} color, depth/stencil: {})",
            resource_id(key), width, height,
            desc.color_attachments.len(), desc.depth_stencil_attachment.is_some());

        let (owned_colors, owned_depth_stencil) = if desc.destroy_attachments {
            (desc.color_attachments.clone(), desc.depth_stencil_attachment.clone())
        } else {
            (Vec::new(), None)
        };

        Ok(Arc::new(HeadlessFramebuffer {
            width,
            height,
            color_attachment_count: desc.color_attachments.len(),
            has_depth_stencil: desc.depth_stencil_attachment.is_some(),
            key,
            state: Arc::clone(&self.state),
            owned_color_attachments: owned_colors,
            owned_depth_stencil_attachment: owned_depth_stencil,
        }))
    }

    fn clear(&mut self, command: &ClearCommand, framebuffer: Option<&Arc<dyn Framebuffer>>) -> Result<()> {
        if std::mem::take(&mut self.fail_next_clear) {
            engine_bail!(SOURCE, "Clear rejected by device");
        }

        let framebuffer = match framebuffer {
            Some(framebuffer) => framebuffer,
            None => engine_bail!(SOURCE, "Headless device has no default drawing buffer to clear"),
        };

        let mut state = lock_state(&self.state)?;

        let (color_keys, depth_stencil_key) = match state.resources.get(resource_key(framebuffer.resource_id())) {
            Some(HeadlessResource::Framebuffer { color_attachments, depth_stencil_attachment }) => {
                (color_attachments.clone(), *depth_stencil_attachment)
            }
            _ => engine_bail!(SOURCE, "Framebuffer {:?} is not live", framebuffer.resource_id()),
        };

        // Every attachment is checked before any texel is written
        for &key in &color_keys {
            let texels = state.resources.get(key).and_then(HeadlessResource::texels);
            if !matches!(texels, Some(Texels::Color { .. })) {
                engine_bail!(SOURCE, "Color attachment {:?} was destroyed", resource_id(key));
            }
        }
        if let Some(key) = depth_stencil_key {
            let texels = state.resources.get(key).and_then(HeadlessResource::texels);
            if !matches!(texels, Some(Texels::DepthStencil { .. })) {
                engine_bail!(SOURCE, "Depth/stencil attachment {:?} was destroyed", resource_id(key));
            }
        }

        if let Some(color) = command.color {
            for key in color_keys {
                if let Some(Texels::Color { format, pixels }) =
                    state.resources.get_mut(key).and_then(HeadlessResource::texels_mut)
                {
                    pixels.fill(quantize(*format, color));
                }
            }
        }

        if let Some(key) = depth_stencil_key {
            if let Some(Texels::DepthStencil { depth, stencil }) =
                state.resources.get_mut(key).and_then(HeadlessResource::texels_mut)
            {
                if let Some(value) = command.depth {
                    depth.fill(value.clamp(0.0, 1.0));
                }
                if let Some(value) = command.stencil {
                    stencil.fill((value & 0xFF) as u8);
                }
            }
        }

        state.stats.clears_executed += 1;

        engine_trace!(SOURCE, "Cleared framebuffer {:?} for {}",
            framebuffer.resource_id(), command.owner.as_deref().unwrap_or("<anonymous>"));

        Ok(())
    }
}

#[cfg(test)]
#[path = "headless_graphics_device_tests.rs"]
mod tests;
