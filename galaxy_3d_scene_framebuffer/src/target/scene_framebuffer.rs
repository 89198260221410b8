/// Scene framebuffer - off-screen color + depth/stencil render destination
///
/// Owns one color texture, one depth/stencil surface (a sampled texture when
/// the device supports it, a renderbuffer otherwise) and the framebuffer
/// binding them together. `reconcile` keeps the set in sync with the
/// drawing buffer size and the requested precision; `clear` resets it
/// without disturbing the pass state of the caller.

use std::fmt;
use std::sync::Arc;
use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{
    ClearCommand, DepthStencilAttachment, Framebuffer, FramebufferDesc, GraphicsDevice, PassState,
    Renderbuffer, RenderbufferDesc, RenderbufferFormat, SamplerDesc, Texture, TextureDesc,
    TextureFormat, TextureUsage,
};
use crate::{engine_debug, engine_error, engine_state_bail, engine_trace};

const SOURCE: &str = "galaxy3d::SceneFramebuffer";

/// Far plane
const DEPTH_CLEAR_VALUE: f32 = 1.0;

/// Scene framebuffer configuration
#[derive(Debug, Clone)]
pub struct SceneFramebufferConfig {
    /// Label used in logs and as owner of the clear command
    pub name: String,
    /// Clear color stored before the first `clear` call
    pub initial_clear_color: Vec4,
    /// Stencil clear value, `None` to leave stencil untouched
    pub clear_stencil: Option<u32>,
}

impl Default for SceneFramebufferConfig {
    fn default() -> Self {
        Self {
            name: "SceneFramebuffer".to_string(),
            initial_clear_color: Vec4::ZERO,
            clear_stencil: Some(0),
        }
    }
}

/// Lifetime counters of a scene framebuffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneFramebufferStats {
    /// Number of times the full attachment set was (re)created
    pub rebuilds: u64,
    /// Number of successful clears
    pub clears: u64,
}

/// Freshly created attachment set, committed as a whole
struct SceneResources {
    color_texture: Arc<dyn Texture>,
    depth_stencil: DepthStencilAttachment,
    framebuffer: Arc<dyn Framebuffer>,
}

/// Off-screen render destination of the scene
///
/// Either every GPU resource is live (ready) or none is. The scene
/// framebuffer exclusively owns them: the handles returned by the accessors
/// may be cloned, but a rebuild or `release` destroys the objects behind
/// every clone.
pub struct SceneFramebuffer {
    framebuffer: Option<Arc<dyn Framebuffer>>,
    color_texture: Option<Arc<dyn Texture>>,
    depth_stencil: Option<DepthStencilAttachment>,
    hdr: Option<bool>,
    clear_command: ClearCommand,
    stats: SceneFramebufferStats,
    name: String,
}

impl SceneFramebuffer {
    /// Create an empty scene framebuffer with the default configuration
    ///
    /// No GPU resource is allocated until the first `reconcile`.
    pub fn new() -> Self {
        Self::with_config(SceneFramebufferConfig::default())
    }

    pub fn with_config(config: SceneFramebufferConfig) -> Self {
        Self {
            framebuffer: None,
            color_texture: None,
            depth_stencil: None,
            hdr: None,
            clear_command: ClearCommand {
                color: Some(config.initial_clear_color),
                depth: Some(DEPTH_CLEAR_VALUE),
                stencil: config.clear_stencil,
                owner: Some(config.name.clone()),
            },
            stats: SceneFramebufferStats::default(),
            name: config.name,
        }
    }

    /// Bring the attachments in line with the device and precision mode
    ///
    /// Rebuilds everything when nothing exists yet, when the drawing buffer
    /// size differs from the color texture, or when `hdr` differs from the
    /// mode of the last successful reconcile. Otherwise does nothing.
    ///
    /// # Arguments
    ///
    /// * `device` - Device the resources are allocated from
    /// * `hdr` - `true` for half-float color, `false` for 8 bits per channel
    ///
    /// # Errors
    ///
    /// Propagates the device error of the first failed allocation. The old
    /// resources are gone by then and the framebuffer is left empty.
    pub fn reconcile(&mut self, device: &mut dyn GraphicsDevice, hdr: bool) -> Result<()> {
        let width = device.drawing_buffer_width();
        let height = device.drawing_buffer_height();

        let size_changed = match &self.color_texture {
            Some(texture) => texture.info().width != width || texture.info().height != height,
            None => true,
        };
        let mode_changed = self.hdr != Some(hdr);

        if !size_changed && !mode_changed && self.framebuffer.is_some() {
            return Ok(());
        }

        self.destroy_resources();

        let resources = match Self::create_resources(device, width, height, hdr) {
            Ok(resources) => resources,
            Err(err) => {
                engine_error!(SOURCE, "'{}' failed to build {}x{} attachments (hdr: {}): {}",
                    self.name, width, height, hdr, err);
                return Err(err);
            }
        };

        engine_debug!(SOURCE, "'{}' rebuilt: {}x{} {:?}, depth/stencil {:?}",
            self.name, width, height, resources.color_texture.info().format, resources.depth_stencil);

        self.framebuffer = Some(resources.framebuffer);
        self.color_texture = Some(resources.color_texture);
        self.depth_stencil = Some(resources.depth_stencil);
        self.hdr = Some(hdr);
        self.stats.rebuilds += 1;

        Ok(())
    }

    fn create_resources(
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        hdr: bool,
    ) -> Result<SceneResources> {
        let color_texture = device.create_texture(&TextureDesc {
            width,
            height,
            format: TextureFormat::color(hdr),
            usage: TextureUsage::SAMPLED | TextureUsage::COLOR_ATTACHMENT,
            sampler: Some(SamplerDesc::nearest_clamp()),
        })?;

        let depth_stencil = if device.supports_depth_texture() {
            DepthStencilAttachment::Texture(device.create_texture(&TextureDesc {
                width,
                height,
                format: TextureFormat::D24_UNORM_S8_UINT,
                usage: TextureUsage::SAMPLED | TextureUsage::DEPTH_STENCIL_ATTACHMENT,
                sampler: None,
            })?)
        } else {
            DepthStencilAttachment::Renderbuffer(device.create_renderbuffer(&RenderbufferDesc {
                width,
                height,
                format: RenderbufferFormat::DepthStencil,
            })?)
        };

        let framebuffer = device.create_framebuffer(&FramebufferDesc {
            color_attachments: vec![Arc::clone(&color_texture)],
            depth_stencil_attachment: Some(depth_stencil.clone()),
            destroy_attachments: false,
        })?;

        Ok(SceneResources { color_texture, depth_stencil, framebuffer })
    }

    /// Clear color, depth (to 1.0) and stencil of the framebuffer
    ///
    /// `pass_state` is pointed at this framebuffer for the duration of the
    /// clear and restored before returning, also when the device fails.
    ///
    /// # Errors
    ///
    /// `Error::InvalidState` if `reconcile` never succeeded, otherwise the
    /// device error of the clear itself.
    pub fn clear(
        &mut self,
        device: &mut dyn GraphicsDevice,
        pass_state: &mut PassState,
        clear_color: Vec4,
    ) -> Result<()> {
        let framebuffer = match &self.framebuffer {
            Some(framebuffer) => Arc::clone(framebuffer),
            None => engine_state_bail!(SOURCE, "'{}' cleared before being reconciled", self.name),
        };

        self.clear_command.color = Some(clear_color);

        let redirected = pass_state.redirect(framebuffer);
        self.clear_command.execute(device, &redirected)?;
        drop(redirected);

        self.stats.clears += 1;
        engine_trace!(SOURCE, "'{}' cleared to {:?}", self.name, clear_color);

        Ok(())
    }

    /// Framebuffer to render into, `None` before the first reconcile
    pub fn framebuffer(&self) -> Option<&Arc<dyn Framebuffer>> {
        self.framebuffer.as_ref()
    }

    pub fn color_texture(&self) -> Option<&Arc<dyn Texture>> {
        self.color_texture.as_ref()
    }

    pub fn depth_stencil(&self) -> Option<&DepthStencilAttachment> {
        self.depth_stencil.as_ref()
    }

    /// Sampled depth/stencil texture (device supports depth textures)
    pub fn depth_stencil_texture(&self) -> Option<&Arc<dyn Texture>> {
        self.depth_stencil.as_ref().and_then(DepthStencilAttachment::as_texture)
    }

    /// Depth/stencil renderbuffer (fallback without depth texture support)
    pub fn depth_stencil_renderbuffer(&self) -> Option<&Arc<dyn Renderbuffer>> {
        self.depth_stencil.as_ref().and_then(DepthStencilAttachment::as_renderbuffer)
    }

    /// Precision mode of the live attachments, `None` when not ready
    pub fn hdr(&self) -> Option<bool> {
        self.hdr
    }

    pub fn is_ready(&self) -> bool {
        self.framebuffer.is_some()
    }

    /// Always false: `release` consumes the framebuffer
    pub fn is_destroyed(&self) -> bool {
        false
    }

    /// Color used by the last clear (or the configured initial color)
    pub fn clear_color(&self) -> Vec4 {
        self.clear_command.color.unwrap_or(Vec4::ZERO)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> SceneFramebufferStats {
        self.stats
    }

    /// Destroy every GPU resource and the framebuffer itself
    pub fn release(mut self) {
        engine_debug!(SOURCE, "'{}' released after {} rebuilds and {} clears",
            self.name, self.stats.rebuilds, self.stats.clears);
        self.destroy_resources();
    }

    /// Destroy the framebuffer, then its attachments
    ///
    /// Destruction is explicit: handles the caller still holds (e.g. in a
    /// `PassState`) become dead instead of keeping the GPU objects alive.
    fn destroy_resources(&mut self) {
        if let Some(framebuffer) = self.framebuffer.take() {
            framebuffer.destroy();
        }
        if let Some(color_texture) = self.color_texture.take() {
            color_texture.destroy();
        }
        if let Some(depth_stencil) = self.depth_stencil.take() {
            depth_stencil.destroy();
        }
        self.hdr = None;
    }
}

impl Default for SceneFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneFramebuffer {
    fn drop(&mut self) {
        self.destroy_resources();
    }
}

impl fmt::Debug for SceneFramebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneFramebuffer")
            .field("name", &self.name)
            .field("framebuffer", &self.framebuffer.as_ref().map(|fb| fb.resource_id()))
            .field("color_texture", &self.color_texture.as_ref().map(|t| t.resource_id()))
            .field("depth_stencil", &self.depth_stencil)
            .field("hdr", &self.hdr)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
#[path = "scene_framebuffer_tests.rs"]
mod tests;
