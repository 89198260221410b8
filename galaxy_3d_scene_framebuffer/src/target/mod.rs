//! Scene framebuffer module
//!
//! Provides the off-screen framebuffer a scene is rendered into before it
//! is composited to the screen. Its color and depth/stencil attachments
//! follow the drawing buffer size and the requested color precision.

mod scene_framebuffer;

pub use scene_framebuffer::{SceneFramebuffer, SceneFramebufferConfig, SceneFramebufferStats};
