/*!
# Galaxy 3D Scene Framebuffer

Off-screen render destination for the Galaxy 3D rendering engine.

A `SceneFramebuffer` owns a color texture and a depth/stencil surface bound
together in a framebuffer. Once per frame the render loop calls
`reconcile`, which rebuilds the whole attachment set when the drawing
buffer was resized or the color precision changed, and `clear`, which
resets the attachments without disturbing the caller's pass state.

## Architecture

- **GraphicsDevice**: Factory trait for textures, renderbuffers and framebuffers
- **Texture / Renderbuffer / Framebuffer**: Resource traits, destroyed on last drop
- **ClearCommand / PassState**: Clear descriptor and per-pass destination
- **HeadlessGraphicsDevice**: CPU implementation of `GraphicsDevice`
- **SceneFramebuffer**: The off-screen render destination itself
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod target;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine logging facade
    pub use crate::engine::Engine;

    // Graphics device trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with the graphics-device abstraction
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Target sub-module
    pub mod target {
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
