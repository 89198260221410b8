/// Graphics device module - the device abstraction and its resource types

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod sampler;
pub mod renderbuffer;
pub mod framebuffer;
pub mod clear_command;
pub mod pass_state;
pub mod headless_graphics_device;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use sampler::*;
pub use renderbuffer::*;
pub use framebuffer::*;
pub use clear_command::*;
pub use pass_state::*;
pub use headless_graphics_device::*;
