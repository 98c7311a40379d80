//! Window and GL context platform seam
//!
//! A [`Platform`] brings up the windowing system and creates one window with
//! a current GL context per game session. The returned [`WindowBackend`]
//! owns the window, the context and the windowing subsystem; dropping it
//! destroys the window and shuts the subsystem down.
//!
//! The engine only needs a handful of window operations, so the trait stays
//! small. [`GlfwPlatform`] is the real implementation; tests script a mock.

mod glfw_backend;

pub use glfw_backend::{GlfwPlatform, GlfwWindow};
pub use glfw::Key;

use std::rc::Rc;

use thiserror::Error;

use crate::config::GameConfig;
use crate::render::gl::GlApi;

/// Window and context setup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The windowing subsystem failed to start
    #[error("failed to initialize windowing system: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("failed to create window")]
    CreationFailed,

    /// GL entry points could not be resolved for the new context
    #[error("failed to load OpenGL functions: {0}")]
    LoaderFailed(String),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Factory for game windows
pub trait Platform {
    /// Window type produced by this platform
    type Window: WindowBackend;

    /// Start the windowing system and open a hidden window
    ///
    /// On success the window's GL context is current on the calling thread
    /// and its function table is loaded.
    fn create_window(&mut self, config: &GameConfig) -> WindowResult<Self::Window>;
}

/// One window with a current GL context
pub trait WindowBackend {
    /// GL function table bound to this window's context
    fn gl(&self) -> Rc<dyn GlApi>;

    /// Make this window's context current on the calling thread
    fn make_current(&mut self);

    /// Make the window visible
    fn show(&mut self);

    /// Process pending window system events
    fn poll_events(&mut self);

    /// Whether the user asked to close the window
    fn should_close(&self) -> bool;

    /// Set or clear the close request
    fn set_should_close(&mut self, should_close: bool);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Drawable size in pixels
    fn framebuffer_size(&self) -> (i32, i32);

    /// Present the back buffer
    fn swap_buffers(&mut self);
}
