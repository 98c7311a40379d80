//! # GL Engine
//!
//! A small OpenGL core: a GLFW window with a 4.5 core context, RAII wrappers
//! for the handful of GL objects a textbook triangle needs, and a loop
//! controller that drives setup, the update/render cycle and teardown.
//!
//! ## Layout
//!
//! - [`render::gl`]: the [`GlApi`](render::gl::GlApi) seam every GL call goes
//!   through, with a `glow` implementation
//! - [`render::resources`]: buffers, shader stages, programs and vertex
//!   arrays that own one driver object each and release it exactly once
//! - [`window`]: the [`Platform`](window::Platform) seam and its GLFW backend
//! - [`game`]: [`Game`](game::Game), the loop controller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_engine::prelude::*;
//!
//! fn main() {
//!     logging::init(&LoggingConfig::default());
//!
//!     let mut game = Game::new(GlfwPlatform::new(), GameConfig::default(), Logger::default());
//!     let code = match game.initialize().and_then(|()| game.run()) {
//!         Ok(()) => game.exit_code(),
//!         Err(err) => {
//!             log::error!("{err}");
//!             EXIT_FAILURE
//!         }
//!     };
//!     game.terminate();
//!     std::process::exit(code);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod application;
pub mod config;
pub mod foundation;
pub mod game;
pub mod render;
pub mod window;


pub use game::{Game, GameError, GameResult, EXIT_FAILURE, EXIT_SUCCESS};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        application::{AppControl, FrameInfo},
        config::{ContextConfig, GameConfig, GraphicsConfig, WindowConfig},
        foundation::logging::{self, Logger, LoggingConfig},
        game::{Game, GameError, GameResult, EXIT_FAILURE, EXIT_SUCCESS},
        render::resources::{Disposable, GlBuffer, GlShader, GlShaderProgram, GlVertexArray},
        window::{GlfwPlatform, Platform, WindowBackend},
    };
}
