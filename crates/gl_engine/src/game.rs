//! Top-level loop controller
//!
//! [`Game`] owns the window, its GL context and the triangle's GPU resources
//! for one session and sequences the lifecycle:
//!
//! ```text
//! new ──► initialize ──► run { update ; render }* ──► terminate
//!              ▲                                          │
//!              └──────────────────────────────────────────┘
//! ```
//!
//! Setup problems come back as [`GameError`]. Everything after setup is
//! infallible: shader problems are logged and leave the frame empty.

use thiserror::Error;

use crate::application::{AppControl, FrameInfo, UpdateHook};
use crate::config::{ConfigError, GameConfig};
use crate::foundation::logging::Logger;
use crate::render::resources::{Disposable, GlError};
use crate::render::triangle::TriangleScene;
use crate::window::{Key, Platform, WindowBackend, WindowError};

/// Process exit status for a normal shutdown
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status after a fatal error
pub const EXIT_FAILURE: i32 = 1;

/// Lifecycle and setup errors
#[derive(Error, Debug)]
pub enum GameError {
    /// `initialize` called on an initialized game
    #[error("game already initialized")]
    AlreadyInitialized,

    /// `run` called before `initialize`
    #[error("game not initialized")]
    NotInitialized,

    /// `run` called while the loop is active
    #[error("game already running")]
    AlreadyRunning,

    /// Rejected configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Window, context or loader setup failed
    #[error("window setup failed: {0}")]
    Window(#[from] WindowError),

    /// A GPU resource could not be created
    #[error("graphics setup failed: {0}")]
    Gl(#[from] GlError),
}

/// Result alias for game lifecycle operations
pub type GameResult<T> = Result<T, GameError>;

/// Loop controller for one window and one triangle
pub struct Game<P: Platform> {
    platform: P,
    config: GameConfig,
    logger: Logger,

    initialized: bool,
    running: bool,
    should_exit: bool,
    exit_code: i32,
    frame_count: u64,

    // GPU objects must be released while their context still exists
    scene: Option<TriangleScene>,
    window: Option<P::Window>,
    update_hook: Option<UpdateHook>,
}

impl<P: Platform> Game<P> {
    /// Create an uninitialized game
    pub fn new(platform: P, config: GameConfig, logger: Logger) -> Self {
        Self {
            platform,
            config,
            logger,
            initialized: false,
            running: false,
            should_exit: false,
            exit_code: EXIT_SUCCESS,
            frame_count: 0,
            scene: None,
            window: None,
            update_hook: None,
        }
    }

    /// Open the window and create the triangle's GPU resources
    ///
    /// Resets the exit flag, exit code and frame counter. On failure every
    /// object created so far is released and the game stays uninitialized.
    pub fn initialize(&mut self) -> GameResult<()> {
        if self.initialized {
            return Err(GameError::AlreadyInitialized);
        }
        self.config.validate()?;

        let mut window = self.platform.create_window(&self.config)?;
        window.make_current();
        let gl = window.gl();
        self.logger.info(format!("Using {}", gl.describe()));

        let scene = TriangleScene::create(&gl, &self.logger)?;

        self.window = Some(window);
        self.scene = Some(scene);
        self.should_exit = false;
        self.exit_code = EXIT_SUCCESS;
        self.frame_count = 0;
        self.initialized = true;
        self.logger.info("Initialized");
        Ok(())
    }

    /// Show the window and loop until an exit is requested
    pub fn run(&mut self) -> GameResult<()> {
        if !self.initialized {
            return Err(GameError::NotInitialized);
        }
        if self.running {
            return Err(GameError::AlreadyRunning);
        }
        let Some(window) = self.window.as_mut() else {
            return Err(GameError::NotInitialized);
        };
        window.show();

        self.running = true;
        self.logger.info("Running");
        while !self.should_exit {
            self.update();
            self.render();
        }
        self.running = false;
        self.logger
            .info(format!("Main loop finished after {} frames", self.frame_count));
        Ok(())
    }

    /// Release every GPU resource, destroy the window and shut the windowing
    /// system down
    ///
    /// Safe to call at any time and any number of times.
    pub fn terminate(&mut self) {
        let was_initialized = self.initialized;
        self.initialized = false;
        self.running = false;

        if let Some(mut scene) = self.scene.take() {
            if let Some(window) = self.window.as_mut() {
                window.make_current();
            }
            scene.dispose();
        }
        self.window = None;

        if was_initialized {
            self.logger.info("Terminated");
        }
    }

    /// Set the exit code and ask the loop to stop
    ///
    /// The current iteration still renders; the loop checks the flag before
    /// starting the next one.
    pub fn request_exit(&mut self, exit_code: i32) {
        self.logger
            .info(format!("Exit requested with code {exit_code}"));
        self.set_exit_code(exit_code);
        self.set_should_exit(true);
    }

    /// Exit code reported once the loop ends
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Replace the exit code without requesting an exit
    pub fn set_exit_code(&mut self, exit_code: i32) {
        self.exit_code = exit_code;
    }

    /// Whether the loop will stop before its next iteration
    pub const fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Set or clear the exit flag
    pub fn set_should_exit(&mut self, should_exit: bool) {
        self.should_exit = should_exit;
    }

    /// Whether `initialize` succeeded and `terminate` has not run since
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether `run` is looping
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Frames rendered since the last `initialize`
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Active configuration
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Install a callback run at the end of every update phase
    pub fn set_update_hook(&mut self, hook: impl FnMut(&FrameInfo) -> AppControl + 'static) {
        self.update_hook = Some(Box::new(hook));
    }

    /// Remove the update callback
    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    fn update(&mut self) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        window.poll_events();
        let close_requested = window.should_close();
        if close_requested {
            window.set_should_close(false);
        }
        let escape_pressed = window.is_key_pressed(Key::Escape);

        if close_requested {
            self.request_exit(EXIT_SUCCESS);
        }
        if escape_pressed {
            self.request_exit(EXIT_SUCCESS);
        }

        let info = FrameInfo {
            frame: self.frame_count,
        };
        let control = self
            .update_hook
            .as_mut()
            .map_or(AppControl::Continue, |hook| hook(&info));
        if let AppControl::Exit(code) = control {
            self.request_exit(code);
        }
    }

    fn render(&mut self) {
        let (Some(window), Some(scene)) = (self.window.as_mut(), self.scene.as_mut()) else {
            return;
        };
        window.make_current();
        scene.draw(window.framebuffer_size(), self.config.graphics.clear_color);
        window.swap_buffers();
        self.frame_count += 1;
    }
}

impl<P: Platform> Drop for Game<P> {
    fn drop(&mut self) {
        self.terminate();
    }
}
