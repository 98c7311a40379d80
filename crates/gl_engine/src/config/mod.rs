//! Game configuration
//!
//! Plain structs with defaults matching the classic triangle demo: a 640×480
//! resizable window, an OpenGL 4.5 core forward-compatible context, no vsync,
//! no multisampling and a cornflower blue background. Nothing is read from
//! disk; callers adjust values with the `with_*` builders before handing the
//! config to [`Game::new`](crate::game::Game::new).

use thiserror::Error;

/// Lowest context version the triangle pipeline runs on
///
/// The embedded shader stages declare `#version 450 core`.
pub const MIN_CONTEXT_VERSION: (u32, u32) = (4, 5);

/// Highest multisample count accepted
pub const MAX_MSAA_SAMPLES: u32 = 16;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Zero-sized window
    #[error("invalid window size {width}x{height}")]
    InvalidWindowSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Context version below the supported minimum
    #[error("unsupported OpenGL context version {major}.{minor}, need at least 4.5")]
    UnsupportedContextVersion {
        /// Requested major version
        major: u32,
        /// Requested minor version
        minor: u32,
    },

    /// Multisample count that is not 0 or a power of two up to 16
    #[error("invalid MSAA sample count {0}")]
    InvalidSampleCount(u32),

    /// Blank window title
    #[error("window title is empty")]
    EmptyTitle,
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,
    /// GL context settings
    pub context: ContextConfig,
    /// Presentation settings
    pub graphics: GraphicsConfig,
}

impl GameConfig {
    /// Replace the window settings
    #[must_use]
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Replace the context settings
    #[must_use]
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Replace the presentation settings
    #[must_use]
    pub fn with_graphics(mut self, graphics: GraphicsConfig) -> Self {
        self.graphics = graphics;
        self
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        self.context.validate()?;
        self.graphics.validate()
    }
}

/// Window settings
///
/// The window is always created hidden and shown once the first frame's
/// resources exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Initial client width in screen coordinates
    pub width: u32,
    /// Initial client height in screen coordinates
    pub height: u32,
    /// Whether the user can resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Triangle".to_string(),
            width: 640,
            height: 480,
            resizable: true,
        }
    }
}

impl WindowConfig {
    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial size
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set resizability
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Reject empty titles and zero sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// OpenGL context settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextConfig {
    /// Requested major version
    pub major: u32,
    /// Requested minor version
    pub minor: u32,
    /// Request the core profile
    pub core_profile: bool,
    /// Request a forward-compatible context
    pub forward_compatible: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 4,
            minor: 5,
            core_profile: true,
            forward_compatible: true,
        }
    }
}

impl ContextConfig {
    /// Set the requested version
    #[must_use]
    pub const fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.major = major;
        self.minor = minor;
        self
    }

    /// Reject versions below [`MIN_CONTEXT_VERSION`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.major, self.minor) < MIN_CONTEXT_VERSION {
            return Err(ConfigError::UnsupportedContextVersion {
                major: self.major,
                minor: self.minor,
            });
        }
        Ok(())
    }
}

/// Presentation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsConfig {
    /// Wait for vertical blank on swap
    pub vsync: bool,
    /// Multisample count, 0 disables multisampling
    pub msaa_samples: u32,
    /// Background color as linear RGBA
    pub clear_color: [f32; 4],
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            vsync: false,
            msaa_samples: 0,
            clear_color: CORNFLOWER_BLUE,
        }
    }
}

/// Default clear color (100, 149, 237)
pub const CORNFLOWER_BLUE: [f32; 4] = [100.0 / 255.0, 149.0 / 255.0, 237.0 / 255.0, 1.0];

impl GraphicsConfig {
    /// Enable or disable vsync
    #[must_use]
    pub const fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the multisample count
    #[must_use]
    pub const fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = samples;
        self
    }

    /// Set the background color
    #[must_use]
    pub const fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Reject sample counts other than 0 or a power of two up to 16
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let samples = self.msaa_samples;
        if samples != 0 && (!samples.is_power_of_two() || samples > MAX_MSAA_SAMPLES) {
            return Err(ConfigError::InvalidSampleCount(samples));
        }
        Ok(())
    }
}
