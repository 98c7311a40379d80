//! GLFW window with an OpenGL context

use std::ffi::c_void;
use std::rc::Rc;

use glfw::{Context, OpenGlProfileHint, SwapInterval, WindowHint, WindowMode};

use super::{Key, Platform, WindowBackend, WindowError, WindowResult};
use crate::config::GameConfig;
use crate::render::gl::{GlApi, GlowApi};

/// Symbol probed to confirm the loader resolves core entry points
const PROBE_SYMBOL: &str = "glCreateProgram";

/// Desktop platform backed by GLFW
///
/// GLFW is initialized per window and terminated when the last [`GlfwWindow`]
/// is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlfwPlatform;

impl GlfwPlatform {
    /// Create the platform
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for GlfwPlatform {
    type Window = GlfwWindow;

    fn create_window(&mut self, config: &GameConfig) -> WindowResult<GlfwWindow> {
        GlfwWindow::new(config)
    }
}

/// GLFW window owning its context and the GLFW instance
pub struct GlfwWindow {
    // Field order is drop order: the function table must go before the
    // window whose context it was loaded from, and GLFW itself goes last.
    gl: Rc<dyn GlApi>,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    window: glfw::PWindow,
    glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Initialize GLFW and open a hidden window with a current context
    pub fn new(config: &GameConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let context = &config.context;
        glfw.window_hint(WindowHint::ContextVersion(context.major, context.minor));
        if context.core_profile {
            glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        }
        glfw.window_hint(WindowHint::OpenGlForwardCompat(context.forward_compatible));
        glfw.window_hint(WindowHint::Resizable(config.window.resizable));
        glfw.window_hint(WindowHint::Visible(false));
        let samples = config.graphics.msaa_samples;
        glfw.window_hint(WindowHint::Samples((samples > 0).then_some(samples)));

        let (mut window, events) = glfw
            .create_window(
                config.window.width,
                config.window.height,
                &config.window.title,
                WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        let interval = if config.graphics.vsync {
            SwapInterval::Sync(1)
        } else {
            SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        if (window.get_proc_address(PROBE_SYMBOL) as *const c_void).is_null() {
            return Err(WindowError::LoaderFailed(format!("{PROBE_SYMBOL} did not resolve")));
        }

        // SAFETY: the context was made current above and is owned by `window`,
        // which outlives `gl` by field order.
        #[allow(unsafe_code)]
        let gl = unsafe { GlowApi::from_loader(|symbol| window.get_proc_address(symbol) as *const _) };

        log::info!(
            "Created {}x{} window \"{}\"",
            config.window.width,
            config.window.height,
            config.window.title
        );

        Ok(Self {
            gl: Rc::new(gl),
            events,
            window,
            glfw,
        })
    }
}

impl WindowBackend for GlfwWindow {
    fn gl(&self) -> Rc<dyn GlApi> {
        Rc::clone(&self.gl)
    }

    fn make_current(&mut self) {
        self.window.make_current();
    }

    fn show(&mut self) {
        self.window.show();
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if let glfw::WindowEvent::FramebufferSize(width, height) = event {
                log::debug!("Framebuffer resized to {width}x{height}");
            }
        }
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        log::debug!("Destroying window");
    }
}
