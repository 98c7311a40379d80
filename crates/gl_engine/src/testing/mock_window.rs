//! Scripted platform and window

use std::cell::RefCell;
use std::rc::Rc;

use super::MockGl;
use crate::config::GameConfig;
use crate::render::gl::GlApi;
use crate::window::{Key, Platform, WindowBackend, WindowError, WindowResult};

/// Guard against loops that never see an exit request
const POLL_LIMIT: u32 = 10_000;

#[derive(Debug, Default)]
pub(crate) struct MockWindowState {
    pub fail_init: bool,
    pub fail_window: bool,
    pub close_after_polls: Option<u32>,
    pub escape_after_polls: Option<u32>,
    pub framebuffer: (i32, i32),

    pub windows_created: u32,
    pub windows_destroyed: u32,
    pub last_config: Option<GameConfig>,
    pub visible: bool,
    pub shows: u32,
    pub polls: u32,
    pub swaps: u32,
    pub make_current_calls: u32,
    pub should_close: bool,
}

/// Platform double whose windows share one [`MockGl`]
///
/// Clones share state, so a test keeps one clone for inspection and hands
/// the other to the game.
#[derive(Debug, Clone)]
pub(crate) struct MockPlatform {
    state: Rc<RefCell<MockWindowState>>,
    gl: Rc<MockGl>,
}

impl MockPlatform {
    pub fn new() -> Self {
        let state = MockWindowState {
            framebuffer: (640, 480),
            ..MockWindowState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            gl: Rc::new(MockGl::new()),
        }
    }

    pub fn gl(&self) -> Rc<MockGl> {
        Rc::clone(&self.gl)
    }

    /// Read or script the shared window state
    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockWindowState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    /// Close button pressed during the `n`th poll
    pub fn close_after_polls(&self, n: u32) {
        self.with_state(|s| s.close_after_polls = Some(n));
    }

    /// Escape held from the `n`th poll on
    pub fn escape_after_polls(&self, n: u32) {
        self.with_state(|s| s.escape_after_polls = Some(n));
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;

    fn create_window(&mut self, config: &GameConfig) -> WindowResult<MockWindow> {
        let mut state = self.state.borrow_mut();
        if state.fail_init {
            return Err(WindowError::InitializationFailed("no display".to_string()));
        }
        if state.fail_window {
            return Err(WindowError::CreationFailed);
        }
        state.windows_created += 1;
        state.last_config = Some(config.clone());
        state.visible = false;
        state.should_close = false;
        Ok(MockWindow {
            state: Rc::clone(&self.state),
            gl: Rc::clone(&self.gl),
        })
    }
}

#[derive(Debug)]
pub(crate) struct MockWindow {
    state: Rc<RefCell<MockWindowState>>,
    gl: Rc<MockGl>,
}

impl WindowBackend for MockWindow {
    fn gl(&self) -> Rc<dyn GlApi> {
        self.gl.clone()
    }

    fn make_current(&mut self) {
        self.state.borrow_mut().make_current_calls += 1;
    }

    fn show(&mut self) {
        let mut state = self.state.borrow_mut();
        state.visible = true;
        state.shows += 1;
    }

    fn poll_events(&mut self) {
        let mut state = self.state.borrow_mut();
        state.polls += 1;
        assert!(state.polls <= POLL_LIMIT, "mock window polled {POLL_LIMIT} times without exiting");
        if state.close_after_polls == Some(state.polls) {
            state.should_close = true;
        }
    }

    fn should_close(&self) -> bool {
        self.state.borrow().should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.state.borrow_mut().should_close = should_close;
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        let state = self.state.borrow();
        key == Key::Escape && state.escape_after_polls.is_some_and(|n| state.polls >= n)
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.state.borrow().framebuffer
    }

    fn swap_buffers(&mut self) {
        self.state.borrow_mut().swaps += 1;
    }
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.windows_destroyed += 1;
        state.visible = false;
    }
}
