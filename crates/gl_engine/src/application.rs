//! Per-frame extension point
//!
//! The loop itself only polls input and draws the triangle. Callers that
//! want to act once per frame install an [`UpdateHook`] with
//! [`Game::set_update_hook`](crate::game::Game::set_update_hook); it runs at
//! the end of every update phase and decides whether the game keeps going.

/// Decision returned by an update hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppControl {
    /// Keep running
    #[default]
    Continue,
    /// Request exit with the given process exit code
    Exit(i32),
}

/// What the hook sees about the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Number of frames completed before this one in the current run
    pub frame: u64,
}

/// Callback run once per update phase
pub type UpdateHook = Box<dyn FnMut(&FrameInfo) -> AppControl>;
