/// Scripted WindowContext for tests (no window system required)

use crate::error::{Error, Result};
use crate::frame::WindowContext;

/// Window that requests close after a fixed number of polls
#[derive(Debug, Clone, Default)]
pub struct MockWindow {
    size: (u32, u32),
    close_after_polls: Option<u32>,
    close_requested: bool,
    fail_swaps: bool,
    polls: u32,
    swaps: u32,
    titles: Vec<String>,
}

impl MockWindow {
    /// Window of the given framebuffer size that never closes by itself
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Request close once `polls` event polls have happened
    pub fn close_after(mut self, polls: u32) -> Self {
        self.close_after_polls = Some(polls);
        self
    }

    /// Request close immediately
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Simulate a framebuffer resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Make every `swap_buffers` fail
    pub fn set_fail_swaps(&mut self, fail: bool) {
        self.fail_swaps = fail;
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Titles set so far, oldest first
    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl WindowContext for MockWindow {
    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.close_after_polls.is_some_and(|n| self.polls >= n)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        if self.fail_swaps {
            return Err(Error::BackendError("mock: swap failed".to_string()));
        }
        self.swaps += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
