/// WindowContext trait - the windowing seam the frame loop drives

use crate::error::Result;

/// A window owning a current GPU context
///
/// Implementations create the window and make its context current before the
/// first call; the frame loop assumes that and never checks it.
pub trait WindowContext {
    /// Process pending window events without blocking
    fn poll_events(&mut self);

    /// Whether a close was requested (close button, Escape, ...)
    fn should_close(&self) -> bool;

    /// Present the back buffer
    fn swap_buffers(&mut self) -> Result<()>;

    /// Replace the window title
    fn set_title(&mut self, title: &str);

    /// Framebuffer size in pixels
    fn size(&self) -> (u32, u32);
}
