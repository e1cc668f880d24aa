/// Frame module - window seam and the per-frame loop

pub mod window_context;
pub mod frame_loop;

#[cfg(any(test, feature = "mock"))]
pub mod mock_window;

pub use window_context::*;
pub use frame_loop::*;

#[cfg(any(test, feature = "mock"))]
pub use mock_window::*;
