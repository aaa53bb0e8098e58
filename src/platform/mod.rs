//! Platform layer
//!
//! Input polling and frame timing. The window/event loop itself lives with the
//! embedding application; it feeds events into [`InputState`] and calls
//! [`FrameClock::tick`] once per frame.

pub mod input;
pub mod time;

pub use input::{InputState, Key, MouseButton};
pub use time::{FrameClock, MAX_FRAME_DT};
