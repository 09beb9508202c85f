//! Seams between the animator and the page it runs on.

use crate::error::Result;

/// On-screen horizontal extent of a bound element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub left: f64,
    pub width: f64,
}

/// The element whose text is animated.
pub trait Surface {
    /// Currently displayed text.
    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    /// Toggles the "currently animating" styling hook.
    fn set_animating(&self, animating: bool);

    fn layout_rect(&self) -> Option<LayoutRect>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Clock plus frame and timer scheduling.
///
/// A requested frame must eventually be delivered back through
/// `RippleAnimator::on_frame`, and a timeout through
/// `RippleAnimator::on_timer` with the token it was scheduled with, unless it
/// was cancelled first.
pub trait Scheduler {
    /// Monotonic time in milliseconds.
    fn now(&self) -> f64;

    fn request_frame(&self) -> Result<FrameHandle>;

    fn cancel_frame(&self, handle: FrameHandle);

    fn set_timeout(&self, delay_ms: f64, token: u32) -> Result<TimerHandle>;

    fn clear_timeout(&self, handle: TimerHandle);
}
