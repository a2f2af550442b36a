//! Browser clock, document access and the animation-frame scheduler.

use crate::animation::FrameScheduler;
use gloo_render::AnimationFrame;

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// `requestAnimationFrame` as a [`FrameScheduler`]. Dropping the handle
/// cancels the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFrames;

impl FrameScheduler for BrowserFrames {
    type Handle = AnimationFrame;

    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> Option<AnimationFrame> {
        // gloo-render panics without a window.
        web_sys::window()?;
        Some(gloo_render::request_animation_frame(callback))
    }
}
