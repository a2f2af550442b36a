//! Numeric tweening for the metrics bar.
//!
//! An [`AnimationState`] moves a displayed number from the value shown when
//! the target last changed towards that target, following an ease-out cubic
//! curve. [`FrameLoop`] drives one such animation from a [`FrameScheduler`],
//! keeping at most one frame booked at a time.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Ease-out cubic: fast start, decelerating into `1.0`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Result of sampling an animation at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Still interpolating; the value to display this frame.
    Running(f64),
    /// Reached the target; no further frames are needed.
    Finished(f64),
}

impl AnimationStep {
    pub fn value(self) -> f64 {
        match self {
            AnimationStep::Running(v) | AnimationStep::Finished(v) => v,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, AnimationStep::Finished(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub start_value: f64,
    pub target_value: f64,
    /// Timestamp in milliseconds, same clock as `performance.now()`.
    pub start_time: f64,
    pub current_value: f64,
}

impl AnimationState {
    pub fn new(start_value: f64, target_value: f64, start_time: f64) -> Self {
        Self {
            start_value,
            target_value,
            start_time,
            current_value: start_value,
        }
    }

    /// A finished animation resting on `value`.
    pub fn settled(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    /// Start a new animation towards `target_value` from whatever is on
    /// screen right now, so a mid-flight change never jumps.
    pub fn retarget(&self, target_value: f64, now: f64) -> Self {
        Self::new(self.current_value, target_value, now)
    }

    /// Linear progress in `[0, 1]`. Non-positive durations are complete
    /// immediately, as is an animation whose start already equals its target.
    pub fn progress(&self, now: f64, duration_ms: f64) -> f64 {
        if !(duration_ms > 0.0) || self.start_value == self.target_value {
            return 1.0;
        }
        ((now - self.start_time) / duration_ms).clamp(0.0, 1.0)
    }

    /// Sample the animation at `now` and record the displayed value.
    pub fn advance(&mut self, now: f64, duration_ms: f64) -> AnimationStep {
        let progress = self.progress(now, duration_ms);
        if progress >= 1.0 {
            self.current_value = self.target_value;
            return AnimationStep::Finished(self.target_value);
        }

        let eased = ease_out_cubic(progress);
        self.current_value = self.start_value + (self.target_value - self.start_value) * eased;
        AnimationStep::Running(self.current_value)
    }

    pub fn is_settled(&self) -> bool {
        self.current_value == self.target_value
    }
}

/// Books a callback to run before the next repaint.
///
/// Dropping the returned handle must deregister the callback if it has not
/// run yet.
pub trait FrameScheduler {
    type Handle;

    /// Returns `None` when no frame could be booked.
    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> Option<Self::Handle>;
}

struct FrameLoopInner<S: FrameScheduler> {
    scheduler: S,
    state: RefCell<AnimationState>,
    duration_ms: Cell<f64>,
    pending: RefCell<Option<S::Handle>>,
    on_frame: Box<dyn Fn(f64)>,
}

/// One animated value driven frame by frame.
///
/// Booked callbacks only hold a weak reference back to the loop, so dropping
/// the loop drops its pending handle and nothing fires afterwards.
pub struct FrameLoop<S: FrameScheduler + 'static> {
    inner: Rc<FrameLoopInner<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn new<F>(scheduler: S, initial_value: f64, on_frame: F) -> Self
    where
        F: Fn(f64) + 'static,
    {
        Self {
            inner: Rc::new(FrameLoopInner {
                scheduler,
                state: RefCell::new(AnimationState::settled(initial_value)),
                duration_ms: Cell::new(0.0),
                pending: RefCell::new(None),
                on_frame: Box::new(on_frame),
            }),
        }
    }

    /// Cancel any frame in flight and animate from the displayed value to
    /// `target`. The first sample is taken immediately at `now`.
    pub fn retarget(&self, target: f64, duration_ms: f64, now: f64) {
        self.cancel();
        let next = self.inner.state.borrow().retarget(target, now);
        *self.inner.state.borrow_mut() = next;
        self.inner.duration_ms.set(duration_ms);
        Self::step(&self.inner, now);
    }

    pub fn cancel(&self) {
        self.inner.pending.borrow_mut().take();
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    pub fn current_value(&self) -> f64 {
        self.inner.state.borrow().current_value
    }

    fn step(inner: &Rc<FrameLoopInner<S>>, now: f64) {
        let step = inner.state.borrow_mut().advance(now, inner.duration_ms.get());
        (inner.on_frame)(step.value());
        if step.is_finished() {
            inner.pending.borrow_mut().take();
            return;
        }

        let weak: Weak<FrameLoopInner<S>> = Rc::downgrade(inner);
        let next = inner.scheduler.request(Box::new(move |timestamp| {
            if let Some(inner) = weak.upgrade() {
                Self::step(&inner, timestamp);
            }
        }));
        // Replacing the slot drops, and so cancels, the previous handle.
        *inner.pending.borrow_mut() = next;
    }
}
