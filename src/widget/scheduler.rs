use derive_more::{Display, From, Into};
use std::time::Duration;

/// Identifies one started animation. A token stops being honored as soon as
/// the widget starts a newer animation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into,
)]
#[display("frame-token-{_0}")]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Host hook for timed redraws.
///
/// Implementations arrange for `CheckBox::on_frame(token, now)` to be called
/// once `delay` has passed. Delivering a stale token is harmless; the widget
/// ignores it.
pub trait FrameScheduler {
    fn schedule_frame(&self, token: FrameToken, delay: Duration);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for std::rc::Rc<T> {
    fn schedule_frame(&self, token: FrameToken, delay: Duration) {
        (**self).schedule_frame(token, delay)
    }
}
