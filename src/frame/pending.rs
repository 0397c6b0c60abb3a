use crate::frame::host::{FrameHandle, FrameHost, TimerHandle};

/// Slot for at most one outstanding frame request.
///
/// `cancel` takes the handle out of the slot, so cancelling twice reaches the host once.
#[derive(Debug, Default)]
pub struct PendingFrame(Option<FrameHandle>);

impl PendingFrame {
    /// Request a frame unless one is already pending. Returns `false` when scheduling is
    /// unavailable.
    pub fn schedule(&mut self, host: &mut dyn FrameHost) -> bool {
        if self.0.is_none() {
            self.0 = host.request_frame();
        }
        self.0.is_some()
    }

    /// Consume the slot if `handle` is the one it holds.
    pub fn fired(&mut self, handle: FrameHandle) -> bool {
        if self.0 == Some(handle) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, host: &mut dyn FrameHost) {
        if let Some(handle) = self.0.take() {
            host.cancel_frame(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}

/// Slot for at most one outstanding timeout.
#[derive(Debug, Default)]
pub struct PendingTimer(Option<TimerHandle>);

impl PendingTimer {
    /// Start the timer, replacing (and clearing) any previous one.
    pub fn start(&mut self, host: &mut dyn FrameHost, delay_ms: f64) -> bool {
        self.cancel(host);
        self.0 = host.set_timeout(delay_ms);
        self.0.is_some()
    }

    pub fn fired(&mut self, handle: TimerHandle) -> bool {
        if self.0 == Some(handle) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, host: &mut dyn FrameHost) {
        if let Some(handle) = self.0.take() {
            host.clear_timeout(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}

/// Components that own per-frame loops or timers.
pub trait Teardown {
    /// Cancel every pending frame callback and timer. Must be safe to call repeatedly.
    fn teardown(&mut self, host: &mut dyn FrameHost);
}

#[cfg(test)]
#[path = "../../tests/unit/frame/pending.rs"]
mod tests;
