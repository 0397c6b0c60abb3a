/// Handle of one requested display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct FrameHandle(pub u64);

/// Handle of one pending timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TimerHandle(pub u64);

/// Cooperative scheduling surface provided by the environment.
///
/// All engine state changes happen inside callbacks the host delivers as [`HostEvent`]s. Nothing
/// blocks: requests return immediately and completion is observed later.
pub trait FrameHost {
    /// Ask for one callback on the next display refresh.
    ///
    /// Returns `None` when the environment cannot schedule frames at all.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for one callback after `delay_ms`. `None` when timers are unavailable.
    fn set_timeout(&mut self, delay_ms: f64) -> Option<TimerHandle>;

    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Current host time in milliseconds (same clock as frame timestamps).
    fn now_ms(&self) -> f64;
}

/// A callback delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum HostEvent {
    Frame { handle: FrameHandle, now_ms: f64 },
    Timer { handle: TimerHandle, now_ms: f64 },
}

/// Deterministic in-process host used by the simulator and tests.
///
/// `advance_to` fires due timers in deadline order, then every frame requested before the call.
/// Requests made while those events are handled wait for the next advance, like
/// `requestAnimationFrame` inside a frame callback.
#[derive(Debug)]
pub struct ManualHost {
    now_ms: f64,
    next_id: u64,
    frames_available: bool,
    frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, f64)>,
    frame_cancels: u64,
    timer_clears: u64,
    stale_cancels: u64,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            frames_available: true,
            frames: Vec::new(),
            timers: Vec::new(),
            frame_cancels: 0,
            timer_clears: 0,
            stale_cancels: 0,
        }
    }

    /// A host whose frame scheduling is unavailable (timers still work).
    pub fn without_frames() -> Self {
        Self {
            frames_available: false,
            ..Self::new()
        }
    }

    /// Move the clock forward and collect the callbacks that became due.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<HostEvent> {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let now = self.now_ms;
        let mut out = Vec::new();

        let mut due: Vec<(TimerHandle, f64)> = Vec::new();
        self.timers.retain(|&(handle, at)| {
            if at <= now {
                due.push((handle, at));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        out.extend(
            due.into_iter()
                .map(|(handle, at)| HostEvent::Timer { handle, now_ms: at }),
        );

        out.extend(self.frames.drain(..).map(|handle| HostEvent::Frame {
            handle,
            now_ms: now,
        }));
        out
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of successful `cancel_frame` calls.
    pub fn frame_cancels(&self) -> u64 {
        self.frame_cancels
    }

    /// Number of successful `clear_timeout` calls.
    pub fn timer_clears(&self) -> u64 {
        self.timer_clears
    }

    /// Cancels that named a handle which was no longer pending (double cancels).
    pub fn stale_cancels(&self) -> u64 {
        self.stale_cancels
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if !self.frames_available {
            return None;
        }
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.frames.len();
        self.frames.retain(|h| *h != handle);
        if self.frames.len() < before {
            self.frame_cancels += 1;
        } else {
            self.stale_cancels += 1;
        }
    }

    fn set_timeout(&mut self, delay_ms: f64) -> Option<TimerHandle> {
        let handle = TimerHandle(self.next_id());
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        self.timers.push((handle, self.now_ms + delay));
        Some(handle)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let before = self.timers.len();
        self.timers.retain(|(h, _)| *h != handle);
        if self.timers.len() < before {
            self.timer_clears += 1;
        } else {
            self.stale_cancels += 1;
        }
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/host.rs"]
mod tests;
