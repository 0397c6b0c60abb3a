use std::cell::Cell;
use std::rc::Rc;

/// One of the two alternating playback buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferSlot {
    A,
    B,
}

impl BufferSlot {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// A non-looping media element that plays on its own clock.
pub trait VideoBuffer {
    /// Total length in seconds; `None` until metadata is known.
    fn duration(&self) -> Option<f64>;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    fn is_playing(&self) -> bool;
}

/// Load outcome reported by the host for one buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum VideoBufferEvent {
    /// Enough data to show a frame.
    Loaded(BufferSlot),
    Failed { slot: BufferSlot, reason: String },
}

/// Shared millisecond clock driving [`SimulatedVideo`] playback.
#[derive(Clone, Debug, Default)]
pub struct SimClock(Rc<Cell<f64>>);

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: f64) {
        self.0.set(now_ms);
    }

    pub fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Headless video whose position follows a [`SimClock`] while playing and stops at the end.
#[derive(Clone, Debug)]
pub struct SimulatedVideo {
    clock: SimClock,
    duration: Option<f64>,
    /// Position at the moment playback last started or was paused.
    anchor_time: f64,
    /// Clock value when playback last started; `None` while paused.
    playing_since_ms: Option<f64>,
}

impl SimulatedVideo {
    pub fn new(clock: SimClock, duration: Option<f64>) -> Self {
        Self {
            clock,
            duration,
            anchor_time: 0.0,
            playing_since_ms: None,
        }
    }

    fn clamp_to_end(&self, t: f64) -> f64 {
        match self.duration {
            Some(d) if d.is_finite() && d > 0.0 => t.clamp(0.0, d),
            _ => t.max(0.0),
        }
    }
}

impl VideoBuffer for SimulatedVideo {
    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn current_time(&self) -> f64 {
        let running = self
            .playing_since_ms
            .map_or(0.0, |since| (self.clock.now_ms() - since).max(0.0) / 1000.0);
        self.clamp_to_end(self.anchor_time + running)
    }

    fn play(&mut self) {
        if self.playing_since_ms.is_none() {
            self.playing_since_ms = Some(self.clock.now_ms());
        }
    }

    fn pause(&mut self) {
        self.anchor_time = self.current_time();
        self.playing_since_ms = None;
    }

    fn seek(&mut self, seconds: f64) {
        self.anchor_time = self.clamp_to_end(seconds);
        if self.playing_since_ms.is_some() {
            self.playing_since_ms = Some(self.clock.now_ms());
        }
    }

    fn is_playing(&self) -> bool {
        self.playing_since_ms.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/buffer.rs"]
mod tests;
