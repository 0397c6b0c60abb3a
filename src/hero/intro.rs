use crate::frame::{
    host::{FrameHost, TimerHandle},
    pending::{PendingTimer, Teardown},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntroTiming {
    pub hold_ms: f64,
    pub reduced_hold_ms: f64,
    pub intro_ms: f64,
    pub reduced_intro_ms: f64,
    pub headline_interval_ms: f64,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            hold_ms: 120.0,
            reduced_hold_ms: 40.0,
            intro_ms: 4000.0,
            reduced_intro_ms: 520.0,
            headline_interval_ms: 5000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    /// Waiting for the ready gate.
    #[default]
    Waiting,
    Holding,
    Revealing,
    Complete,
}

/// Hero reveal sequence and headline rotation, all on host timers.
#[derive(Debug)]
pub struct HeroIntro {
    timing: IntroTiming,
    phase: IntroPhase,
    headlines: usize,
    headline: usize,
    start: PendingTimer,
    complete: PendingTimer,
    rotate: PendingTimer,
}

impl HeroIntro {
    pub fn new(timing: IntroTiming, headlines: usize) -> Self {
        Self {
            timing,
            phase: IntroPhase::Waiting,
            headlines,
            headline: 0,
            start: PendingTimer::default(),
            complete: PendingTimer::default(),
            rotate: PendingTimer::default(),
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn headline(&self) -> usize {
        self.headline
    }

    pub fn started(&self) -> bool {
        matches!(self.phase, IntroPhase::Revealing | IntroPhase::Complete)
    }

    /// Arm the hold and reveal timers. Only the first call after construction has an effect.
    pub fn begin(&mut self, host: &mut dyn FrameHost, reduced_motion: bool) {
        if self.phase != IntroPhase::Waiting {
            return;
        }
        let (hold, intro) = if reduced_motion {
            (self.timing.reduced_hold_ms, self.timing.reduced_intro_ms)
        } else {
            (self.timing.hold_ms, self.timing.intro_ms)
        };
        let armed = self.start.start(host, hold) && self.complete.start(host, hold + intro);
        if armed {
            self.phase = IntroPhase::Holding;
        } else {
            tracing::warn!("timers unavailable, skipping hero intro");
            self.cancel_all(host);
            self.phase = IntroPhase::Complete;
        }
    }

    /// Route a host timer callback. Returns `false` when the handle is not ours.
    pub fn on_timer(&mut self, handle: TimerHandle, host: &mut dyn FrameHost) -> bool {
        if self.start.fired(handle) {
            self.phase = IntroPhase::Revealing;
            tracing::debug!("hero intro started");
        } else if self.complete.fired(handle) {
            self.phase = IntroPhase::Complete;
            tracing::debug!("hero intro completed");
            self.schedule_rotation(host);
        } else if self.rotate.fired(handle) {
            self.headline = (self.headline + 1) % self.headlines.max(1);
            self.schedule_rotation(host);
        } else {
            return false;
        }
        true
    }

    fn schedule_rotation(&mut self, host: &mut dyn FrameHost) {
        if self.headlines > 1 {
            self.rotate.start(host, self.timing.headline_interval_ms);
        }
    }

    fn cancel_all(&mut self, host: &mut dyn FrameHost) {
        self.start.cancel(host);
        self.complete.cancel(host);
        self.rotate.cancel(host);
    }
}

impl Teardown for HeroIntro {
    fn teardown(&mut self, host: &mut dyn FrameHost) {
        self.cancel_all(host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/intro.rs"]
mod tests;
