//! Seamless background loop from two non-looping buffers.
//!
//! Shortly before the active buffer runs out, the idle one restarts from zero and fades in over
//! the crossfade while the active one fades out. When the crossfade timer fires the outgoing
//! buffer is paused, rewound, and becomes the idle one.

use crate::{
    animation::ease::{Ease, REVEAL},
    foundation::math::clamp01,
    frame::{
        host::{FrameHandle, FrameHost, TimerHandle},
        pending::{PendingFrame, PendingTimer, Teardown},
    },
    video::buffer::{BufferSlot, VideoBuffer, VideoBufferEvent},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoLoopConfig {
    /// Relative path of the background video; `None` shows the static background only.
    pub source: Option<String>,
    pub crossfade_ms: f64,
    /// Extra lookahead on top of the crossfade, in seconds.
    pub margin_s: f64,
}

impl Default for VideoLoopConfig {
    fn default() -> Self {
        Self {
            source: None,
            crossfade_ms: 900.0,
            margin_s: 0.12,
        }
    }
}

impl VideoLoopConfig {
    /// Remaining playback (seconds) at which the next crossfade starts.
    pub fn lookahead_s(&self) -> f64 {
        self.crossfade_ms / 1000.0 + self.margin_s
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LoopPhase {
    Idle,
    Playing {
        active: BufferSlot,
    },
    Crossfading {
        outgoing: BufferSlot,
        incoming: BufferSlot,
        started_ms: f64,
    },
    /// Media failed; the static background treatment is shown instead.
    Fallback,
}

/// Opacities of both layers for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct VideoLayers {
    pub a: f64,
    pub b: f64,
    pub fallback: bool,
}

pub struct VideoLoopController {
    config: VideoLoopConfig,
    ease: Ease,
    phase: LoopPhase,
    buffers: [Box<dyn VideoBuffer>; 2],
    loaded: bool,
    frame: PendingFrame,
    swap: PendingTimer,
    crossfade_starts: Vec<f64>,
}

impl std::fmt::Debug for VideoLoopController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoLoopController")
            .field("phase", &self.phase)
            .field("loaded", &self.loaded)
            .field("crossfades", &self.crossfade_starts.len())
            .finish()
    }
}

impl VideoLoopController {
    pub fn new(config: VideoLoopConfig, a: Box<dyn VideoBuffer>, b: Box<dyn VideoBuffer>) -> Self {
        Self {
            config,
            ease: REVEAL,
            phase: LoopPhase::Idle,
            buffers: [a, b],
            loaded: false,
            frame: PendingFrame::default(),
            swap: PendingTimer::default(),
            crossfade_starts: Vec::new(),
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Host times (ms) at which each crossfade began.
    pub fn crossfade_starts(&self) -> &[f64] {
        &self.crossfade_starts
    }

    pub fn buffer(&self, slot: BufferSlot) -> &dyn VideoBuffer {
        self.buffers[slot.index()].as_ref()
    }

    /// Begin playback on buffer A and start the per-frame loop check.
    #[tracing::instrument(skip(self, host))]
    pub fn start(&mut self, host: &mut dyn FrameHost) {
        if self.phase != LoopPhase::Idle {
            return;
        }
        let [a, b] = &mut self.buffers;
        b.pause();
        b.seek(0.0);
        a.play();
        self.phase = LoopPhase::Playing {
            active: BufferSlot::A,
        };
        if !self.frame.schedule(host) {
            tracing::warn!("frame scheduling unavailable, video will not loop");
        }
    }

    pub fn on_buffer_event(&mut self, event: VideoBufferEvent, host: &mut dyn FrameHost) {
        match event {
            VideoBufferEvent::Loaded(_) => {
                if !matches!(self.phase, LoopPhase::Fallback) {
                    self.loaded = true;
                }
            }
            VideoBufferEvent::Failed { slot, reason } => {
                tracing::warn!(?slot, %reason, "background video failed, using static fallback");
                self.stop(host);
                self.loaded = false;
                self.phase = LoopPhase::Fallback;
            }
        }
    }

    /// Route a host frame callback. Returns `false` when the handle is not ours.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64, host: &mut dyn FrameHost) -> bool {
        if !self.frame.fired(handle) {
            return false;
        }
        self.check(now_ms, host);
        if matches!(
            self.phase,
            LoopPhase::Playing { .. } | LoopPhase::Crossfading { .. }
        ) {
            self.frame.schedule(host);
        }
        true
    }

    /// Route a host timer callback. Returns `false` when the handle is not ours.
    pub fn on_timer(&mut self, handle: TimerHandle, now_ms: f64) -> bool {
        if !self.swap.fired(handle) {
            return false;
        }
        if let LoopPhase::Crossfading {
            outgoing, incoming, ..
        } = self.phase
        {
            let out = &mut self.buffers[outgoing.index()];
            out.pause();
            out.seek(0.0);
            self.phase = LoopPhase::Playing { active: incoming };
            tracing::debug!(?incoming, now_ms, "crossfade finished");
        }
        true
    }

    /// Start a crossfade if the active buffer is about to run out.
    fn check(&mut self, now_ms: f64, host: &mut dyn FrameHost) {
        let LoopPhase::Playing { active } = self.phase else {
            return;
        };
        let current = &self.buffers[active.index()];
        let Some(duration) = current.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return;
        };
        let remaining = duration - current.current_time();
        if remaining > self.config.lookahead_s() {
            return;
        }

        let incoming = active.other();
        let next = &mut self.buffers[incoming.index()];
        next.seek(0.0);
        next.play();
        self.phase = LoopPhase::Crossfading {
            outgoing: active,
            incoming,
            started_ms: now_ms,
        };
        self.crossfade_starts.push(now_ms);
        if !self.swap.start(host, self.config.crossfade_ms) {
            tracing::warn!("timers unavailable, finishing crossfade immediately");
            let out = &mut self.buffers[active.index()];
            out.pause();
            out.seek(0.0);
            self.phase = LoopPhase::Playing { active: incoming };
        }
        tracing::debug!(?incoming, remaining, now_ms, "crossfade started");
    }

    pub fn layers(&self, now_ms: f64) -> VideoLayers {
        let visible = |slot: BufferSlot| match self.phase {
            _ if !self.loaded => 0.0,
            LoopPhase::Playing { active } => {
                if slot == active {
                    1.0
                } else {
                    0.0
                }
            }
            LoopPhase::Crossfading {
                incoming,
                started_ms,
                ..
            } => {
                let t = if self.config.crossfade_ms > 0.0 {
                    clamp01((now_ms - started_ms) / self.config.crossfade_ms)
                } else {
                    1.0
                };
                let e = self.ease.apply(t);
                if slot == incoming { e } else { 1.0 - e }
            }
            LoopPhase::Idle | LoopPhase::Fallback => 0.0,
        };
        VideoLayers {
            a: visible(BufferSlot::A),
            b: visible(BufferSlot::B),
            fallback: matches!(self.phase, LoopPhase::Fallback),
        }
    }

    fn stop(&mut self, host: &mut dyn FrameHost) {
        self.frame.cancel(host);
        self.swap.cancel(host);
        for b in &mut self.buffers {
            b.pause();
        }
    }
}

impl Teardown for VideoLoopController {
    fn teardown(&mut self, host: &mut dyn FrameHost) {
        self.stop(host);
        if !matches!(self.phase, LoopPhase::Fallback) {
            self.phase = LoopPhase::Idle;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/loop_controller.rs"]
mod tests;
