use crate::{
    animation::ease::Ease,
    foundation::math::{damp, finite_or},
    frame::{
        host::{FrameHandle, FrameHost},
        pending::{PendingFrame, Teardown},
    },
    scroll::state::{ScrollDirection, ScrollInput, ScrollState, progress_of},
};

/// Responsiveness of the smooth-scroll simulation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// Per-frame (60 Hz) interpolation factor. When set, takes precedence over `duration`.
    pub lerp: Option<f64>,
    /// Seconds a scroll takes to settle when `lerp` is unset.
    pub duration: f64,
    pub easing: Ease,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            lerp: Some(0.06),
            duration: 1.4,
            easing: Ease::OutExpo,
            smooth_wheel: true,
            smooth_touch: false,
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
        }
    }
}

/// Identifies one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BroadcasterPhase {
    Idle,
    Running,
    /// Frame scheduling is unavailable; inputs land immediately without smoothing.
    Degraded,
    TornDown,
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: f64,
    to: f64,
    elapsed: f64,
}

const SETTLE_EPSILON_PX: f64 = 0.1;

type Listener = Box<dyn FnMut(&ScrollState)>;

/// Owns the page's single smooth-scroll simulation and fans out snapshots.
pub struct ScrollBroadcaster {
    options: ScrollOptions,
    phase: BroadcasterPhase,
    animated: f64,
    target: f64,
    limit: f64,
    tween: Option<Tween>,
    last_time_ms: Option<f64>,
    direction: ScrollDirection,
    latest: ScrollState,
    frame: PendingFrame,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ScrollBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollBroadcaster")
            .field("phase", &self.phase)
            .field("latest", &self.latest)
            .field("target", &self.target)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ScrollBroadcaster {
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            options,
            phase: BroadcasterPhase::Idle,
            animated: 0.0,
            target: 0.0,
            limit: 0.0,
            tween: None,
            last_time_ms: None,
            direction: ScrollDirection::Forward,
            latest: ScrollState::at_rest(0.0, 0.0),
            frame: PendingFrame::default(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Start the frame loop. Falls back to raw scrolling when frames cannot be scheduled.
    #[tracing::instrument(skip(self, host))]
    pub fn init(&mut self, host: &mut dyn FrameHost) {
        if self.phase == BroadcasterPhase::Running {
            return;
        }
        if self.frame.schedule(host) {
            self.phase = BroadcasterPhase::Running;
            self.last_time_ms = None;
            tracing::debug!("smooth scroll running");
        } else {
            self.phase = BroadcasterPhase::Degraded;
            tracing::warn!("frame scheduling unavailable, using raw scroll");
        }
    }

    pub fn phase(&self) -> BroadcasterPhase {
        self.phase
    }

    pub fn options(&self) -> ScrollOptions {
        self.options
    }

    /// The most recently published snapshot.
    pub fn state(&self) -> ScrollState {
        self.latest
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ScrollState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() < before
    }

    /// Update the maximum scroll offset (content or viewport resize).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = finite_or(limit, 0.0).max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.animated = self.animated.clamp(0.0, self.limit);
        let (limit, animated) = (self.limit, self.animated);
        self.tween = self
            .tween
            .map(|t| Tween {
                from: t.from.clamp(0.0, limit),
                to: t.to.clamp(0.0, limit),
                ..t
            })
            .filter(|t| t.to != animated);
        self.latest.limit = self.limit;
        self.latest.position = self.latest.position.clamp(0.0, self.limit);
        self.latest.progress = progress_of(self.latest.position, self.limit);
    }

    pub fn input(&mut self, input: ScrollInput) {
        if self.phase == BroadcasterPhase::TornDown {
            return;
        }
        let (target, smooth) = match input {
            ScrollInput::Wheel { delta } => (
                self.target + finite_or(delta, 0.0) * self.options.wheel_multiplier,
                self.options.smooth_wheel,
            ),
            ScrollInput::Touch { delta } => (
                self.target + finite_or(delta, 0.0) * self.options.touch_multiplier,
                self.options.smooth_touch,
            ),
            ScrollInput::ScrollTo {
                position,
                immediate,
            } => (finite_or(position, self.target), !immediate),
            ScrollInput::Native { position } => (finite_or(position, self.target), false),
        };
        let target = target.clamp(0.0, self.limit);

        if self.phase == BroadcasterPhase::Degraded || !smooth {
            self.target = target;
            self.tween = None;
            self.set_direction(target - self.animated);
            self.animated = target;
            if self.phase == BroadcasterPhase::Degraded {
                self.publish(0.0);
            }
            return;
        }

        self.tween = Some(Tween {
            from: self.animated,
            to: target,
            elapsed: 0.0,
        });
        self.target = target;
    }

    /// Route a host frame callback. Returns `false` when the handle is not ours.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64, host: &mut dyn FrameHost) -> bool {
        if !self.frame.fired(handle) {
            return false;
        }
        self.advance(now_ms);
        if self.phase == BroadcasterPhase::Running && !self.frame.schedule(host) {
            self.phase = BroadcasterPhase::Degraded;
            tracing::warn!("frame scheduling lost, using raw scroll");
        }
        true
    }

    /// Step the physics to `now_ms` and publish the new snapshot to every listener.
    pub fn advance(&mut self, now_ms: f64) -> ScrollState {
        let dt = match self.last_time_ms {
            Some(last) if now_ms > last => (now_ms - last) / 1000.0,
            _ => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        let before = self.animated;
        self.step_physics(dt);
        let velocity = if dt > 0.0 {
            (self.animated - before) / dt
        } else {
            0.0
        };
        self.set_direction(self.animated - before);
        self.publish(velocity)
    }

    fn step_physics(&mut self, dt: f64) {
        let Some(mut tween) = self.tween else {
            return;
        };
        tween.elapsed += dt;

        match self.options.lerp {
            Some(lerp) if lerp > 0.0 => {
                self.animated = damp(self.animated, tween.to, lerp * 60.0, dt);
                if (tween.to - self.animated).abs() < SETTLE_EPSILON_PX {
                    self.animated = tween.to;
                }
            }
            _ => {
                let duration = self.options.duration.max(1e-3);
                let t = (tween.elapsed / duration).min(1.0);
                let eased = self.options.easing.apply(t);
                self.animated = tween.from + (tween.to - tween.from) * eased;
                if t >= 1.0 {
                    self.animated = tween.to;
                }
            }
        }

        if self.animated == tween.to {
            self.tween = None;
        } else {
            self.tween = Some(tween);
        }
    }

    fn set_direction(&mut self, delta: f64) {
        if delta > 0.0 {
            self.direction = ScrollDirection::Forward;
        } else if delta < 0.0 {
            self.direction = ScrollDirection::Backward;
        }
    }

    fn publish(&mut self, velocity: f64) -> ScrollState {
        let state = ScrollState {
            position: self.animated,
            velocity: finite_or(velocity, 0.0),
            progress: progress_of(self.animated, self.limit),
            direction: self.direction,
            limit: self.limit,
        };
        self.latest = state;
        for (_, listener) in &mut self.listeners {
            listener(&state);
        }
        state
    }
}

impl Teardown for ScrollBroadcaster {
    fn teardown(&mut self, host: &mut dyn FrameHost) {
        if self.phase == BroadcasterPhase::TornDown {
            return;
        }
        self.frame.cancel(host);
        self.listeners.clear();
        self.tween = None;
        self.phase = BroadcasterPhase::TornDown;
        tracing::debug!("scroll broadcaster torn down");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/broadcaster.rs"]
mod tests;
