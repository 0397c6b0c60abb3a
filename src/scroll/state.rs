/// Direction of the most recent scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

impl ScrollDirection {
    /// `+1.0` for forward (down the page), `-1.0` for backward.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Immutable snapshot of the page scroll, produced once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Smoothed scroll offset in CSS pixels.
    pub position: f64,
    /// Signed velocity in CSS pixels per second.
    pub velocity: f64,
    /// `position / limit`; `1.0` when the page cannot scroll.
    pub progress: f64,
    pub direction: ScrollDirection,
    /// Maximum scroll offset.
    pub limit: f64,
}

impl ScrollState {
    pub fn at_rest(position: f64, limit: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            progress: progress_of(position, limit),
            direction: ScrollDirection::Forward,
            limit,
        }
    }
}

pub(crate) fn progress_of(position: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        crate::foundation::math::clamp01(position / limit)
    } else {
        1.0
    }
}

/// Raw input fed to the broadcaster.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollInput {
    /// Wheel delta in CSS pixels (positive scrolls down).
    Wheel { delta: f64 },
    /// Touch drag delta in CSS pixels (positive scrolls down).
    Touch { delta: f64 },
    /// Programmatic scroll.
    ScrollTo { position: f64, immediate: bool },
    /// Position reported by the native scroller (keyboard, scrollbar drag).
    Native { position: f64 },
}
