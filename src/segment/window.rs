//! Segment windows: how a single shared progress value is divided among gallery items.
//!
//! Item `i` of `N` owns `[i/N, (i+1)/N)`. Neighbouring windows cross-fade over `overlap` at
//! each boundary: the outgoing item ramps down over `[end − overlap, end]` while the incoming
//! one ramps up over the same span, so the two target opacities always sum to one there. The
//! first item has nothing to fade in from and the last has nothing to fade out to, so their outer
//! edges hold.

use crate::{
    animation::ramp::Ramp,
    foundation::{
        error::{WeaveError, WeaveResult},
        math::clamp01,
    },
};

/// Shared window constants for every layer that splits gallery progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SegmentLayout {
    count: usize,
    overlap: f64,
}

impl SegmentLayout {
    pub const DEFAULT_OVERLAP: f64 = 0.05;

    /// `overlap` must lie in `(0, 0.5]`. With many items it is further limited to one window
    /// width, so no more than two items are ever non-zero.
    pub fn new(count: usize, overlap: f64) -> WeaveResult<Self> {
        if !(overlap > 0.0 && overlap <= 0.5) {
            return Err(WeaveError::validation(format!(
                "segment overlap must lie in (0, 0.5], got {overlap}"
            )));
        }
        let overlap = if count > 0 {
            overlap.min(1.0 / count as f64)
        } else {
            overlap
        };
        Ok(Self { count, overlap })
    }

    pub fn with_default_overlap(count: usize) -> Self {
        let overlap = if count > 0 {
            Self::DEFAULT_OVERLAP.min(1.0 / count as f64)
        } else {
            Self::DEFAULT_OVERLAP
        };
        Self { count, overlap }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Effective overlap after clamping to the window width.
    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    pub fn window(&self, index: usize) -> Option<SegmentWindow> {
        (index < self.count).then(|| {
            let n = self.count as f64;
            SegmentWindow {
                index,
                count: self.count,
                start: index as f64 / n,
                end: (index + 1) as f64 / n,
                overlap: self.overlap,
            }
        })
    }

    pub fn windows(&self) -> impl Iterator<Item = SegmentWindow> + '_ {
        (0..self.count).filter_map(|i| self.window(i))
    }

    /// Index of the window containing `p` (the last window includes `1.0`).
    pub fn active_index(&self, progress: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let idx = (clamp01(progress) * self.count as f64).floor() as usize;
        Some(idx.min(self.count - 1))
    }

    /// Target opacity of every item at `p`.
    pub fn target_opacities(&self, progress: f64) -> Vec<f64> {
        self.windows().map(|w| w.target_opacity(progress)).collect()
    }
}

/// Values a window-derived channel takes before, inside and after the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeValues {
    pub before: f64,
    pub inside: f64,
    pub after: f64,
}

impl EdgeValues {
    pub const fn new(before: f64, inside: f64, after: f64) -> Self {
        Self {
            before,
            inside,
            after,
        }
    }

    /// Same value on both outer sides.
    pub const fn symmetric(outside: f64, inside: f64) -> Self {
        Self::new(outside, inside, outside)
    }
}

/// One item's share of the progress range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SegmentWindow {
    pub index: usize,
    pub count: usize,
    pub start: f64,
    pub end: f64,
    pub overlap: f64,
}

impl SegmentWindow {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Piecewise-linear channel following this window's entry/hold/exit shape.
    pub fn ramp(&self, values: EdgeValues) -> Ramp {
        let mut stops = Vec::with_capacity(4);
        if self.is_first() {
            stops.push((self.start, values.inside));
        } else {
            stops.push((self.start - self.overlap, values.before));
            stops.push((self.start, values.inside));
        }
        if self.is_last() {
            stops.push((self.end, values.inside));
        } else {
            stops.push((self.end - self.overlap, values.inside));
            stops.push((self.end, values.after));
        }
        Ramp::from_ordered(stops)
    }

    pub fn target_opacity(&self, progress: f64) -> f64 {
        clamp01(self.ramp(EdgeValues::symmetric(0.0, 1.0)).sample(clamp01(progress)))
    }

    /// Progress through this window, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        let span = self.end - self.start;
        if !(span > 0.0) {
            return 0.0;
        }
        clamp01((clamp01(progress) - self.start) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/window.rs"]
mod tests;
