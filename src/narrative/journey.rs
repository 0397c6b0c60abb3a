use crate::foundation::{core::Rect, math::clamp01};

/// Progress bar across the whole item run, measured from the first and last item placeholders.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct JourneyBar {
    /// Scroll offset where the bar starts filling.
    pub start: f64,
    /// Scroll offset where the bar is full.
    pub end: f64,
    pub progress: f64,
    pub visible: bool,
}

impl JourneyBar {
    /// `first` and `last` are the live (viewport-relative) rects of the first and last items.
    pub fn measure(first: Rect, last: Rect, scroll: f64, viewport_height: f64) -> Self {
        let vh = viewport_height;
        let start = first.y0 + scroll - vh * 0.78;
        let end = last.y1 + scroll - vh * 0.28;
        let progress = clamp01((scroll - start) / (end - start).max(1.0));
        let visible = scroll > start - vh * 0.12 && scroll < end + vh * 0.1;
        Self {
            start,
            end,
            progress,
            visible,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/journey.rs"]
mod tests;
