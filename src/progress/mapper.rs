use crate::{
    anchor::registry::Measure,
    animation::spring::{Spring, SpringConfig},
    foundation::{core::Viewport, math::inverse_lerp_clamped},
    progress::offset::ScrollOffset,
    scroll::state::ScrollState,
};

/// Normalized traversal of one section, always in `[0, 1]` and never NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct SectionProgress(f64);

impl SectionProgress {
    pub const START: Self = Self(0.0);
    pub const END: Self = Self(1.0);

    pub fn new(value: f64) -> Self {
        Self(crate::foundation::math::clamp01(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Index of a spring registered on a [`ProgressMapper`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpringId(usize);

/// Maps page scroll onto one section's traversal.
///
/// The element is re-measured every tick, so layout shifts and resizes are picked up without
/// invalidation. Springs added with [`ProgressMapper::add_spring`] follow the raw progress.
#[derive(Clone, Debug)]
pub struct ProgressMapper {
    offset: ScrollOffset,
    progress: SectionProgress,
    ready: bool,
    springs: Vec<Spring>,
}

impl ProgressMapper {
    pub fn new(offset: ScrollOffset) -> Self {
        Self {
            offset,
            progress: SectionProgress::START,
            ready: false,
            springs: Vec::new(),
        }
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn add_spring(&mut self, config: SpringConfig) -> SpringId {
        self.springs.push(Spring::new(config, self.progress.get()));
        SpringId(self.springs.len() - 1)
    }

    /// Raw section progress for the given snapshot, or `None` when the element is not laid out.
    pub fn measure(
        offset: ScrollOffset,
        element: &dyn Measure,
        scroll: &ScrollState,
        viewport: Viewport,
    ) -> Option<SectionProgress> {
        let rect = element.bounding_rect()?;
        let doc_top = rect.y0 + scroll.position;
        let (start, end) = offset.scroll_range(doc_top, rect.height(), viewport.height);
        Some(SectionProgress::new(inverse_lerp_clamped(
            start,
            end,
            scroll.position,
        )))
    }

    /// Re-measure and advance the springs by `dt` seconds.
    ///
    /// A missing measurement keeps the previous value; the springs still settle toward it.
    pub fn update(
        &mut self,
        element: &dyn Measure,
        scroll: &ScrollState,
        viewport: Viewport,
        dt: f64,
    ) -> SectionProgress {
        match Self::measure(self.offset, element, scroll, viewport) {
            Some(p) => {
                if !self.ready {
                    for s in &mut self.springs {
                        s.jump(p.get());
                    }
                }
                self.ready = true;
                self.progress = p;
            }
            None => tracing::trace!("section not measured yet, keeping progress"),
        }
        let target = self.progress.get();
        for s in &mut self.springs {
            s.follow(target, dt);
        }
        self.progress
    }

    pub fn progress(&self) -> SectionProgress {
        self.progress
    }

    /// `true` once the element has been measured at least once.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn spring(&self, id: SpringId) -> f64 {
        self.springs
            .get(id.0)
            .map_or(self.progress.get(), Spring::value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/mapper.rs"]
mod tests;
