//! Caption layer: per-item style channels, section header, journey bar and the stacked-card
//! presentation. The layer owns the anchor registry the GPU compositor reads from.

pub mod header;
pub mod item;
pub mod journey;
pub mod stacked;

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::{
    anchor::registry::{AnchorRegistry, Measure},
    foundation::core::Viewport,
    gallery::item::{Gallery, ItemKey},
    narrative::{
        header::{HeaderStyle, SectionHeader},
        item::{ItemChannels, ItemStyle},
        journey::JourneyBar,
        stacked::StackedDeck,
    },
    presentation::PresentationMode,
    segment::window::SegmentLayout,
};

/// Per-frame input of the caption layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NarrativeFrame {
    /// Gallery section progress.
    pub progress: f64,
    /// Smoothed scroll position.
    pub scroll: f64,
    pub viewport: Viewport,
    pub dt: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NarrativeReport {
    pub mode: PresentationMode,
    pub header: HeaderStyle,
    /// `None` in stacked mode or before the first and last items are mounted.
    pub journey: Option<JourneyBar>,
    pub items: Vec<ItemStyle>,
}

#[derive(Debug)]
pub struct NarrativeLayer {
    mode: PresentationMode,
    first: Option<ItemKey>,
    last: Option<ItemKey>,
    deck: StackedDeck,
    header: SectionHeader,
    items: Vec<ItemChannels>,
    anchors: AnchorRegistry,
    /// Items whose GPU plane will never draw; their fallback image shows in every mode.
    uncovered: BTreeSet<ItemKey>,
}

impl NarrativeLayer {
    pub fn new(gallery: &Gallery, layout: SegmentLayout, mode: PresentationMode) -> Self {
        let items = gallery
            .items()
            .iter()
            .zip(layout.windows())
            .map(|(item, window)| ItemChannels::new(item, window, 0.0))
            .collect();
        Self {
            mode,
            first: gallery.items().first().map(|i| i.key.clone()),
            last: gallery.items().last().map(|i| i.key.clone()),
            deck: StackedDeck::new(gallery.len()),
            header: SectionHeader::new(0.0),
            items,
            anchors: AnchorRegistry::new(),
            uncovered: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PresentationMode) {
        if mode != self.mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "presentation mode changed");
            self.mode = mode;
        }
    }

    /// Read-only view for the compositor.
    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    /// Register the placeholder element rendered for `key`.
    pub fn mount(&mut self, key: ItemKey, anchor: &Rc<dyn Measure>) {
        if !self.items.iter().any(|i| i.key() == &key) {
            tracing::debug!(%key, "ignoring anchor for unknown item");
            return;
        }
        tracing::debug!(%key, "anchor mounted");
        self.anchors.prune();
        self.anchors.register(key, anchor);
    }

    /// Remove `anchor` if it is still the one registered for `key`.
    pub fn unmount(&mut self, key: &ItemKey, anchor: &Rc<dyn Measure>) -> bool {
        let removed = self.anchors.unregister(key, anchor);
        if removed {
            tracing::debug!(%key, "anchor unmounted");
        }
        removed
    }

    /// Show the fallback image for `key` because its plane cannot render.
    pub fn uncover(&mut self, key: &ItemKey) {
        if self.items.iter().any(|i| i.key() == key) && self.uncovered.insert(key.clone()) {
            tracing::debug!(%key, "fallback image replaces failed plane");
        }
    }

    /// Forget failed planes, e.g. when a fresh GPU layer retries every texture.
    pub fn cover_all(&mut self) {
        self.uncovered.clear();
    }

    pub fn is_uncovered(&self, key: &ItemKey) -> bool {
        self.uncovered.contains(key)
    }

    pub fn update(&mut self, frame: &NarrativeFrame) -> NarrativeReport {
        let stacked = self.mode == PresentationMode::Stacked;
        let show_fallback = self.mode.shows_fallback_images();
        let slide = frame.viewport.height.max(0.0);

        let items = self
            .items
            .iter_mut()
            .enumerate()
            .map(|(i, ch)| {
                let fallback = show_fallback || self.uncovered.contains(ch.key());
                let mut style = ch.update(frame.progress, frame.dt, fallback);
                if stacked {
                    style.stack_offset = Some(self.deck.offset(i, frame.progress) * slide);
                }
                style
            })
            .collect();

        NarrativeReport {
            mode: self.mode,
            header: self.header.update(frame.progress, frame.dt),
            journey: if stacked { None } else { self.journey(frame) },
            items,
        }
    }

    fn journey(&self, frame: &NarrativeFrame) -> Option<JourneyBar> {
        let first = self.anchors.measure(self.first.as_ref()?)?;
        let last = self.anchors.measure(self.last.as_ref()?)?;
        Some(JourneyBar::measure(
            first,
            last,
            frame.scroll,
            frame.viewport.height,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/mod.rs"]
mod tests;
