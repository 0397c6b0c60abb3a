use crate::{
    animation::{channel::Channel, spring::SpringConfig},
    gallery::item::{GalleryItem, ItemKey},
    segment::window::{EdgeValues, SegmentWindow},
};

const TEXT_OPACITY: SpringConfig = SpringConfig::new(130.0, 24.0, 0.8);
const TEXT_Y: SpringConfig = SpringConfig::new(120.0, 22.0, 0.9);
const TITLE_Y: SpringConfig = SpringConfig::new(130.0, 23.0, 0.86);
const TITLE_OPACITY: SpringConfig = SpringConfig::new(140.0, 24.0, 0.82);
const DESCRIPTION_OPACITY: SpringConfig = SpringConfig::new(120.0, 22.0, 0.8);
const DESCRIPTION_Y: SpringConfig = SpringConfig::new(115.0, 22.0, 0.88);
const MARKER_OPACITY: SpringConfig = SpringConfig::new(130.0, 23.0, 0.78);
const MARKER_SCALE: SpringConfig = SpringConfig::new(150.0, 20.0, 0.7);
const FALLBACK_OPACITY: SpringConfig = SpringConfig::new(120.0, 24.0, 0.85);
const FALLBACK_SCALE: SpringConfig = SpringConfig::new(120.0, 23.0, 0.82);
const FALLBACK_Y: SpringConfig = SpringConfig::new(108.0, 23.0, 0.88);

/// Vertical travel (px) entering from below and leaving upward.
const TRAVEL_PX: EdgeValues = EdgeValues::new(60.0, 0.0, -60.0);
const BLUR_PX: EdgeValues = EdgeValues::symmetric(10.0, 0.0);
const LETTER_SPACING_EM: EdgeValues = EdgeValues::symmetric(0.08, 0.015);
const MARKER_SCALE_RANGE: EdgeValues = EdgeValues::symmetric(0.5, 1.0);
const FALLBACK_SCALE_RANGE: EdgeValues = EdgeValues::symmetric(1.1, 1.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TitleStyle {
    pub y: f64,
    pub opacity: f64,
    pub blur_px: f64,
    pub letter_spacing_em: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DescriptionStyle {
    pub opacity: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct MarkerStyle {
    pub opacity: f64,
    pub scale: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct FallbackImageStyle {
    pub opacity: f64,
    pub scale: f64,
    pub y: f64,
}

/// Style snapshot of one caption block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ItemStyle {
    pub key: ItemKey,
    pub index: usize,
    pub opacity: f64,
    pub y: f64,
    pub title: TitleStyle,
    pub description: DescriptionStyle,
    pub marker: MarkerStyle,
    /// Present only when the fallback image is shown in place of a GPU plane.
    pub fallback_image: Option<FallbackImageStyle>,
    /// Card offset in px; present only in stacked mode.
    pub stack_offset: Option<f64>,
}

/// Spring-smoothed caption channels of one item, all driven by the same window.
#[derive(Clone, Debug)]
pub struct ItemChannels {
    key: ItemKey,
    index: usize,
    has_image: bool,
    opacity: Channel,
    y: Channel,
    title_y: Channel,
    title_opacity: Channel,
    title_blur: Channel,
    title_spacing: Channel,
    description_opacity: Channel,
    description_y: Channel,
    marker_opacity: Channel,
    marker_scale: Channel,
    fallback_opacity: Channel,
    fallback_scale: Channel,
    fallback_y: Channel,
}

impl ItemChannels {
    pub fn new(item: &GalleryItem, window: SegmentWindow, progress: f64) -> Self {
        let opacity = window.ramp(EdgeValues::symmetric(0.0, 1.0));
        let travel = window.ramp(TRAVEL_PX);
        let blur = window.ramp(BLUR_PX);
        let sprung = |ramp, cfg| Channel::sprung(ramp, cfg, progress);
        Self {
            key: item.key.clone(),
            index: item.index,
            has_image: item.has_image(),
            opacity: sprung(opacity.clone(), TEXT_OPACITY),
            y: sprung(travel.clone(), TEXT_Y),
            title_y: sprung(travel.map_output(|y| y * 0.75), TITLE_Y),
            title_opacity: sprung(opacity.clone(), TITLE_OPACITY),
            title_blur: Channel::direct(blur, progress),
            title_spacing: Channel::direct(window.ramp(LETTER_SPACING_EM), progress),
            description_opacity: sprung(opacity.clone(), DESCRIPTION_OPACITY),
            description_y: sprung(travel.map_output(|y| y * 0.5), DESCRIPTION_Y),
            marker_opacity: sprung(opacity.clone(), MARKER_OPACITY),
            marker_scale: sprung(window.ramp(MARKER_SCALE_RANGE), MARKER_SCALE),
            fallback_opacity: sprung(opacity, FALLBACK_OPACITY),
            fallback_scale: sprung(window.ramp(FALLBACK_SCALE_RANGE), FALLBACK_SCALE),
            fallback_y: sprung(travel.map_output(|y| y * 1.2), FALLBACK_Y),
        }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn update(&mut self, progress: f64, dt: f64, show_fallback: bool) -> ItemStyle {
        let fallback = FallbackImageStyle {
            opacity: self.fallback_opacity.update(progress, dt),
            scale: self.fallback_scale.update(progress, dt),
            y: self.fallback_y.update(progress, dt),
        };
        ItemStyle {
            key: self.key.clone(),
            index: self.index,
            opacity: self.opacity.update(progress, dt),
            y: self.y.update(progress, dt),
            title: TitleStyle {
                y: self.title_y.update(progress, dt),
                opacity: self.title_opacity.update(progress, dt),
                blur_px: self.title_blur.update(progress, dt),
                letter_spacing_em: self.title_spacing.update(progress, dt),
            },
            description: DescriptionStyle {
                opacity: self.description_opacity.update(progress, dt),
                y: self.description_y.update(progress, dt),
            },
            marker: MarkerStyle {
                opacity: self.marker_opacity.update(progress, dt),
                scale: self.marker_scale.update(progress, dt),
            },
            fallback_image: (show_fallback && self.has_image).then_some(fallback),
            stack_offset: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/item.rs"]
mod tests;
