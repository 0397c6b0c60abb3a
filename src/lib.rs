//! Scrollweave is a scroll-synchronized composition engine.
//!
//! One smoothed scroll position drives everything on a page:
//!
//! - A [`ScrollBroadcaster`] runs the smooth-scroll simulation and publishes snapshots
//! - [`ProgressMapper`]s turn those snapshots into per-section progress
//! - The GPU [`Compositor`] glues image planes to caption placeholders, while the
//!   [`NarrativeLayer`] styles the captions from the same segment windows
//! - A [`VideoLoopController`] crossfades two buffers into a seamless background loop
//!
//! The [`Page`] owns all of it and is driven through a [`FrameHost`]; [`sim::Simulation`] runs a
//! page headlessly.
#![forbid(unsafe_code)]

pub mod anchor;
pub mod animation;
pub mod compositor;
pub mod config;
pub mod foundation;
pub mod frame;
pub mod gallery;
pub mod hero;
pub mod narrative;
pub mod page;
pub mod presentation;
pub mod progress;
pub mod scroll;
pub mod segment;
pub mod shader;
pub mod sim;
pub mod video;

pub use crate::foundation::core::{Point, Rect, Size, Vec2, Viewport};
pub use crate::foundation::error::{WeaveError, WeaveResult};

pub use crate::anchor::registry::{AnchorRegistry, Measure, SlotElement};
pub use crate::animation::{ease::Ease, smoothing::Smoothing, spring::SpringConfig};
pub use crate::compositor::{Compositor, camera::PerspectiveCamera, plane::PlaneDraw};
pub use crate::config::EngineConfig;
pub use crate::frame::{
    host::{FrameHost, HostEvent, ManualHost},
    pending::Teardown,
};
pub use crate::gallery::item::{Gallery, GalleryItemDef, ItemKey};
pub use crate::narrative::NarrativeLayer;
pub use crate::page::{FrameReport, Page};
pub use crate::presentation::{Capabilities, PresentationMode};
pub use crate::progress::{mapper::ProgressMapper, offset::ScrollOffset};
pub use crate::scroll::{
    broadcaster::{ScrollBroadcaster, ScrollOptions},
    state::{ScrollInput, ScrollState},
};
pub use crate::segment::window::{SegmentLayout, SegmentWindow};
pub use crate::video::loop_controller::{VideoLoopConfig, VideoLoopController};
