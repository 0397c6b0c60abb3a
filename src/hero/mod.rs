pub mod intro;
pub mod scroll;

use crate::{hero::intro::IntroTiming, progress::offset::ScrollOffset};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub headlines: Vec<String>,
    pub timing: IntroTiming,
    /// Hero traversal: from its top at the viewport top until its bottom reaches the viewport top.
    pub offset: ScrollOffset,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            headlines: Vec::new(),
            timing: IntroTiming::default(),
            offset: ScrollOffset::LEAVING,
        }
    }
}
