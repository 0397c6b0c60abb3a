use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Where an element edge meets a viewport edge, as fractions along the vertical axis
/// (`start = 0`, `center = 0.5`, `end = 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub element: f64,
    pub viewport: f64,
}

impl Intersection {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }
}

fn parse_edge(token: &str) -> WeaveResult<f64> {
    match token {
        "start" | "top" => Ok(0.0),
        "center" => Ok(0.5),
        "end" | "bottom" => Ok(1.0),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| WeaveError::validation(format!("unknown edge '{other}'"))),
    }
}

fn edge_name(v: f64) -> String {
    if v == 0.0 {
        "start".to_owned()
    } else if v == 0.5 {
        "center".to_owned()
    } else if v == 1.0 {
        "end".to_owned()
    } else {
        v.to_string()
    }
}

impl FromStr for Intersection {
    type Err = WeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(WeaveError::validation(format!(
                "intersection must be '<element edge> <viewport edge>', got '{s}'"
            )));
        };
        Ok(Self::new(parse_edge(element)?, parse_edge(viewport)?))
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", edge_name(self.element), edge_name(self.viewport))
    }
}

/// Alignment rule of a section: which intersection means progress 0 and which means 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[String; 2]", into = "[String; 2]")]
pub struct ScrollOffset {
    pub enter: Intersection,
    pub exit: Intersection,
}

impl ScrollOffset {
    /// Element top at viewport top → element bottom at viewport bottom (pinned runway).
    pub const PINNED: Self = Self {
        enter: Intersection::new(0.0, 0.0),
        exit: Intersection::new(1.0, 1.0),
    };

    /// Element top at viewport top → element bottom at viewport top (scrolling away).
    pub const LEAVING: Self = Self {
        enter: Intersection::new(0.0, 0.0),
        exit: Intersection::new(1.0, 0.0),
    };

    /// Scroll offsets for progress 0 and 1, given the element's document top and height.
    pub fn scroll_range(&self, doc_top: f64, height: f64, viewport_height: f64) -> (f64, f64) {
        let at = |i: Intersection| doc_top + height * i.element - viewport_height * i.viewport;
        (at(self.enter), at(self.exit))
    }
}

impl Default for ScrollOffset {
    fn default() -> Self {
        Self::PINNED
    }
}

impl TryFrom<[String; 2]> for ScrollOffset {
    type Error = WeaveError;

    fn try_from(value: [String; 2]) -> Result<Self, Self::Error> {
        Ok(Self {
            enter: value[0].parse()?,
            exit: value[1].parse()?,
        })
    }
}

impl From<ScrollOffset> for [String; 2] {
    fn from(value: ScrollOffset) -> Self {
        [value.enter.to_string(), value.exit.to_string()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/offset.rs"]
mod tests;
