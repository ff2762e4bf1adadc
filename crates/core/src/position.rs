//! Anchor computation for the floating filter panel.

use serde::{Deserialize, Serialize};

/// A trigger element's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Document coordinates for the panel's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub top: f64,
    pub left: f64,
}

/// Place the panel directly below the trigger, right edges aligned.
pub fn compute_anchor(trigger: Rect, scroll: ScrollOffset, panel_width: f64) -> Anchor {
    Anchor {
        top: trigger.bottom() + scroll.y,
        left: trigger.left + scroll.x - panel_width + trigger.width,
    }
}
