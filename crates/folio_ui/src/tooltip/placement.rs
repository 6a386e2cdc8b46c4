//! Collision-aware tooltip placement.
//!
//! Pure geometry: given the trigger's box, the tooltip's natural size and the
//! viewport width, decide where the tooltip goes and which point of it sits
//! on that position.

use folio_core::{Rect, Size, TooltipConfig};

/// Which point of the tooltip is aligned to the computed `left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Horizontal center (`translate(-50%, 0%)`).
    #[default]
    Center,
    /// Left edge (`translate(0%, 0%)`).
    Left,
    /// Right edge (`translate(-100%, 0%)`).
    Right,
}

impl Anchor {
    /// Horizontal translation applied to the tooltip, in percent of its width.
    #[must_use]
    pub const fn translate_x_percent(self) -> i32 {
        match self {
            Self::Center => -50,
            Self::Left => 0,
            Self::Right => -100,
        }
    }

    /// CSS `transform` value for this anchor.
    #[must_use]
    pub fn transform(self) -> String {
        format!("translate({}%, 0%)", self.translate_x_percent())
    }

    /// Offset from `left` to the tooltip's left edge for a given width.
    #[must_use]
    pub fn left_edge_offset(self, width: f32) -> f32 {
        match self {
            Self::Center => -width * 0.5,
            Self::Left => 0.0,
            Self::Right => -width,
        }
    }
}

/// Spacing rules for placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Vertical gap between trigger and tooltip.
    pub gap: f32,
    /// Minimum distance kept from the viewport edges.
    pub edge_margin: f32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            gap: 8.0,
            edge_margin: 10.0,
        }
    }
}

impl From<&TooltipConfig> for PlacementRules {
    fn from(config: &TooltipConfig) -> Self {
        Self {
            gap: config.gap,
            edge_margin: config.edge_margin,
        }
    }
}

/// Where a tooltip goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Horizontal position of the anchor point.
    pub left: f32,
    /// Top edge of the tooltip.
    pub top: f32,
    /// Anchor alignment.
    pub anchor: Anchor,
    /// Tooltip was flipped below the trigger.
    pub below: bool,
}

impl Placement {
    /// Returns the tooltip's box in viewport coordinates.
    #[must_use]
    pub fn bounds(&self, size: Size) -> Rect {
        Rect::new(
            self.left + self.anchor.left_edge_offset(size.width),
            self.top,
            size.width,
            size.height,
        )
    }
}

/// Computes the placement of a tooltip of `size` for a trigger at `trigger`.
///
/// Preferred: centered above the trigger. Crossing the left margin re-anchors
/// to the trigger's left edge; otherwise crossing the right margin re-anchors
/// to its right edge. Crossing the top margin flips below the trigger.
#[must_use]
pub fn place(trigger: Rect, size: Size, viewport_width: f32, rules: PlacementRules) -> Placement {
    let margin = rules.edge_margin;
    let half_width = size.width * 0.5;

    let mut left = trigger.center_x();
    let mut anchor = Anchor::Center;

    if left - half_width < margin {
        anchor = Anchor::Left;
        left = (trigger.left() + margin).max(margin);
    } else if left + half_width > viewport_width - margin {
        anchor = Anchor::Right;
        left = (trigger.right() - margin).min(viewport_width - margin);
    }

    let mut top = trigger.top() - size.height - rules.gap;
    let below = top < margin;
    if below {
        top = trigger.bottom() + rules.gap;
    }

    Placement {
        left,
        top,
        anchor,
        below,
    }
}
