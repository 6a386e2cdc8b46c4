//! Hover tooltips.
//!
//! One overlay per trigger, created at attach time and reused for every
//! show/hide cycle. At most one overlay is visible at a time.

mod controller;
mod placement;

pub use controller::{TooltipController, TriggerState};
pub use placement::{place, Anchor, Placement, PlacementRules};
