//! # FOLIO UI
//!
//! Interactive behaviors for a document page:
//! - Hover tooltips with viewport-aware placement and a grace period for
//!   moving the pointer onto the tooltip
//! - A click-to-enlarge lightbox for the figure image
//! - A single-open FAQ accordion
//!
//! Every behavior reads the document once at attach time and then reacts to
//! [`folio_core::InputEvent`]s and timer firings. Nothing here depends on a
//! browser; the host supplies a [`folio_core::Document`] and a
//! [`folio_core::Scheduler`].
//!
//! ## Example
//!
//! ```rust
//! use folio_core::{Document, InputEvent, ManualScheduler, MemoryDocument, PageConfig};
//! use folio_ui::PageBehaviors;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! let trigger = doc.add_element(body, "span", &["tooltip-trigger"]);
//! doc.set_attribute(trigger, "data-tooltip", "Hello");
//!
//! let mut scheduler = ManualScheduler::new();
//! let mut page = PageBehaviors::attach(&mut doc, &PageConfig::default()).unwrap();
//!
//! page.handle(&mut doc, &mut scheduler, &InputEvent::PointerEnter(trigger));
//! assert!(page.tooltips.active().is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod accordion;
pub mod lightbox;
pub mod page;
pub mod tooltip;

pub use accordion::{Accordion, FaqItem};
pub use lightbox::Lightbox;
pub use page::PageBehaviors;
pub use tooltip::{Anchor, Placement, PlacementRules, TooltipController};
