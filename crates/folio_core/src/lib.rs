//! # FOLIO Core
//!
//! Host-independent substrate for document page behaviors:
//! - Geometry in viewport coordinates
//! - Stable element identity and the [`Document`] seam
//! - A small CSS selector subset for element discovery
//! - Input events, event subscriptions and cancelable one-shot timers
//! - Configuration loaded from TOML
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      EVENT PIPELINE                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  Host events → InputEvent → Controllers → Document writes │
//! │  Host timers → TimerHandle → Controllers → Document writes│
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Hosts implement [`Document`] and [`Scheduler`]. The browser host lives in
//! `folio_web`; [`MemoryDocument`] and [`ManualScheduler`] serve tests and
//! headless use.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod input;
pub mod memory;
pub mod selector;
pub mod timer;

pub use config::{AccordionConfig, LightboxConfig, PageConfig, TooltipConfig};
pub use document::{Document, ElementId};
pub use error::{FolioError, FolioResult};
pub use geometry::{Rect, Size};
pub use input::{EventKind, EventSource, InputEvent, Key, Subscription};
pub use memory::MemoryDocument;
pub use selector::Selector;
pub use timer::{ManualScheduler, Scheduler, TimerHandle};
