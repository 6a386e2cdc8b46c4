//! # FOLIO Web
//!
//! Browser host for the page behaviors. On `wasm32` this crate:
//! - implements [`folio_core::Document`] over the live DOM (`WebDocument`)
//! - implements [`folio_core::Scheduler`] over `setTimeout` (`WebScheduler`)
//! - installs one listener per declared subscription
//! - boots on `DOMContentLoaded`, or immediately if the DOM is already parsed
//!
//! On every other target only the host-neutral [`bridge`] is compiled.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod runtime;
#[cfg(target_arch = "wasm32")]
mod scheduler;

pub use bridge::{translate, ElementRegistry, RawEvent};

#[cfg(target_arch = "wasm32")]
pub use dom::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use runtime::{start, Runtime};
#[cfg(target_arch = "wasm32")]
pub use scheduler::WebScheduler;
