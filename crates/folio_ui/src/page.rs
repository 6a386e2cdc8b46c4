//! All page behaviors behind one entry point.
//!
//! The controllers are independent; this only attaches them together and
//! fans events out to each.

use folio_core::{Document, FolioResult, InputEvent, PageConfig, Scheduler, Subscription, TimerHandle};

use crate::accordion::Accordion;
use crate::lightbox::Lightbox;
use crate::tooltip::TooltipController;

/// Tooltips, lightbox and accordion attached to one document.
#[derive(Debug)]
pub struct PageBehaviors {
    /// Hover tooltips.
    pub tooltips: TooltipController,
    /// Figure lightbox, if the page has a figure image.
    pub lightbox: Option<Lightbox>,
    /// FAQ accordion.
    pub accordion: Accordion,
}

impl PageBehaviors {
    /// Validates `config` and attaches every behavior.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid configuration or if the host refuses to
    /// build an overlay.
    pub fn attach(doc: &mut dyn Document, config: &PageConfig) -> FolioResult<Self> {
        config.validate()?;

        let tooltips = TooltipController::attach(doc, &config.tooltip)?;
        let lightbox = Lightbox::attach(doc, &config.lightbox)?;
        let accordion = Accordion::attach(doc, &config.accordion)?;

        Ok(Self {
            tooltips,
            lightbox,
            accordion,
        })
    }

    /// Returns every listener the host must install, deduplicated.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        let mut subscriptions = self.tooltips.subscriptions();
        if let Some(lightbox) = &self.lightbox {
            subscriptions.extend(lightbox.subscriptions());
        }
        subscriptions.extend(self.accordion.subscriptions());
        subscriptions.sort_unstable();
        subscriptions.dedup();
        subscriptions
    }

    /// Delivers an input event to every behavior. Returns true if any of
    /// them reacted.
    pub fn handle(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler,
        event: &InputEvent,
    ) -> bool {
        let mut handled = self.tooltips.handle(doc, scheduler, event);
        if let Some(lightbox) = &mut self.lightbox {
            handled |= lightbox.handle(doc, event);
        }
        handled |= self.accordion.handle(doc, event);
        handled
    }

    /// Delivers a fired timer. Returns true if a behavior owned it.
    pub fn on_timer(&mut self, doc: &mut dyn Document, handle: TimerHandle) -> bool {
        self.tooltips.on_timer(doc, handle)
    }
}
