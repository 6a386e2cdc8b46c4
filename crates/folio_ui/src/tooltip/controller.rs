//! Tooltip lifecycle: attach, show, deferred hide, overlay hover.
//!
//! ```text
//!            enter trigger                 leave trigger
//!  hidden ─────────────────▶ shown ─────────────────────▶ hide pending
//!    ▲                        ▲  │                           │    │
//!    │       enter overlay    │  │ leave overlay             │    │ timer fires,
//!    │  (cancels the timer)   └──┼───────────────────────────┘    │ overlay not hovered
//!    └───────────────────────────┴────────────────────────────────┘
//! ```

use std::collections::HashMap;

use folio_core::{
    Document, ElementId, EventKind, FolioResult, InputEvent, Scheduler, Selector, Size,
    Subscription, TimerHandle, TooltipConfig,
};

use super::placement::{place, Placement, PlacementRules};

/// Per-trigger record: the overlay it owns and its pending hide.
#[derive(Debug, Clone)]
pub struct TriggerState {
    /// The trigger element.
    pub trigger: ElementId,
    /// The overlay owned by the trigger.
    pub overlay: ElementId,
    /// Whether the overlay carries a link block.
    pub has_link: bool,
    hide_timer: Option<TimerHandle>,
    placement: Option<Placement>,
}

impl TriggerState {
    /// Returns the pending hide timer, if any.
    #[must_use]
    pub fn hide_timer(&self) -> Option<TimerHandle> {
        self.hide_timer
    }

    /// Returns the placement computed by the last show.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
}

/// Owns every tooltip overlay on the page and the single active reference.
#[derive(Debug)]
pub struct TooltipController {
    config: TooltipConfig,
    rules: PlacementRules,
    /// Records keyed by trigger identity.
    triggers: HashMap<ElementId, TriggerState>,
    /// Triggers in document order.
    order: Vec<ElementId>,
    /// Overlay to owning trigger.
    owners: HashMap<ElementId, ElementId>,
    /// The one visible overlay.
    active: Option<ElementId>,
}

impl TooltipController {
    /// Discovers triggers and builds one overlay for each, appended to the
    /// document body.
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger selector is invalid or the host
    /// refuses to create or insert an overlay.
    pub fn attach(doc: &mut dyn Document, config: &TooltipConfig) -> FolioResult<Self> {
        let selector = Selector::parse(&config.trigger_selector)?;
        let found = doc.query_all(&selector);

        let mut controller = Self {
            config: config.clone(),
            rules: PlacementRules::from(config),
            triggers: HashMap::with_capacity(found.len()),
            order: Vec::with_capacity(found.len()),
            owners: HashMap::with_capacity(found.len()),
            active: None,
        };

        for trigger in found {
            let state = controller.build_overlay(doc, trigger)?;
            controller.owners.insert(state.overlay, trigger);
            controller.order.push(trigger);
            controller.triggers.insert(trigger, state);
        }

        tracing::info!(triggers = controller.order.len(), "tooltips attached");
        Ok(controller)
    }

    fn build_overlay(&self, doc: &mut dyn Document, trigger: ElementId) -> FolioResult<TriggerState> {
        let config = &self.config;
        let message = doc
            .attribute(trigger, &config.message_attribute)
            .unwrap_or_default();
        let link = doc
            .attribute(trigger, &config.link_attribute)
            .filter(|link| !link.is_empty());

        let overlay = doc.create_element("div")?;
        doc.add_class(overlay, &config.overlay_class);

        let text = doc.create_element("div")?;
        doc.add_class(text, &config.text_class);
        doc.set_text(text, &message);
        doc.append_child(overlay, text)?;

        if let Some(href) = &link {
            let anchor = doc.create_element("a")?;
            doc.add_class(anchor, &config.link_class);
            doc.set_attribute(anchor, "href", href);
            doc.set_attribute(anchor, "target", "_blank");
            doc.set_attribute(anchor, "rel", "noopener noreferrer");
            doc.set_text(anchor, &config.link_label);
            doc.append_child(overlay, anchor)?;
        }

        let body = doc.body();
        doc.append_child(body, overlay)?;

        Ok(TriggerState {
            trigger,
            overlay,
            has_link: link.is_some(),
            hide_timer: None,
            placement: None,
        })
    }

    /// Returns the triggers in document order.
    #[must_use]
    pub fn triggers(&self) -> &[ElementId] {
        &self.order
    }

    /// Returns the record for `trigger`.
    #[must_use]
    pub fn state(&self, trigger: ElementId) -> Option<&TriggerState> {
        self.triggers.get(&trigger)
    }

    /// Returns the overlay owned by `trigger`.
    #[must_use]
    pub fn overlay_of(&self, trigger: ElementId) -> Option<ElementId> {
        self.triggers.get(&trigger).map(|s| s.overlay)
    }

    /// Returns the visible overlay, if any.
    #[must_use]
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// Returns the listeners the host must install.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.order
            .iter()
            .filter_map(|t| self.triggers.get(t))
            .flat_map(|state| {
                [state.trigger, state.overlay].into_iter().flat_map(|element| {
                    [
                        Subscription::element(element, EventKind::PointerEnter),
                        Subscription::element(element, EventKind::PointerLeave),
                    ]
                })
            })
            .collect()
    }

    /// Routes an input event. Returns true if it concerned a tooltip.
    pub fn handle(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler,
        event: &InputEvent,
    ) -> bool {
        match *event {
            InputEvent::PointerEnter(id) if self.triggers.contains_key(&id) => {
                self.show(doc, scheduler, id)
            }
            InputEvent::PointerEnter(id) => self.overlay_enter(doc, scheduler, id),
            InputEvent::PointerLeave(id) if self.triggers.contains_key(&id) => {
                self.schedule_hide(scheduler, id)
            }
            InputEvent::PointerLeave(id) => self.overlay_leave(doc, id),
            InputEvent::Click { .. } | InputEvent::KeyPress(_) => false,
        }
    }

    /// Positions and shows the overlay of `trigger`, hiding any other.
    ///
    /// Returns false if `trigger` is not a known trigger.
    pub fn show(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler,
        trigger: ElementId,
    ) -> bool {
        let Some(state) = self.triggers.get_mut(&trigger) else {
            return false;
        };
        if let Some(timer) = state.hide_timer.take() {
            scheduler.cancel(timer);
        }

        let overlay = state.overlay;
        let active_class = &self.config.active_class;
        if let Some(previous) = self.active.filter(|&a| a != overlay) {
            doc.remove_class(previous, active_class);
            self.active = None;
        }

        let anchor_rect = doc.bounding_rect(trigger);
        let size = measure(doc, overlay, active_class);
        let placement = place(anchor_rect, size, doc.viewport_width(), self.rules);

        doc.set_style(overlay, "left", &format!("{}px", placement.left));
        doc.set_style(overlay, "top", &format!("{}px", placement.top));
        doc.set_style(overlay, "transform", &placement.anchor.transform());
        if placement.below {
            doc.add_class(overlay, &self.config.below_class);
        } else {
            doc.remove_class(overlay, &self.config.below_class);
        }

        doc.add_class(overlay, active_class);
        self.active = Some(overlay);
        state.placement = Some(placement);

        tracing::debug!(
            trigger = trigger.raw(),
            left = placement.left,
            top = placement.top,
            anchor = ?placement.anchor,
            below = placement.below,
            "tooltip shown"
        );
        true
    }

    /// Starts the deferred hide for `trigger`, replacing any pending one.
    ///
    /// Returns false if `trigger` is not a known trigger.
    pub fn schedule_hide(&mut self, scheduler: &mut dyn Scheduler, trigger: ElementId) -> bool {
        let Some(state) = self.triggers.get_mut(&trigger) else {
            return false;
        };
        if let Some(timer) = state.hide_timer.take() {
            scheduler.cancel(timer);
        }
        state.hide_timer = Some(scheduler.schedule(self.config.hide_delay()));
        true
    }

    /// Delivers a fired timer. Returns true if the handle belonged to a
    /// pending hide; stale handles are ignored.
    pub fn on_timer(&mut self, doc: &mut dyn Document, handle: TimerHandle) -> bool {
        let Some(state) = self
            .triggers
            .values_mut()
            .find(|s| s.hide_timer == Some(handle))
        else {
            return false;
        };
        state.hide_timer = None;

        let overlay = state.overlay;
        if doc.is_hovered(overlay) {
            tracing::debug!(overlay = overlay.raw(), "hide skipped, pointer over tooltip");
        } else {
            self.deactivate(doc, overlay);
        }
        true
    }

    fn overlay_enter(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler,
        overlay: ElementId,
    ) -> bool {
        let Some(state) = self
            .owners
            .get(&overlay)
            .and_then(|trigger| self.triggers.get_mut(trigger))
        else {
            return false;
        };
        if let Some(timer) = state.hide_timer.take() {
            scheduler.cancel(timer);
        }

        if let Some(previous) = self.active.filter(|&a| a != overlay) {
            doc.remove_class(previous, &self.config.active_class);
        }
        doc.add_class(overlay, &self.config.active_class);
        self.active = Some(overlay);
        true
    }

    fn overlay_leave(&mut self, doc: &mut dyn Document, overlay: ElementId) -> bool {
        if !self.owners.contains_key(&overlay) {
            return false;
        }
        self.deactivate(doc, overlay);
        true
    }

    fn deactivate(&mut self, doc: &mut dyn Document, overlay: ElementId) {
        doc.remove_class(overlay, &self.config.active_class);
        if self.active == Some(overlay) {
            self.active = None;
        }
        tracing::debug!(overlay = overlay.raw(), "tooltip hidden");
    }
}

/// Measures the overlay's natural size without a visible flash.
fn measure(doc: &mut dyn Document, overlay: ElementId, active_class: &str) -> Size {
    doc.set_style(overlay, "visibility", "hidden");
    doc.set_style(overlay, "display", "block");
    doc.add_class(overlay, active_class);

    let size = doc.bounding_rect(overlay).size();

    doc.remove_class(overlay, active_class);
    doc.set_style(overlay, "visibility", "visible");
    doc.set_style(overlay, "display", "");
    size
}
