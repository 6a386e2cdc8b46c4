//! Click-to-enlarge lightbox for the page's figure image.
//!
//! Only exists when the page has a designated image. When it does not,
//! attaching touches nothing.

use folio_core::{
    Document, ElementId, EventKind, FolioResult, InputEvent, Key, LightboxConfig, Selector,
    Subscription,
};

/// The singleton lightbox overlay.
#[derive(Debug)]
pub struct Lightbox {
    config: LightboxConfig,
    /// The original image on the page.
    image: ElementId,
    overlay: ElementId,
    close_button: ElementId,
    enlarged: ElementId,
    open: bool,
}

impl Lightbox {
    /// Builds the overlay if the designated image exists.
    ///
    /// Returns `Ok(None)` without touching the document when it does not.
    ///
    /// # Errors
    ///
    /// Returns an error if the image selector is invalid or the host refuses
    /// to create or insert the overlay.
    pub fn attach(doc: &mut dyn Document, config: &LightboxConfig) -> FolioResult<Option<Self>> {
        let selector = Selector::parse(&config.image_selector)?;
        let Some(image) = doc.query_first(&selector) else {
            tracing::debug!(selector = %selector, "no lightbox image on page");
            return Ok(None);
        };

        let overlay = doc.create_element("div")?;
        doc.add_class(overlay, &config.overlay_class);

        let close_button = doc.create_element("button")?;
        doc.add_class(close_button, &config.close_class);
        doc.set_attribute(close_button, "aria-label", &config.close_label);
        doc.set_text(close_button, &config.close_text);
        doc.append_child(overlay, close_button)?;

        let enlarged = doc.create_element("img")?;
        for name in ["src", "alt"] {
            let value = doc.attribute(image, name).unwrap_or_default();
            doc.set_attribute(enlarged, name, &value);
        }
        doc.append_child(overlay, enlarged)?;

        let body = doc.body();
        doc.append_child(body, overlay)?;
        doc.set_style(image, "cursor", "zoom-in");

        tracing::info!("lightbox attached");
        Ok(Some(Self {
            config: config.clone(),
            image,
            overlay,
            close_button,
            enlarged,
            open: false,
        }))
    }

    /// Returns the original image.
    #[must_use]
    pub fn image(&self) -> ElementId {
        self.image
    }

    /// Returns the overlay element.
    #[must_use]
    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    /// Returns the close control.
    #[must_use]
    pub fn close_button(&self) -> ElementId {
        self.close_button
    }

    /// Returns the full-size copy inside the overlay.
    #[must_use]
    pub fn enlarged(&self) -> ElementId {
        self.enlarged
    }

    /// Returns true while the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the listeners the host must install.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        vec![
            Subscription::element(self.image, EventKind::Click),
            Subscription::element(self.overlay, EventKind::Click),
            Subscription::document(EventKind::KeyPress),
        ]
    }

    /// Routes an input event. Returns true if the lightbox changed state.
    pub fn handle(&mut self, doc: &mut dyn Document, event: &InputEvent) -> bool {
        match event {
            InputEvent::Click { target } if *target == self.image => {
                self.open(doc);
                true
            }
            InputEvent::Click { target } if self.open && self.closes_on(doc, *target) => {
                self.close(doc);
                true
            }
            InputEvent::KeyPress(Key::Escape) if self.open => {
                self.close(doc);
                true
            }
            _ => false,
        }
    }

    /// Returns true if a click on `target` dismisses the open overlay: the
    /// backdrop itself or a close control inside it.
    fn closes_on(&self, doc: &dyn Document, target: ElementId) -> bool {
        target == self.overlay
            || (doc.has_class(target, &self.config.close_class) && doc.contains(self.overlay, target))
    }

    /// Opens the overlay and locks page scrolling.
    pub fn open(&mut self, doc: &mut dyn Document) {
        doc.add_class(self.overlay, &self.config.active_class);
        let body = doc.body();
        doc.set_style(body, "overflow", "hidden");
        self.open = true;
        tracing::debug!("lightbox opened");
    }

    /// Closes the overlay and restores page scrolling.
    pub fn close(&mut self, doc: &mut dyn Document) {
        doc.remove_class(self.overlay, &self.config.active_class);
        let body = doc.body();
        doc.set_style(body, "overflow", "");
        self.open = false;
        tracing::debug!("lightbox closed");
    }
}
