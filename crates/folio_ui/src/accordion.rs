//! FAQ accordion with at most one expanded item.

use folio_core::{
    AccordionConfig, Document, ElementId, EventKind, FolioResult, InputEvent, Selector,
    Subscription,
};

const ARIA_EXPANDED: &str = "aria-expanded";

/// A question header and the answer that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    /// The clickable question.
    pub header: ElementId,
    /// The answer body (next element sibling of the header).
    pub answer: Option<ElementId>,
}

/// Single-open accordion over every FAQ item on the page.
#[derive(Debug)]
pub struct Accordion {
    config: AccordionConfig,
    items: Vec<FaqItem>,
}

impl Accordion {
    /// Collects FAQ items in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the question selector is invalid.
    pub fn attach(doc: &dyn Document, config: &AccordionConfig) -> FolioResult<Self> {
        let selector = Selector::parse(&config.question_selector)?;
        let items: Vec<FaqItem> = doc
            .query_all(&selector)
            .into_iter()
            .map(|header| FaqItem {
                header,
                answer: doc.next_sibling(header),
            })
            .collect();

        tracing::info!(items = items.len(), "accordion attached");
        Ok(Self {
            config: config.clone(),
            items,
        })
    }

    /// Returns the items in document order.
    #[must_use]
    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    /// Returns true if the header's `aria-expanded` reads `"true"`.
    #[must_use]
    pub fn is_expanded(doc: &dyn Document, header: ElementId) -> bool {
        doc.attribute(header, ARIA_EXPANDED).as_deref() == Some("true")
    }

    /// Returns the headers currently expanded.
    #[must_use]
    pub fn expanded(&self, doc: &dyn Document) -> Vec<ElementId> {
        self.items
            .iter()
            .map(|item| item.header)
            .filter(|&header| Self::is_expanded(doc, header))
            .collect()
    }

    /// Returns the listeners the host must install.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.items
            .iter()
            .map(|item| Subscription::element(item.header, EventKind::Click))
            .collect()
    }

    /// Routes an input event. Returns true if a header was toggled.
    pub fn handle(&mut self, doc: &mut dyn Document, event: &InputEvent) -> bool {
        let InputEvent::Click { target } = *event else {
            return false;
        };
        let Some(index) = self
            .items
            .iter()
            .position(|item| doc.contains(item.header, target))
        else {
            return false;
        };
        self.toggle(doc, index);
        true
    }

    /// Toggles the item at `index`, collapsing every other item first.
    ///
    /// Out-of-range indices are ignored.
    pub fn toggle(&mut self, doc: &mut dyn Document, index: usize) {
        let Some(&clicked) = self.items.get(index) else {
            return;
        };
        let was_expanded = Self::is_expanded(doc, clicked.header);

        for item in self.items.iter().filter(|item| item.header != clicked.header) {
            self.set_expanded(doc, *item, false);
        }
        self.set_expanded(doc, clicked, !was_expanded);

        tracing::debug!(
            header = clicked.header.raw(),
            expanded = !was_expanded,
            "faq item toggled"
        );
    }

    fn set_expanded(&self, doc: &mut dyn Document, item: FaqItem, expanded: bool) {
        doc.set_attribute(item.header, ARIA_EXPANDED, if expanded { "true" } else { "false" });
        if let Some(answer) = item.answer {
            if expanded {
                doc.add_class(answer, &self.config.active_class);
            } else {
                doc.remove_class(answer, &self.config.active_class);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MemoryDocument;

    fn faq_page(count: usize) -> (MemoryDocument, Vec<ElementId>) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let section = doc.add_element(body, "section", &["faq"]);
        let headers = (0..count)
            .map(|_| {
                let header = doc.add_element(section, "button", &["faq-question"]);
                doc.set_attribute(header, "aria-expanded", "false");
                doc.add_element(section, "div", &["faq-answer"]);
                header
            })
            .collect();
        (doc, headers)
    }

    #[test]
    fn test_attach_pairs_answers() {
        let (doc, headers) = faq_page(2);
        let accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        assert_eq!(accordion.items().len(), 2);
        assert_eq!(accordion.items()[0].header, headers[0]);
        let answer = accordion.items()[0].answer.unwrap();
        assert!(doc.has_class(answer, "faq-answer"));
    }

    #[test]
    fn test_single_open() {
        let (mut doc, headers) = faq_page(3);
        let mut accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        accordion.toggle(&mut doc, 0);
        assert_eq!(accordion.expanded(&doc), vec![headers[0]]);

        accordion.toggle(&mut doc, 2);
        assert_eq!(accordion.expanded(&doc), vec![headers[2]]);
        let first_answer = accordion.items()[0].answer.unwrap();
        let third_answer = accordion.items()[2].answer.unwrap();
        assert!(!doc.has_class(first_answer, "active"));
        assert!(doc.has_class(third_answer, "active"));

        accordion.toggle(&mut doc, 2);
        assert!(accordion.expanded(&doc).is_empty());
        assert!(!doc.has_class(third_answer, "active"));
    }

    #[test]
    fn test_click_inside_header() {
        let (mut doc, headers) = faq_page(2);
        let label = doc.add_element(headers[1], "span", &[]);
        let mut accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        assert!(accordion.handle(&mut doc, &InputEvent::Click { target: label }));
        assert_eq!(accordion.expanded(&doc), vec![headers[1]]);

        let body = doc.body();
        assert!(!accordion.handle(&mut doc, &InputEvent::Click { target: body }));
        assert_eq!(accordion.expanded(&doc), vec![headers[1]]);
    }

    #[test]
    fn test_preexpanded_markup_is_normalized_on_click() {
        let (mut doc, headers) = faq_page(3);
        doc.set_attribute(headers[0], "aria-expanded", "true");
        doc.set_attribute(headers[1], "aria-expanded", "true");
        let mut accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        accordion.toggle(&mut doc, 1);
        assert!(accordion.expanded(&doc).is_empty());

        accordion.toggle(&mut doc, 1);
        assert_eq!(accordion.expanded(&doc), vec![headers[1]]);
    }

    #[test]
    fn test_header_without_answer() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let header = doc.add_element(body, "button", &["faq-question"]);
        let mut accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        assert_eq!(accordion.items()[0].answer, None);
        accordion.toggle(&mut doc, 0);
        assert!(Accordion::is_expanded(&doc, header));
        accordion.toggle(&mut doc, 5);
    }

    #[test]
    fn test_no_items_no_subscriptions() {
        let doc = MemoryDocument::new();
        let accordion = Accordion::attach(&doc, &AccordionConfig::default()).unwrap();

        assert!(accordion.items().is_empty());
        assert!(accordion.subscriptions().is_empty());
    }
}
