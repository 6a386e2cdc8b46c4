//! Browser-host integration tests; they run under wasm-bindgen-test on wasm32.
#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use std::rc::Weak;
use std::time::Duration;

use folio_core::{Document, PageConfig, Scheduler, Selector};
use folio_web::{Runtime, WebDocument, WebScheduler};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

/// Replaces the page body with `html` and returns the live document.
fn page(html: &str) -> web_sys::Document {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("browser document");
    let body = document.body().expect("document body");
    body.set_inner_html(html);
    body.style()
        .remove_property("overflow")
        .expect("reset body overflow");
    document
}

fn web_document() -> WebDocument {
    WebDocument::from_window(web_sys::window().expect("window")).expect("bind document")
}

fn by_id(document: &web_sys::Document, id: &str) -> Element {
    document.get_element_by_id(id).expect("element present")
}

#[wasm_bindgen_test]
fn query_all_follows_document_order() {
    let document = page(
        r#"<section class="faq"><button id="a" class="faq-question"></button></section>
           <button id="b" class="faq-question"></button>"#,
    );
    let doc = web_document();

    let selector = Selector::parse(".faq-question").expect("selector");
    let found = doc.query_all(&selector);
    assert_eq!(found.len(), 2);
    assert_eq!(doc.element(found[0]), Some(by_id(&document, "a")));
    assert_eq!(doc.element(found[1]), Some(by_id(&document, "b")));

    // Interning is stable across queries.
    assert_eq!(doc.query_all(&selector), found);
}

#[wasm_bindgen_test]
fn class_writes_reach_the_class_list() {
    let document = page(r#"<div id="box" class="tooltip"></div>"#);
    let mut doc = web_document();
    let el = doc.intern(by_id(&document, "box"));

    doc.add_class(el, "active");
    assert!(doc.has_class(el, "active"));
    assert!(by_id(&document, "box").class_list().contains("active"));

    doc.remove_class(el, "active");
    assert!(!doc.has_class(el, "active"));
    assert!(doc.has_class(el, "tooltip"));
}

#[wasm_bindgen_test]
fn empty_style_value_clears_the_property() {
    let document = page(r#"<div id="box"></div>"#);
    let mut doc = web_document();
    let el = doc.intern(by_id(&document, "box"));
    let style = || {
        by_id(&document, "box")
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .style()
    };

    doc.set_style(el, "left", "12px");
    assert_eq!(style().get_property_value("left").expect("read"), "12px");

    doc.set_style(el, "left", "");
    assert_eq!(style().get_property_value("left").expect("read"), "");
}

#[wasm_bindgen_test]
fn next_sibling_skips_text_nodes() {
    let document = page(
        r#"<button id="q" class="faq-question">Q</button>
           text between
           <div id="answer">A</div>"#,
    );
    let doc = web_document();
    let question = doc.intern(by_id(&document, "q"));
    let answer = doc.intern(by_id(&document, "answer"));

    assert_eq!(doc.next_sibling(question), Some(answer));
    assert_eq!(doc.next_sibling(answer), None);
}

#[wasm_bindgen_test]
fn cancelled_timeout_does_not_settle() {
    let mut scheduler = WebScheduler::new(Weak::new());

    let cancelled = scheduler.schedule(Duration::from_millis(50));
    scheduler.cancel(cancelled);
    assert!(!scheduler.settle(cancelled));

    let live = scheduler.schedule(Duration::from_millis(50));
    assert_eq!(scheduler.pending(), 1);
    assert!(scheduler.settle(live));
    assert!(!scheduler.settle(live));
    assert_eq!(scheduler.pending(), 0);
}

#[wasm_bindgen_test]
fn click_bubbling_through_two_listeners_is_handled_once() {
    let document = page(
        r#"<button id="q" class="faq-question" aria-expanded="false">
             <div class="figure"><img id="figure-img" src="" alt="figure"></div>
           </button>
           <div id="answer" class="faq-answer"></div>"#,
    );
    let runtime = Runtime::boot(&PageConfig::default()).expect("boot");
    // Image, overlay, document keypress and the FAQ header.
    assert_eq!(runtime.borrow().listener_count(), 4);

    by_id(&document, "figure-img")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();

    let question = by_id(&document, "q");
    assert_eq!(question.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(by_id(&document, "answer").class_list().contains("active"));

    let overlay = document
        .query_selector(".lightbox")
        .expect("query")
        .expect("overlay appended");
    assert!(overlay.class_list().contains("active"));

    drop(runtime);
}
