//! Page runtime: owns the document, the timers and the behaviors, and routes
//! browser callbacks into them.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    ElementId, EventKind, EventSource, FolioError, FolioResult, PageConfig, TimerHandle,
};
use folio_ui::PageBehaviors;
use gloo::events::EventListener;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::bridge::{translate, RawEvent};
use crate::dom::WebDocument;
use crate::scheduler::WebScheduler;

thread_local! {
    static RUNTIME: RefCell<Option<Rc<RefCell<Runtime>>>> = const { RefCell::new(None) };
    static BOOT_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

/// Everything attached to the live page.
pub struct Runtime {
    doc: WebDocument,
    scheduler: WebScheduler,
    behaviors: PageBehaviors,
    /// Registered for as long as the runtime lives.
    listeners: Vec<EventListener>,
    /// Last click delivered, so nested listeners see each click once.
    last_click: Option<Event>,
}

impl Runtime {
    /// Attaches the behaviors to the current page and installs listeners.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid configuration or when the browser refuses
    /// to build overlays.
    pub fn boot(config: &PageConfig) -> FolioResult<Rc<RefCell<Self>>> {
        let window =
            web_sys::window().ok_or_else(|| FolioError::Host("no global window".to_string()))?;
        let mut doc = WebDocument::from_window(window)?;
        let behaviors = PageBehaviors::attach(&mut doc, config)?;

        let runtime = Rc::new_cyclic(|weak| {
            RefCell::new(Self {
                doc,
                scheduler: WebScheduler::new(weak.clone()),
                behaviors,
                listeners: Vec::new(),
                last_click: None,
            })
        });
        Self::install_listeners(&runtime);
        Ok(runtime)
    }

    /// Number of DOM listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn install_listeners(runtime: &Rc<RefCell<Self>>) {
        let subscriptions = runtime.borrow().behaviors.subscriptions();
        tracing::info!(listeners = subscriptions.len(), "installing listeners");

        let mut listeners = Vec::with_capacity(subscriptions.len());
        for subscription in subscriptions {
            let (target, listener): (EventTarget, _) = {
                let this = runtime.borrow();
                match subscription.source {
                    EventSource::Document => (this.doc.raw().clone().into(), None),
                    EventSource::Element(id) => match this.doc.element(id) {
                        Some(element) => (element.into(), Some(id)),
                        None => {
                            tracing::warn!(element = id.raw(), "listener target vanished");
                            continue;
                        }
                    },
                }
            };

            let weak = Rc::downgrade(runtime);
            let kind = subscription.kind;
            listeners.push(EventListener::new(&target, kind.dom_name(), move |event: &Event| {
                if let Some(runtime) = weak.upgrade() {
                    Self::dispatch(&runtime, kind, listener, event);
                }
            }));
        }
        runtime.borrow_mut().listeners = listeners;
    }

    /// Routes one DOM event into the behaviors. A click bubbling through
    /// several subscribed elements is handled by the first listener only.
    fn dispatch(
        runtime: &Rc<RefCell<Self>>,
        kind: EventKind,
        listener: Option<ElementId>,
        event: &Event,
    ) {
        let Ok(mut guard) = runtime.try_borrow_mut() else {
            tracing::warn!(kind = kind.dom_name(), "re-entrant event dropped");
            return;
        };
        let this = &mut *guard;

        let mut target = None;
        if kind == EventKind::Click {
            if this.last_click.as_ref() == Some(event) {
                return;
            }
            this.last_click = Some(event.clone());
            target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|element| this.doc.intern(element));
        }
        let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);

        let raw = RawEvent {
            listener,
            target,
            key: key.as_deref(),
        };
        let Some(input) = translate(kind, &raw) else {
            return;
        };
        let handled = this.behaviors.handle(&mut this.doc, &mut this.scheduler, &input);
        tracing::trace!(?input, handled, "event dispatched");
    }

    pub(crate) fn fire(runtime: &Rc<RefCell<Self>>, handle: TimerHandle) {
        let Ok(mut guard) = runtime.try_borrow_mut() else {
            tracing::warn!(timer = handle.0, "re-entrant timer dropped");
            return;
        };
        let this = &mut *guard;
        if this.scheduler.settle(handle) {
            this.behaviors.on_timer(&mut this.doc, handle);
        }
    }
}

fn boot_and_keep() {
    match Runtime::boot(&PageConfig::default()) {
        Ok(runtime) => RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime)),
        Err(e) => tracing::error!(error = %e, "page behaviors failed to attach"),
    }
}

/// Module entry point: attaches the page behaviors once the DOM is parsed.
///
/// # Errors
///
/// Returns an error when there is no document to attach to.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_| boot_and_keep());
        BOOT_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    } else {
        boot_and_keep();
    }
    Ok(())
}
