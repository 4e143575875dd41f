//! Binds the waitlist widget to document events.
//!
//! Listeners:
//! - document `click`, capture phase: delegated trigger matching via `closest()`
//! - close control `click`
//! - dialog `click`: backdrop detection by target identity
//! - document `keydown`: cancel key
//! - form `submit`: background submission

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use log::{debug, warn};
use shared::{run_submission, ModalEvent, ModalWidget, Propagation, WaitlistConfig, WidgetError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, KeyboardEvent, Node};

use super::modal_dom::DomView;
use crate::services::api::FetchTransport;

/// Attribute on the dialog carrying a JSON `WaitlistConfig` override
pub const CONFIG_ATTRIBUTE: &str = "data-waitlist-config";

type SharedWidget = Rc<RefCell<ModalWidget<DomView>>>;

/// A mounted widget and its listeners. Dropping it unbinds every listener.
pub struct MountedWaitlist {
    widget: SharedWidget,
    listeners: Vec<EventListener>,
}

impl MountedWaitlist {
    #[cfg(test)]
    pub fn widget(&self) -> &SharedWidget {
        &self.widget
    }

    /// Keep the listeners bound for the rest of the page's life
    pub fn keep_alive(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

/// Locate the dialog and wire its listeners.
///
/// Fails with [`WidgetError::MissingElement`] when the page has no dialog.
pub fn mount(document: &Document, config: WaitlistConfig) -> Result<MountedWaitlist, WidgetError> {
    let config = match document.get_element_by_id(&config.dialog_id) {
        Some(dialog) => config_override(&dialog, config),
        None => config,
    };

    let view = DomView::locate(document, &config)?;
    let dialog = view.dialog().clone();
    let close_control = view.close_control().cloned();
    let form = if view.can_submit() { view.form().cloned() } else { None };

    let widget: SharedWidget = Rc::new(RefCell::new(ModalWidget::new(view, config.clone())));
    let mut listeners = Vec::new();

    listeners.push(bind_triggers(document, &widget, config.open_selector.clone()));

    if let Some(close_control) = close_control {
        let widget = Rc::clone(&widget);
        listeners.push(EventListener::new_with_options(
            &close_control,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let propagation = dispatch(&widget, ModalEvent::CloseActivated);
                apply_propagation(event, propagation);
            },
        ));
    }

    {
        let widget = Rc::clone(&widget);
        let backdrop = dialog.clone();
        listeners.push(EventListener::new(&dialog, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|target| backdrop.is_same_node(Some(&target)));
            dispatch(&widget, ModalEvent::DialogClicked { on_backdrop });
        }));
    }

    {
        let widget = Rc::clone(&widget);
        listeners.push(EventListener::new(document, "keydown", move |event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                dispatch(&widget, ModalEvent::KeyDown(key_event.key()));
            }
        }));
    }

    match form {
        Some(form) => {
            let widget = Rc::clone(&widget);
            listeners.push(EventListener::new_with_options(
                &form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    submit(Rc::clone(&widget));
                },
            ));
        }
        None => debug!("waitlist dialog has no form/submit control, submission not wired"),
    }

    debug!("waitlist modal mounted with {} listeners", listeners.len());
    Ok(MountedWaitlist { widget, listeners })
}

/// One delegated capture-phase listener on the document, so triggers added
/// after mount work and the modal sees the click before any other handler.
fn bind_triggers(document: &Document, widget: &SharedWidget, open_selector: String) -> EventListener {
    let widget = Rc::clone(widget);
    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };

    EventListener::new_with_options(document, "click", options, move |event| {
        let Some(trigger) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(&open_selector).ok().flatten())
        else {
            return;
        };

        let propagation = dispatch(&widget, ModalEvent::TriggerActivated(trigger));
        apply_propagation(event, propagation);
    })
}

fn submit(widget: SharedWidget) {
    spawn_local(async move {
        match run_submission(&widget, &FetchTransport::new()).await {
            Ok(outcome) => debug!("waitlist submission settled: {:?}", outcome),
            Err(e) => debug!("waitlist submission ignored: {}", e),
        }
    });
}

fn dispatch(widget: &SharedWidget, event: ModalEvent<Element>) -> Propagation {
    match widget.try_borrow_mut() {
        Ok(mut widget) => widget.handle(event),
        Err(_) => {
            warn!("waitlist widget busy, dropping {:?}", event);
            Propagation::Continue
        }
    }
}

fn apply_propagation(event: &Event, propagation: Propagation) {
    match propagation {
        Propagation::Continue => {}
        Propagation::PreventDefault => event.prevent_default(),
        Propagation::Stop => {
            event.prevent_default();
            event.stop_propagation();
            event.stop_immediate_propagation();
        }
    }
}

fn config_override(dialog: &Element, config: WaitlistConfig) -> WaitlistConfig {
    let Some(json) = dialog.get_attribute(CONFIG_ATTRIBUTE) else {
        return config;
    };

    match WaitlistConfig::from_json(&json) {
        Ok(mut parsed) => {
            // The dialog was already found by the caller's id
            parsed.dialog_id = config.dialog_id;
            parsed
        }
        Err(e) => {
            warn!("ignoring {}: {}", CONFIG_ATTRIBUTE, e);
            config
        }
    }
}
