//! # Waitlist Modal Widget
//!
//! State machine for the waitlist dialog: `Closed`/`Open`, with an orthogonal
//! `Idle`/`Submitting` sub-state that only matters while open.
//!
//! ## Transitions:
//! - `Closed → Open`: a trigger element was activated
//! - `Open → Closed`: close control, backdrop click or cancel key
//! - `Idle → Submitting`: form submission while open and idle
//! - `Submitting → Idle`: after the request settles, on every path
//!
//! The widget never touches the DOM or the network directly; it drives a
//! [`ModalView`] and is submitted through [`run_submission`] with a
//! [`Transport`].

use std::cell::RefCell;

use log::{debug, info, warn};

use crate::config::WaitlistConfig;
use crate::error::{TransportError, WidgetError};
use crate::feedback::Feedback;
use crate::request::{FormResponse, FormSubmission, SubmissionOutcome};
use crate::view::{ModalView, Transport};

/// Open/closed presentation and the element to return focus to
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<E> {
    pub is_open: bool,
    pub last_focused: Option<E>,
}

impl<E> Default for ModalState<E> {
    fn default() -> Self {
        Self {
            is_open: false,
            last_focused: None,
        }
    }
}

/// Busy flag of the submit control and the label to restore afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitState {
    pub busy: bool,
    pub original_label: String,
}

/// Input events the widget reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent<E> {
    /// An element carrying the open marker (or a descendant of one) was activated
    TriggerActivated(E),
    /// The close control inside the dialog was activated
    CloseActivated,
    /// A click landed inside the dialog subtree. `on_backdrop` is true only
    /// when the event target is the dialog container itself.
    DialogClicked { on_backdrop: bool },
    /// A key was pressed anywhere in the document (`KeyboardEvent.key`)
    KeyDown(String),
}

/// What the event binding must do with the native event after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Leave the event alone
    Continue,
    /// Suppress the default action only
    PreventDefault,
    /// Suppress the default action and keep every other handler from seeing it
    Stop,
}

pub struct ModalWidget<V: ModalView> {
    view: V,
    config: WaitlistConfig,
    modal: ModalState<V::Element>,
    feedback: Feedback,
    submit: SubmitState,
}

impl<V: ModalView> ModalWidget<V> {
    /// Bind the widget to `view`. The submit label is captured here, once, and
    /// restored verbatim after every submission.
    pub fn new(view: V, config: WaitlistConfig) -> Self {
        let original_label = view.submit_label();
        Self {
            view,
            config,
            modal: ModalState::default(),
            feedback: Feedback::none(),
            submit: SubmitState {
                busy: false,
                original_label,
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.busy
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn modal_state(&self) -> &ModalState<V::Element> {
        &self.modal
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    pub fn config(&self) -> &WaitlistConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Route an input event to its transition
    pub fn handle(&mut self, event: ModalEvent<V::Element>) -> Propagation {
        match event {
            ModalEvent::TriggerActivated(trigger) => {
                self.open(trigger);
                Propagation::Stop
            }
            ModalEvent::CloseActivated => {
                self.close();
                Propagation::PreventDefault
            }
            ModalEvent::DialogClicked { on_backdrop: true } => {
                self.close();
                Propagation::Continue
            }
            ModalEvent::DialogClicked { on_backdrop: false } => Propagation::Continue,
            ModalEvent::KeyDown(key) => {
                if key == self.config.cancel_key && self.modal.is_open {
                    self.close();
                }
                Propagation::Continue
            }
        }
    }

    /// `Closed → Open`. Re-activating a trigger while open only refreshes the
    /// remembered trigger and focus.
    pub fn open(&mut self, trigger: V::Element) {
        debug!("opening waitlist modal");
        self.modal.last_focused = Some(trigger);
        self.modal.is_open = true;
        self.clear_feedback();
        self.view.show_dialog();
        self.view.set_scroll_locked(true);
        self.view.focus_primary_field();
    }

    /// `Open → Closed`. Returns `false` if the dialog was already closed.
    pub fn close(&mut self) -> bool {
        if !self.modal.is_open {
            return false;
        }

        debug!("closing waitlist modal");
        self.modal.is_open = false;
        self.view.hide_dialog();
        self.view.set_scroll_locked(false);
        self.clear_feedback();

        if let Some(trigger) = self.modal.last_focused.as_ref() {
            if !self.view.restore_focus(trigger) {
                debug!("waitlist trigger no longer focusable, skipping focus restore");
            }
        }
        true
    }

    pub fn clear_feedback(&mut self) {
        self.set_feedback(Feedback::none());
    }

    fn set_feedback(&mut self, feedback: Feedback) {
        self.view.render_feedback(&feedback);
        self.feedback = feedback;
    }

    /// `Idle → Submitting`: clear feedback, mark the control busy and snapshot
    /// the form for the request.
    pub fn begin_submission(&mut self) -> Result<FormSubmission, WidgetError> {
        if !self.modal.is_open {
            return Err(WidgetError::Closed);
        }
        if self.submit.busy {
            return Err(WidgetError::SubmissionInFlight);
        }

        self.clear_feedback();
        self.submit.busy = true;
        let submitting = self.config.messages.submitting.clone();
        self.view.set_submit_busy(true, &submitting);

        let submission = self.view.form_submission();
        debug!("submitting waitlist form to {}", submission.action);
        Ok(submission)
    }

    /// Render the result of a settled request. Does not leave the busy state;
    /// that is [`ModalWidget::finish_submission`].
    pub fn settle(&mut self, result: Result<FormResponse, TransportError>) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from_result(result, &self.config.messages);
        match &outcome {
            SubmissionOutcome::Accepted => {
                info!("waitlist submission accepted");
                self.view.reset_form();
            }
            SubmissionOutcome::Rejected { message } => {
                warn!("waitlist submission rejected: {}", message);
            }
            SubmissionOutcome::NetworkFailure => {
                warn!("waitlist submission failed before a response arrived");
            }
        }

        let feedback = outcome.feedback(&self.config.messages);
        self.set_feedback(feedback);
        outcome
    }

    /// `Submitting → Idle`: re-enable the control with its original label.
    /// Returns `false` when there was nothing to restore.
    pub fn finish_submission(&mut self) -> bool {
        if !self.submit.busy {
            return false;
        }

        self.submit.busy = false;
        let label = self.submit.original_label.clone();
        self.view.set_submit_busy(false, &label);
        true
    }
}

/// Leaves the busy state when dropped, whether the submission settled or its
/// future was dropped mid-flight.
struct SubmissionGuard<'a, V: ModalView> {
    widget: &'a RefCell<ModalWidget<V>>,
}

impl<V: ModalView> Drop for SubmissionGuard<'_, V> {
    fn drop(&mut self) {
        match self.widget.try_borrow_mut() {
            Ok(mut widget) => {
                widget.finish_submission();
            }
            Err(_) => warn!("waitlist widget borrowed while restoring submit control"),
        }
    }
}

/// Run one submission: begin, await the transport, render the outcome and
/// restore the submit control.
///
/// The widget is never borrowed across the network await, so other events
/// (closing the dialog, key presses) are handled while the request is pending.
pub async fn run_submission<V, T>(
    widget: &RefCell<ModalWidget<V>>,
    transport: &T,
) -> Result<SubmissionOutcome, WidgetError>
where
    V: ModalView,
    T: Transport + ?Sized,
{
    let submission = widget.borrow_mut().begin_submission()?;
    let _guard = SubmissionGuard { widget };

    let result = transport.post_form(&submission).await;
    let outcome = widget.borrow_mut().settle(result);
    Ok(outcome)
}
