//! Seams between the widget and its environment.
//!
//! [`ModalView`] is the document the widget manipulates, [`Transport`] is the
//! network it submits through. The browser build implements both over
//! `web-sys`/`gloo`; tests use in-memory fakes.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::feedback::Feedback;
use crate::request::{FormResponse, FormSubmission};

pub trait ModalView {
    /// Handle to an element that may receive focus again later.
    ///
    /// The widget only keeps it to hand back to [`ModalView::restore_focus`],
    /// never to mutate the element.
    type Element: Clone;

    fn show_dialog(&mut self);
    fn hide_dialog(&mut self);
    fn set_scroll_locked(&mut self, locked: bool);
    fn focus_primary_field(&mut self);

    /// Move focus back to `element`. Returns `false` when the element is gone
    /// from the document or cannot take focus.
    fn restore_focus(&mut self, element: &Self::Element) -> bool;

    fn render_feedback(&mut self, feedback: &Feedback);

    /// Current text of the submit control
    fn submit_label(&self) -> String;

    /// Disable and relabel the submit control (`busy = true`), or re-enable it
    /// with `label`.
    fn set_submit_busy(&mut self, busy: bool, label: &str);

    fn reset_form(&mut self);
    fn form_submission(&self) -> FormSubmission;
}

#[async_trait(?Send)]
pub trait Transport {
    /// POST the form and wait for the response. `Err` only when no response
    /// arrived at all; HTTP error statuses are `Ok`.
    async fn post_form(&self, submission: &FormSubmission) -> Result<FormResponse, TransportError>;
}
