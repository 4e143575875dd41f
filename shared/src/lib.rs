//! Host-independent core of the waitlist modal: state machine, submission
//! handling and the traits the browser binding implements.

pub mod config;
pub mod error;
pub mod feedback;
pub mod request;
pub mod view;
pub mod widget;

pub use config::{Messages, WaitlistConfig};
pub use error::{TransportError, WidgetError};
pub use feedback::{Feedback, FeedbackKind};
pub use request::{
    rejection_message, FormResponse, FormSubmission, SubmissionOutcome, ACCEPT_JSON,
    FORM_CONTENT_TYPE,
};
pub use view::{ModalView, Transport};
pub use widget::{run_submission, ModalEvent, ModalState, ModalWidget, Propagation, SubmitState};
