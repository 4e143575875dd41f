use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// DOM identifiers, class names and product copy used by the waitlist modal.
///
/// Every field has a default, so a JSON override only needs the keys it changes:
///
/// ```
/// let config = shared::WaitlistConfig::from_json(r#"{ "cancel_key": "Esc" }"#).unwrap();
/// assert_eq!(config.cancel_key, "Esc");
/// assert_eq!(config.dialog_id, "waitlist-modal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    /// Element id of the dialog container (also the backdrop)
    pub dialog_id: String,
    /// Marker selector for elements that open the dialog, matched anywhere in the document
    pub open_selector: String,
    /// Marker selector for the close control inside the dialog
    pub close_selector: String,
    /// Field that receives focus when the dialog opens
    pub primary_field_selector: String,
    pub form_selector: String,
    /// Status region that shows success/error feedback
    pub message_selector: String,
    pub submit_selector: String,
    /// Class toggled on the dialog while it is open
    pub open_class: String,
    /// Class toggled on `<body>` to lock page scroll
    pub scroll_lock_class: String,
    pub success_class: String,
    pub error_class: String,
    /// `KeyboardEvent.key` value that closes the dialog
    pub cancel_key: String,
    pub messages: Messages,
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            dialog_id: "waitlist-modal".to_string(),
            open_selector: r#"[data-open-waitlist="true"]"#.to_string(),
            close_selector: r#"[data-close-waitlist="true"]"#.to_string(),
            primary_field_selector: "#waitlist-email".to_string(),
            form_selector: "form".to_string(),
            message_selector: ".waitlist-modal__message".to_string(),
            submit_selector: ".waitlist-modal__submit".to_string(),
            open_class: "is-open".to_string(),
            scroll_lock_class: "waitlist-modal-open".to_string(),
            success_class: "is-success".to_string(),
            error_class: "is-error".to_string(),
            cancel_key: "Escape".to_string(),
            messages: Messages::default(),
        }
    }
}

impl WaitlistConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// User-facing copy shown in the submit control and the feedback region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Submit label while a request is in flight
    pub submitting: String,
    pub success: String,
    /// Shown for any rejected submission without a usable `errors` list
    pub failure: String,
    pub network: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            submitting: "Submitting...".to_string(),
            success: "Thanks! You're on the waitlist.".to_string(),
            failure: "Sorry, something went wrong. Please try again.".to_string(),
            network: "Network error. Please check your connection and try again.".to_string(),
        }
    }
}
