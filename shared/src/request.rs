//! Form submission payloads and interpretation of the endpoint's reply.
//!
//! The endpoint contract:
//! - `POST <form action>` with a form-encoded body and `Accept: application/json`
//! - any 2xx status is success, the body is ignored
//! - any other status may carry `{ "errors": [ { "message": "..." } ] }`

use serde::Deserialize;

use crate::config::Messages;
use crate::error::TransportError;
use crate::feedback::Feedback;

pub const ACCEPT_JSON: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Snapshot of the form at the moment it was submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    /// Resolved `action` URL of the form
    pub action: String,
    /// Field name/value pairs in document order
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// `application/x-www-form-urlencoded` request body
    pub fn encoded_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

/// Status and raw body of a settled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorsBody {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    message: Option<String>,
}

/// Human-readable text from a rejected submission's body.
///
/// Returns `None` when the body is not JSON, has no `errors` list, or none of
/// the listed errors carries a message.
pub fn rejection_message(body: &str) -> Option<String> {
    let parsed: ErrorsBody = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = parsed
        .errors
        .into_iter()
        .filter_map(|error| error.message)
        .filter(|message| !message.trim().is_empty())
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    Rejected { message: String },
    NetworkFailure,
}

impl SubmissionOutcome {
    pub fn from_result(result: Result<FormResponse, TransportError>, messages: &Messages) -> Self {
        match result {
            Ok(response) if response.is_success() => SubmissionOutcome::Accepted,
            Ok(response) => SubmissionOutcome::Rejected {
                message: rejection_message(&response.body)
                    .unwrap_or_else(|| messages.failure.clone()),
            },
            Err(_) => SubmissionOutcome::NetworkFailure,
        }
    }

    pub fn feedback(&self, messages: &Messages) -> Feedback {
        match self {
            SubmissionOutcome::Accepted => Feedback::success(messages.success.as_str()),
            SubmissionOutcome::Rejected { message } => Feedback::error(message.as_str()),
            SubmissionOutcome::NetworkFailure => Feedback::error(messages.network.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackKind;

    #[test]
    fn test_encoded_body_escapes_values() {
        let submission = FormSubmission::new("https://forms.example.com/f/abc")
            .with_field("email", "ada+news@example.com")
            .with_field("note", "hello world & more");

        assert_eq!(
            submission.encoded_body(),
            "email=ada%2Bnews%40example.com&note=hello+world+%26+more"
        );
    }

    #[test]
    fn test_success_status_range() {
        assert!(FormResponse::new(200, "").is_success());
        assert!(FormResponse::new(204, "").is_success());
        assert!(!FormResponse::new(302, "").is_success());
        assert!(!FormResponse::new(422, "").is_success());
        assert!(!FormResponse::new(500, "").is_success());
    }

    #[test]
    fn test_rejection_message_single_error() {
        let body = r#"{"errors":[{"message":"Email required"}]}"#;
        assert_eq!(rejection_message(body), Some("Email required".to_string()));
    }

    #[test]
    fn test_rejection_message_joins_with_spaces() {
        let body = r#"{"errors":[{"message":"Email required"},{"field":"name","message":"Name too long"}]}"#;
        assert_eq!(
            rejection_message(body),
            Some("Email required Name too long".to_string())
        );
    }

    #[test]
    fn test_rejection_message_unusable_bodies() {
        assert_eq!(rejection_message("<html>Bad Gateway</html>"), None);
        assert_eq!(rejection_message(""), None);
        assert_eq!(rejection_message(r#"{"errors":[]}"#), None);
        assert_eq!(rejection_message(r#"{"error":"nope"}"#), None);
        assert_eq!(rejection_message(r#"{"errors":[{"code":"x"}]}"#), None);
        assert_eq!(rejection_message(r#"{"errors":"Email required"}"#), None);
    }

    #[test]
    fn test_outcome_feedback() {
        let messages = Messages::default();

        let accepted = SubmissionOutcome::from_result(Ok(FormResponse::new(200, "{}")), &messages);
        assert_eq!(accepted, SubmissionOutcome::Accepted);
        assert_eq!(accepted.feedback(&messages), Feedback::success(messages.success.clone()));

        let rejected = SubmissionOutcome::from_result(Ok(FormResponse::new(500, "oops")), &messages);
        let feedback = rejected.feedback(&messages);
        assert_eq!(feedback.text, messages.failure);
        assert_eq!(feedback.kind, FeedbackKind::Error);

        let offline = SubmissionOutcome::from_result(
            Err(TransportError::Network("Failed to fetch".to_string())),
            &messages,
        );
        assert_eq!(offline, SubmissionOutcome::NetworkFailure);
        assert_eq!(offline.feedback(&messages), Feedback::error(messages.network.clone()));
    }
}
