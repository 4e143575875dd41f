use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{FormResponse, FormSubmission, Transport, TransportError, ACCEPT_JSON, FORM_CONTENT_TYPE};

/// Submits the waitlist form with `fetch`
#[derive(Debug, Clone, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_form(&self, submission: &FormSubmission) -> Result<FormResponse, TransportError> {
        let request = Request::post(&submission.action)
            .header("Accept", ACCEPT_JSON)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(submission.encoded_body())
            .map_err(|e| TransportError::Network(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        // Success bodies are ignored; an unreadable error body degrades to the
        // generic failure message downstream.
        let body = if response.ok() {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };

        Ok(FormResponse { status, body })
    }
}
