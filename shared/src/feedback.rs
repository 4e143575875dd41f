use serde::{Deserialize, Serialize};

use crate::config::WaitlistConfig;

/// Styling applied to the feedback region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    #[default]
    None,
    Success,
    Error,
}

impl FeedbackKind {
    /// Class name for this kind, `None` for unstyled feedback
    pub fn css_class<'a>(&self, config: &'a WaitlistConfig) -> Option<&'a str> {
        match self {
            FeedbackKind::None => None,
            FeedbackKind::Success => Some(&config.success_class),
            FeedbackKind::Error => Some(&config.error_class),
        }
    }
}

/// Text and styling currently rendered in the status region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FeedbackKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FeedbackKind::Error,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.kind == FeedbackKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class_mapping() {
        let config = WaitlistConfig::default();
        assert_eq!(FeedbackKind::None.css_class(&config), None);
        assert_eq!(FeedbackKind::Success.css_class(&config), Some("is-success"));
        assert_eq!(FeedbackKind::Error.css_class(&config), Some("is-error"));
    }

    #[test]
    fn test_constructors() {
        assert!(Feedback::none().is_empty());
        assert!(!Feedback::error("Email required").is_empty());
        assert_eq!(Feedback::success("ok").kind, FeedbackKind::Success);
    }
}
