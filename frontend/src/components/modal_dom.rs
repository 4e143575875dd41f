//! `ModalView` over the live document.

use shared::{Feedback, FormSubmission, ModalView, WaitlistConfig, WidgetError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FormData, HtmlElement, HtmlFormElement};

/// Elements of the waitlist dialog, looked up once at mount time.
///
/// Everything except the dialog itself is optional: a page without a form
/// still gets a working open/close dialog.
pub struct DomView {
    document: Document,
    dialog: Element,
    form: Option<HtmlFormElement>,
    primary_field: Option<HtmlElement>,
    message: Option<Element>,
    submit: Option<Element>,
    close_control: Option<Element>,
    config: WaitlistConfig,
}

impl DomView {
    pub fn locate(document: &Document, config: &WaitlistConfig) -> Result<Self, WidgetError> {
        let dialog = document
            .get_element_by_id(&config.dialog_id)
            .ok_or_else(|| WidgetError::MissingElement(format!("#{}", config.dialog_id)))?;

        let find = |selector: &str| dialog.query_selector(selector).ok().flatten();

        Ok(Self {
            document: document.clone(),
            form: find(config.form_selector.as_str()).and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
            primary_field: find(config.primary_field_selector.as_str())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            message: find(config.message_selector.as_str()),
            submit: find(config.submit_selector.as_str()),
            close_control: find(config.close_selector.as_str()),
            dialog,
            config: config.clone(),
        })
    }

    pub fn dialog(&self) -> &Element {
        &self.dialog
    }

    pub fn form(&self) -> Option<&HtmlFormElement> {
        self.form.as_ref()
    }

    pub fn close_control(&self) -> Option<&Element> {
        self.close_control.as_ref()
    }

    /// Submission is only wired when both the form and its submit control exist
    pub fn can_submit(&self) -> bool {
        self.form.is_some() && self.submit.is_some()
    }

    fn form_fields(form: &HtmlFormElement) -> Vec<(String, String)> {
        let Ok(data) = FormData::new_with_form(form) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };

        entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.dyn_into::<js_sys::Array>().ok())
            // File inputs yield Blob values and have no text encoding
            .filter_map(|pair| Some((pair.get(0).as_string()?, pair.get(1).as_string()?)))
            .collect()
    }
}

impl ModalView for DomView {
    type Element = Element;

    fn show_dialog(&mut self) {
        let _ = self.dialog.class_list().add_1(&self.config.open_class);
    }

    fn hide_dialog(&mut self) {
        let _ = self.dialog.class_list().remove_1(&self.config.open_class);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if let Some(body) = self.document.body() {
            let _ = body
                .class_list()
                .toggle_with_force(&self.config.scroll_lock_class, locked);
        }
    }

    fn focus_primary_field(&mut self) {
        if let Some(field) = &self.primary_field {
            let _ = field.focus();
        }
    }

    fn restore_focus(&mut self, element: &Element) -> bool {
        if !element.is_connected() {
            return false;
        }
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.focus().is_ok(),
            None => false,
        }
    }

    fn render_feedback(&mut self, feedback: &Feedback) {
        let Some(message) = &self.message else {
            return;
        };
        message.set_text_content(Some(&feedback.text));

        let classes = message.class_list();
        let _ = classes.remove_2(&self.config.success_class, &self.config.error_class);
        if let Some(class) = feedback.kind.css_class(&self.config) {
            let _ = classes.add_1(class);
        }
    }

    fn submit_label(&self) -> String {
        self.submit
            .as_ref()
            .and_then(|submit| submit.text_content())
            .unwrap_or_default()
    }

    fn set_submit_busy(&mut self, busy: bool, label: &str) {
        let Some(submit) = &self.submit else {
            return;
        };

        if busy {
            let _ = submit.set_attribute("aria-busy", "true");
        } else {
            let _ = submit.remove_attribute("aria-busy");
        }
        let _ = submit.toggle_attribute_with_force("disabled", busy);
        submit.set_text_content(Some(label));
    }

    fn reset_form(&mut self) {
        if let Some(form) = &self.form {
            form.reset();
        }
    }

    fn form_submission(&self) -> FormSubmission {
        match &self.form {
            Some(form) => FormSubmission {
                action: form.action(),
                fields: Self::form_fields(form),
            },
            None => FormSubmission::default(),
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::FeedbackKind;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
        <div id="waitlist-modal" class="waitlist-modal">
          <div class="waitlist-modal__content">
            <button type="button" data-close-waitlist="true">Close</button>
            <form action="https://forms.example.com/f/waitlist" method="POST">
              <input id="waitlist-email" name="email" type="email" value="ada@example.com">
              <input name="source" type="hidden" value="hero">
              <button class="waitlist-modal__submit" type="submit">Join the waitlist</button>
            </form>
            <p class="waitlist-modal__message" role="status"></p>
          </div>
        </div>
    "#;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn fixture(markup: &str) -> DomView {
        let document = document();
        document.body().unwrap().set_inner_html(markup);
        DomView::locate(&document, &WaitlistConfig::default()).unwrap()
    }

    fn submit_button() -> Element {
        document().query_selector(".waitlist-modal__submit").unwrap().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_locate_without_dialog_reports_missing() {
        let document = document();
        document.body().unwrap().set_inner_html("<main></main>");

        let result = DomView::locate(&document, &WaitlistConfig::default());
        assert!(matches!(result, Err(WidgetError::MissingElement(id)) if id == "#waitlist-modal"));
    }

    #[wasm_bindgen_test]
    fn test_dialog_without_form_cannot_submit() {
        let view = fixture(r#"<div id="waitlist-modal"><button data-close-waitlist="true">x</button></div>"#);
        assert!(!view.can_submit());
        assert!(view.close_control().is_some());
        assert_eq!(view.submit_label(), "");
    }

    #[wasm_bindgen_test]
    fn test_show_hide_and_scroll_lock() {
        let mut view = fixture(MARKUP);
        let body = document().body().unwrap();

        view.show_dialog();
        view.set_scroll_locked(true);
        assert!(view.dialog().class_list().contains("is-open"));
        assert!(body.class_list().contains("waitlist-modal-open"));

        view.hide_dialog();
        view.set_scroll_locked(false);
        assert!(!view.dialog().class_list().contains("is-open"));
        assert!(!body.class_list().contains("waitlist-modal-open"));
    }

    #[wasm_bindgen_test]
    fn test_render_feedback_swaps_classes() {
        let mut view = fixture(MARKUP);
        let message = document().query_selector(".waitlist-modal__message").unwrap().unwrap();

        view.render_feedback(&Feedback::error("Email required"));
        assert_eq!(message.text_content().unwrap(), "Email required");
        assert!(message.class_list().contains("is-error"));

        view.render_feedback(&Feedback::success("Thanks! You're on the waitlist."));
        assert!(message.class_list().contains("is-success"));
        assert!(!message.class_list().contains("is-error"));

        view.render_feedback(&Feedback::none());
        assert_eq!(message.text_content().unwrap(), "");
        assert!(!message.class_list().contains("is-success"));
        assert_eq!(Feedback::none().kind, FeedbackKind::None);
    }

    #[wasm_bindgen_test]
    fn test_busy_state_round_trip() {
        let mut view = fixture(MARKUP);
        let original = view.submit_label();
        assert_eq!(original, "Join the waitlist");

        view.set_submit_busy(true, "Submitting...");
        let button = submit_button();
        assert_eq!(button.get_attribute("aria-busy").as_deref(), Some("true"));
        assert!(button.has_attribute("disabled"));
        assert_eq!(button.text_content().unwrap(), "Submitting...");

        view.set_submit_busy(false, &original);
        assert!(!button.has_attribute("aria-busy"));
        assert!(!button.has_attribute("disabled"));
        assert_eq!(button.text_content().unwrap(), "Join the waitlist");
    }

    #[wasm_bindgen_test]
    fn test_form_submission_snapshot_and_reset() {
        let mut view = fixture(MARKUP);

        let submission = view.form_submission();
        assert_eq!(submission.action, "https://forms.example.com/f/waitlist");
        assert_eq!(
            submission.fields,
            vec![
                ("email".to_string(), "ada@example.com".to_string()),
                ("source".to_string(), "hero".to_string()),
            ]
        );

        let input: web_sys::HtmlInputElement = document()
            .get_element_by_id("waitlist-email")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_value("grace@example.com");
        view.reset_form();
        assert_eq!(input.value(), "ada@example.com");
    }

    #[wasm_bindgen_test]
    fn test_restore_focus_skips_detached_elements() {
        let mut view = fixture(MARKUP);
        let document = document();

        let trigger = document.create_element("button").unwrap();
        assert!(!view.restore_focus(&trigger));

        document.body().unwrap().append_child(&trigger).unwrap();
        assert!(view.restore_focus(&trigger));
    }
}
