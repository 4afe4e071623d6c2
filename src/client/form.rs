use serde::Serialize;
use tracing::{info, warn};

use super::transport::LeadTransport;
use crate::leads::services::is_valid_email;

const FALLBACK_REJECTED: &str = "Failed to submit";
const FALLBACK_FAILED: &str = "Something went wrong";

/// Advisory checks run before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter your name and email.")]
    MissingNameOrEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please agree to be contacted to continue.")]
    ConsentRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing { error: Option<String> },
    Submitting,
    /// Terminal: a successful form never goes back to editing.
    Succeeded,
}

/// Body sent to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// View-model behind the lead form.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub consent: bool,
    /// Attribution tag taken from the page's `utm_source` query parameter.
    source: Option<String>,
    phase: Phase,
}

impl LeadForm {
    pub fn new(source: Option<String>) -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            consent: false,
            source: source.filter(|s| !s.is_empty()),
            phase: Phase::Editing { error: None },
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    /// The submit control is enabled only while editing.
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, Phase::Editing { .. })
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.full_name.is_empty() || self.email.is_empty() {
            return Err(FormError::MissingNameOrEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if !self.consent {
            return Err(FormError::ConsentRequired);
        }
        Ok(())
    }

    pub fn payload(&self) -> LeadPayload {
        LeadPayload {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: Some(self.phone.clone()).filter(|p| !p.is_empty()),
            consent: self.consent,
            source: self.source.clone(),
        }
    }

    fn fail(&mut self, message: String) {
        self.phase = Phase::Editing {
            error: Some(message),
        };
    }

    /// Validates and sends the form once. Ignored unless the form is editable.
    pub async fn submit<T: LeadTransport + ?Sized>(&mut self, transport: &T) -> &Phase {
        if !self.can_submit() {
            return &self.phase;
        }
        if let Err(e) = self.validate() {
            self.fail(e.to_string());
            return &self.phase;
        }

        self.phase = Phase::Submitting;
        match transport.post_lead(&self.payload()).await {
            Ok(res) if res.is_success() => {
                info!(status = res.status, "lead submitted");
                self.phase = Phase::Succeeded;
            }
            Ok(res) => {
                warn!(status = res.status, "lead submission rejected");
                let message = if res.body.is_empty() {
                    FALLBACK_REJECTED.to_string()
                } else {
                    res.body
                };
                self.fail(message);
            }
            Err(e) => {
                warn!(error = %e, "lead submission failed");
                let message = e.to_string();
                self.fail(if message.is_empty() {
                    FALLBACK_FAILED.to_string()
                } else {
                    message
                });
            }
        }
        &self.phase
    }
}

#[cfg(test)]
mod form_tests {
    use super::*;
    use crate::client::transport::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedTransport {
        reply: Mutex<Option<anyhow::Result<TransportResponse>>>,
        sent: Mutex<Vec<LeadPayload>>,
    }

    impl ScriptedTransport {
        fn replying(reply: anyhow::Result<TransportResponse>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn ok() -> Self {
            Self::replying(Ok(TransportResponse {
                status: 200,
                body: r#"{"ok":true}"#.into(),
            }))
        }

        fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LeadTransport for ScriptedTransport {
        async fn post_lead(&self, payload: &LeadPayload) -> anyhow::Result<TransportResponse> {
            self.sent.lock().unwrap().push(payload.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply")))
        }
    }

    fn filled(source: Option<&str>) -> LeadForm {
        let mut form = LeadForm::new(source.map(String::from));
        form.full_name = "Jane Doe".into();
        form.email = "jane@example.com".into();
        form.consent = true;
        form
    }

    #[test]
    fn validation_messages_in_order() {
        let mut form = LeadForm::new(None);
        assert_eq!(form.validate(), Err(FormError::MissingNameOrEmail));
        form.full_name = "Jane".into();
        form.email = "jane".into();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
        form.email = "jane@example.com".into();
        assert_eq!(form.validate(), Err(FormError::ConsentRequired));
        form.consent = true;
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn payload_omits_empty_optionals() {
        let form = filled(None);
        let json = serde_json::to_value(form.payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "fullName": "Jane Doe", "email": "jane@example.com", "consent": true })
        );

        let mut form = filled(Some("tiktok"));
        form.phone = "555-0100".into();
        let json = serde_json::to_value(form.payload()).unwrap();
        assert_eq!(json["phone"], "555-0100");
        assert_eq!(json["source"], "tiktok");
    }

    #[tokio::test]
    async fn invalid_form_makes_no_request() {
        let transport = ScriptedTransport::ok();
        let mut form = filled(None);
        form.consent = false;

        form.submit(&transport).await;
        assert_eq!(transport.calls(), 0);
        assert_eq!(form.error(), Some("Please agree to be contacted to continue."));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn success_is_terminal() {
        let transport = ScriptedTransport::ok();
        let mut form = filled(Some("ig"));

        assert_eq!(form.submit(&transport).await, &Phase::Succeeded);
        assert!(!form.can_submit());

        // a second attempt is ignored rather than re-sent
        form.submit(&transport).await;
        assert_eq!(transport.calls(), 1);
        assert_eq!(form.phase(), &Phase::Succeeded);
        assert_eq!(transport.sent.lock().unwrap()[0].source.as_deref(), Some("ig"));
    }

    #[tokio::test]
    async fn rejection_surfaces_response_text() {
        let transport = ScriptedTransport::replying(Ok(TransportResponse {
            status: 400,
            body: r#"{"message":"Invalid email"}"#.into(),
        }));
        let mut form = filled(None);

        form.submit(&transport).await;
        assert_eq!(form.error(), Some(r#"{"message":"Invalid email"}"#));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn empty_rejection_uses_fallback() {
        let transport = ScriptedTransport::replying(Ok(TransportResponse {
            status: 502,
            body: String::new(),
        }));
        let mut form = filled(None);

        form.submit(&transport).await;
        assert_eq!(form.error(), Some("Failed to submit"));
    }

    #[tokio::test]
    async fn transport_error_is_surfaced_and_form_reenabled() {
        let transport = ScriptedTransport::replying(Err(anyhow::anyhow!("connection refused")));
        let mut form = filled(None);

        form.submit(&transport).await;
        assert_eq!(form.error(), Some("connection refused"));
        assert!(form.can_submit());
    }
}
