use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PersistencePolicy;
use crate::errors::LeadError;
use crate::leads::dto::LeadSubmission;
use crate::leads::repo_types::{LeadRecord, RequestMeta};
use crate::state::AppState;

pub const SOURCE_MAX_CHARS: usize = 64;

/// Loose `local@domain.tld` check shared by the page and the endpoint.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Falsy values become empty text, everything else its textual form, trimmed.
pub(crate) fn coerce_text(v: &Value) -> String {
    if !is_truthy(v) {
        return String::new();
    }
    stringify(v).trim().to_string()
}

fn coerce_optional(v: &Value) -> Option<String> {
    Some(coerce_text(v)).filter(|s| !s.is_empty())
}

fn truncate_chars(mut s: String, max: usize) -> String {
    let cut = s.char_indices().nth(max).map(|(idx, _)| idx);
    if let Some(idx) = cut {
        s.truncate(idx);
    }
    s
}

/// Submission after coercion, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLead {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub consent: bool,
    pub source: Option<String>,
}

pub fn normalize(sub: &LeadSubmission) -> NormalizedLead {
    NormalizedLead {
        full_name: coerce_text(&sub.full_name),
        email: coerce_text(&sub.email),
        phone: coerce_optional(&sub.phone),
        consent: is_truthy(&sub.consent),
        source: coerce_optional(&sub.source).map(|s| truncate_chars(s, SOURCE_MAX_CHARS)),
    }
}

pub fn validate(lead: &NormalizedLead) -> Result<(), LeadError> {
    if lead.full_name.is_empty() || lead.email.is_empty() || !lead.consent {
        return Err(LeadError::MissingFields);
    }
    if !is_valid_email(&lead.email) {
        return Err(LeadError::InvalidEmail);
    }
    Ok(())
}

fn build_record(lead: NormalizedLead, meta: RequestMeta) -> LeadRecord {
    LeadRecord {
        id: Uuid::new_v4(),
        full_name: lead.full_name,
        email: lead.email,
        phone: lead.phone,
        consent: lead.consent,
        source: lead.source,
        user_agent: meta.user_agent,
        ip: meta.ip,
        created_at: OffsetDateTime::now_utc(),
    }
}

fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
}

/// Validates a submission and appends the resulting record to the store.
///
/// Under [`PersistencePolicy::BestEffort`] a failed append is logged and the
/// record is still returned, so callers acknowledge the lead either way.
pub async fn intake(
    st: &AppState,
    sub: LeadSubmission,
    meta: RequestMeta,
) -> Result<LeadRecord, LeadError> {
    let lead = normalize(&sub);
    if let Err(e) = validate(&lead) {
        warn!(reason = %e, "lead rejected");
        return Err(e);
    }

    let record = build_record(lead, meta);
    if let Err(e) = st.store.append(&record).await {
        match st.config.persistence {
            PersistencePolicy::BestEffort => {
                warn!(error = %e, lead_id = %record.id, "lead append failed; acknowledging anyway");
            }
            PersistencePolicy::Strict => {
                tracing::error!(error = %e, lead_id = %record.id, "lead append failed");
                return Err(LeadError::Persistence(e));
            }
        }
    } else {
        info!(
            lead_id = %record.id,
            email_domain = email_domain(&record.email),
            source = record.source.as_deref().unwrap_or("-"),
            "lead stored"
        );
    }
    Ok(record)
}
