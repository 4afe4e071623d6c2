use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One accepted submission as it is written to the lead store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub consent: bool,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Request metadata captured alongside the submitted fields.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[cfg(test)]
mod record_tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn serializes_with_camel_case_keys_and_nulls() {
        let record = LeadRecord {
            id: Uuid::nil(),
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: None,
            consent: true,
            source: None,
            user_agent: Some("curl/8.0".into()),
            ip: None,
            created_at: datetime!(2024-05-01 12:30:00 UTC),
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["fullName"], "Jane Doe");
        assert_eq!(v["userAgent"], "curl/8.0");
        assert!(v["phone"].is_null());
        assert!(v["source"].is_null());
        assert!(v["ip"].is_null());
        assert_eq!(v["createdAt"], "2024-05-01T12:30:00Z");
        assert_eq!(v.as_object().unwrap().len(), 9);
    }
}
