use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw submission body. Every field is kept loosely typed and coerced later.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(default)]
    pub full_name: Value,
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub phone: Value,
    #[serde(default)]
    pub consent: Value,
    #[serde(default)]
    pub source: Value,
}

impl LeadSubmission {
    /// Parses a request body. A well-formed body that is not an object carries no fields.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_object() {
            serde_json::from_value(value)
        } else {
            Ok(Self::default())
        }
    }
}

/// Acknowledgement returned for an accepted lead.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadAck {
    pub ok: bool,
}
