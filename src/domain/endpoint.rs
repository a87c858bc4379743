use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;
use validator::Validate;

/// Outcome bucket name (`SUCCESS`, `FAILURE`, ...) to `[timestamp, count]` pairs.
/// Timestamps are unix seconds.
pub type Traffic = BTreeMap<String, Vec<(i64, u64)>>;

/// Reads traffic samples whose numbers may arrive as floats. Fractional
/// timestamps and counts are truncated toward zero.
fn deserialize_traffic<'de, D>(deserializer: D) -> Result<Traffic, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Vec<(Number, Number)>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(bucket, samples)| {
            let samples = samples
                .into_iter()
                .map(|(timestamp, count)| {
                    let timestamp = timestamp
                        .as_i64()
                        .unwrap_or_else(|| timestamp.as_f64().unwrap_or_default().trunc() as i64);
                    let count = count
                        .as_u64()
                        .unwrap_or_else(|| count.as_f64().unwrap_or_default().max(0.0).trunc() as u64);
                    (timestamp, count)
                })
                .collect();
            (bucket, samples)
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default = "empty_definition")]
    pub definition: JsonValue,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub total_success: u64,
    #[serde(default)]
    pub total_failure: u64,
    #[serde(default, deserialize_with = "deserialize_traffic")]
    pub traffic: Traffic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewEndpoint {
    #[validate(length(min = 1, message = "Key is required"))]
    pub key: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub definition: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEndpoint {
    pub name: String,
    pub key: String,
    pub is_active: bool,
    pub definition: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    pub name: String,
    #[serde(default)]
    pub api_keys: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
}

pub fn empty_definition() -> JsonValue {
    JsonValue::Object(Default::default())
}
