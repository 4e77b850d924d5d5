//! User directory backed by the Firestore REST API.
//!
//! Records live as documents in the `users` collection, keyed by uid. Field
//! values use Firestore's typed JSON encoding (`stringValue`, `booleanValue`,
//! `mapValue`, ...), converted here to and from plain JSON.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, instrument};

use super::{BaseUserDirectory, USERS_COLLECTION};
use crate::config::FirestoreConfig;
use crate::domains::auth::models::{PhoneNumber, UserRecord};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct FirestoreUserDirectory {
    client: Client,
    config: FirestoreConfig,
    base_url: String,
}

/// One element of a `runQuery` response stream
#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreUserDirectory {
    pub fn new(config: FirestoreConfig) -> Self {
        Self::with_base_url(config, FIRESTORE_BASE_URL)
    }

    /// Point at a different endpoint (emulator)
    pub fn with_base_url(config: FirestoreConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.config.project_id
        )
    }
}

#[async_trait]
impl BaseUserDirectory for FirestoreUserDirectory {
    #[instrument(skip(self, phone_number), fields(phone_number = %phone_number))]
    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> Result<Option<UserRecord>> {
        let url = format!("{}:runQuery", self.documents_url());
        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&phone_query(phone_number))
            .send()
            .await
            .context("Firestore runQuery request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Firestore runQuery error ({}): {}", status, body);
            anyhow::bail!("Firestore returned {} for runQuery", status);
        }

        let items: Vec<RunQueryItem> = response
            .json()
            .await
            .context("Failed to parse Firestore runQuery response")?;

        let Some(document) = items.into_iter().find_map(|item| item.document) else {
            debug!("No user document for {}", phone_number);
            return Ok(None);
        };

        let record = document_to_record(document)?;
        debug!("Found user {} for {}", record.uid, phone_number);
        Ok(Some(record))
    }

    #[instrument(skip(self, record))]
    async fn write(&self, uid: &str, record: &UserRecord) -> Result<()> {
        let url = format!("{}/{}/{}", self.documents_url(), USERS_COLLECTION, uid);
        let value = serde_json::to_value(record)?;
        let fields = match encode_value(&value) {
            Value::Object(mut encoded) => encoded
                .remove("mapValue")
                .and_then(|m| m.get("fields").cloned())
                .unwrap_or_else(|| json!({})),
            _ => json!({}),
        };

        let response = self
            .client
            .patch(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({ "fields": fields }))
            .send()
            .await
            .context("Firestore write request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Firestore write error ({}): {}", status, body);
            anyhow::bail!("Firestore returned {} for write of {}", status, uid);
        }

        debug!("Wrote user document {}", uid);
        Ok(())
    }
}

/// Structured query: `users` where `phoneNumber == phone`, first match only
fn phone_query(phone_number: &PhoneNumber) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": USERS_COLLECTION }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "phoneNumber" },
                    "op": "EQUAL",
                    "value": { "stringValue": phone_number.as_str() }
                }
            },
            "limit": 1
        }
    })
}

/// Decode a document; the document id is exposed as `id` next to its fields.
fn document_to_record(document: Document) -> Result<UserRecord> {
    let id = document
        .name
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let mut object = Map::new();
    object.insert("id".to_string(), Value::String(id));
    for (key, value) in document.fields {
        object.insert(key, decode_value(&value));
    }

    serde_json::from_value(Value::Object(object)).context("User document has unexpected shape")
}

/// Plain JSON → Firestore typed value
pub(crate) fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Firestore typed value → plain JSON. Timestamps and references come back
/// as strings; unknown encodings as null.
pub(crate) fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| inner.clone()),
        "doubleValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| (k.clone(), decode_value(v)))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_query_shape() {
        let phone = PhoneNumber::parse("9876543210", "+91").unwrap();
        let query = phone_query(&phone);
        let filter = &query["structuredQuery"]["where"]["fieldFilter"];
        assert_eq!(filter["field"]["fieldPath"], "phoneNumber");
        assert_eq!(filter["value"]["stringValue"], "+919876543210");
        assert_eq!(query["structuredQuery"]["from"][0]["collectionId"], "users");
        assert_eq!(query["structuredQuery"]["limit"], 1);
    }

    #[test]
    fn test_encode_record_fields() {
        let encoded = encode_value(&json!({
            "uid": "u1",
            "isNewUser": true,
            "age": 30,
            "tags": ["a"],
        }));
        let fields = &encoded["mapValue"]["fields"];
        assert_eq!(fields["uid"], json!({ "stringValue": "u1" }));
        assert_eq!(fields["isNewUser"], json!({ "booleanValue": true }));
        assert_eq!(fields["age"], json!({ "integerValue": "30" }));
        assert_eq!(
            fields["tags"],
            json!({ "arrayValue": { "values": [{ "stringValue": "a" }] } })
        );
    }

    #[test]
    fn test_decode_nested_values() {
        let decoded = decode_value(&json!({
            "mapValue": { "fields": {
                "createdAt": { "timestampValue": "2024-05-01T10:00:00Z" },
                "count": { "integerValue": "3" },
                "missing": { "geoPointValue": { "latitude": 1.0 } },
            }}
        }));
        assert_eq!(
            decoded,
            json!({ "createdAt": "2024-05-01T10:00:00Z", "count": 3, "missing": null })
        );
    }

    #[test]
    fn test_document_to_record_exposes_id() {
        let document = Document {
            name: "projects/p/databases/(default)/documents/users/u1".to_string(),
            fields: serde_json::from_value(json!({
                "uid": { "stringValue": "u1" },
                "phoneNumber": { "stringValue": "+919876543210" },
                "firstName": { "stringValue": "Amy" },
            }))
            .unwrap(),
        };

        let record = document_to_record(document).unwrap();
        assert_eq!(record.uid, "u1");
        assert_eq!(record.first_name.as_deref(), Some("Amy"));
        assert_eq!(record.extra.get("id"), Some(&json!("u1")));
    }

    #[test]
    fn test_documents_url() {
        let directory = FirestoreUserDirectory::with_base_url(
            FirestoreConfig {
                project_id: "travelwise".to_string(),
                api_key: "key".to_string(),
            },
            "http://localhost:8080/v1/",
        );
        assert_eq!(
            directory.documents_url(),
            "http://localhost:8080/v1/projects/travelwise/databases/(default)/documents"
        );
    }
}
