use serde::{Deserialize, Serialize};

/// Digital identity registered on the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityBody {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub enrollment_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub callback_url: String,
    /// Opaque metadata blob, relayed verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl EntityBody {
    pub fn new(id: impl Into<String>, enrollment_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enrollment_id: enrollment_id.into(),
            ..Self::default()
        }
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = url.into();
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<serde_json::Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}

/// Entity record returned by a query.
///
/// Parsed from the same bytes as the response envelope, so every field
/// tolerates being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityPayload {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "EnrollmentId")]
    pub enrollment_id: String,
    #[serde(alias = "CallbackUrl")]
    pub callback_url: String,
    #[serde(alias = "Metadata")]
    pub metadata: Option<serde_json::Value>,
    #[serde(alias = "Status")]
    pub status: Option<i32>,
    #[serde(alias = "CreatedAt")]
    pub created_at: Option<i64>,
    #[serde(alias = "UpdatedAt")]
    pub updated_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_body_wire_shape() {
        let body = EntityBody::new("did:ara:001", "alice")
            .with_callback_url("http://172.16.199.6:8091/v2/test")
            .with_metadata(r#"{"name":"Army"}"#);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], "did:ara:001");
        assert_eq!(json["enrollment_id"], "alice");
        assert_eq!(json["callback_url"], "http://172.16.199.6:8091/v2/test");
        assert_eq!(json["metadata"], r#"{"name":"Army"}"#);
    }

    #[test]
    fn test_entity_body_skips_unset_fields() {
        let json = serde_json::to_value(EntityBody::new("e1", "bob")).unwrap();
        assert!(json.get("callback_url").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_entity_payload_from_envelope_bytes() {
        let raw = r#"{"code":0,"message":"","id":"did:ara:001","transaction_ids":[""]}"#;
        let payload: EntityPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.id, "did:ara:001");
        assert!(payload.metadata.is_none());
        assert!(payload.created_at.is_none());
    }

    #[test]
    fn test_entity_payload_legacy_keys() {
        let raw = r#"{"ErrCode":0,"Id":"did:ara:001","EnrollmentId":"alice","Status":1}"#;
        let payload: EntityPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.id, "did:ara:001");
        assert_eq!(payload.enrollment_id, "alice");
        assert_eq!(payload.status, Some(1));
    }
}
