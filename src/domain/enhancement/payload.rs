//! Structured enhancement payload

use serde::{Deserialize, Serialize};

/// The validated result contract for rewrite calls: the rewritten text plus
/// optional metadata the model may volunteer. Extra fields in the wire JSON
/// are tolerated and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementPayload {
    /// The rewritten text. Validation rejects payloads where this is empty.
    pub enhanced_text: String,

    /// Model self-report, if the provider included one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Free-form remarks about the rewrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_payload() {
        let payload: EnhancementPayload =
            serde_json::from_str(r#"{"enhancedText": "Hello"}"#).unwrap();
        assert_eq!(payload.enhanced_text, "Hello");
        assert!(payload.model.is_none());
        assert!(payload.notes.is_none());
    }

    #[test]
    fn decodes_full_payload() {
        let payload: EnhancementPayload = serde_json::from_str(
            r#"{"enhancedText": "Hi", "model": "claude-sonnet-4-5", "notes": "tightened"}"#,
        )
        .unwrap();
        assert_eq!(payload.model.as_deref(), Some("claude-sonnet-4-5"));
        assert_eq!(payload.notes.as_deref(), Some("tightened"));
    }

    #[test]
    fn tolerates_unknown_fields() {
        let payload: EnhancementPayload =
            serde_json::from_str(r#"{"enhancedText": "Hi", "confidence": 0.9}"#).unwrap();
        assert_eq!(payload.enhanced_text, "Hi");
    }

    #[test]
    fn rejects_missing_enhanced_text() {
        let result = serde_json::from_str::<EnhancementPayload>(r#"{"notes": "no text"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn encode_decode_preserves_escapes_exactly() {
        let original = EnhancementPayload {
            enhanced_text: "She said \"ship it\".\nThen she left.\t(really)".to_string(),
            model: None,
            notes: Some("quote\\backslash".to_string()),
        };
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: EnhancementPayload = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_options() {
        let payload = EnhancementPayload {
            enhanced_text: "x".to_string(),
            model: None,
            notes: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"enhancedText":"x"}"#);
    }
}
