use serde::{Deserialize, Serialize};

/// Body of `POST /v1/explain-error`.
///
/// Every field is optional. The error text is taken from the first
/// non-empty of `text`, `rawError`, `error`, `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub raw_error: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    /// Free-form caller context. Logged, not classified.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

impl ExplainRequest {
    /// Error text to classify; empty when no candidate field is set.
    pub fn raw_error(&self) -> &str {
        [&self.text, &self.raw_error, &self.error, &self.message]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn stack(&self) -> &str {
        self.stack.as_deref().unwrap_or("")
    }

    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn has_context(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|c| !c.is_null())
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_error_prefers_text() {
        let req: ExplainRequest = serde_json::from_str(
            r#"{"text": "from text", "rawError": "from raw", "message": "from message"}"#,
        )
        .unwrap();
        assert_eq!(req.raw_error(), "from text");
    }

    #[test]
    fn test_raw_error_skips_empty_fields() {
        let req: ExplainRequest =
            serde_json::from_str(r#"{"text": "", "rawError": "", "error": "boom"}"#).unwrap();
        assert_eq!(req.raw_error(), "boom");
    }

    #[test]
    fn test_missing_fields_normalize_to_empty() {
        let req: ExplainRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.raw_error(), "");
        assert_eq!(req.stack(), "");
        assert!(!req.has_text());
        assert!(!req.has_context());
    }

    #[test]
    fn test_context_presence() {
        let req: ExplainRequest =
            serde_json::from_str(r#"{"message": "x", "context": {"service": "api"}}"#).unwrap();
        assert!(req.has_context());
        assert!(!req.has_text());
    }

    #[test]
    fn test_health_response_serde() {
        let s = serde_json::to_string(&HealthResponse { ok: true }).unwrap();
        assert_eq!(s, r#"{"ok":true}"#);
    }
}
