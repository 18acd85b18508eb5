use serde::{Deserialize, Serialize};

/// Error body returned by the backend. Depending on the endpoint it carries
/// `error` (container cleanup, archive download) or `message` (everything
/// else), sometimes with the numeric status echoed back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl BackendErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Operator-facing text for a failed response body: the backend's `error`
/// or `message` field when the body is a JSON error object, else the body
/// verbatim.
pub fn backend_error_text(body: &str) -> String {
    serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.text().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field_then_message_then_raw_body() {
        assert_eq!(backend_error_text(r#"{"error":"docker down"}"#), "docker down");
        assert_eq!(
            backend_error_text(r#"{"status_code":500,"message":"Error: boom"}"#),
            "Error: boom"
        );
        assert_eq!(backend_error_text("Internal Server Error"), "Internal Server Error");
        assert_eq!(backend_error_text(r#"{"unrelated":1}"#), r#"{"unrelated":1}"#);
    }
}
