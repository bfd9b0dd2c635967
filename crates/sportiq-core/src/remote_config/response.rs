use serde_json::Value;
use url::Url;

use crate::error::FetchError;

/// Body returned by the remote config endpoint.
///
/// Only `success` and `quiz` drive routing; `link` is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfigResponse {
    pub success: bool,
    pub destination: String,
    pub link: Option<String>,
}

impl RemoteConfigResponse {
    /// Parse a raw response body.
    ///
    /// # Errors
    /// Returns `FetchError::Malformed` if the body is not a JSON object.
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    /// # Errors
    /// Returns `FetchError::Malformed` if `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self, FetchError> {
        let obj = value
            .as_object()
            .ok_or_else(|| FetchError::Malformed("expected a JSON object".into()))?;

        let success = match obj.get("success") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        };
        let destination = obj
            .get("quiz")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let link = obj.get("link").and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            success,
            destination,
            link,
        })
    }

    /// The redirect target, when the response is a success carrying a valid URL.
    pub fn valid_destination(&self) -> Option<Url> {
        if !self.success {
            return None;
        }
        validate_destination(&self.destination)
    }
}

/// An absolute http(s) URL, or `None`.
pub fn validate_destination(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = Url::parse(trimmed).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boolean_success() {
        let resp =
            RemoteConfigResponse::parse(r#"{"success": true, "quiz": "https://example.com/p"}"#)
                .unwrap();
        assert!(resp.success);
        assert_eq!(
            resp.valid_destination().unwrap().as_str(),
            "https://example.com/p"
        );
    }

    #[test]
    fn integer_one_is_success() {
        let resp = RemoteConfigResponse::parse(r#"{"success": 1, "quiz": "https://a.io"}"#).unwrap();
        assert!(resp.success);
        let resp = RemoteConfigResponse::parse(r#"{"success": 0, "quiz": "https://a.io"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.valid_destination().is_none());
    }

    #[test]
    fn missing_fields_default() {
        let resp = RemoteConfigResponse::parse("{}").unwrap();
        assert!(!resp.success);
        assert!(resp.destination.is_empty());
        assert!(resp.link.is_none());
    }

    #[test]
    fn link_is_kept_but_not_routed() {
        let resp = RemoteConfigResponse::parse(
            r#"{"success": true, "quiz": "", "link": "https://example.com/l"}"#,
        )
        .unwrap();
        assert_eq!(resp.link.as_deref(), Some("https://example.com/l"));
        assert!(resp.valid_destination().is_none());
    }

    #[test]
    fn non_object_is_malformed() {
        assert!(matches!(
            RemoteConfigResponse::parse("[1,2]"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            RemoteConfigResponse::parse("<html>"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn destination_validation() {
        assert!(validate_destination("https://example.com").is_some());
        assert!(validate_destination(" http://example.com/path?q=1 ").is_some());
        assert!(validate_destination("not a url").is_none());
        assert!(validate_destination("").is_none());
        assert!(validate_destination("ftp://example.com").is_none());
        assert!(validate_destination("javascript:alert(1)").is_none());
        assert!(validate_destination("/relative/path").is_none());
    }
}
