//! The uniform response wrapper returned by every API endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used when a failed response carries no envelope of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "request failed";

/// `{success, code, message, data}` wrapper around every API payload.
///
/// The backend omits `data` on void responses, so it defaults to `null` and is
/// decoded into the caller's type only after `success` has been checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Stand-in rejection for failures that came without an envelope.
    pub fn fallback() -> Self {
        Self {
            success: false,
            code: String::new(),
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            data: Value::Null,
        }
    }

    /// Parse a raw body as an envelope, `None` if it is not one.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Build a successful envelope around `data`.
    pub fn ok(data: impl Serialize) -> Self {
        Self {
            success: true,
            code: "OK".to_string(),
            message: "success".to_string(),
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    /// Build a failed envelope.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            data: Value::Null,
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> PageResult<T> {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            page,
            size,
        }
    }
}

/// Attempt to pull a user-facing message out of a raw envelope body.
pub fn try_envelope_message(body: &str) -> Option<String> {
    let parsed = Envelope::parse(body)?;
    if parsed.success || parsed.message.trim().is_empty() {
        return None;
    }
    Some(parsed.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_envelope_without_data_parses() {
        let env = Envelope::parse(r#"{"success":true,"code":"OK","message":"ok"}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Value::Null);
    }

    #[test]
    fn page_result_parses_list_payload() {
        let page: PageResult<u32> =
            serde_json::from_str(r#"{"records":[1,2,3],"total":3,"page":2,"size":10}"#).unwrap();
        assert_eq!(page.records, vec![1, 2, 3]);
        assert_eq!((page.total, page.page, page.size), (3, 2, 10));
    }

    #[test]
    fn failure_message_is_extracted() {
        let body = r#"{"success":false,"code":"AUTH_001","message":"bad credentials"}"#;
        assert_eq!(try_envelope_message(body).as_deref(), Some("bad credentials"));
        assert_eq!(try_envelope_message("<html>"), None);
        assert_eq!(try_envelope_message(r#"{"success":true,"message":"ok"}"#), None);
    }
}
