use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{StorageError, UNKNOWN_ERROR_CODE};

/// One logical API call. Paths are relative to `<url>/v2/storage/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// A response as it came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
    code: Option<Value>,
    exception_id: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Parses the body as JSON. An empty body reads as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        let parsed = if self.body.trim().is_empty() {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_str(&self.body)
        };
        parsed.map_err(|err| StorageError::ResponseFormatError {
            message: err.to_string(),
            raw_response: self.body.clone(),
        })
    }

    /// Classifies 4xx and 5xx responses into errors, keeping the server's
    /// code and message verbatim. Other responses pass through.
    pub fn error_for_status(self) -> Result<Self, StorageError> {
        if !self.is_client_error() && !self.is_server_error() {
            return Ok(self);
        }

        let parsed: ApiErrorBody = serde_json::from_str(&self.body).unwrap_or_default();
        let code = match parsed.code {
            Some(Value::String(code)) => code,
            Some(Value::Null) | None => UNKNOWN_ERROR_CODE.to_string(),
            Some(other) => other.to_string(),
        };
        let message = parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| self.body.clone());
        let status = self.status;
        let exception_id = parsed.exception_id;

        if self.is_server_error() {
            Err(StorageError::ServerError {
                status,
                code,
                message,
                exception_id,
            })
        } else {
            Err(StorageError::ClientError {
                status,
                code,
                message,
                exception_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_client_error_keeps_server_code() {
        let resp = ApiResponse::new(
            404,
            r#"{"error":"The table \"in.c-main.missing\" was not found.","code":"storage.tables.notFound","status":"error","exceptionId":"exception-1"}"#,
        );
        match resp.error_for_status().unwrap_err() {
            StorageError::ClientError {
                status,
                code,
                message,
                exception_id,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "storage.tables.notFound");
                assert_eq!(message, "The table \"in.c-main.missing\" was not found.");
                assert_eq!(exception_id.as_deref(), Some("exception-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_server_error_with_plain_body() {
        let err = ApiResponse::new(502, "Bad Gateway").error_for_status().unwrap_err();
        match err {
            StorageError::ServerError { status, code, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(code, "unknown");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_error_code_stringified() {
        let err = ApiResponse::new(400, r#"{"message":"bad","code":400}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.code(), Some("400"));
    }

    #[test]
    fn test_success_passes_through() {
        let resp = ApiResponse::new(202, r#"{"id": 1}"#);
        assert_eq!(resp.clone().error_for_status().unwrap(), resp);
    }

    #[test]
    fn test_empty_body_reads_as_null() {
        let value: Value = ApiResponse::new(204, "").json().unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_malformed_body_is_format_error() {
        let err = ApiResponse::new(200, "<html>").json::<Value>().unwrap_err();
        assert!(matches!(err, StorageError::ResponseFormatError { .. }));
    }

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::post("tables/in.c-main.users/import-async", json!({"dataFileId": 1}))
            .with_query("async", true);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.query, vec![("async".to_string(), "true".to_string())]);
        assert_eq!(req.body, Some(json!({"dataFileId": 1})));
        assert!(ApiRequest::get("jobs/1").body.is_none());
    }
}
