//! Response envelope shared by every backend endpoint

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope wrapping every backend response body.
///
/// When `is_success` is false the payload in `data` is unreliable
/// regardless of its literal value and must not be used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub is_success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

/// A single application-level error reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub field_lang: Option<String>,
}

/// Application-level failure extracted from a response envelope.
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// Backend answered with `isSuccess: false`.
    #[error("backend rejected the request: {}", join_messages(.0))]
    Rejected(Vec<ApiError>),

    /// Backend reported success but sent no payload.
    #[error("backend reported success without a payload")]
    MissingData,
}

fn join_messages(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// # Errors
    /// Returns [`ApiFailure::Rejected`] when `is_success` is false and
    /// [`ApiFailure::MissingData`] when a successful envelope carries no
    /// payload.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        if !self.is_success {
            return Err(ApiFailure::Rejected(self.errors));
        }
        self.data.ok_or(ApiFailure::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_envelope_yields_errors() {
        let response: ApiResponse<u32> = ApiResponse {
            is_success: false,
            errors: vec![ApiError {
                message: "phone already registered".to_string(),
                ..ApiError::default()
            }],
            data: Some(7),
        };

        // data is present but must be ignored on failure
        match response.into_result() {
            Err(ApiFailure::Rejected(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "phone already registered");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_an_error() {
        let response: ApiResponse<u32> = ApiResponse {
            is_success: true,
            errors: vec![],
            data: None,
        };
        assert!(matches!(response.into_result(), Err(ApiFailure::MissingData)));
    }

    #[test]
    fn deserializes_backend_shape() {
        let body = r#"{
            "isSuccess": true,
            "errors": [],
            "data": 42
        }"#;
        let response: ApiResponse<u32> = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_result().unwrap(), 42);
    }

    #[test]
    fn tolerates_missing_errors_and_data() {
        let body = r#"{ "isSuccess": false }"#;
        let response: ApiResponse<u32> = serde_json::from_str(body).unwrap();
        assert!(!response.is_success);
        assert!(response.errors.is_empty());
        assert!(response.data.is_none());
    }
}
