//! Shared HTTP helper functions for the Base44 client
//!
//! Response validation, status mapping and request building.

use reqwest::{RequestBuilder, StatusCode};
use std::collections::HashMap;

use super::ClientError;

/// Map a failed API response to the matching error
pub async fn extract_api_error(response: reqwest::Response, context: &str) -> ClientError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    status_error(status, format!("{}: {}", context, error_text))
}

/// Error for a non-success status code
pub fn status_error(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimitExceeded,
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Check if response is successful, returning the response or an error
pub async fn require_success(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response, ClientError> {
    if !response.status().is_success() {
        return Err(extract_api_error(response, context).await);
    }
    Ok(response)
}

/// Add headers from a HashMap to a request builder
pub fn with_headers(req: RequestBuilder, headers: HashMap<String, String>) -> RequestBuilder {
    headers.into_iter().fold(req, |r, (k, v)| r.header(k, v))
}

/// Deserialize JSON response with proper error handling
pub async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Deserialize(e.to_string()))
}

/// Entity names end up in URL paths
pub fn validate_entity_name(entity: &str) -> Result<(), ClientError> {
    if entity.is_empty() || !entity.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ClientError::InvalidArgument(format!(
            "invalid entity name '{}'",
            entity
        )));
    }
    Ok(())
}

/// Application ids are a single path segment of `[A-Za-z0-9_-]`
pub fn validate_app_id(app_id: &str) -> Result<(), ClientError> {
    let valid = !app_id.is_empty()
        && app_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ClientError::InvalidConfiguration(format!(
            "invalid application id '{}'",
            app_id
        )));
    }
    Ok(())
}

/// Record ids are pushed as one percent-encoded path segment, so only
/// separators and dot segments are refused here
pub fn validate_record_id(id: &str) -> Result<(), ClientError> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '?', '#'])
        || id.chars().any(char::is_control);
    if invalid {
        return Err(ClientError::InvalidArgument(format!(
            "invalid record id '{}'",
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, String::new()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ClientError::RateLimitExceeded
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "boom".to_string()),
            ClientError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn test_entity_names() {
        assert!(validate_entity_name("Material").is_ok());
        assert!(validate_entity_name("project_info2").is_ok());
        assert!(validate_entity_name("").is_err());
        assert!(validate_entity_name("User/me").is_err());
        assert!(validate_entity_name("a b").is_err());
    }

    #[test]
    fn test_record_ids() {
        assert!(validate_record_id("6862a46146d51035d8059d9d").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("../x").is_err());
        assert!(validate_record_id("a?b=c").is_err());
        assert!(validate_record_id(".").is_err());
        assert!(validate_record_id("..").is_err());
        assert!(validate_record_id("a\\b").is_err());
        assert!(validate_record_id("a\nb").is_err());
        assert!(validate_record_id("a b%zz").is_ok());
    }

    #[test]
    fn test_app_ids() {
        assert!(validate_app_id("6862a46146d51035d8059d9d").is_ok());
        assert!(validate_app_id("staging-app_2").is_ok());
        assert!(validate_app_id("").is_err());
        assert!(validate_app_id("..").is_err());
        assert!(validate_app_id("app/../admin").is_err());
        assert!(validate_app_id("app id").is_err());
    }
}
