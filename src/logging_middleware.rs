// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode.
//! PEN and email values are redacted before anything is logged.

use axum::body::to_bytes;
use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use serde_json::Value;
use tracing::{debug, enabled, Level};

use crate::common::{mask_pen, safe_email_log};

/// Replaces `pen` and `email` values anywhere in a JSON document
pub fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                let masked = match (key.as_str(), &*field) {
                    ("pen", Value::String(pen)) => Some(mask_pen(pen)),
                    ("email", Value::String(email)) => Some(safe_email_log(email)),
                    _ => None,
                };
                match masked {
                    Some(masked) => *field = Value::String(masked),
                    None => redact(field),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}

fn printable(bytes: &[u8]) -> Option<String> {
    let body_str = std::str::from_utf8(bytes).ok()?;
    match serde_json::from_str::<Value>(body_str) {
        Ok(mut json) => {
            redact(&mut json);
            Some(serde_json::to_string_pretty(&json).unwrap_or_default())
        }
        // Non-JSON bodies may still carry PII; log only their size
        Err(_) => Some(format!("<{} bytes, not JSON>", bytes.len())),
    }
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        if let Some(request_body) = printable(&bytes) {
            debug!(
                method = %parts.method,
                uri = %parts.uri,
                request_body = %request_body,
                "Request"
            );
        }
    }

    let request = Request::from_parts(parts, Body::from(bytes));

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !bytes.is_empty() {
        if let Some(response_body) = printable(&bytes) {
            debug!(status = %parts.status, response_body = %response_body, "Response");
        }
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redact_masks_nested_pen_and_email() {
        let mut body = json!({
            "pen": "123456789",
            "email": "abc@gmail.com",
            "sub_errors": [{"field": "pen", "message": "PEN is already associated to a student."}],
            "nested": {"email": "xyz@example.com", "surname": "Smith"}
        });

        redact(&mut body);

        assert_eq!(body["pen"], "******789");
        assert_eq!(body["email"], "a***@gmail.com");
        assert_eq!(body["nested"]["email"], "x***@example.com");
        assert_eq!(body["nested"]["surname"], "Smith");
        assert_eq!(body["sub_errors"][0]["field"], "pen");
    }

    #[test]
    fn test_non_json_body_is_not_echoed() {
        assert_eq!(printable(b"pen=123456789").unwrap(), "<13 bytes, not JSON>");
    }
}
