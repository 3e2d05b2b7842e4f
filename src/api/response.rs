//! Response normalization
//!
//! The backend answers some calls with JSON and others with a plain-text
//! message. Every response goes through [`normalize`] exactly once, so call
//! sites never parse speculatively.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// A successful response body, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Attempt a JSON parse; on failure keep the raw text unchanged
    pub fn from_body(body: String) -> Self {
        if body.trim().is_empty() {
            return Payload::Text(body);
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Decode into `T`. A text body where JSON was expected is a decode error.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Text(text) => Err(ApiError::Decode(format!(
                "expected JSON, got text: {}",
                preview(&text)
            ))),
        }
    }

    /// Human-readable confirmation: the text itself, or a JSON `message` field
    pub fn message(&self) -> Option<&str> {
        match self {
            Payload::Text(text) if !text.trim().is_empty() => Some(text.trim()),
            Payload::Text(_) => None,
            Payload::Json(value) => value.get("message").and_then(Value::as_str),
        }
    }
}

/// Turn a status and body into a payload or a classified error
pub fn normalize(status: StatusCode, body: String) -> ApiResult<Payload> {
    if status.is_success() {
        return Ok(Payload::from_body(body));
    }

    let server_message = error_message(&body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized {
            status: Some(status.as_u16()),
            message: server_message.unwrap_or_else(|| "Unauthorized".to_string()),
        });
    }

    Err(ApiError::Server {
        status: status.as_u16(),
        message: server_message
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
    })
}

/// `message`/`error` from a JSON error body, else the raw text when present
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 80;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
