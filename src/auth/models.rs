//! Authentication Models
//!
//! Data structures for authentication requests, responses, and the persisted session.

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of the logged-in student or administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(alias = "userId", alias = "id", deserialize_with = "string_or_number")]
    pub student_id: String,
    pub name: String,
    #[serde(alias = "email")]
    pub email_id: String,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("ADMIN"))
    }
}

/// The persisted unit: who is logged in and the bearer token proving it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

/// Login request payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email_id: email_id.into(),
            password: password.into(),
        }
    }
}

/// Registration payload, sent once the email OTP has been verified
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: String,
    pub name: String,
    pub email_id: String,
    pub mobile_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    pub email_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    pub email_id: String,
    pub otp: String,
}

/// Successful login body: `{user, token}`
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub user: SessionUser,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            user: response.user,
            token: response.token,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
