//! Auth endpoints for login, registration, and email OTP verification

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::auth::models::AuthResponse;
use crate::auth::{Credentials, OtpRequest, OtpVerification, RegisterRequest, Session};
use crate::error::ApiResult;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login` returning `{user, token}`
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response: AuthResponse = self
            .client
            .post("/auth/login", Access::Public, credentials)
            .await?
            .into_json()?;
        Ok(response.into())
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<Payload> {
        self.client.post("/auth/register", Access::Public, request).await
    }

    /// Ask the backend to email a one-time code ahead of registration
    pub async fn send_otp(&self, email_id: &str) -> ApiResult<Payload> {
        let request = OtpRequest {
            email_id: email_id.to_string(),
        };
        self.client.post("/auth/send-otp", Access::Public, &request).await
    }

    pub async fn verify_otp(&self, email_id: &str, otp: &str) -> ApiResult<Payload> {
        let request = OtpVerification {
            email_id: email_id.to_string(),
            otp: otp.trim().to_string(),
        };
        self.client.post("/auth/verify-otp", Access::Public, &request).await
    }
}
