use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::response::{Payload, normalize};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Where the API layer reads the current bearer token from
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Whether an operation needs the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// Shared HTTP plumbing for every resource API.
///
/// Each call is a fresh round trip: no retries, caching, or de-duplication.
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(config: &Config, tokens: Arc<dyn TokenSource>) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, or fail before anything is sent
    fn authorize(&self, request: RequestBuilder, access: Access) -> ApiResult<RequestBuilder> {
        match access {
            Access::Public => Ok(request),
            Access::Authenticated => {
                let token = self
                    .tokens
                    .bearer_token()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(ApiError::missing_token)?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        access: Access,
        query: &[(&str, String)],
        body: Body,
    ) -> ApiResult<Payload> {
        let mut request = self.http.request(method.clone(), self.url(path));
        request = self.authorize(request, access)?;

        if !query.is_empty() {
            request = request.query(query);
        }
        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        debug!("{} {}", method, path);
        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed to complete: {}", method, path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        let result = normalize(status, body);
        if let Err(e) = &result {
            warn!("{} {} -> {}", method, path, e);
        }
        result
    }

    pub(crate) async fn get(&self, path: &str, access: Access) -> ApiResult<Payload> {
        self.send(Method::GET, path, access, &[], Body::Empty).await
    }

    pub(crate) async fn get_with_query(
        &self,
        path: &str,
        access: Access,
        query: &[(&str, String)],
    ) -> ApiResult<Payload> {
        self.send(Method::GET, path, access, query, Body::Empty).await
    }

    pub(crate) async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        access: Access,
        body: &T,
    ) -> ApiResult<Payload> {
        let body = Body::Json(serde_json::to_value(body)?);
        self.send(Method::POST, path, access, &[], body).await
    }

    pub(crate) async fn post_empty(&self, path: &str, access: Access) -> ApiResult<Payload> {
        self.send(Method::POST, path, access, &[], Body::Empty).await
    }

    pub(crate) async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        access: Access,
        body: &T,
    ) -> ApiResult<Payload> {
        let body = Body::Json(serde_json::to_value(body)?);
        self.send(Method::PUT, path, access, &[], body).await
    }

    pub(crate) async fn delete(&self, path: &str, access: Access) -> ApiResult<Payload> {
        self.send(Method::DELETE, path, access, &[], Body::Empty).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        access: Access,
        form: Form,
    ) -> ApiResult<Payload> {
        self.send(Method::POST, path, access, &[], Body::Multipart(form)).await
    }
}
