//! Session Store
//!
//! Single source of truth for who is logged in. Every consumer reads the
//! same snapshot; the mutation methods below are the only write path.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{ApiClient, AuthApi, Payload, TokenSource};
use crate::auth::{Credentials, RegisterRequest, Session, SessionUser, jwt};
use crate::error::{ApiError, ApiResult};
use crate::session::storage::SessionStorage;

/// What consumers observe. `loading` stays true until `initialize` finishes,
/// so auth-dependent decisions must wait for it to clear.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.session.as_ref().map(|s| &s.user)
    }
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            session: None,
            loading: true,
        });
        Self { storage, state }
    }

    /// Hydrate from storage. Expired JWTs are dropped rather than restored.
    pub async fn initialize(&self) -> SessionSnapshot {
        let stored = match self.storage.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Could not read persisted session: {}", e);
                None
            }
        };

        let session = match stored {
            Some(session) if jwt::is_expired(&session.token, Utc::now()) => {
                info!("Persisted session for {} has expired", session.user.email_id);
                if let Err(e) = self.storage.clear().await {
                    warn!("Failed to remove expired session: {}", e);
                }
                None
            }
            other => other,
        };

        if let Some(session) = &session {
            info!("Restored session for {}", session.user.email_id);
        }
        self.publish(session);
        self.snapshot()
    }

    /// Log in through the auth endpoint. On failure nothing is persisted and
    /// the current state is left as it was.
    pub async fn login(&self, client: &ApiClient, credentials: &Credentials) -> ApiResult<Session> {
        let session = AuthApi::new(client).login(credentials).await?;
        self.storage.save(&session).await?;

        info!("Logged in as {}", session.user.email_id);
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Create an account. Never logs in; the caller decides what comes next.
    pub async fn register(&self, client: &ApiClient, request: &RegisterRequest) -> ApiResult<Payload> {
        AuthApi::new(client).register(request).await
    }

    /// Clear storage and memory. Idempotent and infallible.
    pub async fn logout(&self) {
        if let Err(e) = self.storage.clear().await {
            warn!("Failed to clear persisted session: {}", e);
        }
        if self.is_authenticated() {
            info!("Logged out");
        }
        self.publish(None);
    }

    /// Tear the session down when a call came back 401/403 or had no token.
    /// Returns whether a teardown happened.
    pub async fn handle_api_error(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        warn!("Unauthorized response, ending session: {}", error);
        self.logout().await;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.state.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().session.as_ref().map(|s| s.token.clone())
    }

    fn publish(&self, session: Option<Session>) {
        self.state.send_replace(SessionSnapshot {
            session,
            loading: false,
        });
    }
}

impl TokenSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}
