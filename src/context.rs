//! # Portal Context
//!
//! Everything a view needs, bundled once and passed down explicitly: the
//! configuration, the session store, and the API client reading its token
//! from that store.

use std::sync::Arc;

use crate::api::{
    AnnouncementApi, ApiClient, AuthApi, CanteenApi, CommitteeApi, ComplaintApi, FeedbackApi,
    ReportApi,
};
use crate::auth::{Credentials, Session};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::session::{FileSessionStorage, SessionSnapshot, SessionStorage, SessionStore};

pub struct PortalContext {
    config: Config,
    session: Arc<SessionStore>,
    client: ApiClient,
}

impl PortalContext {
    pub fn new(config: Config, storage: Arc<dyn SessionStorage>) -> ApiResult<Self> {
        let session = Arc::new(SessionStore::new(storage));
        let client = ApiClient::new(&config, session.clone())?;

        Ok(Self {
            config,
            session,
            client,
        })
    }

    /// Context persisting the session to `config.session_file`
    pub fn with_file_storage(config: Config) -> ApiResult<Self> {
        let storage = Arc::new(FileSessionStorage::new(config.session_file.clone()));
        Self::new(config, storage)
    }

    /// Hydrate the session; call once before any auth-dependent decision
    pub async fn initialize(&self) -> SessionSnapshot {
        self.session.initialize().await
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.session.login(&self.client, credentials).await
    }

    pub async fn logout(&self) {
        self.session.logout().await
    }

    /// Run the conventional teardown for an unauthorized error, then hand it back
    pub async fn check(&self, error: ApiError) -> ApiError {
        self.session.handle_api_error(&error).await;
        error
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.client)
    }

    pub fn canteens(&self) -> CanteenApi<'_> {
        CanteenApi::new(&self.client)
    }

    pub fn complaints(&self) -> ComplaintApi<'_> {
        ComplaintApi::new(&self.client)
    }

    pub fn feedback(&self) -> FeedbackApi<'_> {
        FeedbackApi::new(&self.client)
    }

    pub fn announcements(&self) -> AnnouncementApi<'_> {
        AnnouncementApi::new(&self.client)
    }

    pub fn committee(&self) -> CommitteeApi<'_> {
        CommitteeApi::new(&self.client)
    }

    pub fn reports(&self) -> ReportApi<'_> {
        ReportApi::new(&self.client)
    }
}
