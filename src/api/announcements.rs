use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::ApiResult;
use crate::models::{Announcement, NewAnnouncement};
use crate::view_state::{Loaded, fallback};

pub struct AnnouncementApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnnouncementApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, announcement: &NewAnnouncement) -> ApiResult<Payload> {
        self.client
            .post("/admin/announcement/create", Access::Authenticated, announcement)
            .await
    }

    pub async fn active(&self) -> ApiResult<Vec<Announcement>> {
        self.client
            .get("/admin/announcement/active", Access::Authenticated)
            .await?
            .into_json()
    }

    /// Active announcements, or a placeholder banner when the fetch fails
    pub async fn active_or_fallback(&self) -> ApiResult<Loaded<Vec<Announcement>>> {
        Loaded::or_fallback(self.active().await, fallback::announcements)
    }
}
