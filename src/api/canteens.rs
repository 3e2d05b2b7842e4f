//! Canteen endpoints: admin CRUD under `/admin/canteens`, public reads under `/api/canteens`.

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::ApiResult;
use crate::models::{Canteen, CanteenPayload};

pub struct CanteenApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CanteenApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Canteen>> {
        self.client
            .get("/admin/canteens", Access::Authenticated)
            .await?
            .into_json()
    }

    pub async fn get(&self, id: i64) -> ApiResult<Canteen> {
        self.client
            .get(&format!("/admin/canteens/{id}"), Access::Authenticated)
            .await?
            .into_json()
    }

    /// The backend may answer with the created canteen or a text confirmation
    pub async fn create(&self, canteen: &CanteenPayload) -> ApiResult<Payload> {
        self.client
            .post("/admin/canteens", Access::Authenticated, canteen)
            .await
    }

    pub async fn update(&self, id: i64, canteen: &CanteenPayload) -> ApiResult<Payload> {
        self.client
            .put(&format!("/admin/canteens/{id}"), Access::Authenticated, canteen)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Payload> {
        self.client
            .delete(&format!("/admin/canteens/{id}"), Access::Authenticated)
            .await
    }

    pub async fn list_public(&self) -> ApiResult<Vec<Canteen>> {
        self.client.get("/api/canteens", Access::Public).await?.into_json()
    }

    pub async fn get_public(&self, id: i64) -> ApiResult<Canteen> {
        self.client
            .get(&format!("/api/canteens/{id}"), Access::Public)
            .await?
            .into_json()
    }
}
