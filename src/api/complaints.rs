//! Complaint endpoints for students and admin moderation

use serde::Serialize;
use tracing::debug;

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::ApiResult;
use crate::models::{Complaint, ComplaintStatus, NewComplaint};
use crate::view_state::Reconciling;

#[derive(Serialize)]
struct StatusUpdate {
    status: ComplaintStatus,
}

pub struct ComplaintApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ComplaintApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, complaint: &NewComplaint) -> ApiResult<Payload> {
        self.client
            .post("/user/complaints", Access::Authenticated, complaint)
            .await
    }

    /// Complaints filed by the logged-in student
    pub async fn mine(&self) -> ApiResult<Vec<Complaint>> {
        self.client
            .get("/user/complaints/mycomplaints", Access::Authenticated)
            .await?
            .into_json()
    }

    pub async fn all(&self) -> ApiResult<Vec<Complaint>> {
        self.client
            .get("/admin/complaints/allComplaints", Access::Authenticated)
            .await?
            .into_json()
    }

    /// Set any status directly; there is no transition table
    pub async fn update_status(&self, id: i64, status: ComplaintStatus) -> ApiResult<Payload> {
        self.client
            .put(
                &format!("/admin/complaints/{id}/status"),
                Access::Authenticated,
                &StatusUpdate { status },
            )
            .await
    }

    pub async fn reopen(&self, id: i64) -> ApiResult<Payload> {
        self.update_status(id, ComplaintStatus::InProgress).await
    }

    pub async fn escalate(&self, id: i64) -> ApiResult<Payload> {
        self.client
            .post_empty(&format!("/admin/complaints/{id}/escalate"), Access::Authenticated)
            .await
    }

    /// Patch the board locally, send the update, then replace the board with
    /// a fresh server listing. A rejected update restores whatever patch the
    /// record carried before the call.
    pub async fn update_status_reconciled(
        &self,
        board: &mut Reconciling<Complaint>,
        id: i64,
        status: ComplaintStatus,
    ) -> ApiResult<()> {
        let previous = board.tentative(&id).cloned();
        board.patch_with(&id, |complaint| complaint.status = status);

        if let Err(e) = self.update_status(id, status).await {
            board.restore(&id, previous);
            return Err(e);
        }

        let fresh = self.all().await?;
        debug!("Reconciling {} complaints after status change on {}", fresh.len(), id);
        board.reconcile(fresh);
        Ok(())
    }
}
