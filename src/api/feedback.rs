//! Feedback question management and student submissions

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    FeedbackAnswer, FeedbackQuestion, FeedbackQuestionPayload, FeedbackResponse, FeedbackSummary,
};
use crate::view_state::{Loaded, fallback};

pub struct FeedbackApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FeedbackApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_questions(&self) -> ApiResult<Vec<FeedbackQuestion>> {
        self.client
            .get("/admin/feedback/question", Access::Authenticated)
            .await?
            .into_json()
    }

    pub async fn create_question(&self, question: &FeedbackQuestionPayload) -> ApiResult<Payload> {
        self.client
            .post("/admin/feedback/question", Access::Authenticated, question)
            .await
    }

    pub async fn update_question(
        &self,
        id: i64,
        question: &FeedbackQuestionPayload,
    ) -> ApiResult<Payload> {
        self.client
            .put(&format!("/admin/feedback/question/{id}"), Access::Authenticated, question)
            .await
    }

    pub async fn delete_question(&self, id: i64) -> ApiResult<Payload> {
        self.client
            .delete(&format!("/admin/feedback/question/{id}"), Access::Authenticated)
            .await
    }

    pub async fn responses(&self, canteen_id: i64) -> ApiResult<Vec<FeedbackResponse>> {
        self.client
            .get(
                &format!("/admin/feedback/canteen/{canteen_id}/responses"),
                Access::Authenticated,
            )
            .await?
            .into_json()
    }

    pub async fn summary(&self, canteen_id: i64) -> ApiResult<FeedbackSummary> {
        let responses = self.responses(canteen_id).await?;
        Ok(FeedbackSummary::from_responses(&responses))
    }

    pub async fn questions_for_canteen(&self, canteen_id: i64) -> ApiResult<Vec<FeedbackQuestion>> {
        self.client
            .get(
                &format!("/user/feedback/canteen/{canteen_id}/questions"),
                Access::Authenticated,
            )
            .await?
            .into_json()
    }

    /// Questions for the feedback form, substituting placeholder questions
    /// when the backend cannot supply them
    pub async fn questions_or_fallback(
        &self,
        canteen_id: i64,
    ) -> ApiResult<Loaded<Vec<FeedbackQuestion>>> {
        let result = self.questions_for_canteen(canteen_id).await;
        Loaded::or_fallback(result, || fallback::feedback_questions(canteen_id))
    }

    pub async fn submit(&self, canteen_id: i64, answer: &FeedbackAnswer) -> ApiResult<Payload> {
        if fallback::is_placeholder_id(answer.question_id) {
            return Err(ApiError::Validation(
                "Feedback questions are unavailable right now; please try again later".to_string(),
            ));
        }

        self.client
            .post(
                &format!("/user/feedback/canteen/{canteen_id}/submit"),
                Access::Authenticated,
                answer,
            )
            .await
    }

    /// Submit every answer of a filled-in form concurrently; the first
    /// failure is returned
    pub async fn submit_all(
        &self,
        canteen_id: i64,
        answers: &[FeedbackAnswer],
    ) -> ApiResult<Vec<Payload>> {
        let submissions = answers.iter().map(|answer| self.submit(canteen_id, answer));
        futures::future::try_join_all(submissions).await
    }
}
