use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Five-point categorical rating used by feedback responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    VeryPoor,
    Poor,
    Average,
    Good,
    VeryGood,
}

impl Rating {
    /// Map a 1..=5 star value onto the scale; anything else is `None`
    pub fn from_stars(stars: u8) -> Option<Self> {
        match stars {
            1 => Some(Rating::VeryPoor),
            2 => Some(Rating::Poor),
            3 => Some(Rating::Average),
            4 => Some(Rating::Good),
            5 => Some(Rating::VeryGood),
            _ => None,
        }
    }

    pub fn stars(&self) -> u8 {
        match self {
            Rating::VeryPoor => 1,
            Rating::Poor => 2,
            Rating::Average => 3,
            Rating::Good => 4,
            Rating::VeryGood => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuestion {
    pub id: i64,
    #[serde(default)]
    pub canteen_id: Option<i64>,
    #[serde(alias = "question")]
    pub question_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuestionPayload {
    pub canteen_id: i64,
    pub question_text: String,
}

/// One answer as submitted by a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAnswer {
    pub question_id: i64,
    pub option: Rating,
    pub reason: String,
}

impl FeedbackAnswer {
    pub fn from_stars(question_id: i64, stars: u8, reason: impl Into<String>) -> Option<Self> {
        Some(Self {
            question_id,
            option: Rating::from_stars(stars)?,
            reason: reason.into(),
        })
    }
}

/// A stored response as listed for admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    #[serde(default)]
    pub id: Option<i64>,
    pub question_id: i64,
    pub option: Rating,
    #[serde(default)]
    pub reason: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    pub question_id: i64,
    pub responses: usize,
    /// Mean star value on the 1..=5 scale
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackSummary {
    pub questions: Vec<QuestionSummary>,
}

impl FeedbackSummary {
    /// Average rating per question, ordered by question id
    pub fn from_responses(responses: &[FeedbackResponse]) -> Self {
        let mut totals: BTreeMap<i64, (usize, u32)> = BTreeMap::new();
        for response in responses {
            let entry = totals.entry(response.question_id).or_default();
            entry.0 += 1;
            entry.1 += u32::from(response.option.stars());
        }

        let questions = totals
            .into_iter()
            .map(|(question_id, (count, sum))| QuestionSummary {
                question_id,
                responses: count,
                average: f64::from(sum) / count as f64,
            })
            .collect();

        Self { questions }
    }

    /// Mean over every response regardless of question
    pub fn overall_average(&self) -> Option<f64> {
        let count: usize = self.questions.iter().map(|q| q.responses).sum();
        if count == 0 {
            return None;
        }
        let sum: f64 = self
            .questions
            .iter()
            .map(|q| q.average * q.responses as f64)
            .sum();
        Some(sum / count as f64)
    }
}
