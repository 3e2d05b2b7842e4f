//! Placeholder content shown while the backend is unavailable.
//!
//! Placeholder records use negative ids so they can never be mistaken for
//! (or submitted as) server records.

use crate::models::{Announcement, FeedbackQuestion};

const PLACEHOLDER_QUESTIONS: [&str; 4] = [
    "How would you rate the food quality?",
    "How would you rate the hygiene of the canteen?",
    "How would you rate the staff behaviour?",
    "How would you rate the value for money?",
];

pub fn is_placeholder_id(id: i64) -> bool {
    id < 0
}

pub fn feedback_questions(canteen_id: i64) -> Vec<FeedbackQuestion> {
    PLACEHOLDER_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, text)| FeedbackQuestion {
            id: -(i as i64) - 1,
            canteen_id: Some(canteen_id),
            question_text: text.to_string(),
        })
        .collect()
}

pub fn announcements() -> Vec<Announcement> {
    vec![Announcement {
        id: Some(-1),
        title: "Announcements unavailable".to_string(),
        message: "Latest announcements could not be loaded. Please check back shortly.".to_string(),
        created_at: None,
        active: Some(true),
    }]
}
