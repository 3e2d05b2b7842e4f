//! # API Access Layer
//!
//! One function per backend operation, grouped by resource. Each function
//! shapes the request, injects the bearer token when the operation needs
//! one, and hands the response to [`response::normalize`]. View state is
//! never touched here.

pub mod announcements;
pub mod auth;
pub mod canteens;
pub mod client;
pub mod committee;
pub mod complaints;
pub mod feedback;
pub mod reports;
pub mod response;

pub use announcements::AnnouncementApi;
pub use auth::AuthApi;
pub use canteens::CanteenApi;
pub use client::{Access, ApiClient, TokenSource};
pub use committee::{CommitteeApi, MemberTarget, PhotoDraft, SavedMember};
pub use complaints::ComplaintApi;
pub use feedback::FeedbackApi;
pub use reports::ReportApi;
pub use response::Payload;
