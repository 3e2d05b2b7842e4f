//! # Domain Models
//!
//! Wire representations of the canteen backend's resources. Field names are
//! camelCase on the wire; payload structs used for create/update omit the
//! server-assigned `id`.

pub mod announcement;
pub mod canteen;
pub mod committee;
pub mod complaint;
pub mod feedback;
pub mod report;

mod timestamp;

pub use announcement::{Announcement, NewAnnouncement};
pub use canteen::{Canteen, CanteenPayload};
pub use committee::{CommitteeMember, CommitteeMemberPayload, CommitteeRole};
pub use complaint::{Complaint, ComplaintStatus, NewComplaint};
pub use feedback::{
    FeedbackAnswer, FeedbackQuestion, FeedbackQuestionPayload, FeedbackResponse, FeedbackSummary,
    QuestionSummary, Rating,
};
pub use report::{MonthlyReport, ReportMonth};
