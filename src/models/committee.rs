use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitteeRole {
    FacultyMentor,
    Convener,
    DeputyConvener,
    CoreMember,
}

impl CommitteeRole {
    /// Display order on the committee page, mentors first
    pub fn rank(&self) -> u8 {
        match self {
            CommitteeRole::FacultyMentor => 0,
            CommitteeRole::Convener => 1,
            CommitteeRole::DeputyConvener => 2,
            CommitteeRole::CoreMember => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub designation: String,
    pub role: CommitteeRole,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMemberPayload {
    pub name: String,
    pub email: String,
    pub designation: String,
    pub role: CommitteeRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl CommitteeMember {
    pub fn to_payload(&self) -> CommitteeMemberPayload {
        CommitteeMemberPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            designation: self.designation.clone(),
            role: self.role,
            student_id: self.student_id.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

/// Sort by role rank, then name
pub fn sort_for_display(members: &mut [CommitteeMember]) {
    members.sort_by(|a, b| {
        a.role
            .rank()
            .cmp(&b.role.rank())
            .then_with(|| a.name.cmp(&b.name))
    });
}
