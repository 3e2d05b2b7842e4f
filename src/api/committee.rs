//! Committee member management and the two-step photo upload.
//!
//! A [`PhotoDraft`] is the locally chosen image. Nothing is uploaded until the
//! member itself has been saved, and the uploaded URL is only written to the
//! member record after that save succeeded.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::{ApiError, ApiResult};
use crate::models::{CommitteeMember, CommitteeMemberPayload};

/// A photo picked for upload but not yet sent. Dropping it discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDraft {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PhotoDraft {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Validation(format!("Cannot read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let mime = mime_for(&file_name).to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    fn into_form(self) -> ApiResult<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|_| ApiError::Validation(format!("Unsupported photo type {}", self.mime)))?;
        Ok(Form::new().part("file", part))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Which record a save targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTarget {
    New,
    Existing(i64),
}

pub struct CommitteeApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CommitteeApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<CommitteeMember>> {
        self.client.get("/api/committee", Access::Public).await?.into_json()
    }

    pub async fn create(&self, member: &CommitteeMemberPayload) -> ApiResult<Payload> {
        self.client
            .post("/admin/committee", Access::Authenticated, member)
            .await
    }

    pub async fn update(&self, id: i64, member: &CommitteeMemberPayload) -> ApiResult<Payload> {
        self.client
            .put(&format!("/admin/committee/{id}"), Access::Authenticated, member)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Payload> {
        self.client
            .delete(&format!("/admin/committee/{id}"), Access::Authenticated)
            .await
    }

    /// Multipart upload; answers with the stored URL as text or `{url}`
    pub async fn upload_photo(&self, photo: PhotoDraft) -> ApiResult<String> {
        let form = photo.into_form()?;
        let payload = self
            .client
            .post_multipart("/admin/committee/upload-photo", Access::Authenticated, form)
            .await?;
        photo_url_from(payload)
    }

    /// Save the member, then upload the photo, then commit its URL.
    ///
    /// A failed save returns before anything is uploaded. When a new member is
    /// acknowledged with text only, the record is located by email in a fresh
    /// listing; if it cannot be found the save is reported as
    /// [`SavedMember::Unresolved`] and the photo is handed back untouched.
    pub async fn save_with_photo(
        &self,
        target: MemberTarget,
        member: CommitteeMemberPayload,
        photo: Option<PhotoDraft>,
    ) -> ApiResult<SavedMember> {
        let mut saved = match target {
            MemberTarget::New => {
                let payload = self.create(&member).await?;
                let created = self.created_member(payload, &member).await;
                match created {
                    Some(saved) => saved,
                    None => {
                        warn!("Committee member {} created but not found in listing", member.email);
                        return Ok(SavedMember::Unresolved { member, photo });
                    }
                }
            }
            MemberTarget::Existing(id) => {
                let payload = self.update(id, &member).await?;
                member_from(payload, id, &member)
            }
        };

        let Some(photo) = photo else {
            return Ok(SavedMember::Saved(saved));
        };

        let url = self.upload_photo(photo).await?;
        saved.photo_url = Some(url);
        self.update(saved.id, &saved.to_payload()).await?;
        info!("Committee member {} saved with photo", saved.id);

        Ok(SavedMember::Saved(saved))
    }

    /// The record behind a create reply: the reply itself when it is the
    /// member, otherwise the newest listed member with the same email
    async fn created_member(
        &self,
        payload: Payload,
        sent: &CommitteeMemberPayload,
    ) -> Option<CommitteeMember> {
        if let Ok(member) = payload.into_json::<CommitteeMember>() {
            return Some(member);
        }

        match self.list().await {
            Ok(members) => newest_with_email(members, &sent.email),
            Err(e) => {
                warn!("Could not list committee after create: {}", e);
                None
            }
        }
    }
}

/// Outcome of [`CommitteeApi::save_with_photo`]
#[derive(Debug, Clone, PartialEq)]
pub enum SavedMember {
    Saved(CommitteeMember),
    /// The backend accepted a new member but its record could not be
    /// located, so no photo was uploaded
    Unresolved {
        member: CommitteeMemberPayload,
        photo: Option<PhotoDraft>,
    },
}

impl SavedMember {
    pub fn member(&self) -> Option<&CommitteeMember> {
        match self {
            SavedMember::Saved(member) => Some(member),
            SavedMember::Unresolved { .. } => None,
        }
    }

    pub fn into_member(self) -> Option<CommitteeMember> {
        match self {
            SavedMember::Saved(member) => Some(member),
            SavedMember::Unresolved { .. } => None,
        }
    }
}

fn newest_with_email(members: Vec<CommitteeMember>, email: &str) -> Option<CommitteeMember> {
    members
        .into_iter()
        .filter(|m| m.email.eq_ignore_ascii_case(email))
        .max_by_key(|m| m.id)
}

fn member_from(payload: Payload, id: i64, sent: &CommitteeMemberPayload) -> CommitteeMember {
    match payload.into_json::<CommitteeMember>() {
        Ok(member) => member,
        Err(_) => CommitteeMember {
            id,
            name: sent.name.clone(),
            email: sent.email.clone(),
            designation: sent.designation.clone(),
            role: sent.role,
            student_id: sent.student_id.clone(),
            photo_url: sent.photo_url.clone(),
        },
    }
}

fn photo_url_from(payload: Payload) -> ApiResult<String> {
    let url = match &payload {
        Payload::Text(text) => Some(text.trim().to_string()),
        Payload::Json(Value::String(url)) => Some(url.clone()),
        Payload::Json(value) => ["url", "photoUrl"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
    };

    url.filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Decode("photo upload returned no URL".to_string()))
}
