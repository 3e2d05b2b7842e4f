use serde::{Deserialize, Serialize};

/// A cafeteria outlet as returned by both the admin and public endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canteen {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub certificate_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub menu_path: Option<String>,
}

/// Create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanteenPayload {
    pub name: String,
    pub info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_path: Option<String>,
}

impl Canteen {
    /// Payload that would recreate this canteen with the same field values
    pub fn to_payload(&self) -> CanteenPayload {
        CanteenPayload {
            name: self.name.clone(),
            info: self.info.clone(),
            certificate_url: self.certificate_url.clone(),
            image_url: self.image_url.clone(),
            menu_path: self.menu_path.clone(),
        }
    }

    /// True when the user-editable fields match the payload
    pub fn matches(&self, payload: &CanteenPayload) -> bool {
        self.to_payload() == *payload
    }
}

impl crate::view_state::Keyed for Canteen {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}
