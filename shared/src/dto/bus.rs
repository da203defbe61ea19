//! Bus (fleet vehicle) DTOs.

use serde::{Deserialize, Serialize};

use super::common::{EntityStatus, Extra};

/// Vehicle registered by a partner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub uid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `POST buses/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBus {
    pub plate_number: String,
    pub partner_uid: String,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `PUT buses/{uid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Search filters for `GET buses/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BusQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl BusQuery {
    /// No filter set; callers list instead of searching.
    pub fn is_empty(&self) -> bool {
        self.plate_number.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.partner_uid.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.status.is_none()
    }
}
