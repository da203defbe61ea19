//! Agent, super-agent and group-agent DTOs.
//!
//! Super-agents sit above regular agents: a super-agent belongs to one partner and
//! may have sub-agents assigned to it, forming a hierarchy the dashboard renders as
//! a tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{lenient_timestamp, EntityStatus, Extra};

/// Sales agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub uid: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_agent_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `POST agents/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    pub business_name: String,
    pub partner_uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `PUT agents/{uid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Search filters for agents, super-agents and group-agents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

impl AgentQuery {
    /// Filter on business name only.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            business_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// No filter set; callers list instead of searching.
    pub fn is_empty(&self) -> bool {
        self.business_name.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.partner_uid.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.status.is_none()
    }
}

/// Super-agent as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuperAgent {
    pub uid: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `POST super-agents/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSuperAgent {
    pub business_name: String,
    pub partner_uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Node of the super-agent tree returned by `super-agents/{uid}/hierarchy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentHierarchy {
    pub uid: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub children: Vec<AgentHierarchy>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AgentHierarchy {
    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Group of agents managed together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupAgent {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(default)]
    pub member_count: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for `POST group-agents/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupAgent {
    pub name: String,
    pub partner_uid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_uids: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
