//! Types shared by every resource DTO.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fields the access layer does not model, kept verbatim.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Lifecycle status used by partners, agents, buses and users.
///
/// Values this crate does not know are kept verbatim in `Other` and serialized
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
    Other(String),
}

impl EntityStatus {
    /// Value sent in `?status=` query parameters.
    pub fn as_str(&self) -> &str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Inactive => "INACTIVE",
            EntityStatus::Suspended => "SUSPENDED",
            EntityStatus::Pending => "PENDING",
            EntityStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for EntityStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => EntityStatus::Active,
            "INACTIVE" => EntityStatus::Inactive,
            "SUSPENDED" => EntityStatus::Suspended,
            "PENDING" => EntityStatus::Pending,
            _ => EntityStatus::Other(raw),
        }
    }
}

impl From<EntityStatus> for String {
    fn from(status: EntityStatus) -> Self {
        match status {
            EntityStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(EntityStatus::Active),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            "SUSPENDED" => Ok(EntityStatus::Suspended),
            "PENDING" => Ok(EntityStatus::Pending),
            other => Err(format!("unknown status `{other}`")),
        }
    }
}

/// Parse a timestamp as the API sends it.
///
/// Accepts RFC 3339, offset-less date-times (read as UTC) and epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => {
            let raw = raw.trim();
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                        .map(|naive| naive.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// `deserialize_with` helper for optional timestamps. A value that cannot be
/// read becomes `None` instead of failing the whole record.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

/// Count returned by `.../count` endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}

/// Aggregate numbers shown on list pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub inactive: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_round_trips_verbatim() {
        let status: EntityStatus = serde_json::from_str(r#""ARCHIVED""#).unwrap();
        assert_eq!(status, EntityStatus::Other("ARCHIVED".into()));
        assert_eq!(status.as_str(), "ARCHIVED");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""ARCHIVED""#);

        let status: EntityStatus = serde_json::from_str(r#""SUSPENDED""#).unwrap();
        assert_eq!(status, EntityStatus::Suspended);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""SUSPENDED""#);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = "2024-05-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        for raw in [
            serde_json::json!("2024-05-01T10:00:00Z"),
            serde_json::json!("2024-05-01T12:00:00+02:00"),
            serde_json::json!("2024-05-01T10:00:00"),
            serde_json::json!("2024-05-01T10:00:00.000"),
            serde_json::json!("2024-05-01 10:00:00"),
            serde_json::json!(1_714_557_600_000_i64),
        ] {
            assert_eq!(parse_timestamp(&raw), Some(expected), "{raw}");
        }
        assert_eq!(parse_timestamp(&serde_json::json!("yesterday")), None);
        assert_eq!(parse_timestamp(&Value::Null), None);
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("active".parse::<EntityStatus>(), Ok(EntityStatus::Active));
        assert!("nope".parse::<EntityStatus>().is_err());
    }

    #[test]
    fn test_statistics_keep_unmodelled_fields() {
        let stats: EntityStatistics =
            serde_json::from_str(r#"{"total":4,"active":3,"inactive":1,"suspended":0}"#).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.extra.get("suspended"), Some(&serde_json::json!(0)));
    }
}
