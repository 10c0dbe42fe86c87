//! Wire types for the `/users` REST resource.
//!
//! [`Record`] mirrors a row of the server's users table. [`FormDraft`] is the
//! unsaved form input that becomes the body of a create request.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// A persisted user entity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned unique identifier.
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Server-assigned creation time. Some servers omit it when echoing a
    /// freshly created row.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Unsaved form input for a new [`Record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub email: String,
}

impl FormDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Name of the first required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else {
            None
        }
    }
}

/// Body of `GET /users`. A missing or null `users` field means no records.
#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Option<Vec<Record>>,
}

impl UserList {
    pub fn into_records(self) -> Vec<Record> {
        self.users.unwrap_or_default()
    }
}

/// Body of a 2xx `POST /users`.
///
/// The server may echo the row, wrap it as `{ "user": row, ... }`, or answer
/// with any other confirmation (or nothing at all). Only the first two carry
/// a [`Record`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreateResponse {
    Bare(Record),
    Wrapped { user: Record },
    Confirmation(serde_json::Value),
}

impl CreateResponse {
    /// Interprets a success body. Never fails: whatever the server said, the
    /// row was created.
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return CreateResponse::Confirmation(serde_json::Value::Null);
        }
        serde_json::from_str(body)
            .unwrap_or_else(|_| CreateResponse::Confirmation(body.into()))
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            CreateResponse::Bare(record) | CreateResponse::Wrapped { user: record } => Some(record),
            CreateResponse::Confirmation(_) => None,
        }
    }
}

// Zone-less layouts, all read as UTC. `%.f` also matches an absent fraction.
const NAIVE_FORMATS: [&str; 2] = [
    // SQLite's CURRENT_TIMESTAMP.
    "%Y-%m-%d %H:%M:%S%.f",
    // ISO 8601 without an offset.
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Reads `created_at` leniently: a value that is not a known timestamp
/// becomes `None` instead of rejecting the whole record.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => match parse_timestamp(&s) {
            Ok(ts) => Some(ts),
            Err(reason) => {
                warn!(%reason, "ignoring created_at");
                None
            }
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            warn!(value = %other, "ignoring non-string created_at");
            None
        }
    })
}

/// Accepts RFC 3339, SQLite's `YYYY-MM-DD HH:MM:SS` and zone-less ISO 8601,
/// each with optional fractional seconds.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_deserializes_sqlite_timestamp() {
        let json = r#"{"id": 1, "name": "Ann", "email": "ann@x.com", "created_at": "2024-03-01 12:30:00"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn record_deserializes_rfc3339_timestamp() {
        let json = r#"{"id": 2, "name": "Bo", "email": "bo@x.com", "created_at": "2024-03-01T12:30:00+02:00"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn record_without_timestamp() {
        let json = r#"{"id": 3, "name": "Cy", "email": "cy@x.com"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.created_at.is_none());
    }

    #[test]
    fn record_with_garbage_timestamp_keeps_the_row() {
        let json = r#"{"id": 3, "name": "Cy", "email": "cy@x.com", "created_at": "yesterday"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 3);
        assert!(record.created_at.is_none());

        let json = r#"{"id": 4, "name": "Di", "email": "di@x.com", "created_at": 1709296200}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.created_at.is_none());
    }

    #[test]
    fn parse_timestamp_accepts_common_layouts() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        for raw in [
            "2024-03-01T12:30:00Z",
            "2024-03-01 12:30:00",
            "2024-03-01T12:30:00",
        ] {
            assert_eq!(parse_timestamp(raw), Ok(expected), "{raw}");
        }

        let millis = expected + chrono::Duration::milliseconds(123);
        assert_eq!(parse_timestamp("2024-03-01T12:30:00.123"), Ok(millis));
        assert_eq!(parse_timestamp("2024-03-01 12:30:00.123"), Ok(millis));
        assert!(parse_timestamp("01/03/2024").is_err());
    }

    #[test]
    fn user_list_survives_zone_less_timestamp() {
        let json = r#"{"users": [
            {"id": 1, "name": "A", "email": "a@x.com", "created_at": "2024-03-01T12:30:00.123"},
            {"id": 2, "name": "B", "email": "b@x.com", "created_at": "not a date"}
        ]}"#;
        let records = serde_json::from_str::<UserList>(json).unwrap().into_records();
        assert_eq!(records.len(), 2);
        assert!(records[0].created_at.is_some());
        assert!(records[1].created_at.is_none());
    }

    #[test]
    fn user_list_missing_or_null_is_empty() {
        let missing: UserList = serde_json::from_str("{}").unwrap();
        assert!(missing.into_records().is_empty());

        let null: UserList = serde_json::from_str(r#"{"users": null}"#).unwrap();
        assert!(null.into_records().is_empty());
    }

    #[test]
    fn user_list_preserves_server_order() {
        let json = r#"{"users": [
            {"id": 9, "name": "Z", "email": "z@x.com"},
            {"id": 1, "name": "A", "email": "a@x.com"}
        ]}"#;
        let ids: Vec<i64> = serde_json::from_str::<UserList>(json)
            .unwrap()
            .into_records()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![9, 1]);
    }

    #[test]
    fn create_response_bare_and_wrapped_carry_record() {
        let bare = CreateResponse::from_body(r#"{"id": 1, "name": "Ann", "email": "ann@x.com"}"#);
        assert_eq!(bare.into_record().map(|r| r.name), Some("Ann".to_string()));

        let wrapped = CreateResponse::from_body(
            r#"{"message": "ok", "user": {"id": 4, "name": "Di", "email": "di@x.com"}}"#,
        );
        assert_eq!(wrapped.into_record().map(|r| r.id), Some(4));
    }

    #[test]
    fn create_response_confirmation_without_record() {
        let confirmation = CreateResponse::from_body(r#"{"message": "User created", "id": 3}"#);
        assert!(matches!(confirmation, CreateResponse::Confirmation(_)));
        assert!(confirmation.into_record().is_none());

        assert_eq!(
            CreateResponse::from_body(""),
            CreateResponse::Confirmation(serde_json::Value::Null)
        );
        assert_eq!(
            CreateResponse::from_body("Created"),
            CreateResponse::Confirmation("Created".into())
        );
    }

    #[test]
    fn form_draft_missing_field() {
        assert_eq!(FormDraft::default().missing_field(), Some("name"));
        assert_eq!(FormDraft::new("Ann", "  ").missing_field(), Some("email"));
        assert_eq!(FormDraft::new("Ann", "ann@x.com").missing_field(), None);
    }

    #[test]
    fn form_draft_serializes_name_and_email_only() {
        let json = serde_json::to_value(FormDraft::new("Ann", "ann@x.com")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ann", "email": "ann@x.com"}));
    }
}
