//! Shared types for the event enrichment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Inbound event ───────────────────────────────────────────────────

/// One notification event decoded from a queue message payload.
///
/// Only the free-text message matters to this worker; any other fields on
/// the wire are ignored. Immutable once decoded, lives for a single
/// pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Free text that may reference an email address.
    #[serde(rename = "Message")]
    pub message: String,
}

// ── Breach records ──────────────────────────────────────────────────

/// One disclosed-breach entry as returned by the lookup service.
///
/// Produced only by decoding the service response; never constructed by
/// hand. Field names are PascalCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreachRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "BreachDate")]
    pub breach_date: String,
    #[serde(rename = "AddedDate")]
    pub added_date: String,
    #[serde(rename = "ModifiedDate")]
    pub modified_date: String,
    #[serde(rename = "PwnCount")]
    pub pwn_count: i64,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "LogoPath")]
    pub logo_path: String,
    /// Exposed data categories, in service order.
    #[serde(rename = "DataClasses")]
    pub data_classes: Vec<String>,
    #[serde(rename = "IsVerified")]
    pub is_verified: bool,
    #[serde(rename = "IsFabricated")]
    pub is_fabricated: bool,
    #[serde(rename = "IsSensitive")]
    pub is_sensitive: bool,
    #[serde(rename = "IsRetired")]
    pub is_retired: bool,
    #[serde(rename = "IsSpamList")]
    pub is_spam_list: bool,
}

/// The result set for one lookup: breach entries in service order.
///
/// An empty `entries` is a valid result ("no breaches found") and is
/// distinct from a failed lookup. Serializes to the collector's canonical
/// wire form `{"Entries": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreachResults {
    #[serde(rename = "Entries")]
    pub entries: Vec<BreachRecord>,
}

impl BreachResults {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Pipeline outcome ────────────────────────────────────────────────

/// Terminal state of one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The result set was handed to the forwarder (delivery is best-effort,
    /// so this does not imply the collector received it).
    Forwarded,
    /// The message was dropped before enrichment completed.
    Dropped,
}

impl Outcome {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Forwarded => "forwarded",
            Self::Dropped => "dropped",
        }
    }
}

/// Record of one completed pipeline invocation.
#[derive(Debug, Clone)]
pub struct ProcessedEvent {
    /// How the message terminated.
    pub outcome: Outcome,
    /// The extracted email, when processing got that far.
    pub email: Option<String>,
    /// When processing completed.
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_event_decodes_message_field() {
        let event: InboundEvent =
            serde_json::from_str(r#"{"Message": "reach me at mailto:a@b.com"}"#).unwrap();
        assert_eq!(event.message, "reach me at mailto:a@b.com");
    }

    #[test]
    fn inbound_event_ignores_unknown_fields() {
        let event: InboundEvent = serde_json::from_str(
            r#"{"Message": "hello", "UserAgent": "probe", "Time": 1234567890}"#,
        )
        .unwrap();
        assert_eq!(event.message, "hello");
    }

    #[test]
    fn inbound_event_requires_message_field() {
        let result: Result<InboundEvent, _> = serde_json::from_str(r#"{"Other": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn breach_record_decodes_wire_names() {
        let raw = r#"{
            "Name": "Adobe",
            "Title": "Adobe",
            "Domain": "adobe.com",
            "BreachDate": "2013-10-04",
            "AddedDate": "2013-12-04T00:00:00Z",
            "ModifiedDate": "2022-05-15T23:52:49Z",
            "PwnCount": 152445165,
            "Description": "In October 2013...",
            "LogoPath": "Adobe.png",
            "DataClasses": ["Email addresses", "Passwords"],
            "IsVerified": true,
            "IsFabricated": false,
            "IsSensitive": false,
            "IsRetired": false,
            "IsSpamList": false
        }"#;
        let record: BreachRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.name, "Adobe");
        assert_eq!(record.pwn_count, 152_445_165);
        assert_eq!(
            record.data_classes,
            vec!["Email addresses".to_string(), "Passwords".to_string()]
        );
        assert!(record.is_verified);
        assert!(!record.is_spam_list);
    }

    #[test]
    fn results_serialize_to_entries_envelope() {
        let results = BreachResults::default();
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json, serde_json::json!({"Entries": []}));
    }

    #[test]
    fn results_round_trip_preserves_order() {
        let raw = r#"{"Entries": [
            {"Name": "B", "Title": "B", "Domain": "b.com", "BreachDate": "", "AddedDate": "", "ModifiedDate": "", "PwnCount": 2, "Description": "", "LogoPath": "", "DataClasses": [], "IsVerified": false, "IsFabricated": false, "IsSensitive": false, "IsRetired": false, "IsSpamList": false},
            {"Name": "A", "Title": "A", "Domain": "a.com", "BreachDate": "", "AddedDate": "", "ModifiedDate": "", "PwnCount": 1, "Description": "", "LogoPath": "", "DataClasses": [], "IsVerified": false, "IsFabricated": false, "IsSensitive": false, "IsRetired": false, "IsSpamList": false}
        ]}"#;
        let results: BreachResults = serde_json::from_str(raw).unwrap();
        // Service order, not re-sorted.
        assert_eq!(results.entries[0].name, "B");
        assert_eq!(results.entries[1].name, "A");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Forwarded.label(), "forwarded");
        assert_eq!(Outcome::Dropped.label(), "dropped");
    }
}
