use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row identifier assigned by the backing store on insert.
pub type RecordId = i64;

// Keys of the settings rows this crate reads and writes. The rows pre-exist
// in the store; this crate never creates or deletes them.
pub const SETTING_JOIN_FORM_URL: &str = "google_form_join_ecell";
pub const SETTING_JOIN_FORM_ENABLED: &str = "google_form_enabled";
pub const SETTING_GLOBAL_POPUP_ENABLED: &str = "global_popup_enabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdvertisementStatus {
    Active,
    #[default]
    Inactive,
}

impl AdvertisementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// The writable column set of a blog post. Dates stay ISO `YYYY-MM-DD`
/// strings; the client treats them as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogData {
    pub title: String,
    pub author: String,
    pub date: String,
    pub status: BlogStatus,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub data: BlogData,
}

/// The writable column set of an event. `learning_points` and `schedule`
/// are JSON-encoded ordered lists (`None` when empty), matching the stored
/// column shape; [`decode_list_column`] / [`encode_list_column`] translate
/// at the form boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub title: String,
    pub event_type: String,
    pub organizer: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub status: EventStatus,
    pub image: Option<String>,
    pub description: String,
    pub overview: String,
    pub learning_description: String,
    pub learning_points: Option<String>,
    pub schedule_description: String,
    pub schedule: Option<String>,
    pub registration_link: String,
    pub registration_note: String,
    pub rating: Option<i32>,
    pub contact_email: String,
    pub tags: String,
    pub special_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub data: EventData,
}

/// The writable column set of an advertisement popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementData {
    pub title: String,
    pub image_url: String,
    pub event_id: Option<RecordId>,
    pub status: AdvertisementStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub data: AdvertisementData,
}

/// Encodes an ordered list for a JSON list column. Empty lists persist as
/// NULL rather than `[]`.
pub fn encode_list_column(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    match serde_json::to_string(items) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            log::error!("Failed to encode list column: {}", e);
            None
        }
    }
}

/// Decodes a JSON list column back into an ordered list. A missing or
/// malformed column decodes to an empty list.
pub fn decode_list_column(column: Option<&str>) -> Vec<String> {
    match column {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("Malformed list column {:?}: {}", raw, e);
            Vec::new()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_encodes_to_null_column() {
        assert_eq!(encode_list_column(&[]), None);
    }

    #[test]
    fn list_column_round_trips_in_order() {
        let items = vec!["Pitching".to_string(), "Networking".to_string()];
        let column = encode_list_column(&items).expect("non-empty list must encode");
        assert_eq!(decode_list_column(Some(&column)), items);
    }

    #[test]
    fn malformed_list_column_decodes_to_empty() {
        assert_eq!(decode_list_column(Some("not json")), Vec::<String>::new());
        assert_eq!(decode_list_column(None), Vec::<String>::new());
    }

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Upcoming).expect("serialize"),
            "\"upcoming\""
        );
        assert_eq!(AdvertisementStatus::Active.as_str(), "active");
        assert_eq!(BlogStatus::default(), BlogStatus::Draft);
    }
}
