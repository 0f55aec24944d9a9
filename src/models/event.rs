use iso8601_timestamp::Timestamp;
use serde_json::{Map, Value};

/// The organiser contact recorded when an event was created
///
/// The only fact the issuer reads from the event store: an access code is
/// only ever sent to this address.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "schemas", derive(JsonSchema))]
pub struct EventOwnership {
    /// Address on file for the organiser
    pub organizer_email: String,

    /// Event title, for notification copy
    pub title: String,
}

/// Full event record as stored
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventSnapshot {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Event title
    pub title: String,

    /// Organiser contact; must match any claimant requesting access
    pub organizer_email: String,

    /// When the event takes place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,

    /// Where the event takes place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Layout editor and other open fields
    ///
    /// Known fields above, opaque values here; never dynamic property
    /// access.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial change set applied to an event
///
/// `None` means "leave unchanged"; fields absent from the set are never
/// dropped from the stored record.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct EventChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Open-field updates; a `null` value removes the key
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}
