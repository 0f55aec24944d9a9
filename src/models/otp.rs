use iso8601_timestamp::Timestamp;

/// One-time code issued for a single management access request
///
/// At most one record exists per `(event_id, claimant_email_normalised)`
/// pair; issuing again replaces the outstanding record for that pair.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Event this code unlocks
    pub event_id: String,

    /// Email the code was sent to, exactly as submitted
    pub claimant_email: String,

    /// Case-folded email, the lookup key
    pub claimant_email_normalised: String,

    /// Fixed-length decimal code, leading zeros included
    pub code: String,

    /// When the code was issued
    pub issued_at: Timestamp,

    /// When the code stops being accepted
    pub expires_at: Timestamp,

    /// Whether the code has already unlocked a session
    #[serde(default)]
    pub consumed: bool,
}
