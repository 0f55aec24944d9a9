use iso8601_timestamp::Timestamp;

/// Management session minted by a successful code verification
///
/// Replaces the consumed code as proof of ownership for the rest of the
/// management window; the code itself is never accepted twice.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Bearer token presented on every mutating call
    pub token: String,

    /// Event this session manages
    pub event_id: String,

    /// Claimant the session was minted for
    pub claimant_email: String,

    /// When verification succeeded
    pub issued_at: Timestamp,

    /// When the session stops authorising calls
    pub expires_at: Timestamp,
}
