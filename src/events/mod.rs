use crate::models::{EventSnapshot, OtpRecord, SessionCredential};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event_type")]
pub enum EventgateEvent {
    CreateOtp {
        otp: OtpRecord,
    },
    CreateSession {
        session: SessionCredential,
    },
    DeleteSession {
        session_id: String,
        event_id: String,
    },
    UpdateEvent {
        event: EventSnapshot,
    },
    DeleteEvent {
        event_id: String,
    },
}
