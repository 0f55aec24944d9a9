pub use crate::{
    config::Config,
    models::*,
    notifier::{DummyNotifier, Notification, Notifier},
    Error, Eventgate, EventgateEvent,
};

pub use async_std::channel::Receiver;

use async_std::channel::unbounded;
use chrono::Duration;
use iso8601_timestamp::Timestamp;

pub async fn for_test_with_config(config: Config) -> (Eventgate, Receiver<EventgateEvent>) {
    let (sender, receiver) = unbounded();

    (
        Eventgate {
            config,
            event_channel: Some(sender),
            ..Default::default()
        },
        receiver,
    )
}

pub async fn for_test() -> (Eventgate, Receiver<EventgateEvent>) {
    for_test_with_config(Config::default()).await
}

pub async fn for_test_with_failing_notifier() -> (Eventgate, Receiver<EventgateEvent>) {
    let (mut eventgate, receiver) = for_test().await;

    eventgate.notifier = Notifier::Dummy(DummyNotifier {
        fail: true,
        ..Default::default()
    });

    (eventgate, receiver)
}

/// Seed an event owned by `organizer_email`
pub async fn seed_event(
    eventgate: &Eventgate,
    event_id: &str,
    organizer_email: &str,
) -> EventSnapshot {
    let event = EventSnapshot {
        id: event_id.to_string(),
        title: "Spring meetup".to_string(),
        organizer_email: organizer_email.to_string(),
        date: None,
        location: Some("Warehouse 9".to_string()),
        description: None,
        extra: Default::default(),
    };

    eventgate.event_store.save_event(&event).await.unwrap();

    event
}

/// Issue and verify in one go, draining the events in between
pub async fn for_test_authenticated() -> (Eventgate, SessionCredential, Receiver<EventgateEvent>) {
    let (eventgate, receiver) = for_test().await;
    seed_event(&eventgate, "evt_1", "organizer@example.com").await;

    let otp = OtpRecord::issue(&eventgate, "evt_1", "organizer@example.com")
        .await
        .unwrap();

    // clear this event
    receiver.try_recv().expect("an event");

    let session = OtpRecord::verify(&eventgate, "evt_1", "organizer@example.com", &otp.code)
        .await
        .unwrap();

    // clear this event
    receiver.try_recv().expect("an event");

    (eventgate, session, receiver)
}

/// Outbox of the dummy notifier
pub async fn sent_notifications(eventgate: &Eventgate) -> Vec<Notification> {
    match &eventgate.notifier {
        Notifier::Dummy(dummy) => dummy.outbox.lock().await.clone(),
        _ => panic!("dummy notifier expected"),
    }
}

/// A timestamp `seconds` in the future
pub fn in_seconds(seconds: i64) -> Timestamp {
    Timestamp::from_unix_timestamp_ms(
        chrono::Utc::now()
            .checked_add_signed(Duration::seconds(seconds))
            .expect("failed to checked_add_signed")
            .timestamp_millis(),
    )
}

/// A timestamp `seconds` in the past
pub fn seconds_ago(seconds: i64) -> Timestamp {
    in_seconds(-seconds)
}

/// Handcrafted code record for deterministic verifier tests
pub fn otp_record(
    event_id: &str,
    claimant_email: &str,
    code: &str,
    expires_at: Timestamp,
) -> OtpRecord {
    OtpRecord {
        id: ulid::Ulid::new().to_string(),
        event_id: event_id.to_string(),
        claimant_email: claimant_email.to_string(),
        claimant_email_normalised: crate::util::normalise_email(claimant_email),
        code: code.to_string(),
        issued_at: Timestamp::now_utc(),
        expires_at,
        consumed: false,
    }
}

/// Handcrafted session for gate expiry tests
pub fn session_credential(
    event_id: &str,
    claimant_email: &str,
    expires_at: Timestamp,
) -> SessionCredential {
    SessionCredential {
        id: ulid::Ulid::new().to_string(),
        token: nanoid!(64),
        event_id: event_id.to_string(),
        claimant_email: claimant_email.to_string(),
        issued_at: Timestamp::now_utc(),
        expires_at,
    }
}
