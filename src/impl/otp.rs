use chrono::Duration;
use iso8601_timestamp::Timestamp;

use crate::{
    models::{OtpRecord, SessionCredential},
    util::{assert_valid_email, canonicalise_code, constant_time_eq, generate_code, normalise_email},
    Error, Eventgate, EventgateEvent, Result,
};

impl OtpRecord {
    /// Issue a fresh access code for an event/claimant pair
    ///
    /// Replaces any outstanding code for the pair. The code is stored
    /// before the notifier runs, so a delivery failure surfaces as
    /// `NotifyFailed` while the stored code stays valid.
    pub async fn issue(
        eventgate: &Eventgate,
        event_id: &str,
        claimant_email: &str,
    ) -> Result<OtpRecord> {
        assert_valid_email(claimant_email)?;

        let ownership = eventgate
            .event_store
            .get_ownership(event_id)
            .await?
            .ok_or(Error::EventNotFound)?;

        // Only the address on file can ever receive a code.
        let claimant_email_normalised = normalise_email(claimant_email);
        if claimant_email_normalised != normalise_email(&ownership.organizer_email) {
            return Err(Error::EmailMismatch);
        }

        // Lazy sweep; expired codes are never served again anyway.
        eventgate.database.purge_expired_otps().await?;

        let otp = OtpRecord {
            id: ulid::Ulid::new().to_string(),
            event_id: event_id.to_string(),
            claimant_email: claimant_email.to_string(),
            claimant_email_normalised,
            code: generate_code(eventgate.config.otp.length),
            issued_at: Timestamp::now_utc(),
            expires_at: Timestamp::from_unix_timestamp_ms(
                chrono::Utc::now()
                    .checked_add_signed(Duration::seconds(eventgate.config.otp.expire_after))
                    .expect("failed to checked_add_signed")
                    .timestamp_millis(),
            ),
            consumed: false,
        };

        eventgate.database.save_otp(&otp).await?;

        eventgate
            .publish_event(EventgateEvent::CreateOtp { otp: otp.clone() })
            .await;

        if let Err(err) = eventgate
            .notifier
            .send_access_code(&otp.claimant_email, &otp.event_id, &otp.code, &ownership.title)
            .await
        {
            warn!(
                "Failed to deliver access code for event {}: {:?}",
                otp.event_id, err
            );
            return Err(Error::NotifyFailed);
        }

        Ok(otp)
    }

    /// Re-issue the code for an event the caller already manages
    pub async fn regenerate(
        eventgate: &Eventgate,
        session: &SessionCredential,
        event_id: &str,
        claimant_email: &str,
    ) -> Result<OtpRecord> {
        session.authorize(event_id, claimant_email)?;

        OtpRecord::issue(eventgate, event_id, claimant_email).await
    }

    /// Check whether this code's window has closed
    pub fn is_expired(&self) -> bool {
        Timestamp::now_utc() > self.expires_at
    }

    /// Verify a submitted code and unlock a management session
    ///
    /// The code is consumed exactly once; the returned credential carries
    /// its own window and authorises mutations until that closes.
    pub async fn verify(
        eventgate: &Eventgate,
        event_id: &str,
        claimant_email: &str,
        submitted_code: &str,
    ) -> Result<SessionCredential> {
        let email_normalised = normalise_email(claimant_email);

        let otp = eventgate
            .database
            .find_otp(event_id, &email_normalised)
            .await?
            .ok_or(Error::NoPendingRequest)?;

        if otp.is_expired() {
            return Err(Error::Expired);
        }

        if otp.consumed {
            return Err(Error::AlreadyUsed);
        }

        let submitted = canonicalise_code(submitted_code);
        if !constant_time_eq(&submitted, &otp.code) {
            return Err(Error::CodeMismatch);
        }

        // Single-use enforcement: the store flips `consumed` in one
        // read-modify-write, so a racing verify gets `AlreadyUsed`.
        eventgate.database.consume_otp(&otp).await?;

        SessionCredential::mint(eventgate, &otp).await
    }
}
