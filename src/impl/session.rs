use chrono::Duration;
use iso8601_timestamp::Timestamp;

use crate::{
    models::{OtpRecord, SessionCredential},
    util::normalise_email,
    Error, Eventgate, EventgateEvent, Result, Success,
};

impl SessionCredential {
    /// Mint the session a successful verification unlocks
    ///
    /// Only ever called by `OtpRecord::verify`, so one consumed code maps
    /// to exactly one credential.
    pub(crate) async fn mint(eventgate: &Eventgate, otp: &OtpRecord) -> Result<SessionCredential> {
        // Lazy sweep, mirroring the one in `OtpRecord::issue`.
        eventgate.database.purge_expired_sessions().await?;

        let session = SessionCredential {
            id: ulid::Ulid::new().to_string(),
            token: nanoid!(64),
            event_id: otp.event_id.clone(),
            claimant_email: otp.claimant_email.clone(),
            issued_at: Timestamp::now_utc(),
            expires_at: Timestamp::from_unix_timestamp_ms(
                chrono::Utc::now()
                    .checked_add_signed(Duration::seconds(
                        eventgate.config.sessions.expire_after,
                    ))
                    .expect("failed to checked_add_signed")
                    .timestamp_millis(),
            ),
        };

        eventgate.database.save_session(&session).await?;

        eventgate
            .publish_event(EventgateEvent::CreateSession {
                session: session.clone(),
            })
            .await;

        Ok(session)
    }

    /// Resolve a bearer token to its session
    pub async fn find_by_token(eventgate: &Eventgate, token: &str) -> Result<SessionCredential> {
        eventgate
            .database
            .find_session_by_token(token)
            .await?
            .ok_or(Error::Unauthorized)
    }

    /// Check whether this session's window has closed
    pub fn is_expired(&self) -> bool {
        Timestamp::now_utc() > self.expires_at
    }

    /// Gate check every mutating call goes through
    ///
    /// The credential must target exactly the event and claimant being
    /// mutated and must still be inside its window.
    pub fn authorize(&self, event_id: &str, claimant_email: &str) -> Success {
        if self.event_id != event_id
            || normalise_email(&self.claimant_email) != normalise_email(claimant_email)
        {
            return Err(Error::Unauthorized);
        }

        if self.is_expired() {
            return Err(Error::SessionExpired);
        }

        Ok(())
    }

    /// Sign out: discard the session before its window closes
    pub async fn invalidate(self, eventgate: &Eventgate) -> Success {
        eventgate.database.delete_session(&self.id).await?;

        eventgate
            .publish_event(EventgateEvent::DeleteSession {
                session_id: self.id,
                event_id: self.event_id,
            })
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test::*;

    #[async_std::test]
    async fn authorize_success_within_window() {
        let (_eventgate, session, _receiver) = for_test_authenticated().await;

        assert_eq!(session.authorize("evt_1", "organizer@example.com"), Ok(()));

        // Case differences in the claimant never matter.
        assert_eq!(session.authorize("evt_1", "Organizer@EXAMPLE.com"), Ok(()));
    }

    #[async_std::test]
    async fn authorize_fails_for_other_targets() {
        let (_eventgate, session, _receiver) = for_test_authenticated().await;

        assert_eq!(
            session.authorize("evt_2", "organizer@example.com"),
            Err(Error::Unauthorized)
        );
        assert_eq!(
            session.authorize("evt_1", "intruder@other.com"),
            Err(Error::Unauthorized)
        );
    }

    #[async_std::test]
    async fn authorize_fails_once_expired() {
        let (eventgate, _receiver) = for_test().await;

        let session = session_credential("evt_1", "organizer@example.com", seconds_ago(60));
        eventgate.database.save_session(&session).await.unwrap();

        assert_eq!(
            session.authorize("evt_1", "organizer@example.com"),
            Err(Error::SessionExpired)
        );
    }

    #[async_std::test]
    async fn find_by_token_resolves_sessions() {
        let (eventgate, session, _receiver) = for_test_authenticated().await;

        let found = SessionCredential::find_by_token(&eventgate, &session.token)
            .await
            .unwrap();
        assert_eq!(found, session);

        assert_eq!(
            SessionCredential::find_by_token(&eventgate, "unknown-token").await,
            Err(Error::Unauthorized)
        );
    }

    #[async_std::test]
    async fn invalidate_discards_the_session() {
        let (eventgate, session, receiver) = for_test_authenticated().await;

        let token = session.token.clone();
        session.invalidate(&eventgate).await.unwrap();

        assert!(matches!(
            receiver.try_recv().expect("an event"),
            EventgateEvent::DeleteSession { .. }
        ));

        assert_eq!(
            SessionCredential::find_by_token(&eventgate, &token).await,
            Err(Error::Unauthorized)
        );
    }
}
