use crate::{
    models::{OtpRecord, SessionCredential},
    Error, Result, Success,
};

use futures::lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{definition::AbstractDatabase, Migration};

#[derive(Default, Clone)]
pub struct DummyDb {
    pub otps: Arc<Mutex<HashMap<String, OtpRecord>>>,
    pub sessions: Arc<Mutex<HashMap<String, SessionCredential>>>,
}

fn otp_key(event_id: &str, email_normalised: &str) -> String {
    format!("{}/{}", event_id, email_normalised)
}

#[async_trait]
impl AbstractDatabase for DummyDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        println!("skip migration {:?}", migration);
        Ok(())
    }

    /// Find the outstanding code for an event/claimant pair
    async fn find_otp(
        &self,
        event_id: &str,
        email_normalised: &str,
    ) -> Result<Option<OtpRecord>> {
        let otps = self.otps.lock().await;
        Ok(otps.get(&otp_key(event_id, email_normalised)).cloned())
    }

    /// Save a code, replacing any previous one for the same pair
    async fn save_otp(&self, otp: &OtpRecord) -> Success {
        let mut otps = self.otps.lock().await;
        otps.insert(
            otp_key(&otp.event_id, &otp.claimant_email_normalised),
            otp.clone(),
        );
        Ok(())
    }

    /// Atomically flip a code from unused to consumed
    async fn consume_otp(&self, otp: &OtpRecord) -> Success {
        // Lookup, consumed check and flip happen under one lock so racing
        // verifies cannot both pass.
        let mut otps = self.otps.lock().await;
        match otps.get_mut(&otp_key(&otp.event_id, &otp.claimant_email_normalised)) {
            Some(stored) if stored.id == otp.id => {
                if stored.consumed {
                    Err(Error::AlreadyUsed)
                } else {
                    stored.consumed = true;
                    Ok(())
                }
            }
            _ => Err(Error::NoPendingRequest),
        }
    }

    /// Remove codes whose expiry has passed
    async fn purge_expired_otps(&self) -> Success {
        let mut otps = self.otps.lock().await;
        otps.retain(|_, otp| !otp.is_expired());
        Ok(())
    }

    /// Find session by token
    async fn find_session_by_token(&self, token: &str) -> Result<Option<SessionCredential>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .values()
            .find(|session| session.token == token)
            .cloned())
    }

    /// Save session
    async fn save_session(&self, session: &SessionCredential) -> Success {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.to_string(), session.clone());
        Ok(())
    }

    /// Delete session
    async fn delete_session(&self, id: &str) -> Success {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(id).is_some() {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }

    /// Remove sessions whose expiry has passed
    async fn purge_expired_sessions(&self) -> Success {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, session| !session.is_expired());
        Ok(())
    }

    /// Drop every code and session scoped to an event
    async fn delete_event_credentials(&self, event_id: &str) -> Success {
        let mut otps = self.otps.lock().await;
        otps.retain(|_, otp| otp.event_id != event_id);
        drop(otps);

        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, session| session.event_id != event_id);
        Ok(())
    }
}
