use crate::{
    models::{OtpRecord, SessionCredential},
    Result, Success,
};

use super::Migration;

#[async_trait]
pub trait AbstractDatabase: std::marker::Sync {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success;

    /// Find the outstanding code for an event/claimant pair
    async fn find_otp(
        &self,
        event_id: &str,
        email_normalised: &str,
    ) -> Result<Option<OtpRecord>>;

    /// Save a code, replacing any previous one for the same pair
    async fn save_otp(&self, otp: &OtpRecord) -> Success;

    /// Atomically flip a code from unused to consumed
    ///
    /// Single read-modify-write: of any number of concurrent calls for the
    /// same record, exactly one succeeds. Fails with `AlreadyUsed` once
    /// the record is consumed and `NoPendingRequest` if it was superseded
    /// or removed.
    async fn consume_otp(&self, otp: &OtpRecord) -> Success;

    /// Remove codes whose expiry has passed
    async fn purge_expired_otps(&self) -> Success;

    /// Find session by token
    async fn find_session_by_token(&self, token: &str) -> Result<Option<SessionCredential>>;

    /// Save session
    async fn save_session(&self, session: &SessionCredential) -> Success;

    /// Delete session
    async fn delete_session(&self, id: &str) -> Success;

    /// Remove sessions whose expiry has passed
    async fn purge_expired_sessions(&self) -> Success;

    /// Drop every code and session scoped to an event
    async fn delete_event_credentials(&self, event_id: &str) -> Success;
}
