use crate::{
    models::{EventOwnership, EventSnapshot},
    Result, Success,
};

#[async_trait]
pub trait AbstractEventStore: std::marker::Sync {
    /// Look up the organiser contact recorded for an event
    async fn get_ownership(&self, event_id: &str) -> Result<Option<EventOwnership>>;

    /// Fetch the full event record
    async fn find_event(&self, event_id: &str) -> Result<EventSnapshot>;

    /// Store a new event record
    async fn save_event(&self, event: &EventSnapshot) -> Success;

    /// Write a merged record back in full
    ///
    /// Callers merge partial changes before calling; the store never sees
    /// (and so can never drop) individual fields.
    async fn update_event(&self, event: &EventSnapshot) -> Success;

    /// Delete an event record; false if it did not exist
    async fn delete_event(&self, event_id: &str) -> Result<bool>;
}
