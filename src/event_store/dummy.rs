use crate::{
    models::{EventOwnership, EventSnapshot},
    Error, Result, Success,
};

use futures::lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::definition::AbstractEventStore;

#[derive(Default, Clone)]
pub struct DummyEventStore {
    pub events: Arc<Mutex<HashMap<String, EventSnapshot>>>,
}

#[async_trait]
impl AbstractEventStore for DummyEventStore {
    /// Look up the organiser contact recorded for an event
    async fn get_ownership(&self, event_id: &str) -> Result<Option<EventOwnership>> {
        let events = self.events.lock().await;
        Ok(events.get(event_id).map(|event| EventOwnership {
            organizer_email: event.organizer_email.clone(),
            title: event.title.clone(),
        }))
    }

    /// Fetch the full event record
    async fn find_event(&self, event_id: &str) -> Result<EventSnapshot> {
        let events = self.events.lock().await;
        events.get(event_id).cloned().ok_or(Error::EventNotFound)
    }

    /// Store a new event record
    async fn save_event(&self, event: &EventSnapshot) -> Success {
        let mut events = self.events.lock().await;
        events.insert(event.id.to_string(), event.clone());
        Ok(())
    }

    /// Write a merged record back in full
    async fn update_event(&self, event: &EventSnapshot) -> Success {
        let mut events = self.events.lock().await;
        events.insert(event.id.to_string(), event.clone());
        Ok(())
    }

    /// Delete an event record; false if it did not exist
    async fn delete_event(&self, event_id: &str) -> Result<bool> {
        let mut events = self.events.lock().await;
        Ok(events.remove(event_id).is_some())
    }
}
