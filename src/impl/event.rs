use crate::{
    models::{EventChanges, EventSnapshot, SessionCredential},
    util::assert_valid_email,
    Error, Eventgate, EventgateEvent, Result, Success,
};

impl EventChanges {
    /// Merge this change set into a stored record
    ///
    /// Unspecified fields keep their stored value; a `null` open field
    /// removes its key.
    pub fn apply_to(&self, event: &mut EventSnapshot) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }

        if let Some(date) = self.date {
            event.date = Some(date);
        }

        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }

        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }

        for (key, value) in &self.extra {
            if value.is_null() {
                event.extra.remove(key);
            } else {
                event.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

impl EventSnapshot {
    /// Store a new event and mail its id to the organiser
    ///
    /// The record is stored before the notifier runs; a delivery failure
    /// surfaces as `NotifyFailed` while the event stays created.
    pub async fn create(eventgate: &Eventgate, event: EventSnapshot) -> Result<EventSnapshot> {
        assert_valid_email(&event.organizer_email)?;

        eventgate.event_store.save_event(&event).await?;

        let date = event.date.map(|date| date.format().to_string());

        if let Err(err) = eventgate
            .notifier
            .send_event_created(
                &event.organizer_email,
                &event.id,
                &event.title,
                date.as_deref(),
                event.location.as_deref(),
            )
            .await
        {
            warn!("Failed to deliver event id for event {}: {:?}", event.id, err);
            return Err(Error::NotifyFailed);
        }

        Ok(event)
    }

    /// Apply a change set through the gate
    pub async fn update(
        eventgate: &Eventgate,
        session: &SessionCredential,
        event_id: &str,
        claimant_email: &str,
        changes: &EventChanges,
    ) -> Result<EventSnapshot> {
        session.authorize(event_id, claimant_email)?;

        let mut event = eventgate.event_store.find_event(event_id).await?;
        changes.apply_to(&mut event);

        eventgate.event_store.update_event(&event).await?;

        eventgate
            .publish_event(EventgateEvent::UpdateEvent {
                event: event.clone(),
            })
            .await;

        Ok(event)
    }

    /// Delete an event and every credential scoped to it
    ///
    /// Irreversible; asking the user first is the caller's job.
    pub async fn delete(
        eventgate: &Eventgate,
        session: &SessionCredential,
        event_id: &str,
        claimant_email: &str,
    ) -> Success {
        session.authorize(event_id, claimant_email)?;

        if !eventgate.event_store.delete_event(event_id).await? {
            return Err(Error::EventNotFound);
        }

        eventgate.database.delete_event_credentials(event_id).await?;

        eventgate
            .publish_event(EventgateEvent::DeleteEvent {
                event_id: event_id.to_string(),
            })
            .await;

        Ok(())
    }
}
