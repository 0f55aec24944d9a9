use bson::to_document;
use mongodb::options::UpdateOptions;
use std::ops::Deref;

use crate::{
    models::{EventOwnership, EventSnapshot},
    Error, Result, Success,
};

use super::definition::AbstractEventStore;

#[derive(Clone)]
pub struct MongoEventStore(pub mongodb::Database);

impl Deref for MongoEventStore {
    type Target = mongodb::Database;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl AbstractEventStore for MongoEventStore {
    /// Look up the organiser contact recorded for an event
    async fn get_ownership(&self, event_id: &str) -> Result<Option<EventOwnership>> {
        Ok(self
            .collection::<EventSnapshot>("events")
            .find_one(doc! {
                "_id": event_id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "event",
            })?
            .map(|event| EventOwnership {
                organizer_email: event.organizer_email,
                title: event.title,
            }))
    }

    /// Fetch the full event record
    async fn find_event(&self, event_id: &str) -> Result<EventSnapshot> {
        self.collection("events")
            .find_one(doc! {
                "_id": event_id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "event",
            })?
            .ok_or(Error::EventNotFound)
    }

    /// Store a new event record
    async fn save_event(&self, event: &EventSnapshot) -> Success {
        self.collection::<EventSnapshot>("events")
            .insert_one(event)
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "insert_one",
                with: "event",
            })
            .map(|_| ())
    }

    /// Write a merged record back in full
    async fn update_event(&self, event: &EventSnapshot) -> Success {
        self.collection::<EventSnapshot>("events")
            .update_one(
                doc! {
                    "_id": &event.id
                },
                doc! {
                    "$set": to_document(event).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "event",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "event",
            })
            .map(|_| ())
    }

    /// Delete an event record; false if it did not exist
    async fn delete_event(&self, event_id: &str) -> Result<bool> {
        self.collection::<EventSnapshot>("events")
            .delete_one(doc! {
                "_id": event_id
            })
            .await
            .map(|result| result.deleted_count > 0)
            .map_err(|_| Error::DatabaseError {
                operation: "delete_one",
                with: "event",
            })
    }
}
