use std::ops::Deref;

use self::{definition::AbstractEventStore, dummy::DummyEventStore};

pub mod definition;

mod dummy;

#[cfg(feature = "database-mongodb")]
mod mongo;

#[cfg(feature = "database-mongodb")]
pub use mongo::MongoEventStore;

#[derive(Clone)]
pub enum EventStore {
    Dummy(DummyEventStore),
    #[cfg(feature = "database-mongodb")]
    MongoDb(mongo::MongoEventStore),
}

impl Default for EventStore {
    fn default() -> Self {
        Self::Dummy(DummyEventStore::default())
    }
}

impl Deref for EventStore {
    type Target = dyn AbstractEventStore;

    fn deref(&self) -> &Self::Target {
        match self {
            EventStore::Dummy(dummy) => dummy,
            #[cfg(feature = "database-mongodb")]
            EventStore::MongoDb(mongo) => mongo,
        }
    }
}
