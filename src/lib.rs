#[macro_use]
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate async_trait;
#[macro_use]
extern crate nanoid;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_json;

#[cfg(feature = "schemas")]
#[macro_use]
extern crate schemars;
#[cfg(feature = "database-mongodb")]
#[macro_use]
extern crate bson;

mod result;
pub use result::*;

pub mod config;
pub mod database;
pub mod event_store;
pub mod events;
pub mod r#impl;
pub mod models;
pub mod notifier;
pub mod util;

#[cfg(test)]
pub mod test;

pub use config::Config;
pub use database::{Database, Migration};
pub use event_store::EventStore;
pub use events::EventgateEvent;
pub use notifier::Notifier;

use async_std::channel::Sender;

/// Eventgate state
#[derive(Default, Clone)]
pub struct Eventgate {
    pub config: Config,
    pub database: Database,
    pub event_store: EventStore,
    pub notifier: Notifier,
    pub event_channel: Option<Sender<EventgateEvent>>,
}

impl Eventgate {
    pub async fn publish_event(&self, event: EventgateEvent) {
        if let Some(sender) = &self.event_channel {
            if let Err(err) = sender.send(event).await {
                error!("Failed to publish an Eventgate event: {:?}", err);
            }
        }
    }
}
