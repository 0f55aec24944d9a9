use crate::{Error, Success};

use futures::lock::Mutex;
use std::sync::Arc;

use super::definition::AbstractNotifier;

/// Notification captured by the dummy notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    AccessCode {
        to: String,
        event_id: String,
        code: String,
        event_title: String,
    },
    EventCreated {
        to: String,
        event_id: String,
        event_title: String,
        date: Option<String>,
        location: Option<String>,
    },
}

/// In-memory notifier for tests and local development
#[derive(Default, Clone)]
pub struct DummyNotifier {
    /// Everything "sent" so far
    pub outbox: Arc<Mutex<Vec<Notification>>>,

    /// Report delivery failure without recording anything
    pub fail: bool,
}

#[async_trait]
impl AbstractNotifier for DummyNotifier {
    /// Deliver an access code to the organiser's address
    async fn send_access_code(
        &self,
        to: &str,
        event_id: &str,
        code: &str,
        event_title: &str,
    ) -> Success {
        if self.fail {
            return Err(Error::NotifyFailed);
        }

        let mut outbox = self.outbox.lock().await;
        outbox.push(Notification::AccessCode {
            to: to.to_string(),
            event_id: event_id.to_string(),
            code: code.to_string(),
            event_title: event_title.to_string(),
        });

        Ok(())
    }

    /// Deliver the event id after creation
    async fn send_event_created(
        &self,
        to: &str,
        event_id: &str,
        event_title: &str,
        date: Option<&str>,
        location: Option<&str>,
    ) -> Success {
        if self.fail {
            return Err(Error::NotifyFailed);
        }

        let mut outbox = self.outbox.lock().await;
        outbox.push(Notification::EventCreated {
            to: to.to_string(),
            event_id: event_id.to_string(),
            event_title: event_title.to_string(),
            date: date.map(str::to_string),
            location: location.map(str::to_string),
        });

        Ok(())
    }
}
