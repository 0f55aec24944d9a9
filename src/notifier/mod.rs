use std::ops::Deref;

use self::definition::AbstractNotifier;

pub mod definition;

mod dummy;
mod smtp;

pub use dummy::{DummyNotifier, Notification};
pub use smtp::SmtpNotifier;

#[derive(Clone)]
pub enum Notifier {
    Dummy(DummyNotifier),
    Smtp(SmtpNotifier),
}

impl Default for Notifier {
    fn default() -> Self {
        Self::Dummy(DummyNotifier::default())
    }
}

impl Deref for Notifier {
    type Target = dyn AbstractNotifier;

    fn deref(&self) -> &Self::Target {
        match self {
            Notifier::Dummy(dummy) => dummy,
            Notifier::Smtp(smtp) => smtp,
        }
    }
}
