use crate::Success;

/// Out-of-band delivery channel for codes and event ids
///
/// Both operations are best-effort: failures are reported to the caller
/// and never retried here.
#[async_trait]
pub trait AbstractNotifier: std::marker::Sync {
    /// Deliver an access code to the organiser's address
    async fn send_access_code(
        &self,
        to: &str,
        event_id: &str,
        code: &str,
        event_title: &str,
    ) -> Success;

    /// Deliver the event id after creation
    async fn send_event_created(
        &self,
        to: &str,
        event_id: &str,
        event_title: &str,
        date: Option<&str>,
        location: Option<&str>,
    ) -> Success;
}
