//! Channel adapters.
//!
//! Every delivery mechanism sits behind the [`ChannelAdapter`] trait so the
//! dispatcher can treat SMS, voice and chat providers identically. Concrete
//! adapters differ only in endpoint, credentials and payload shape.

mod chat;
mod sms;
mod voice;

pub use chat::{ChatAdapter, ChatCredentials};
pub use sms::{SmsAdapter, SmsCredentials};
pub use voice::{VoiceAdapter, VoiceCredentials};

use crate::domain::{ChannelKind, Contact, Location};
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;

/// Uniform contract for one notification channel.
///
/// Implementations are created once at startup and shared read-only by every
/// dispatch cycle, so they must not keep per-call mutable state. A call to
/// [`send`](ChannelAdapter::send) issues at most one provider request and
/// never retries.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// The channel this adapter delivers on.
    fn kind(&self) -> ChannelKind;

    /// Deliver the pre-rendered alert to a single contact.
    async fn send(
        &self,
        contact: &Contact,
        location: &Location,
        message_body: &str,
    ) -> AdapterResult<()>;
}

/// Run a blocking provider call on the blocking thread pool.
pub(crate) async fn run_blocking<F>(call: F) -> AdapterResult<()>
where
    F: FnOnce() -> AdapterResult<()> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| AdapterError::Transport(format!("Task join error: {}", e)))?
}

/// Contacts reached through international gateways need a country code.
pub(crate) fn require_e164(kind: ChannelKind, contact: &Contact) -> AdapterResult<String> {
    contact.e164().ok_or_else(|| {
        AdapterError::UnsupportedContact(format!(
            "{} delivery needs a country code (+...), got {}",
            kind,
            contact.masked()
        ))
    })
}
