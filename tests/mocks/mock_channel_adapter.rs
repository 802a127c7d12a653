use async_trait::async_trait;
use sos_dispatch::adapters::ChannelAdapter;
use sos_dispatch::error::{AdapterError, AdapterResult};
use sos_dispatch::{ChannelKind, Contact, Location};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a mock send does.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Succeed,
    Fail(AdapterError),
    /// Sleep, then succeed
    Delay(Duration),
    /// Sleep, then fail
    DelayThenFail(Duration, AdapterError),
    /// Never complete
    Hang,
}

/// Mock channel adapter for testing.
///
/// Behaviour is configurable per contact with a fallback default. Every call
/// is recorded, and the peak number of concurrent sends is tracked.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockChannelAdapter {
    kind: ChannelKind,
    default: MockBehavior,
    per_contact: Arc<Mutex<HashMap<String, MockBehavior>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockChannelAdapter {
    pub fn new(kind: ChannelKind, default: MockBehavior) -> Self {
        Self {
            kind,
            default,
            per_contact: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn succeeding(kind: ChannelKind) -> Self {
        Self::new(kind, MockBehavior::Succeed)
    }

    pub fn failing(kind: ChannelKind) -> Self {
        Self::new(
            kind,
            MockBehavior::Fail(AdapterError::Provider {
                status: 503,
                message: "provider unavailable".to_string(),
            }),
        )
    }

    /// Override the behaviour for one contact.
    pub fn with_contact(self, contact: &str, behavior: MockBehavior) -> Self {
        self.per_contact
            .lock()
            .unwrap()
            .insert(contact.to_string(), behavior);
        self
    }

    /// Share this mock as a trait object while keeping a handle for assertions.
    pub fn shared(&self) -> Arc<dyn ChannelAdapter> {
        Arc::new(self.clone())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Contacts this adapter was called with, in call order.
    pub fn called_contacts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(contact, _)| contact.clone())
            .collect()
    }

    /// Message bodies this adapter received, in call order.
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn behavior_for(&self, contact: &Contact) -> MockBehavior {
        self.per_contact
            .lock()
            .unwrap()
            .get(contact.as_str())
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChannelAdapter for MockChannelAdapter {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn send(
        &self,
        contact: &Contact,
        _location: &Location,
        message_body: &str,
    ) -> AdapterResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((contact.to_string(), message_body.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(self.in_flight.clone());

        match self.behavior_for(contact) {
            MockBehavior::Succeed => Ok(()),
            MockBehavior::Fail(err) => Err(err),
            MockBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            MockBehavior::DelayThenFail(delay, err) => {
                tokio::time::sleep(delay).await;
                Err(err)
            }
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}
