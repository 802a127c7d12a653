//! Dispatch orchestration.
//!
//! A dispatch cycle renders the alert once, sends it over every enabled
//! adapter to every contact concurrently, waits for every call to finish or
//! hit the cycle deadline, and aggregates the outcomes.

mod aggregate;

pub use aggregate::aggregate;

use crate::adapters::ChannelAdapter;
use crate::domain::{Contact, Location};
use crate::metrics::Metrics;
use crate::models::{AlertRequest, DispatchOutcome, DispatchResult, FailureReason};
use crate::registry::AdapterRegistry;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Limits applied to every dispatch cycle.
#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    /// Deadline for the whole cycle; unfinished sends are recorded as timeouts
    pub cycle_timeout: Duration,
    /// Maximum provider calls in flight at once
    pub max_concurrent_sends: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            cycle_timeout: Duration::from_secs(20),
            max_concurrent_sends: 16,
        }
    }
}

/// Fans an alert out over every enabled channel.
pub struct Dispatcher {
    registry: AdapterRegistry,
    settings: DispatchSettings,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(registry: AdapterRegistry, settings: DispatchSettings, metrics: Metrics) -> Self {
        Self {
            registry,
            settings,
            metrics,
        }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn settings(&self) -> DispatchSettings {
        self.settings
    }

    /// Run one dispatch cycle.
    ///
    /// Issues `enabled adapters × contacts` sends. A failing send never
    /// cancels its siblings. Outcomes are reported grouped by channel in
    /// registry order, then by contact in request order, independent of
    /// completion order.
    pub async fn dispatch(&self, request: &AlertRequest) -> DispatchResult {
        let started = Instant::now();
        let deadline = cycle_deadline(started, self.settings.cycle_timeout);
        let message = request.alert_message();
        let message = message.as_str();
        let location = &request.location;

        let pairs: Vec<(Arc<dyn ChannelAdapter>, Contact)> = self
            .registry
            .enabled_adapters()
            .iter()
            .flat_map(|adapter| {
                request
                    .contacts
                    .iter()
                    .map(move |contact| (Arc::clone(adapter), contact.clone()))
            })
            .collect();

        let limit = pairs.len().clamp(1, self.settings.max_concurrent_sends.max(1));

        tracing::info!(
            channels = self.registry.len(),
            contacts = request.contacts.len(),
            sends = pairs.len(),
            concurrency = limit,
            "Dispatching SOS alert"
        );

        let sends: Vec<_> = pairs
            .into_iter()
            .map(|(adapter, contact)| async move {
                send_one(adapter.as_ref(), contact, location, message, deadline).await
            })
            .collect();

        // `buffered` yields in submission order, which gives the stable
        // outcome ordering.
        let outcomes: Vec<DispatchOutcome> = stream::iter(sends).buffered(limit).collect().await;

        let result = aggregate(outcomes);

        self.metrics.record_dispatch_cycle(
            result.success_count(),
            result.failure_count(),
            result.timeout_count(),
        );

        tracing::info!(
            outcomes = result.outcomes.len(),
            succeeded = result.success_count(),
            failures = result.failure_count(),
            timed_out = result.timeout_count(),
            duration_ms = started.elapsed().as_millis() as u64,
            overall_success = result.overall_success,
            "Dispatch cycle complete"
        );

        result
    }
}

/// Deadline for a cycle started at `started`, saturating to a far-future
/// instant when `timeout` does not fit.
fn cycle_deadline(started: Instant, timeout: Duration) -> Instant {
    started
        .checked_add(timeout)
        .unwrap_or_else(|| started + FAR_FUTURE)
}

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

async fn send_one(
    adapter: &dyn ChannelAdapter,
    contact: Contact,
    location: &Location,
    message: &str,
    deadline: Instant,
) -> DispatchOutcome {
    let kind = adapter.kind();

    // Queued sends that only get a slot after the deadline are never issued.
    if Instant::now() >= deadline {
        tracing::warn!(channel = %kind, contact = %contact.masked(), "Send skipped, cycle deadline passed");
        return DispatchOutcome::failure(kind, contact, FailureReason::Timeout);
    }

    let started = Instant::now();
    match tokio::time::timeout_at(deadline, adapter.send(&contact, location, message)).await {
        Ok(Ok(())) => {
            tracing::debug!(
                channel = %kind,
                contact = %contact.masked(),
                duration_ms = started.elapsed().as_millis() as u64,
                "Alert delivered"
            );
            DispatchOutcome::success(kind, contact)
        }
        Ok(Err(e)) => {
            tracing::warn!(
                channel = %kind,
                contact = %contact.masked(),
                error = %e,
                "Alert delivery failed"
            );
            DispatchOutcome::failure(kind, contact, FailureReason::Adapter(e))
        }
        Err(_) => {
            tracing::warn!(channel = %kind, contact = %contact.masked(), "Alert delivery timed out");
            DispatchOutcome::failure(kind, contact, FailureReason::Timeout)
        }
    }
}
