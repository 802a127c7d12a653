//! Per-send outcomes and the composite result of a dispatch cycle.

use crate::domain::{ChannelKind, Contact};
use crate::error::AdapterError;
use std::fmt;

/// Why a single send did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The dispatch cycle deadline passed before the call finished
    Timeout,
    /// The adapter reported an error
    Adapter(AdapterError),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => f.write_str("Timed out waiting for provider"),
            FailureReason::Adapter(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    Failure(FailureReason),
}

/// Result of sending the alert to one contact over one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub kind: ChannelKind,
    pub contact: Contact,
    pub status: OutcomeStatus,
}

impl DispatchOutcome {
    pub fn success(kind: ChannelKind, contact: Contact) -> Self {
        Self {
            kind,
            contact,
            status: OutcomeStatus::Success,
        }
    }

    pub fn failure(kind: ChannelKind, contact: Contact, reason: FailureReason) -> Self {
        Self {
            kind,
            contact,
            status: OutcomeStatus::Failure(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failure(FailureReason::Timeout))
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match &self.status {
            OutcomeStatus::Success => None,
            OutcomeStatus::Failure(reason) => Some(reason),
        }
    }

    /// One-line description of a failure, `None` for a success.
    pub fn failure_summary(&self) -> Option<String> {
        self.failure_reason()
            .map(|reason| format!("{} to {}: {}", self.kind, self.contact, reason))
    }
}

/// Composite result of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// True when at least one send succeeded on any channel
    pub overall_success: bool,
    /// Every outcome, grouped by channel in registry order then by contact
    /// in request order
    pub outcomes: Vec<DispatchOutcome>,
    /// One entry per failed outcome, in outcome order
    pub error_summary: Vec<String>,
}

impl DispatchResult {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn timeout_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_timeout()).count()
    }

    /// Channels that delivered to at least one contact, in outcome order.
    pub fn delivered_channels(&self) -> Vec<ChannelKind> {
        let mut kinds = Vec::new();
        for outcome in self.outcomes.iter().filter(|o| o.is_success()) {
            if !kinds.contains(&outcome.kind) {
                kinds.push(outcome.kind);
            }
        }
        kinds
    }
}
