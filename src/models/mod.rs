//! Request and result types for a dispatch cycle.

pub mod alert;
pub mod outcome;

pub use alert::{render_alert_message, AlertRequest};
pub use outcome::{DispatchOutcome, DispatchResult, FailureReason, OutcomeStatus};
