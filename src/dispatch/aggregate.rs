//! Folding per-send outcomes into one dispatch result.

use crate::models::{DispatchOutcome, DispatchResult};

/// Fold outcomes into a [`DispatchResult`].
///
/// The cycle counts as a success when any single send succeeded, so an outage
/// on one provider does not hide delivery through another. Outcome order is
/// preserved and the error summary follows the same order.
pub fn aggregate(outcomes: Vec<DispatchOutcome>) -> DispatchResult {
    let overall_success = outcomes.iter().any(DispatchOutcome::is_success);
    let error_summary = outcomes
        .iter()
        .filter_map(DispatchOutcome::failure_summary)
        .collect();

    DispatchResult {
        overall_success,
        outcomes,
        error_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelKind, Contact};
    use crate::error::AdapterError;
    use crate::models::FailureReason;

    fn contact(n: &str) -> Contact {
        Contact::new(n).unwrap()
    }

    fn failed(kind: ChannelKind, n: &str) -> DispatchOutcome {
        DispatchOutcome::failure(
            kind,
            contact(n),
            FailureReason::Adapter(AdapterError::Transport("down".to_string())),
        )
    }

    #[test]
    fn test_empty_outcomes_are_not_a_success() {
        let result = aggregate(Vec::new());
        assert!(!result.overall_success);
        assert!(result.error_summary.is_empty());
    }

    #[test]
    fn test_all_success() {
        let result = aggregate(vec![
            DispatchOutcome::success(ChannelKind::Sms, contact("+15550001")),
            DispatchOutcome::success(ChannelKind::Voice, contact("+15550001")),
        ]);
        assert!(result.overall_success);
        assert!(result.error_summary.is_empty());
        assert_eq!(result.success_count(), 2);
    }

    #[test]
    fn test_partial_failure_is_overall_success() {
        let result = aggregate(vec![
            failed(ChannelKind::Sms, "+15550001"),
            DispatchOutcome::success(ChannelKind::Voice, contact("+15550001")),
        ]);
        assert!(result.overall_success);
        assert_eq!(result.error_summary.len(), 1);
        assert_eq!(result.failure_count(), 1);
        assert_eq!(result.delivered_channels(), vec![ChannelKind::Voice]);
    }

    #[test]
    fn test_summary_follows_outcome_order() {
        let result = aggregate(vec![
            failed(ChannelKind::Sms, "+15550001"),
            failed(ChannelKind::Sms, "+15550002"),
            DispatchOutcome::failure(ChannelKind::Voice, contact("+15550001"), FailureReason::Timeout),
        ]);
        assert!(!result.overall_success);
        assert_eq!(
            result.error_summary,
            vec![
                "sms to +15550001: Transport error: down".to_string(),
                "sms to +15550002: Transport error: down".to_string(),
                "voice to +15550001: Timed out waiting for provider".to_string(),
            ]
        );
        assert_eq!(result.timeout_count(), 1);
    }
}
