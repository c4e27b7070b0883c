//! Errors raised while deriving facts or building the decision tree.
//!
//! Every variant is unrecoverable at the point of detection: the computation
//! is pure, so retrying without new data cannot change the outcome. Callers
//! decide whether a failure aborts a batch or skips a record.

use thiserror::Error;

use super::facts::Fact;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// `until` was non-empty but not an ISO-8601 date-time with offset.
    #[error("malformed until timestamp '{until}': {reason}")]
    MalformedTimestamp { until: String, reason: String },

    /// A branch key that is not part of the fact schema.
    #[error("unknown fact name: {0}")]
    UnknownFactName(String),

    /// A branch without a child for one of the two values of its fact.
    #[error("branch on {fact} has no child for value {value}")]
    UnknownFactValue { fact: Fact, value: bool },

    /// A branch re-tests a fact already fixed higher up on the same path,
    /// so one of its children can never be reached.
    #[error("branch on {fact} is already decided by an ancestor; one child is unreachable")]
    UnreachableBranch { fact: Fact },

    #[error("invalid derivation rules: {0}")]
    InvalidRules(String),
}

impl ClassifyError {
    pub fn malformed_timestamp(until: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedTimestamp {
            until: until.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the record being classified rather than by
    /// the tree or rule configuration.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::MalformedTimestamp { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn malformed_timestamp_message_names_the_input() {
        let source = DateTime::parse_from_rfc3339("not-a-date").unwrap_err();
        let err = ClassifyError::malformed_timestamp("not-a-date", source);
        assert!(err.to_string().contains("'not-a-date'"));
        assert!(err.is_data_error());
    }

    #[test]
    fn configuration_errors_are_not_data_errors() {
        let err = ClassifyError::UnknownFactValue {
            fact: Fact::IsPickup,
            value: false,
        };
        assert_eq!(
            err.to_string(),
            "branch on IsPickup has no child for value false"
        );
        assert!(!err.is_data_error());
        assert!(!ClassifyError::UnknownFactName("IsGhost".into()).is_data_error());
    }
}
