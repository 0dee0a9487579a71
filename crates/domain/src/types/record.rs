//! Call-history records and the replay report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One logged call of a tracked operation: the rendered input arguments and
/// the rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Stable rendering of the call's input.
    pub input: String,
    /// Stable rendering of the call's output.
    pub output: String,
}

/// The recorded history of one tracked operation, oldest call first.
///
/// `calls` is the length of the inputs list, which is authoritative: a call
/// whose wrapped operation failed leaves an input with no matching output,
/// so `records` (zipped to the shorter list) may be shorter than `calls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Fully-qualified operation name.
    pub operation: String,
    /// Total number of recorded calls.
    pub calls: u64,
    /// Paired input/output records in call order.
    pub records: Vec<CallRecord>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.operation, self.calls)?;
        for record in &self.records {
            write!(f, "\n{}({}) -> {}", self.operation, record.input, record.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for types::record.
    use super::*;

    /// Validates `ReplayReport` rendering for the populated history scenario.
    ///
    /// Assertions:
    /// - Confirms the headline carries the operation name and call count.
    /// - Confirms one line per record, oldest first.
    #[test]
    fn test_report_display() {
        let report = ReplayReport {
            operation: "cache.store".to_string(),
            calls: 2,
            records: vec![
                CallRecord { input: "\"foo\"".to_string(), output: "key-1".to_string() },
                CallRecord { input: "\"bar\"".to_string(), output: "key-2".to_string() },
            ],
        };

        let rendered = report.to_string();
        assert_eq!(
            rendered,
            "cache.store was called 2 times:\n\
             cache.store(\"foo\") -> key-1\n\
             cache.store(\"bar\") -> key-2"
        );
    }

    /// Validates `ReplayReport` rendering for the never-called operation
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the headline reports zero calls.
    /// - Confirms no per-call lines are produced.
    #[test]
    fn test_report_display_zero_calls() {
        let report =
            ReplayReport { operation: "cache.store".to_string(), calls: 0, records: Vec::new() };

        assert_eq!(report.to_string(), "cache.store was called 0 times:");
    }

    /// Validates `ReplayReport` rendering for the dangling input scenario.
    ///
    /// Assertions:
    /// - Confirms the call count may exceed the number of rendered records.
    #[test]
    fn test_report_display_dangling_input() {
        let report = ReplayReport {
            operation: "cache.store".to_string(),
            calls: 2,
            records: vec![CallRecord {
                input: "\"ok\"".to_string(),
                output: "key-1".to_string(),
            }],
        };

        let rendered = report.to_string();
        assert!(rendered.starts_with("cache.store was called 2 times:"));
        assert_eq!(rendered.lines().count(), 2);
    }
}
