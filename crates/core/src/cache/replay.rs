//! Call-history replay.

use std::sync::Arc;

use kvscribe_domain::{CallRecord, ReplayReport, Result};
use tracing::warn;

use super::hooks::{inputs_key, outputs_key};
use crate::store::ports::KeyValueStore;

/// Read-only view over the call history of tracked operations.
pub struct ReplayReporter {
    store: Arc<dyn KeyValueStore>,
}

impl ReplayReporter {
    /// Create a reporter over the given backing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Build the replay report for `operation`, oldest call first.
    ///
    /// The call count comes from the inputs list; a call whose wrapped
    /// operation failed leaves an input with no matching output, so records
    /// are zipped up to the shorter list. Counters and history are not
    /// mutated.
    pub async fn replay(&self, operation: &str) -> Result<ReplayReport> {
        let inputs = self.store.lrange(&inputs_key(operation), 0, -1).await?;
        let outputs = self.store.lrange(&outputs_key(operation), 0, -1).await?;

        if inputs.len() != outputs.len() {
            warn!(
                %operation,
                inputs = inputs.len(),
                outputs = outputs.len(),
                "history lists have unequal lengths"
            );
        }

        let calls = inputs.len() as u64;
        let records = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(input).into_owned(),
                output: String::from_utf8_lossy(output).into_owned(),
            })
            .collect();

        Ok(ReplayReport { operation: operation.to_string(), calls, records })
    }
}
