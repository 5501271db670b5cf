//! Retry policy: bounded attempts with exponential backoff around a lookup
//!
//! Converts persistent lookup failure into an explicit outcome; no error
//! crosses this boundary for expected failure modes.

use tracing::{debug, warn};

use crate::lookup::RegistryLookup;
use crate::types::{LookupOutcome, RetryConfig};

/// Wraps lookup calls with retries and backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Check a single domain, classifying it into the tri-state outcome.
    ///
    /// A found registration record maps to `Unavailable`; a successful
    /// lookup with no record maps to `Available` (an approximation - see
    /// [`LookupOutcome::Available`]). Transient failures back off 1, 2, 4 …
    /// units between attempts; exhaustion yields `Indeterminate`.
    pub async fn check_availability<L>(&self, lookup: &L, domain: &str) -> LookupOutcome
    where
        L: RegistryLookup + ?Sized,
    {
        let mut backoff = self.config.initial_backoff;

        for attempt in 1..=self.config.max_attempts {
            match lookup.lookup(domain).await {
                Ok(record) => {
                    debug!(
                        domain = %domain,
                        attempt,
                        registered = record.is_registered(),
                        "Lookup succeeded"
                    );
                    return if record.is_registered() {
                        LookupOutcome::Unavailable
                    } else {
                        LookupOutcome::Available
                    };
                }
                Err(e) => {
                    warn!(domain = %domain, attempt, error = %e, "Lookup attempt failed");

                    if !e.is_transient() {
                        // Retrying a config-shaped failure cannot help.
                        return LookupOutcome::Indeterminate;
                    }

                    if attempt < self.config.max_attempts {
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                    }
                }
            }
        }

        LookupOutcome::Indeterminate
    }
}
