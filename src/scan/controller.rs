//! Scan controller: the resumable, rate-limited checking loop
//!
//! Drives words through candidate generation and lookups, deduplicating
//! against everything checked before, checkpointing on a fixed cadence and
//! on every exit path. A run ends Completed (input exhausted), Interrupted
//! (cancellation observed between lookups), or propagates an unexpected
//! error after a best-effort recovery checkpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{info, warn};

use super::checkpoint::CheckpointRepository;
use super::retry::RetryPolicy;
use super::splitter::{split_word, TldSet};
use super::store::{Category, ResultStore};
use crate::error::Result;
use crate::lookup::RegistryLookup;
use crate::types::{ScanConfig, ScanProgress, ScanSummary, ScanTermination};

/// Sequential scan over a word sequence
pub struct ScanController<L: RegistryLookup> {
    config: ScanConfig,
    tlds: TldSet,
    store: ResultStore,
    checkpoints: CheckpointRepository,
    retry: RetryPolicy,
    lookup: L,
    cancel: Arc<AtomicBool>,
    words_processed: u64,
    lookups_performed: u64,
}

impl<L: RegistryLookup> ScanController<L> {
    /// Create a controller, seeding the store from the latest checkpoint in
    /// the configured results directory.
    pub fn new(config: ScanConfig, lookup: L) -> Result<Self> {
        let mut checkpoints = CheckpointRepository::new(&config.results_dir);
        let store = match checkpoints.load_latest()? {
            Some(store) => {
                info!(
                    checked = store.checked_count(),
                    available = store.available_count(),
                    "Resuming from previous checkpoint"
                );
                store
            }
            None => ResultStore::new(),
        };

        let tlds = TldSet::new(config.tlds.iter().cloned());
        let retry = RetryPolicy::new(config.retry.clone());

        Ok(Self {
            config,
            tlds,
            store,
            checkpoints,
            retry,
            lookup,
            cancel: Arc::new(AtomicBool::new(false)),
            words_processed: 0,
            lookups_performed: 0,
        })
    }

    /// Flag observed between lookups; setting it triggers a graceful
    /// Interrupted termination with a final checkpoint.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Run the scan, invoking `on_progress` after each processed word.
    pub async fn run<F>(&mut self, words: &[String], on_progress: F) -> Result<ScanSummary>
    where
        F: Fn(&ScanProgress),
    {
        let limit = self
            .config
            .word_limit
            .unwrap_or(words.len())
            .min(words.len());
        let words = &words[..limit];

        self.words_processed = 0;
        self.lookups_performed = 0;

        info!(
            words = words.len(),
            tlds = self.tlds.len(),
            method = %self.config.method,
            "Starting domain availability scan"
        );

        match self.scan_words(words, &on_progress).await {
            Ok(termination) => {
                self.checkpoints.write(&self.store)?;
                let summary = self.summary(termination);
                info!(
                    termination = %termination,
                    checked = summary.checked_count,
                    available = summary.available.len(),
                    unavailable = summary.unavailable_count,
                    errors = summary.error_count,
                    "Scan finished"
                );
                Ok(summary)
            }
            Err(e) => {
                // Checkpoint-then-raise: salvage progress before surfacing.
                if let Err(ckpt) = self.checkpoints.write(&self.store) {
                    warn!(error = %ckpt, "Failed to write recovery checkpoint");
                }
                Err(e)
            }
        }
    }

    async fn scan_words<F>(&mut self, words: &[String], on_progress: &F) -> Result<ScanTermination>
    where
        F: Fn(&ScanProgress),
    {
        for word in words {
            if self.cancelled() {
                return Ok(ScanTermination::Interrupted);
            }

            for candidate in split_word(word, &self.tlds) {
                if self.cancelled() {
                    return Ok(ScanTermination::Interrupted);
                }

                if !self.store.mark_checked(&candidate) {
                    continue;
                }

                self.lookups_performed += 1;
                let outcome = self
                    .retry
                    .check_availability(&self.lookup, &candidate)
                    .await;
                self.store.classify(&candidate, outcome);
                info!(domain = %candidate, outcome = %outcome, "Domain classified");

                // One request per delay window, regardless of outcome.
                sleep(self.config.request_delay).await;
            }

            self.words_processed += 1;
            let interval = self.config.checkpoint_interval.max(1);
            if self.words_processed % interval == 0 {
                self.checkpoints.write(&self.store)?;
                info!(
                    processed = self.words_processed,
                    total = words.len(),
                    checked = self.store.checked_count(),
                    available = self.store.available_count(),
                    "Progress checkpoint"
                );
            }

            on_progress(&self.progress(words.len() as u64));
        }

        Ok(ScanTermination::Completed)
    }

    fn cancelled(&self) -> bool {
        let cancelled = self.cancel.load(Ordering::SeqCst);
        if cancelled {
            info!("Cancellation requested; stopping scan");
        }
        cancelled
    }

    fn progress(&self, words_total: u64) -> ScanProgress {
        ScanProgress {
            words_processed: self.words_processed,
            words_total,
            checked_count: self.store.checked_count(),
            available_count: self.store.available_count(),
            unavailable_count: self.store.unavailable_count(),
            error_count: self.store.error_count(),
        }
    }

    fn summary(&self, termination: ScanTermination) -> ScanSummary {
        ScanSummary {
            termination,
            words_processed: self.words_processed,
            lookups_performed: self.lookups_performed,
            checked_count: self.store.checked_count(),
            available: self.store.category(Category::Available).to_vec(),
            unavailable_count: self.store.unavailable_count(),
            error_count: self.store.error_count(),
        }
    }
}
