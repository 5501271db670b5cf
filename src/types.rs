//! Core types and structures for domain-sift

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Classification of a candidate domain after lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupOutcome {
    /// No registration record was found.
    ///
    /// This is an approximation: some registries return minimal data even
    /// for registered names, so "no record" is not authoritative proof of
    /// availability.
    Available,
    /// A registration record with a registered name was found.
    Unavailable,
    /// The lookup failed after exhausting all retry attempts.
    Indeterminate,
}

impl std::fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupOutcome::Available => write!(f, "available"),
            LookupOutcome::Unavailable => write!(f, "unavailable"),
            LookupOutcome::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Lookup backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMethod {
    Whois,
    Rdap,
}

impl std::fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMethod::Whois => write!(f, "whois"),
            LookupMethod::Rdap => write!(f, "rdap"),
        }
    }
}

impl std::str::FromStr for LookupMethod {
    type Err = crate::error::DomainSiftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whois" => Ok(LookupMethod::Whois),
            "rdap" => Ok(LookupMethod::Rdap),
            other => Err(crate::error::DomainSiftError::config(format!(
                "Unknown lookup method '{}' (expected 'whois' or 'rdap')",
                other
            ))),
        }
    }
}

/// Registration data returned by a lookup backend
///
/// `registered_name` is the discriminator: `Some` means a registration
/// record exists, `None` means the registry reported no record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub registered_name: Option<String>,
    pub registrar: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub nameservers: Vec<String>,
}

impl RegistrationRecord {
    /// Record for a domain the registry has no entry for.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.registered_name.is_some()
    }
}

/// Configuration for the retry/backoff wrapper around lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per domain, including the first.
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles after each failure.
    pub initial_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

/// Configuration for a scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// TLD suffixes tried at every split point.
    pub tlds: Vec<String>,
    /// Truncate the word sequence to its first N entries.
    pub word_limit: Option<usize>,
    /// Lookup backend.
    pub method: LookupMethod,
    /// Checkpoint + progress log every N processed words.
    pub checkpoint_interval: u64,
    /// Fixed delay after every lookup, regardless of outcome.
    pub request_delay: Duration,
    /// Per-attempt connect/response timeout inside the lookup backend.
    pub lookup_timeout: Duration,
    /// Directory checkpoint documents are written to.
    pub results_dir: PathBuf,
    /// Retry/backoff policy.
    pub retry: RetryConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tlds: default_tlds(),
            word_limit: None,
            method: LookupMethod::Whois,
            checkpoint_interval: 100,
            request_delay: Duration::from_secs(1),
            lookup_timeout: Duration::from_secs(10),
            results_dir: PathBuf::from("results"),
            retry: RetryConfig::default(),
        }
    }
}

/// The stock TLD set: suffixes short and common enough to make word splits
/// worth checking.
pub fn default_tlds() -> Vec<String> {
    ["com", "net", "org", "info", "biz", "us", "co", "io", "tech"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// How a scan run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTermination {
    /// Input sequence exhausted.
    Completed,
    /// Cancellation signal observed between lookups.
    Interrupted,
}

impl std::fmt::Display for ScanTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanTermination::Completed => write!(f, "completed"),
            ScanTermination::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Final summary of a scan run
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub termination: ScanTermination,
    /// Words consumed from the input sequence this run.
    pub words_processed: u64,
    /// Lookups actually performed this run (skipped duplicates excluded).
    pub lookups_performed: u64,
    /// All domains ever checked, including prior runs.
    pub checked_count: usize,
    /// Available domains found, including prior runs.
    pub available: Vec<String>,
    pub unavailable_count: usize,
    pub error_count: usize,
}

/// Progress info passed to the scan callback after each word
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub words_processed: u64,
    pub words_total: u64,
    pub checked_count: usize,
    pub available_count: usize,
    pub unavailable_count: usize,
    pub error_count: usize,
}
