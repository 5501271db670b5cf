//! Integration tests for domain-sift

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use domain_sift::{
    CheckpointRepository, DomainSiftError, RegistrationRecord, RegistryLookup,
    Result as SiftResult, RetryConfig, ScanConfig, ScanController, ScanTermination,
};
use tempfile::TempDir;
use tokio_test::assert_ok;

/// Scripted lookup backend: fixed registered/failing sets, call counting,
/// and an optional cancellation trigger armed after N calls.
struct ScriptedLookup {
    registered: HashSet<String>,
    failing: HashSet<String>,
    calls: AtomicU64,
    cancel_after: Mutex<Option<(u64, Arc<AtomicBool>)>>,
}

impl ScriptedLookup {
    fn new(registered: &[&str], failing: &[&str]) -> Self {
        Self {
            registered: registered.iter().map(|s| s.to_string()).collect(),
            failing: failing.iter().map(|s| s.to_string()).collect(),
            calls: AtomicU64::new(0),
            cancel_after: Mutex::new(None),
        }
    }

    /// Raise `flag` once the given number of calls has been made.
    fn arm_cancel(&self, calls: u64, flag: Arc<AtomicBool>) {
        *self.cancel_after.lock().unwrap() = Some((calls, flag));
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryLookup for ScriptedLookup {
    async fn lookup(&self, domain: &str) -> SiftResult<RegistrationRecord> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((limit, flag)) = &*self.cancel_after.lock().unwrap() {
            if call >= *limit {
                flag.store(true, Ordering::SeqCst);
            }
        }

        if self.failing.contains(domain) {
            return Err(DomainSiftError::timeout(format!("lookup {}", domain), 10));
        }

        if self.registered.contains(domain) {
            Ok(RegistrationRecord {
                registered_name: Some(domain.to_string()),
                ..RegistrationRecord::default()
            })
        } else {
            Ok(RegistrationRecord::absent())
        }
    }
}

fn test_config(dir: &TempDir, tlds: &[&str]) -> ScanConfig {
    ScanConfig {
        tlds: tlds.iter().map(|s| s.to_string()).collect(),
        results_dir: dir.path().to_path_buf(),
        request_delay: Duration::from_millis(1),
        lookup_timeout: Duration::from_millis(100),
        retry: RetryConfig {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
        },
        ..ScanConfig::default()
    }
}

fn word_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_completed_scan_classifies_exhaustively() {
    let dir = TempDir::new().unwrap();
    let lookup = Arc::new(ScriptedLookup::new(&["rad.io"], &["pla.net"]));

    let mut controller =
        ScanController::new(test_config(&dir, &["io", "co", "net"]), Arc::clone(&lookup)).unwrap();
    let words = word_list(&["radio", "testco", "planet", "zzz"]);

    let summary = tokio_test::assert_ok!(controller.run(&words, |_| {}).await);

    assert_eq!(summary.termination, ScanTermination::Completed);
    assert_eq!(summary.words_processed, 4);
    assert_eq!(summary.checked_count, 3);
    assert_eq!(summary.available, vec!["test.co"]);
    assert_eq!(summary.unavailable_count, 1);
    assert_eq!(summary.error_count, 1);

    // Every checked domain landed in exactly one category.
    assert_eq!(
        summary.checked_count,
        summary.available.len() + summary.unavailable_count + summary.error_count
    );

    // 2 clean lookups + 3 attempts for the failing domain.
    assert_eq!(lookup.calls(), 5);

    // A final checkpoint exists on disk.
    let mut repo = CheckpointRepository::new(dir.path());
    let loaded = repo.load_latest().unwrap().expect("final checkpoint present");
    assert_eq!(loaded.checked_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_candidates_looked_up_once() {
    let dir = TempDir::new().unwrap();
    let lookup = Arc::new(ScriptedLookup::new(&[], &[]));

    let mut controller =
        ScanController::new(test_config(&dir, &["co"]), Arc::clone(&lookup)).unwrap();
    let words = word_list(&["testco", "testco"]);

    let summary = controller.run(&words, |_| {}).await.unwrap();

    assert_eq!(summary.words_processed, 2);
    assert_eq!(summary.lookups_performed, 1);
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_word_limit_truncates_input() {
    let dir = TempDir::new().unwrap();
    let lookup = Arc::new(ScriptedLookup::new(&[], &[]));

    let mut config = test_config(&dir, &["co", "io"]);
    config.word_limit = Some(1);
    let mut controller = ScanController::new(config, Arc::clone(&lookup)).unwrap();

    let words = word_list(&["testco", "radio"]);
    let summary = controller.run(&words, |_| {}).await.unwrap();

    assert_eq!(summary.words_processed, 1);
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_resumed_run_performs_no_lookups() {
    let dir = TempDir::new().unwrap();
    let words = word_list(&["radio", "testco", "planet"]);

    let first = Arc::new(ScriptedLookup::new(&["rad.io"], &[]));
    let mut controller =
        ScanController::new(test_config(&dir, &["io", "co", "net"]), Arc::clone(&first)).unwrap();
    controller.run(&words, |_| {}).await.unwrap();
    assert_eq!(first.calls(), 3);

    // Same words, fresh controller seeded from the checkpoint: every
    // candidate is already in `checked`, so zero lookups happen.
    let second = Arc::new(ScriptedLookup::new(&["rad.io"], &[]));
    let mut resumed =
        ScanController::new(test_config(&dir, &["io", "co", "net"]), Arc::clone(&second)).unwrap();
    let summary = resumed.run(&words, |_| {}).await.unwrap();

    assert_eq!(summary.termination, ScanTermination::Completed);
    assert_eq!(summary.lookups_performed, 0);
    assert_eq!(second.calls(), 0);
    assert_eq!(summary.checked_count, 3);
}

#[tokio::test(start_paused = true)]
async fn test_checkpoint_cadence() {
    let dir = TempDir::new().unwrap();
    let lookup = ScriptedLookup::new(&[], &[]);

    // 250 words with no matching split: cadence comes from word count alone.
    let words: Vec<String> = (0..250).map(|i| format!("word{:03}", i)).collect();

    let mut controller = ScanController::new(test_config(&dir, &["co"]), lookup).unwrap();
    controller.run(&words, |_| {}).await.unwrap();

    let checkpoints = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("checked_domains_")
        })
        .count();

    // Intermediate checkpoints at 100 and 200 words, plus the final one.
    assert_eq!(checkpoints, 3);
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_checkpoints_and_resumes() {
    let dir = TempDir::new().unwrap();
    let words = word_list(&[
        "folio", "patio", "curio", "testco", "planet", "bonus", "magnet",
    ]);
    let tlds = ["io", "co", "net", "us"];

    let lookup = Arc::new(ScriptedLookup::new(&["test.co"], &["pla.net"]));
    let mut controller =
        ScanController::new(test_config(&dir, &tlds), Arc::clone(&lookup)).unwrap();
    // 4 clean lookups + 3 failing attempts: call 7 raises the flag, so
    // cancellation is observed before the sixth word's lookup.
    lookup.arm_cancel(7, controller.cancel_flag());

    let summary = controller.run(&words, |_| {}).await.unwrap();

    assert_eq!(summary.termination, ScanTermination::Interrupted);
    assert_eq!(summary.checked_count, 5);
    assert_eq!(summary.available.len(), 3);
    assert_eq!(summary.unavailable_count, 1);
    assert_eq!(summary.error_count, 1);
    assert_eq!(lookup.calls(), 7);

    // The interrupt checkpoint holds exactly those counts.
    let mut repo = CheckpointRepository::new(dir.path());
    let loaded = repo.load_latest().unwrap().expect("interrupt checkpoint");
    assert_eq!(loaded.checked_count(), 5);
    assert_eq!(loaded.available_count(), 3);
    assert_eq!(loaded.unavailable_count(), 1);
    assert_eq!(loaded.error_count(), 1);

    // Resume: the five checked domains are skipped; only the two unvisited
    // words trigger lookups.
    let resumed_lookup = Arc::new(ScriptedLookup::new(&[], &[]));
    let mut resumed =
        ScanController::new(test_config(&dir, &tlds), Arc::clone(&resumed_lookup)).unwrap();
    let summary = resumed.run(&words, |_| {}).await.unwrap();

    assert_eq!(summary.termination, ScanTermination::Completed);
    assert_eq!(summary.lookups_performed, 2);
    assert_eq!(resumed_lookup.calls(), 2);
    assert_eq!(summary.checked_count, 7);
}

#[test]
fn test_cli_help() {
    assert_cmd::Command::cargo_bin("domain-sift")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("USAGE"))
        .stdout(predicates::str::contains("--method"));
}

#[test]
fn test_cli_rejects_unknown_option() {
    assert_cmd::Command::cargo_bin("domain-sift")
        .unwrap()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("Unknown option"));
}
