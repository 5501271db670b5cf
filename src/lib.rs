//! Domain Sift - dictionary-driven domain availability scanning
//!
//! Splits dictionary words at every boundary against a TLD set, checks the
//! resulting candidates sequentially over WHOIS or RDAP, and checkpoints
//! categorized results so interrupted scans resume without repeating work.

pub mod error;
pub mod lookup;
#[cfg(feature = "rdap")]
pub mod rdap;
pub mod scan;
pub mod types;
#[cfg(feature = "whois")]
pub mod whois;
pub mod words;

// Re-export commonly used types
pub use error::{DomainSiftError, Result};
pub use lookup::{LookupClient, RegistryLookup};
pub use scan::{
    split_word, Category, CheckpointRepository, ResultStore, RetryPolicy, ScanController, TldSet,
};
pub use types::{
    LookupMethod, LookupOutcome, RegistrationRecord, RetryConfig, ScanConfig, ScanProgress,
    ScanSummary, ScanTermination,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
