//! Checkpoint persistence: timestamped per-category JSON snapshots

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use tracing::{debug, info};

use super::store::{Category, ResultStore};
use crate::error::{DomainSiftError, Result};

/// Stamp format embedded in checkpoint filenames. Lexicographic order on
/// formatted stamps matches chronological order, which is what the
/// latest-checkpoint selection relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Repository of checkpoint snapshots in a results directory.
///
/// Each checkpoint is four documents, `{category}_domains_{stamp}.json`,
/// every one a plain JSON array of domain strings. Snapshots are never
/// rewritten; later checkpoints supersede earlier ones by carrying a
/// greater stamp.
pub struct CheckpointRepository {
    dir: PathBuf,
    last_stamp: Option<String>,
}

impl CheckpointRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_stamp: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a snapshot of all four categories; returns the stamp used.
    pub fn write(&mut self, store: &ResultStore) -> Result<String> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DomainSiftError::io(e.to_string(), Some(self.dir.display().to_string()))
        })?;

        let stamp = self.next_stamp(Utc::now());

        for category in Category::ALL {
            let path = self
                .dir
                .join(format!("{}_domains_{}.json", category.as_str(), stamp));
            let content = serde_json::to_string_pretty(store.category(category))
                .map_err(|e| {
                    DomainSiftError::internal(format!("Failed to serialize checkpoint: {}", e))
                })?;
            fs::write(&path, content).map_err(|e| {
                DomainSiftError::io(e.to_string(), Some(path.display().to_string()))
            })?;
        }

        debug!(stamp = %stamp, dir = %self.dir.display(), "Checkpoint written");
        self.last_stamp = Some(stamp.clone());
        Ok(stamp)
    }

    /// Pick the stamp for a new snapshot.
    ///
    /// Two writes can land in the same second (e.g. a resumed run skipping
    /// everything); nudge forward so every checkpoint keeps a distinct
    /// stamp instead of overwriting its predecessor.
    fn next_stamp(&self, now: DateTime<Utc>) -> String {
        let mut at = now;
        let mut stamp = at.format(TIMESTAMP_FORMAT).to_string();

        if let Some(last) = &self.last_stamp {
            while stamp <= *last {
                at = at + Duration::seconds(1);
                stamp = at.format(TIMESTAMP_FORMAT).to_string();
            }
        }

        stamp
    }

    /// Load the most recent checkpoint, if any.
    ///
    /// Selection rule: the set of category files sharing the
    /// lexicographically greatest stamp wins. When no timestamped set
    /// exists, the well-known un-timestamped baseline files
    /// (`{category}_domains.json`) are read instead. A missing per-category
    /// file loads as empty.
    pub fn load_latest(&mut self) -> Result<Option<ResultStore>> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let pattern = Regex::new(
            r"^(?:checked|available|unavailable|error)_domains_(\d{8}_\d{6})\.json$",
        )
        .map_err(|e| DomainSiftError::internal(e.to_string()))?;

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            DomainSiftError::io(e.to_string(), Some(self.dir.display().to_string()))
        })?;

        let mut latest: Option<String> = None;
        for entry in entries {
            let entry = entry.map_err(|e| {
                DomainSiftError::io(e.to_string(), Some(self.dir.display().to_string()))
            })?;
            let name = entry.file_name();
            if let Some(stamp) = name
                .to_str()
                .and_then(|n| pattern.captures(n))
                .map(|c| c[1].to_string())
            {
                if latest.as_deref().map_or(true, |l| stamp.as_str() > l) {
                    latest = Some(stamp);
                }
            }
        }

        let suffix = match &latest {
            Some(stamp) => format!("_{}", stamp),
            None => String::new(),
        };

        let mut lists = Vec::with_capacity(Category::ALL.len());
        let mut found_any = false;
        for category in Category::ALL {
            let path = self
                .dir
                .join(format!("{}_domains{}.json", category.as_str(), suffix));
            let list = if path.exists() {
                found_any = true;
                let domains = Self::load_list(&path)?;
                info!(
                    count = domains.len(),
                    category = %category,
                    "Loaded domains from checkpoint"
                );
                domains
            } else {
                Vec::new()
            };
            lists.push(list);
        }

        if !found_any {
            return Ok(None);
        }

        // Keep new snapshots strictly ahead of what is already on disk.
        if latest > self.last_stamp {
            self.last_stamp = latest;
        }

        let mut lists = lists.into_iter();
        let (checked, available, unavailable, error) = (
            lists.next().unwrap_or_default(),
            lists.next().unwrap_or_default(),
            lists.next().unwrap_or_default(),
            lists.next().unwrap_or_default(),
        );
        Ok(Some(ResultStore::from_parts(
            checked,
            available,
            unavailable,
            error,
        )))
    }

    fn load_list(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| {
            DomainSiftError::io(e.to_string(), Some(path.display().to_string()))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| DomainSiftError::parse(e.to_string(), Some(content)))
    }
}
