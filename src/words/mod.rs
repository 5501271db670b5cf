//! Word sources for the scan
//!
//! Where the dictionary comes from is the caller's business; this module
//! just turns a local word list file into the ordered sequence the scan
//! consumes, and ships a small starter list for runs without one.

use std::path::Path;

use crate::error::{DomainSiftError, Result};

/// Starter words whose tails happen to be real TLDs, so most of them
/// split into at least one candidate. Used when no word list is supplied.
pub const STARTER_WORDS: &[&str] = &[
    // -io tails
    "radio", "studio", "ratio", "patio", "folio", "audio", "trio",
    "scenario", "portfolio", "curio", "adagio",

    // -co tails
    "disco", "fresco", "tobacco", "stucco", "deco", "bronco", "sirocco",

    // -us tails
    "bonus", "campus", "cactus", "chorus", "citrus", "focus", "genius",
    "lotus", "status", "virus", "nimbus", "census",

    // -net tails
    "bonnet", "cabinet", "magnet", "planet", "sonnet", "hornet",
    "clarinet", "cornet",

    // -com / -tech / -biz tails
    "intercom", "sitcom", "telecom", "biotech", "showbiz",
];

/// Load a word list file: one word per line, blanks and `#` comments
/// skipped, order preserved.
pub fn load_word_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DomainSiftError::io(e.to_string(), Some(path.display().to_string())))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect())
}

pub fn starter_words() -> Vec<String> {
    STARTER_WORDS.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_starter_words_split() {
        let tlds = crate::scan::TldSet::default();
        let with_candidates = STARTER_WORDS
            .iter()
            .filter(|w| !crate::scan::split_word(w, &tlds).is_empty())
            .count();
        // The starter list exists to demo the splitter; most entries
        // should produce at least one candidate.
        assert!(with_candidates * 2 > STARTER_WORDS.len());
    }

    #[test]
    fn test_load_word_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# dictionary sample").unwrap();
        writeln!(file, "radio").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  bonus  ").unwrap();

        let words = load_word_file(file.path()).unwrap();
        assert_eq!(words, vec!["radio", "bonus"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_word_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, DomainSiftError::Io { .. }));
    }
}
