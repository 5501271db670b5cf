//! Candidate generation: try every split point of a word against the TLD set

use regex::Regex;
use std::collections::HashSet;

/// Normalized TLD set used to test word splits
#[derive(Debug, Clone)]
pub struct TldSet {
    tlds: HashSet<String>,
}

impl TldSet {
    /// Build a set from suffixes; leading dots stripped, compared lowercase.
    pub fn new<I, S>(tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tlds: tlds
                .into_iter()
                .map(|t| t.into().trim().trim_start_matches('.').to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.tlds.contains(&suffix.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }
}

impl Default for TldSet {
    fn default() -> Self {
        Self::new(crate::types::default_tlds())
    }
}

/// Generate every candidate domain a word can be split into.
///
/// For each split position the right part is tested case-insensitively
/// against the TLD set; matches emit `left.tld` with the label's original
/// casing kept and the suffix lowercased. Candidates come out in split
/// order, shortest label first, so a word of length L yields at most L-1.
pub fn split_word(word: &str, tlds: &TldSet) -> Vec<String> {
    let word = word.trim();
    let mut candidates = Vec::new();

    for (i, _) in word.char_indices().skip(1) {
        let label = &word[..i];
        let suffix = &word[i..];
        if tlds.contains(suffix) && is_valid_label(label) {
            candidates.push(format!("{}.{}", label, suffix.to_lowercase()));
        }
    }

    candidates
}

/// DNS label check: letters/digits/hyphens, no hyphen at either end, at
/// most 63 octets. Dictionary sources carry entries like `o'clock` that
/// would never resolve; those splits are dropped before they hit the wire.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }

    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?$")
        .map(|re| re.is_match(label))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tlds(list: &[&str]) -> TldSet {
        TldSet::new(list.iter().copied())
    }

    #[test]
    fn test_single_split_match() {
        assert_eq!(split_word("testco", &tlds(&["co"])), vec!["test.co"]);
    }

    #[test]
    fn test_no_match_yields_nothing() {
        assert!(split_word("technology", &tlds(&["co", "io"])).is_empty());
        assert!(split_word("", &tlds(&["co"])).is_empty());
    }

    #[test]
    fn test_split_order() {
        // Shortest label first: every matching split in increasing position.
        let set = tlds(&["a", "sa", "lsa"]);
        assert_eq!(
            split_word("salsa", &set),
            vec!["sa.lsa", "sal.sa", "sals.a"]
        );
    }

    #[test]
    fn test_case_insensitive_suffix() {
        // Suffix matches case-insensitively and is lowercased in the output;
        // the label keeps its original casing.
        assert_eq!(split_word("PortfolIO", &tlds(&["io"])), vec!["Portfol.io"]);
    }

    #[test]
    fn test_count_bound() {
        let set = tlds(&["a", "o", "io", "us"]);
        let word = "radious";
        let candidates = split_word(word, &set);
        assert!(candidates.len() <= word.len() - 1);
        for candidate in &candidates {
            let (label, suffix) = candidate.split_once('.').unwrap();
            assert!(set.contains(suffix));
            assert_eq!(format!("{}{}", label, suffix), word.to_lowercase());
        }
    }

    #[test]
    fn test_invalid_labels_filtered() {
        // Apostrophes and trailing hyphens are not legal DNS labels.
        assert!(split_word("o'clockco", &tlds(&["co"])).is_empty());
        assert!(split_word("ab-co", &tlds(&["co"])).is_empty());
    }

    #[test]
    fn test_tld_set_normalization() {
        let set = TldSet::new([".COM", " io "]);
        assert!(set.contains("com"));
        assert!(set.contains("IO"));
        assert_eq!(set.len(), 2);
    }
}
