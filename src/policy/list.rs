//! Normalized pattern storage shared by both matchers.

/// An immutable list of policy patterns, normalized once at construction.
///
/// Normalization lower-cases, trims, and appends a single trailing space to
/// every entry, so matchers can do plain `starts_with` tests against equally
/// normalized command strings. Duplicates (after normalization) are dropped,
/// first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct PolicyList {
    patterns: Vec<String>,
}

impl PolicyList {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<String> = Vec::new();
        for entry in raw {
            let mut normalized = entry.as_ref().trim().to_lowercase();
            normalized.push(' ');
            if !patterns.contains(&normalized) {
                patterns.push(normalized);
            }
        }
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}
