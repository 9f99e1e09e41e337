//! Core data types for treemerge

use crate::core::error::{MergeError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Non-empty set of lowercase file extensions, each with a leading `.`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Normalize user supplied extensions (`txt`, `.TXT` and `.txt` are the same)
    pub fn new<I, S>(extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();

        for raw in extensions {
            let raw = raw.as_ref().trim();
            let bare = raw.strip_prefix('.').unwrap_or(raw);
            if bare.is_empty() || bare.contains(['/', '\\']) {
                return Err(MergeError::invalid_extension(raw));
            }
            set.insert(format!(".{}", bare.to_lowercase()));
        }

        if set.is_empty() {
            return Err(MergeError::NoExtensions);
        }

        Ok(Self(set))
    }

    /// Whether the file's last extension is in the set, ignoring case.
    ///
    /// Names like `.gitignore` have no extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.0.contains(&ext)
            })
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_dots_and_case() {
        let set = ExtensionSet::new(["txt", ".MD", ".txt"]).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![".md", ".txt"]);
    }

    #[test]
    fn test_matches_case_insensitively() {
        let set = ExtensionSet::new([".txt"]).unwrap();
        assert!(set.matches(Path::new("notes.TXT")));
        assert!(set.matches(Path::new("dir/a.b.txt")));
        assert!(!set.matches(Path::new("notes.txt.bak")));
        assert!(!set.matches(Path::new(".txt")));
        assert!(!set.matches(Path::new("README")));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(
            ExtensionSet::new(Vec::<String>::new()),
            Err(MergeError::NoExtensions)
        ));
        assert!(matches!(
            ExtensionSet::new(["."]),
            Err(MergeError::InvalidExtension { .. })
        ));
    }
}
