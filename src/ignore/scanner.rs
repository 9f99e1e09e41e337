//! Deterministic directory walk with ignore-rule pruning

use crate::ignore::checker::{IgnoreResult, RuleSet};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Result of a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files that passed filtering, in walk order
    pub files: Vec<PathBuf>,
    /// Files and pruned directories with the reason they were ignored
    pub ignored: Vec<IgnoredPath>,
    pub stats: ScanStats,
}

/// A path left out of the merge and the rule that decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Statistics from a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Files seen in directories that were not pruned
    pub files_discovered: usize,
    /// Files excluded by a rule
    pub files_ignored: usize,
    /// Directories excluded by a rule and never entered
    pub directories_pruned: usize,
    /// Entries that could not be read during the walk
    pub walk_errors: usize,
}

/// Walks a tree in lexicographic order, pruning ignored directories before descent
pub struct FilteredFileScanner<'a> {
    rules: &'a RuleSet,
    /// Files never yielded regardless of rules
    excluded: Vec<PathBuf>,
}

impl<'a> FilteredFileScanner<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            excluded: Vec::new(),
        }
    }

    /// Never yield this file. Compared after canonicalization.
    pub fn exclude_file(mut self, path: &Path) -> Self {
        match path.canonicalize() {
            Ok(canonical) => self.excluded.push(canonical),
            Err(_) => self.excluded.push(path.to_path_buf()),
        }
        self
    }

    /// Scan a directory. Paths are matched relative to `root`.
    pub fn scan_directory(&self, root: &Path) -> ScanResult {
        let pruned: RefCell<Vec<IgnoredPath>> = RefCell::new(Vec::new());
        let mut result = ScanResult::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match self.rules.matched(relative_to(entry.path(), root), true) {
                    IgnoreResult::Ignored(reason) => {
                        debug!("Pruning {}: {}", entry.path().display(), reason);
                        pruned.borrow_mut().push(IgnoredPath {
                            path: entry.path().to_path_buf(),
                            reason,
                        });
                        false
                    },
                    _ => true,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing file: {}", e);
                    result.stats.walk_errors += 1;
                    continue;
                },
            };

            if !is_file(&entry) {
                continue;
            }

            result.stats.files_discovered += 1;

            if self.is_excluded(&entry) {
                debug!("Skipping output file {}", entry.path().display());
                continue;
            }

            let relative = relative_to(entry.path(), root);
            match self.rules.matched(relative, false) {
                IgnoreResult::Ignored(reason) => {
                    debug!("Ignoring {}: {}", entry.path().display(), reason);
                    result.stats.files_ignored += 1;
                    result.ignored.push(IgnoredPath {
                        path: entry.into_path(),
                        reason,
                    });
                },
                IgnoreResult::IncludedByNegation(rule) => {
                    debug!("Re-included {} by {}", entry.path().display(), rule);
                    result.files.push(entry.into_path());
                },
                IgnoreResult::Included => result.files.push(entry.into_path()),
            }
        }

        let pruned = pruned.into_inner();
        result.stats.directories_pruned = pruned.len();
        result.ignored.extend(pruned);
        result
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        // Cheap name check before touching the filesystem
        let name_matches = self
            .excluded
            .iter()
            .any(|p| p.file_name() == Some(entry.file_name()));
        name_matches
            && entry
                .path()
                .canonicalize()
                .map(|canonical| self.excluded.contains(&canonical))
                .unwrap_or(false)
    }
}

/// Regular files, plus symlinks that resolve to one. Linked directories are not followed.
fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn relative_to<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}
