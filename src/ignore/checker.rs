//! Rule-set evaluation with last-match-wins and parent pruning semantics

use crate::ignore::parser::{parse_line, ParseError, PatternType, Rule};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Result of ignore checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreResult {
    /// Path should be ignored
    Ignored(String), // Reason for ignoring
    /// Path should be included
    Included,
    /// Path would be ignored but is explicitly included by negation pattern
    IncludedByNegation(String), // Pattern that included it
}

impl IgnoreResult {
    pub fn is_ignored(&self) -> bool {
        matches!(self, IgnoreResult::Ignored(_))
    }
}

/// Ordered, immutable set of rules compiled from one ignore file
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    skipped: Vec<ParseError>,
}

impl RuleSet {
    /// A rule set that includes everything
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile ignore-file content. Malformed lines are skipped and recorded.
    pub fn compile(content: &str) -> Self {
        let mut rules = Vec::new();
        let mut skipped = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            match parse_line(line_num + 1, line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {}, // Empty line or comment
                Err(e) => {
                    warn!("Skipping invalid ignore pattern: {}", e);
                    skipped.push(e);
                },
            }
        }

        Self { rules, skipped }
    }

    /// Read and compile an ignore file. Fails on I/O errors and non UTF-8 content.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let rules = Self::compile(&content);
        debug!(
            "Loaded {} ignore rules from {}",
            rules.len(),
            path.display()
        );
        Ok(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Lines that were skipped as malformed
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decide whether a path relative to the ignore root is excluded.
    ///
    /// Every ancestor directory is evaluated first; once one is excluded,
    /// nothing beneath it can be re-included. The root itself (`""` or `.`)
    /// is always included.
    pub fn matched(&self, path: impl AsRef<Path>, is_dir: bool) -> IgnoreResult {
        let path = normalize(path.as_ref());
        if path.is_empty() {
            return IgnoreResult::Included;
        }

        for (idx, _) in path.match_indices('/') {
            let parent = &path[..idx];
            if let IgnoreResult::Ignored(reason) = self.evaluate(parent, true) {
                return IgnoreResult::Ignored(format!(
                    "parent directory '{}' ignored by {}",
                    parent, reason
                ));
            }
        }

        self.evaluate(&path, is_dir)
    }

    /// Check if a path should be ignored
    pub fn is_ignored(&self, path: impl AsRef<Path>, is_dir: bool) -> bool {
        self.matched(path, is_dir).is_ignored()
    }

    /// Last matching rule wins; parents are not considered here
    fn evaluate(&self, path: &str, is_dir: bool) -> IgnoreResult {
        let mut last_match: Option<&Rule> = None;
        let mut was_ignored = false;

        for rule in self.rules.iter().filter(|r| r.matches(path, is_dir)) {
            if rule.pattern_type == PatternType::Ignore {
                was_ignored = true;
            }
            last_match = Some(rule);
        }

        match last_match {
            None => IgnoreResult::Included,
            Some(rule) if rule.is_negated() => {
                if was_ignored {
                    IgnoreResult::IncludedByNegation(rule.describe())
                } else {
                    IgnoreResult::Included
                }
            },
            Some(rule) => IgnoreResult::Ignored(rule.describe()),
        }
    }
}

/// Forward-slash form of a relative path, without `.` components
fn normalize(path: &Path) -> String {
    let mut normalized = String::new();

    for component in path.components() {
        let part = match component {
            Component::Normal(part) => part.to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => continue,
        };
        if !normalized.is_empty() {
            normalized.push('/');
        }
        normalized.push_str(&part);
    }

    normalized
}
