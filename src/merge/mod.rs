//! Merge driver: walks a tree and concatenates matching files into one output
//!
//! The driver validates its inputs, compiles the ignore rules once, and then
//! streams every included file into a buffered writer. Only an invalid root
//! and output failures abort a run; unreadable files are annotated inline.

pub mod output;

use crate::core::error::{FileReadFailure, MergeError, Result};
use crate::core::types::ExtensionSet;
use crate::ignore::checker::RuleSet;
use crate::ignore::scanner::{FilteredFileScanner, IgnoredPath, ScanResult, ScanStats};
use output::MergeWriter;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything one merge run needs
#[derive(Debug, Clone, Serialize)]
pub struct MergeOptions {
    /// Directory to scan
    pub root: PathBuf,
    /// Destination file, overwritten if it exists
    pub output: PathBuf,
    /// Extensions of files to include
    pub extensions: ExtensionSet,
    /// Ignore-rule file; a missing file means no rules
    pub ignore_file: Option<PathBuf>,
}

impl MergeOptions {
    pub fn new(
        root: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        extensions: ExtensionSet,
    ) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            extensions,
            ignore_file: None,
        }
    }

    /// Set the ignore-rule file
    pub fn with_ignore_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_file = Some(path.into());
        self
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub output: PathBuf,
    /// Files whose header was written (including read failures)
    pub files_merged: usize,
    /// Files annotated with a read error instead of their contents
    pub read_failures: usize,
    /// Included files skipped because of their extension
    pub files_skipped_by_extension: usize,
    /// Number of compiled ignore rules
    pub ignore_rules: usize,
    /// Ignore-file lines skipped as malformed
    pub invalid_ignore_lines: usize,
    pub scan: ScanStats,
    /// Ignored files and pruned directories with their deciding rule
    pub ignored: Vec<IgnoredPath>,
}

/// Run a merge
pub fn merge(options: &MergeOptions) -> Result<MergeSummary> {
    if !options.root.is_dir() {
        return Err(MergeError::invalid_root(&options.root));
    }

    let rules = load_rules(options.ignore_file.as_deref())?;

    let file = File::create(&options.output)
        .map_err(|e| MergeError::output_write(&options.output, e))?;
    let mut writer = MergeWriter::new(BufWriter::new(file));

    let ScanResult {
        files,
        ignored,
        stats,
    } = FilteredFileScanner::new(&rules)
        .exclude_file(&options.output)
        .scan_directory(&options.root);

    let mut summary = MergeSummary {
        output: options.output.clone(),
        files_merged: 0,
        read_failures: 0,
        files_skipped_by_extension: 0,
        ignore_rules: rules.len(),
        invalid_ignore_lines: rules.skipped().len(),
        scan: stats,
        ignored,
    };

    for path in &files {
        if !options.extensions.matches(path) {
            summary.files_skipped_by_extension += 1;
            continue;
        }

        let recovered = write_file(&mut writer, path)
            .map_err(|e| MergeError::output_write(&options.output, e))?;
        if let Some(failure) = recovered {
            warn!("{}", failure);
            summary.read_failures += 1;
        }
        summary.files_merged += 1;
    }

    writer
        .flush()
        .map_err(|e| MergeError::output_write(&options.output, e))?;

    info!(
        "Merged {} files into {} ({} ignored, {} directories pruned)",
        summary.files_merged,
        options.output.display(),
        summary.scan.files_ignored,
        summary.scan.directories_pruned
    );

    Ok(summary)
}

/// Compile the ignore file, or fall back to an empty rule set when absent
fn load_rules(ignore_file: Option<&Path>) -> Result<RuleSet> {
    match ignore_file {
        Some(path) if path.is_file() => {
            RuleSet::from_file(path).map_err(|source| MergeError::IgnoreFile {
                path: path.to_path_buf(),
                source,
            })
        },
        Some(path) => {
            debug!("Ignore file {} not found, including everything", path.display());
            Ok(RuleSet::empty())
        },
        None => Ok(RuleSet::empty()),
    }
}

/// Write one file block. A read failure is written inline and handed back.
fn write_file<W: std::io::Write>(
    writer: &mut MergeWriter<W>,
    path: &Path,
) -> std::io::Result<Option<FileReadFailure>> {
    writer.write_header(path)?;

    match fs::read_to_string(path) {
        Ok(contents) => {
            writer.write_contents(&contents)?;
            Ok(None)
        },
        Err(source) => {
            let failure = FileReadFailure {
                path: path.to_path_buf(),
                source,
            };
            writer.write_read_failure(&failure)?;
            Ok(Some(failure))
        },
    }
}
