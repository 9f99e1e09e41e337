//! treemerge - concatenate a directory tree into one file, honouring .gitignore rules
//!
//! The crate has two parts:
//!
//! - **Ignore matching** ([`ignore`]): compiles `.gitignore` style rule files
//!   into an immutable [`RuleSet`] with negation, directory-only rules,
//!   anchoring and last-match-wins precedence, plus a scanner that prunes
//!   excluded directories before descending.
//! - **Merging** ([`merge`]): walks a tree in a deterministic order and writes
//!   every included file with a matching extension to one output file, each
//!   preceded by a fixed header.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use treemerge::{merge, ExtensionSet, MergeOptions};
//!
//! let extensions = ExtensionSet::new([".rs", "toml"])?;
//! let options = MergeOptions::new("./my-project", "merged.txt", extensions)
//!     .with_ignore_file("./my-project/.gitignore");
//!
//! let summary = merge(&options)?;
//! println!("merged {} files", summary.files_merged);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod core;
pub mod ignore;
pub mod merge;

// Re-export commonly used types
pub use crate::core::{
    error::{FileReadFailure, MergeError, Result},
    types::ExtensionSet,
};

pub use crate::ignore::{
    checker::{IgnoreResult, RuleSet},
    parser::{ParseError, Rule},
    scanner::IgnoredPath,
};

pub use crate::merge::{merge, MergeOptions, MergeSummary};

/// Current version of treemerge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
