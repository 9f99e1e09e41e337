//! Core types and utilities for treemerge
//!
//! This module contains the error taxonomy and the small value types
//! shared by the ignore matcher and the merge driver.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{FileReadFailure, MergeError, Result};
pub use types::ExtensionSet;
