//! Ignore-rule matching with .gitignore syntax
//!
//! This module compiles ignore files into ordered rule sets and evaluates
//! relative paths against them. It supports wildcards, negation, directory
//! patterns and anchoring. A directory that is excluded takes its whole
//! subtree with it: nothing beneath it can be re-included.

pub mod checker;
pub mod parser;
pub mod scanner;
