//! Output file format: one header block per merged file

use crate::core::error::FileReadFailure;
use std::io::{self, Write};
use std::path::Path;

/// Separator line around each file header
pub const SEPARATOR: &str =
    "================================================================================";

/// Writes header blocks and contents in the fixed merge format
pub struct MergeWriter<W: Write> {
    inner: W,
}

impl<W: Write> MergeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write the header that precedes every file
    pub fn write_header(&mut self, path: &Path) -> io::Result<()> {
        write!(
            self.inner,
            "\n{sep}\nFile: {}\n{sep}\n\n",
            path.display(),
            sep = SEPARATOR
        )
    }

    /// Write the file contents followed by a single newline
    pub fn write_contents(&mut self, contents: &str) -> io::Result<()> {
        self.inner.write_all(contents.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    /// Write the inline annotation that replaces unreadable contents
    pub fn write_read_failure(&mut self, failure: &FileReadFailure) -> io::Result<()> {
        writeln!(self.inner, "{}", failure)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
