//! Part-file writes for downloads.
//!
//! A download is written to a hidden temp file next to the target and renamed
//! onto the target only after the transfer succeeded, so an interrupted run
//! never leaves a truncated file that the next run would skip as already
//! present. The temp file is created exclusively with a random name: it can
//! never truncate or replace a sibling, even one named like a temp file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Prefix of in-progress download files (`.dirmirror-XXXXXX.part`).
pub const TEMP_PREFIX: &str = ".dirmirror-";
/// Suffix of in-progress download files.
pub const TEMP_SUFFIX: &str = ".part";

/// An open temp file for one download.
pub struct PartFile {
    file: NamedTempFile,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create a fresh temp file in the directory of `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let dir = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o644));
        }
        let file = builder.tempfile_in(dir)?;
        Ok(PartFile {
            file,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Flush and rename the temp file onto the final path (full overwrite).
    /// Returns the number of bytes written.
    pub fn finalize(mut self) -> io::Result<u64> {
        self.file.flush()?;
        let written = self.written;
        self.file.persist(&self.final_path).map_err(|e| e.error)?;
        Ok(written)
    }

    /// Close and remove the temp file. A missing temp file is not an error.
    pub fn discard(self) -> io::Result<()> {
        match self.file.close() {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
