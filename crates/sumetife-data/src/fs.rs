//! Filesystem capability injected into [`MetricHandler`](crate::handler::MetricHandler).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Opens input files and writes output files on behalf of the handler.
///
/// The returned reader is owned by the caller; dropping it closes the file.
pub trait FileSystem {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>>;
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The real filesystem.
///
/// Writes go to a hidden sibling temp file which is then renamed over the
/// target, so an interrupted or failed write never leaves a truncated output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    /// Only regular files can be opened; a directory fails here rather
    /// than on the first read.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        Ok(Box::new(BufReader::new(file)))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let tmp = temp_path(path)?;
        if let Err(e) = std::fs::write(&tmp, contents) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }
}

/// `dir/out.json` → `dir/.out.json.tmp`
fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
