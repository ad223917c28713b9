use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub const README_FILENAME: &str = "README.md";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `{dir}/README.md` through a temp file and a rename, so a reader
/// never sees a half-written document.
pub fn download_readme(dir: &Path, markdown: &str) -> Result<PathBuf, ExportError> {
    ensure_output_dir(dir)?;

    let target = dir.join(README_FILENAME);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(markdown.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
    Ok(target)
}

/// "Copy": the raw markdown goes to `out` untouched so it can be piped into
/// a clipboard tool.
pub fn copy_readme(out: &mut impl Write, markdown: &str) -> io::Result<()> {
    out.write_all(markdown.as_bytes())?;
    if !markdown.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
