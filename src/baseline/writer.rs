use crate::error::{Result, SplitError};
use std::fs;
use std::path::Path;

/// Write one category's JSON text, replacing any existing file
pub fn write_category(path: &Path, text: &str) -> Result<()> {
    let write_error = |source: std::io::Error| SplitError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    fs::write(path, text.as_bytes()).map_err(write_error)?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}
