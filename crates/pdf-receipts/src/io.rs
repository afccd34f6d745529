//! Output file naming and writing

use crate::types::Result;
use chrono::{Local, NaiveDate};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `receipts_<YYYY-MM-DD>.pdf` for the given date
pub fn output_file_name(date: NaiveDate) -> String {
    format!("receipts_{}.pdf", date.format("%Y-%m-%d"))
}

/// Default output path in the working directory, named after today's local date
pub fn default_output_path() -> PathBuf {
    PathBuf::from(output_file_name(Local::now().date_naive()))
}

/// Sibling path the document is written to before being moved into place
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("receipts.pdf"));
    name.push(".part");
    path.with_file_name(name)
}

/// Write the finished document.
///
/// Bytes go to a `.part` file next to `path` which is renamed over `path`
/// only once fully written; on failure the partial file is removed.
pub async fn save_pdf(bytes: Vec<u8>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    let written = match tokio::fs::write(&partial, &bytes).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            log::debug!("Could not remove {}: {}", partial.display(), cleanup);
        }
        return Err(e.into());
    }

    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
