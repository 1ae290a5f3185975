use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use tokio::{
    fs::{self, File},
    io::{self, AsyncWriteExt},
};
use tracing::warn;

/// Reads the whole file as a string. A missing file isn't an error and results in [None].
pub async fn read_if_exists(path: &Path) -> Result<Option<String>, io::Error> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replaces the contents of `path` so that readers observe either the previous file or the new
/// one, never a partially written file. Data goes into a sibling temporary file which is then
/// renamed over `path`.
pub async fn replace_atomically(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let tmp_path = temporary_sibling(path);

    let written = match write_synced(&tmp_path, contents).await {
        Ok(()) => fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };

    if written.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to clean up {tmp_path:?}: {e}");
            }
        }
    }
    written
}

/// `2024-03-01.json` becomes `2024-03-01.json.tmp` in the same directory, so the final rename
/// never crosses filesystems.
pub fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_synced(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let mut file = File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}
