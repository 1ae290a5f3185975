use std::{env, path::PathBuf};

use anyhow::{Context, Result};

/// Name of the directory inside the user's home that holds day records.
pub const STORE_DIR_NAME: &str = ".i-did";

/// Default location of the datastore. The directory isn't created here, see
/// [ItemStorage::init](crate::storage::item_storage::ItemStorage::init).
pub fn default_store_path() -> Result<PathBuf> {
    let mut path = PathBuf::from(home_dir()?);
    path.push(STORE_DIR_NAME);
    Ok(path)
}

fn home_dir() -> Result<String> {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            env::var("USERPROFILE").context("USERPROFILE should be present on Windows")
        } else {
            env::var("HOME").context("Couldn't find HOME")
        }
    }
}
