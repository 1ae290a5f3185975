use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;

use crate::utils::{dir::default_store_path, time::date_to_record_name};

pub const RECORD_EXTENSION: &str = "json";

const LOCK_FILE_NAME: &str = ".lock";
const LOG_DIR_NAME: &str = "logs";

/// Where the datastore keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.i-did`
    pub fn from_home() -> Result<Self> {
        Ok(Self::new(default_store_path()?))
    }

    /// `<root>/<YYYY-MM-DD>.json`
    pub fn record_path(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(format!("{}.{RECORD_EXTENSION}", date_to_record_name(date)))
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR_NAME)
    }
}
