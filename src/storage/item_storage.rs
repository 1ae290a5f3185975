use std::{future::Future, io::ErrorKind, ops::Deref, path::Path};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use fs4::tokio::AsyncFileExt;
use tokio::fs::{self, File};
use tracing::{debug, instrument};

use crate::{
    fs::operations::{read_if_exists, replace_atomically},
    utils::text::remove_extra_newlines,
};

use super::{
    config::StoreConfig,
    entities::{DayRecordEntity, ItemEntity},
};

/// Interface for abstracting storage of items.
pub trait ItemStorage {
    /// Makes sure the storage root is a writable directory. Safe to call on every start.
    fn init(&self) -> impl Future<Output = Result<()>>;

    /// Retrieves items of the day `day` falls on, in the order they were written. A day without a
    /// record has no items.
    fn get_items(
        &self,
        day: impl Into<NaiveDate> + Send,
    ) -> impl Future<Output = Result<Vec<ItemEntity>>> + Send;

    /// Appends an item to the record of the day `timestamp` falls on. The message is normalized
    /// with [remove_extra_newlines] before it is stored, and `timestamp` is truncated to
    /// microseconds.
    ///
    /// The record is rewritten from what [ItemStorage::get_items] returns, so earlier items of
    /// that day written without normalization are stored normalized from then on.
    fn write_item(
        &self,
        timestamp: NaiveDateTime,
        message: &str,
    ) -> impl Future<Output = Result<()>>;

    /// Same as [ItemStorage::write_item], but an absent or empty message is treated as a
    /// cancellation and nothing is written. Returns whether an item was added.
    fn write_message(
        &self,
        timestamp: NaiveDateTime,
        message: Option<&str>,
    ) -> impl Future<Output = Result<bool>> {
        async move {
            match message {
                Some(message) if !message.is_empty() => {
                    self.write_item(timestamp, message).await?;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }
}

impl<T: Deref> ItemStorage for T
where
    T::Target: ItemStorage,
{
    fn init(&self) -> impl Future<Output = Result<()>> {
        self.deref().init()
    }

    fn get_items(
        &self,
        day: impl Into<NaiveDate> + Send,
    ) -> impl Future<Output = Result<Vec<ItemEntity>>> + Send {
        self.deref().get_items(day)
    }

    fn write_item(
        &self,
        timestamp: NaiveDateTime,
        message: &str,
    ) -> impl Future<Output = Result<()>> {
        self.deref().write_item(timestamp, message)
    }
}

/// The main realization of [ItemStorage]. Every calendar day gets its own JSON file under the
/// configured root.
pub struct ItemStorageImpl {
    config: StoreConfig,
}

impl ItemStorageImpl {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn read_record(path: &Path) -> Result<DayRecordEntity> {
        debug!("Reading {path:?}");
        let Some(content) = read_if_exists(path)
            .await
            .with_context(|| format!("Failed to read day record {path:?}"))?
        else {
            return Ok(DayRecordEntity::default());
        };
        serde_json::from_str(&content).with_context(|| format!("Day record {path:?} is corrupted"))
    }

    /// Serializes writers that share the same root. The lock is released when the file is
    /// dropped, even if unlocking fails.
    async fn lock_root(&self) -> Result<File> {
        let path = self.config.lock_path();
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open lock file {path:?}"))?;
        file.lock_exclusive()?;
        Ok(file)
    }
}

impl ItemStorage for ItemStorageImpl {
    async fn init(&self) -> Result<()> {
        let root = &self.config.root;
        match fs::metadata(root).await {
            Ok(metadata) if metadata.is_dir() => {
                if metadata.permissions().readonly() {
                    bail!("{root:?} is not writable");
                }
            }
            Ok(_) => bail!("{root:?} already exists but is not a directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Creating storage directory {root:?}");
                fs::create_dir_all(root)
                    .await
                    .with_context(|| format!("Failed to create {root:?}"))?;
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to inspect {root:?}")),
        }
        Ok(())
    }

    async fn get_items(&self, day: impl Into<NaiveDate> + Send) -> Result<Vec<ItemEntity>> {
        let path = self.config.record_path(day.into());
        let record = Self::read_record(&path).await?;
        // Older records may hold messages written before normalization existed.
        Ok(record.items.into_iter().map(ItemEntity::normalized).collect())
    }

    #[instrument(skip(self, message))]
    async fn write_item(&self, timestamp: NaiveDateTime, message: &str) -> Result<()> {
        let item = ItemEntity::new(timestamp.trunc_subsecs(6), remove_extra_newlines(message));
        let path = self.config.record_path(timestamp.date());

        let lock = self.lock_root().await?;
        let result = async {
            let mut items = self.get_items(timestamp).await?;
            items.push(item);
            let content = serde_json::to_vec(&DayRecordEntity { items })?;
            replace_atomically(&path, &content)
                .await
                .with_context(|| format!("Failed to write day record {path:?}"))?;
            debug!("Appended item to {path:?}");
            Ok::<_, anyhow::Error>(())
        }
        .await;
        lock.unlock_async().await?;
        result
    }
}
