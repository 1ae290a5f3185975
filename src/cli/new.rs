use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{
    storage::item_storage::ItemStorage,
    utils::{clock::Clock, time::to_iso_timestamp},
};

use super::editor::{editor_seed, extract_message, resolve_editor, ExternalEditor, MessageEditor};

#[derive(Debug, Parser)]
pub struct NewCommand {
    #[arg(
        long,
        short,
        help = "Message to add. Opens an editor when missing or empty"
    )]
    message: Option<String>,
    #[arg(
        long,
        help = "Editor used when no message is given. Defaults to $VISUAL, $EDITOR or vim"
    )]
    editor: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NewOutcome {
    Added,
    NoMessage,
}

/// Command to process `new` command. Adds an item stamped with the current local time.
pub async fn process_new_command(
    NewCommand { message, editor }: NewCommand,
    storage: &impl ItemStorage,
    clock: &impl Clock,
) -> Result<()> {
    let editor = ExternalEditor::new(resolve_editor(editor));
    match add_item(message, storage, clock, &editor).await? {
        NewOutcome::Added => eprintln!("New item added."),
        NewOutcome::NoMessage => eprintln!("No message to add"),
    }
    Ok(())
}

/// A message given on the command line is stored as is, apart from newline normalization. A
/// message from the editor loses its trailing newlines and everything below the marker.
pub async fn add_item(
    message: Option<String>,
    storage: &impl ItemStorage,
    clock: &impl Clock,
    editor: &impl MessageEditor,
) -> Result<NewOutcome> {
    let message = match message.filter(|v| !v.is_empty()) {
        Some(message) => Some(message),
        None => editor
            .edit(&editor_seed())
            .await?
            .map(|text| extract_message(&text)),
    };

    let timestamp = clock.now();
    if storage.write_message(timestamp, message.as_deref()).await? {
        info!("Added item at {}", to_iso_timestamp(timestamp));
        Ok(NewOutcome::Added)
    } else {
        Ok(NewOutcome::NoMessage)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use tempfile::{tempdir, TempDir};

    use crate::{
        cli::editor::{editor_seed, MockMessageEditor, MARKER},
        storage::{
            config::StoreConfig,
            entities::ItemEntity,
            item_storage::{ItemStorage, ItemStorageImpl},
        },
        utils::clock::FixedClock,
    };

    use super::{add_item, NewOutcome};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    const TEST_TIME: NaiveDateTime =
        NaiveDateTime::new(TEST_DATE, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

    async fn test_storage() -> Result<(TempDir, ItemStorageImpl)> {
        let dir = tempdir()?;
        let storage = ItemStorageImpl::new(StoreConfig::new(dir.path()));
        storage.init().await?;
        Ok((dir, storage))
    }

    #[tokio::test]
    async fn test_message_skips_editor() -> Result<()> {
        let (_dir, storage) = test_storage().await?;
        let mut editor = MockMessageEditor::new();
        editor.expect_edit().never();

        let outcome = add_item(
            Some("Shipped the\n\n\n\nrelease\n".into()),
            &storage,
            &FixedClock(TEST_TIME),
            &editor,
        )
        .await?;

        assert_eq!(outcome, NewOutcome::Added);
        assert_eq!(
            storage.get_items(TEST_DATE).await?,
            vec![ItemEntity::new(TEST_TIME, "Shipped the\n\nrelease\n")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_editor_message() -> Result<()> {
        let (_dir, storage) = test_storage().await?;
        let mut editor = MockMessageEditor::new();
        editor
            .expect_edit()
            .withf(|seed: &str| seed == editor_seed())
            .times(1)
            .returning(|_| Ok(Some(format!("Reviewed PRs\n\n\n{MARKER}"))));

        let outcome =
            add_item(Some(String::new()), &storage, &FixedClock(TEST_TIME), &editor).await?;

        assert_eq!(outcome, NewOutcome::Added);
        assert_eq!(
            storage.get_items(TEST_DATE).await?,
            vec![ItemEntity::new(TEST_TIME, "Reviewed PRs")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_untouched_editor_adds_nothing() -> Result<()> {
        let (_dir, storage) = test_storage().await?;
        let mut editor = MockMessageEditor::new();
        editor.expect_edit().times(1).returning(|_| Ok(None));

        let outcome = add_item(None, &storage, &FixedClock(TEST_TIME), &editor).await?;

        assert_eq!(outcome, NewOutcome::NoMessage);
        assert!(!storage.config().record_path(TEST_DATE).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_editor_message_adds_nothing() -> Result<()> {
        let (_dir, storage) = test_storage().await?;
        let mut editor = MockMessageEditor::new();
        editor
            .expect_edit()
            .times(1)
            .returning(|seed| Ok(Some(format!("\n\n\n{seed}"))));

        let outcome = add_item(None, &storage, &FixedClock(TEST_TIME), &editor).await?;

        assert_eq!(outcome, NewOutcome::NoMessage);
        assert!(storage.get_items(TEST_DATE).await?.is_empty());
        Ok(())
    }
}
