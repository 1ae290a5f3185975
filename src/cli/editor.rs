use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::debug;

/// Used when neither `--editor`, `$VISUAL` nor `$EDITOR` name an editor.
pub const DEFAULT_EDITOR: &str = "vim --cmd ':set tw=79'";

/// Everything from this marker on is discarded from the edited message.
pub const MARKER: &str = "# ------------------------ >8 ------------------------\n\
                          # Do not delete the line above: everything below it will be discarded\n\
                          # Type your message above the line\n";

/// Abstracts the interactive part of collecting a message, so commands can be tested without a
/// terminal.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageEditor {
    /// Lets the user edit `seed`. Returns [None] if the text was left untouched.
    async fn edit(&self, seed: &str) -> Result<Option<String>>;
}

/// Text the editor is opened with: room for a message above the [MARKER].
pub fn editor_seed() -> String {
    format!("\n\n{MARKER}")
}

/// Keeps what the user typed above the [MARKER], without trailing newlines. Leading whitespace and
/// trailing spaces are left alone.
pub fn extract_message(text: &str) -> String {
    text.split(MARKER)
        .next()
        .unwrap_or_default()
        .trim_end_matches('\n')
        .to_string()
}

/// Picks the editor command. Blank values are skipped.
pub fn resolve_editor(explicit: Option<String>) -> String {
    explicit
        .into_iter()
        .chain(["VISUAL", "EDITOR"].into_iter().filter_map(|v| env::var(v).ok()))
        .find(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Runs an external editor on a temporary file. The command goes through the platform shell, so
/// it may carry its own arguments like [DEFAULT_EDITOR] does.
pub struct ExternalEditor {
    command: String,
    temp_dir: PathBuf,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            temp_dir: env::temp_dir(),
        }
    }

    /// Directory that holds the file being edited. The system temporary directory by default.
    pub fn with_temp_dir(self, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            ..self
        }
    }

    /// The path reaches the shell as a separate argument, so it is never parsed as shell syntax.
    fn shell_command(&self, path: &Path) -> Command {
        cfg_if::cfg_if! {
            if #[cfg(windows)] {
                {
                    let mut command = Command::new("cmd");
                    command
                        .arg("/C")
                        .arg(format!("{} \"{}\"", self.command, path.display()));
                    command
                }
            } else {
                {
                    let mut command = Command::new("sh");
                    command
                        .arg("-c")
                        .arg(format!("{} \"$1\"", self.command))
                        .arg("i-did")
                        .arg(path);
                    command
                }
            }
        }
    }
}

#[async_trait]
impl MessageEditor for ExternalEditor {
    async fn edit(&self, seed: &str) -> Result<Option<String>> {
        let path = tempfile::Builder::new()
            .prefix("i-did-")
            .suffix(".txt")
            .tempfile_in(&self.temp_dir)
            .context("Failed to create a file for the editor")?
            .into_temp_path();
        tokio::fs::write(&path, seed).await?;

        debug!("Running `{}` on {path:?}", self.command);
        let status = self
            .shell_command(&path)
            .status()
            .await
            .with_context(|| format!("Failed to run editor `{}`", self.command))?;
        if !status.success() {
            bail!("Editor `{}` exited with {status}", self.command);
        }

        let edited = tokio::fs::read_to_string(&path).await?.replace("\r\n", "\n");
        if edited == seed {
            return Ok(None);
        }
        Ok(Some(edited))
    }
}
