use std::{fmt::Write, future, io::IsTerminal, sync::Arc};

use ansi_term::Colour;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::{
    storage::{entities::ItemEntity, item_storage::ItemStorage},
    utils::{clock::Clock, time::trailing_days},
};

pub const DEFAULT_SHOWN_DAYS: u32 = 7;

/// Lines of the message body are aligned under the headline.
const BODY_INDENT: &str = "           ";

#[derive(Debug, Parser)]
pub struct ShowCommand {
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Also print the rest of each message"
    )]
    verbose: u8,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SHOWN_DAYS,
        help = "Number of days to show, including today"
    )]
    days: u32,
}

/// Command to process `show` command. Prints the items of the last few days, most recent day
/// first.
pub async fn process_show_command(
    ShowCommand { verbose, days }: ShowCommand,
    storage: impl ItemStorage,
    clock: &impl Clock,
) -> Result<()> {
    let today = clock.now().date();
    let color = std::io::stdout().is_terminal();
    for (day, items) in collect_days(storage, today, days).await? {
        println!("{}", render_day(day, items, verbose > 0, color));
    }
    Ok(())
}

/// Loads the `count` days ending with `today`, newest first. Days without items are left out.
pub async fn collect_days(
    storage: impl ItemStorage,
    today: NaiveDate,
    count: u32,
) -> Result<Vec<(NaiveDate, Vec<ItemEntity>)>> {
    let storage = Arc::new(storage);

    stream::iter(trailing_days(today, count))
        .map(move |day| {
            let storage = storage.clone();
            async move { storage.get_items(day).await.map(|items| (day, items)) }
        })
        .buffered(4)
        .try_filter(|(day, items)| {
            if items.is_empty() {
                debug!("Nothing recorded on {day}");
            }
            future::ready(!items.is_empty())
        })
        .try_collect()
        .await
}

/// Renders a header for `day` followed by a line per item, sorted by time.
pub fn render_day(
    day: NaiveDate,
    mut items: Vec<ItemEntity>,
    verbose: bool,
    color: bool,
) -> String {
    let header = day.format("%A %B %d, %Y").to_string();
    let mut output = format!("\n{header}\n{}\n\n", "-".repeat(header.chars().count()));

    items.sort_by_key(|item| item.time);
    for item in items {
        let time = item.time.format("%H:%M").to_string();
        let time = if color {
            Colour::Yellow.paint(time).to_string()
        } else {
            time
        };
        // Writing into a String can't fail.
        let _ = writeln!(output, "{time}  {}", item.headline());

        if verbose {
            let mut has_body = false;
            for line in item.body_lines() {
                let _ = writeln!(output, "{BODY_INDENT}{line}");
                has_body = true;
            }
            if has_body {
                output.push('\n');
            }
        }
    }
    output
}
