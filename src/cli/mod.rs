pub mod editor;
pub mod new;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use new::{process_new_command, NewCommand};
use show::{process_show_command, ShowCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    storage::{
        config::StoreConfig,
        item_storage::{ItemStorage, ItemStorageImpl},
    },
    utils::{
        clock::LocalClock,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "i-did", version, long_about = None)]
#[command(about = "Keep track of what you did today.", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Directory with day records. By default ~/.i-did"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Add an item to the list of things you've done")]
    New {
        #[command(flatten)]
        command: NewCommand,
    },
    #[command(about = "Show what you've already done this week")]
    Show {
        #[command(flatten)]
        command: ShowCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let config = args
        .dir
        .map_or_else(StoreConfig::from_home, |dir| Ok(StoreConfig::new(dir)))?;
    let storage = ItemStorageImpl::new(config);
    // Logs live inside the storage root, so it has to be usable first.
    storage.init().await?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, storage.config(), logging_level, args.log)?;

    match args.commands {
        Commands::New { command } => process_new_command(command, &storage, &LocalClock).await,
        Commands::Show { command } => process_show_command(command, &storage, &LocalClock).await,
    }
}
