mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use movie_tracker_core::constants::DEFAULT_SERVER_PORT;
use movie_tracker_core::env_config::{CACHE_PATH_ENV, SHEET_PATH_ENV, env_string};
use movie_tracker_core::{ExactFilter, SortKey};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movie-tracker")]
#[command(about = "Track and rate the movies you watch, grouped by year", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the RemoteStore server over the local spreadsheet
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Reconcile the local cache with the RemoteStore
    Sync,
    /// Show movies grouped by year with net scores
    List {
        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact score, or "all"
        #[arg(long, default_value = "all", allow_negative_numbers = true)]
        score: ExactFilter<i64>,
        /// Exact year, or "all"
        #[arg(short, long, default_value = "all")]
        year: ExactFilter<i32>,
        /// date-desc, date-asc, score-desc, score-asc or title
        #[arg(long, default_value = "date-desc")]
        sort: SortKey,
        /// Use the local cache without contacting the RemoteStore
        #[arg(long)]
        offline: bool,
        /// Print the grouped view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest titles matching a search term
    Suggest {
        term: String,
        #[arg(long)]
        offline: bool,
    },
    /// List the years present in the collection
    Years {
        #[arg(long)]
        offline: bool,
    },
    /// Submit a movie to the RemoteStore
    Add {
        title: String,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        #[arg(short, long)]
        notes: Option<String>,
        /// Watch date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Year tab, defaults to the year of the date
        #[arg(short, long)]
        year: Option<i32>,
    },
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("movie-tracker")
}

pub(crate) fn get_cache_path() -> PathBuf {
    env_string(CACHE_PATH_ENV).map_or_else(|| data_dir().join("movies.json"), PathBuf::from)
}

pub(crate) fn get_sheet_path() -> PathBuf {
    env_string(SHEET_PATH_ENV).map_or_else(|| data_dir().join("sheet.db"), PathBuf::from)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Sync => commands::sync::run().await,
        Commands::List { search, score, year, sort, offline, json } => {
            let query = movie_tracker_core::ViewQuery { search, score, year, sort };
            commands::view::run_list(&query, offline, json).await
        },
        Commands::Suggest { term, offline } => commands::view::run_suggest(&term, offline).await,
        Commands::Years { offline } => commands::view::run_years(offline).await,
        Commands::Add { title, score, notes, date, year } => {
            let movie = movie_tracker_core::NewMovie { title, score, notes, date, year };
            commands::add::run(movie).await
        },
    }
}
