//! Murmur CLI - Command-line interface for Murmur
//!
//! Loads a social-media dataset, builds the interaction graph, and runs the
//! ranking and filtering queries against it.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "murmur")]
#[command(author = "Murmur Contributors")]
#[command(version)]
#[command(about = "Rank and filter posts in a social interaction graph", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to .murmur/config.json, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options that select posts by content and author.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keyword the post must contain (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Author attribute filter as key=value (repeatable)
    #[arg(short = 'w', long = "where", value_parser = commands::parse_attribute)]
    pub attributes: Vec<(String, Value)>,

    /// Accept posts matching any keyword instead of all
    #[arg(long)]
    pub any: bool,

    /// Match keywords case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Only match keywords as whole words
    #[arg(long)]
    pub whole_word: bool,
}

/// Options that control ranking.
#[derive(Args, Debug, Clone, Default)]
pub struct RankArgs {
    /// Scoring policy: views, comments or mixed
    #[arg(short, long)]
    pub policy: Option<String>,

    /// Views share for the mixed policy, in [0, 1]
    #[arg(long)]
    pub weight: Option<f64>,

    /// Number of posts to return
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config to .murmur/config.json
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show the most important posts
    Rank {
        /// Dataset JSON file
        dataset: PathBuf,

        #[command(flatten)]
        rank: RankArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List posts matching keywords and author attributes
    Filter {
        /// Dataset JSON file
        dataset: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Word frequencies of the filtered posts (word-cloud input)
    Words {
        /// Dataset JSON file
        dataset: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Number of words to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the joined post text instead of word counts
        #[arg(long)]
        raw: bool,
    },

    /// Show graph statistics
    Stats {
        /// Dataset JSON file
        dataset: PathBuf,
    },

    /// Export the graph to JSON, highlighting the top posts
    Export {
        /// Dataset JSON file
        dataset: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "murmur-graph.json")]
        output: PathBuf,

        #[command(flatten)]
        rank: RankArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Rank {
            dataset,
            rank,
            json,
        } => commands::rank(&dataset, config, &rank, json),
        Commands::Filter {
            dataset,
            filter,
            json,
        } => commands::filter(&dataset, config, &filter, json),
        Commands::Words {
            dataset,
            filter,
            limit,
            raw,
        } => commands::words(&dataset, config, &filter, limit, raw),
        Commands::Stats { dataset } => commands::stats(&dataset),
        Commands::Export {
            dataset,
            output,
            rank,
        } => commands::export(&dataset, config, &rank, &output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
