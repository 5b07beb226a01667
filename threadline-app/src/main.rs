use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use threadline_common::observability::{LogConfig, init_logging};
use threadline_config::{ThreadlineConfig, ThreadlineConfigLoader};
use threadline_social::Platform;

mod commands;

const DEFAULT_CONFIG: &str = "threadline.yaml";

#[derive(Parser)]
#[command(name = "threadline")]
#[command(about = "Fetch, normalize and thread social post comments")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML, TOML or JSON). Defaults to ./threadline.yaml if present.
    #[arg(long, global = true, env = "THREADLINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a post and its comments through Apify and print the full result
    Full {
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        url: String,
    },

    /// Normalize saved provider payloads without touching the network
    Normalize {
        #[arg(long)]
        platform: Platform,
        /// Raw post record (JSON object)
        #[arg(long)]
        post: PathBuf,
        /// Raw comment rows (JSON array)
        #[arg(long)]
        comments: Option<PathBuf>,
    },

    /// Thread saved live comments into a summary envelope
    Thread {
        /// Live comments (JSON array)
        #[arg(long)]
        comments: PathBuf,
        /// Raw insight metrics, passed through as-is
        #[arg(long)]
        insights: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ThreadlineConfig> {
    let loader = ThreadlineConfigLoader::new();
    let loader = match path {
        Some(p) => loader.with_file(p),
        None => loader.with_optional_file(DEFAULT_CONFIG),
    };
    Ok(loader.load()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let cfg = load_config(cli.config.as_ref())?;
    let log_path = init_logging(LogConfig {
        app_name: "threadline",
        log_dir: cfg.logging.dir.as_ref().map(PathBuf::from),
        emit_stderr: cfg.logging.stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    })?;
    tracing::debug!(log_path = %log_path.display(), "logging initialised");

    let envelope = match cli.command {
        Command::Full { platform, url } => commands::full(&cfg, platform, &url).await?,
        Command::Normalize {
            platform,
            post,
            comments,
        } => commands::normalize(platform, &post, comments.as_deref())?,
        Command::Thread { comments, insights } => {
            commands::thread(&comments, insights.as_deref())?
        }
    };

    commands::print_json(&envelope)
}
