//! Chaos Feed operator CLI
//!
//! - `generate-config`: write the browser crate's site config from the
//!   build environment
//! - `snapshot`: load the feed once and print its markup
//! - `config`: print a documented default config file

use anyhow::Context;
use chaos_feed::backend::{MemoryBackend, SupabaseClient, Table};
use chaos_feed::config::Config;
use chaos_feed::feed::load_feed;
use chaos_feed::generate::{self, GenerateError, DEFAULT_OUTPUT};
use chaos_feed::view::render_feed;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chaos-feed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Family photo journal: build-time config and feed snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the site config module from SUPABASE_URL and SUPABASE_ANON_KEY
    GenerateConfig {
        /// Output path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Load the feed once and print the rendered markup
    Snapshot {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Use built-in sample entries instead of the backend
        #[arg(long)]
        demo: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = operator_config(&cli)?;
    init_logging(&config);

    match cli.command {
        Commands::GenerateConfig { output } => {
            let site = match generate::site_from_env() {
                Ok(site) => site,
                Err(e @ GenerateError::MissingEnv) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };
            generate::write_config_module(&output, &site)?;
            println!("Site config written to {}", output.display());
        }

        Commands::Snapshot { output, demo } => {
            let entries = if demo {
                load_feed(&demo_backend()).await?
            } else {
                let site = config.site();
                site.validate()
                    .context("Backend is not configured (set SUPABASE_URL and SUPABASE_ANON_KEY)")?;
                load_feed(&SupabaseClient::new(&site)).await?
            };
            tracing::info!("Rendering {} entries", entries.len());
            write_or_print(output.as_deref(), &render_feed(&entries))?;
        }

        Commands::Config { output } => {
            write_or_print(output.as_deref(), &chaos_feed::config::generate_default_config())?;
        }
    }

    Ok(())
}

/// Operator settings; only `snapshot` reads the config file
fn operator_config(cli: &Cli) -> anyhow::Result<Config> {
    match (&cli.command, &cli.config) {
        (Commands::Snapshot { .. }, Some(path)) => Ok(Config::load_with_env(path)?),
        (Commands::Snapshot { .. }, None) => Ok(Config::load_default()),
        _ => Ok(Config::from_env()),
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("chaos_feed={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// A small offline feed
fn demo_backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_rows(
            Table::Entries,
            vec![
                json!({
                    "id": "demo-1",
                    "title": "Matschpfützen-Expedition",
                    "body": "Heute **alle** Pfützen im Park getestet.\nErgebnis: sehr nass.",
                    "author": "Schweini",
                    "mood": "Matschig 🐷",
                    "created_at": "2026-10-17T15:30:00Z",
                    "images": ["https://picsum.photos/seed/matsch/800/600"]
                }),
                json!({
                    "id": "demo-2",
                    "title": "Kuchen bei Oma",
                    "body": "Drei Stück. Mindestens.",
                    "created_at": "2026-10-15T13:00:00Z",
                    "date_label": "Letzten Mittwoch"
                }),
            ],
        )
        .with_rows(
            Table::Comments,
            vec![
                json!({"id": 1, "entry_id": "demo-1", "author": "Mama", "body": "Die Hose ist hin.", "created_at": "2026-10-17T16:00:00Z"}),
                json!({"id": 2, "entry_id": "demo-2", "author": "Oma", "body": "Es waren vier!", "created_at": "2026-10-15T18:00:00Z"}),
            ],
        )
        .with_rows(
            Table::Reactions,
            vec![
                json!({"entry_id": "demo-1", "emoji": "🐷"}),
                json!({"entry_id": "demo-1", "emoji": "🐷"}),
                json!({"entry_id": "demo-2", "emoji": "🤣"}),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_config_ignores_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let missing = missing.to_str().unwrap();

        let cli = Cli::parse_from(["chaos-feed", "--config", missing, "generate-config"]);
        assert!(operator_config(&cli).is_ok());

        let cli = Cli::parse_from(["chaos-feed", "config", "--config", missing]);
        assert!(operator_config(&cli).is_ok());

        let cli = Cli::parse_from(["chaos-feed", "--config", missing, "snapshot", "--demo"]);
        assert!(operator_config(&cli).is_err());
    }
}
