// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Datarel CLI - drive the dataset relationship store from the terminal

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use futures::future::join_all;
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::PathBuf;

use datarel::binding::GraphSnapshot;
use datarel::client::{HttpRelationshipClient, RelationshipClient};
use datarel::{config, export, layout};

#[derive(Parser)]
#[command(name = "datarel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "DATAREL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a typed relationship between two datasets
    Connect {
        /// Source dataset identifier
        source: String,

        /// Target dataset identifier
        target: String,

        /// Relationship type (e.g. cites, derives)
        rel_type: String,
    },

    /// Delete relationships by identifier (deletes run concurrently)
    Remove {
        /// Relationship identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Search the dataset catalog
    Search {
        /// Search term
        term: String,
    },

    /// Lay out a graph snapshot and print it
    Layout {
        /// Input snapshot JSON (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (json, dot)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Connect {
            source,
            target,
            rel_type,
        } => {
            let client = HttpRelationshipClient::new(&config);
            let uuid = client
                .create_relationship(&source, &target, &rel_type)
                .await
                .with_context(|| format!("Failed to connect {source} -> {target}"))?;
            println!(
                "{} {} --[{}]--> {}",
                "Created".green(),
                source,
                rel_type,
                target
            );
            println!("  id: {uuid}");
        }

        Commands::Remove { ids } => {
            let client = HttpRelationshipClient::new(&config);
            let client = &client;
            let results = join_all(
                ids.iter()
                    .map(|id| async move { client.delete_relationship(id).await }),
            )
            .await;

            let mut failed = 0;
            for (id, result) in ids.iter().zip(results) {
                match result {
                    Ok(()) => println!("{} {}", "Removed".green(), id),
                    Err(err) => {
                        eprintln!("{} {}: {}", "Failed".red(), id, err);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed} removal(s) failed");
            }
        }

        Commands::Search { term } => {
            let client = HttpRelationshipClient::new(&config);
            let datasets = client
                .search_datasets(&term)
                .await
                .with_context(|| format!("Dataset search for '{term}' failed"))?;

            if datasets.is_empty() {
                println!("No datasets match '{term}'.");
            } else {
                println!("Datasets ({}):", datasets.len());
                for dataset in datasets {
                    println!("  {}  {}  {}", dataset.id, dataset.title, dataset.url);
                }
            }
        }

        Commands::Layout {
            input,
            format,
            output,
        } => {
            let raw = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read snapshot from stdin")?;
                    buf
                }
            };
            let mut snapshot: GraphSnapshot =
                serde_json::from_str(&raw).context("Failed to parse graph snapshot")?;
            snapshot.nodes = layout::layout(&snapshot.nodes, &snapshot.edges);

            let rendered = match format.as_str() {
                "json" => export::to_json(&snapshot)?,
                "dot" => export::to_dot(&snapshot.nodes, &snapshot.edges),
                other => anyhow::bail!("Unknown format: {}. Valid: json, dot", other),
            };
            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{rendered}"),
            }
        }

        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "datarel",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
