//! Shared plumbing for the `textvec` binaries.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use textvec_embeddings::config::DEFAULT_MODEL;
use textvec_embeddings::{EmbeddingConfig, EmbeddingStore, GeminiProvider, TaskType, embed_file};
use tracing_subscriber::EnvFilter;

/// Generate an embedding for a text file and save it as JSON.
#[derive(Debug, Parser)]
#[command(name = "textvec", version)]
pub struct EmbedCli {
    /// Text file to embed.
    pub input_file: PathBuf,

    /// Where to write the embedding record.
    pub output_file: PathBuf,

    /// Task type hint sent to the embedding API.
    #[arg(default_value_t = TaskType::default().to_string())]
    pub task_type: String,
}

/// Print the cosine similarity of two embedding records.
#[derive(Debug, Parser)]
#[command(name = "textvec-compare", version)]
pub struct CompareCli {
    /// First embedding record.
    pub first: PathBuf,

    /// Second embedding record.
    pub second: PathBuf,
}

/// Route `tracing` output to stderr. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

/// Human-readable list of the known task types.
pub fn task_type_help() -> String {
    let mut help = String::from("Task types:\n");
    for (task_type, description) in TaskType::ALL {
        let marker = if task_type == TaskType::default() {
            " (default)"
        } else {
            ""
        };
        help.push_str(&format!("  {task_type}{marker} - {description}\n"));
    }
    help
}

/// Parse arguments, printing usage and returning exit code 1 on failure.
///
/// `--help` and `--version` still exit 0 through clap.
pub fn parse_or_usage<P: Parser>(show_task_types: bool) -> std::result::Result<P, ExitCode> {
    match P::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            if show_task_types {
                eprintln!();
                eprint!("{}", task_type_help());
            }
            Err(ExitCode::FAILURE)
        }
    }
}

/// Print `Error: <message>` for a failed run.
pub fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Embed `input_file` into `output_file`.
pub async fn run_embed(cli: EmbedCli) -> Result<()> {
    let config = EmbeddingConfig::from_env().context("failed to read configuration")?;
    tracing::debug!("Using {config:?}");

    let store = EmbeddingStore::new(&config.model);
    let provider = GeminiProvider::new(config)?;

    embed_file(
        &provider,
        &store,
        &cli.input_file,
        &cli.output_file,
        TaskType::from(cli.task_type.as_str()),
    )
    .await?;
    Ok(())
}

/// Load two records and print their similarity to stdout.
pub async fn run_compare(cli: CompareCli) -> Result<()> {
    // Loading ignores the store's model tag.
    let store = EmbeddingStore::new(DEFAULT_MODEL);

    let score = store
        .compare_files(&cli.first, &cli.second)
        .await
        .with_context(|| {
            format!(
                "failed to compare {} and {}",
                cli.first.display(),
                cli.second.display()
            )
        })?;

    println!("{score:.6}");
    Ok(())
}
