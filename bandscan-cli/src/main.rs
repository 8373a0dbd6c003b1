//! Bandscan CLI — serve and export commands.
//!
//! Commands:
//! - `serve` — load the snapshot directory, build the price table once, and
//!   serve the scan API over HTTP
//! - `export` — one-shot export of the close history as chunked
//!   `data-batch-*.js` files plus an index, for the static front-end

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bandscan_core::data::{load_dir, PriceTable};
use bandscan_core::export::{batch_script, chunk_close_history, index_script};
use bandscan_server::{create_router, AppState};

#[derive(Parser)]
#[command(name = "bandscan", about = "Bandscan — EMA trading-range scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the scan API over HTTP.
    Serve {
        /// Directory of per-date snapshot CSV files (MM_DD_YYYY.csv).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Export the close history as chunked JS data files.
    Export {
        /// Directory of per-date snapshot CSV files (MM_DD_YYYY.csv).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for data-batch-*.js and data-index.js.
        #[arg(long, default_value = "export")]
        output_dir: PathBuf,

        /// Trading dates per chunk.
        #[arg(long, default_value_t = 10)]
        chunk_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { data_dir, port } => serve(&data_dir, port).await,
        Commands::Export {
            data_dir,
            output_dir,
            chunk_size,
        } => export(&data_dir, &output_dir, chunk_size),
    }
}

/// Build the table from disk. Runs exactly once; any load error is fatal —
/// the process must not start serving from a corrupted snapshot directory.
fn build_table(data_dir: &Path) -> Result<PriceTable> {
    let rows = load_dir(data_dir)
        .with_context(|| format!("failed to load snapshots from {}", data_dir.display()))?;
    let table = PriceTable::build(rows);
    tracing::info!(
        rows = table.len(),
        symbols = table.symbols().len(),
        "Loaded historical data"
    );
    Ok(table)
}

async fn serve(data_dir: &Path, port: u16) -> Result<()> {
    let table = build_table(data_dir)?;
    let router = create_router(AppState::new(table));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Serving scan API");

    axum::serve(listener, router).await.context("server error")
}

fn export(data_dir: &Path, output_dir: &Path, chunk_size: usize) -> Result<()> {
    anyhow::ensure!(chunk_size >= 1, "--chunk-size must be at least 1");

    let table = build_table(data_dir)?;
    let chunks = chunk_close_history(&table, chunk_size);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for chunk in &chunks {
        let path = output_dir.join(format!("data-batch-{}.js", chunk.id));
        let script = batch_script(chunk).context("failed to serialize chunk")?;
        std::fs::write(&path, script)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(id = chunk.id, facts = chunk.facts.len(), "Wrote batch");
    }

    let index_path = output_dir.join("data-index.js");
    let index = index_script(&chunks).context("failed to serialize index")?;
    std::fs::write(&index_path, index)
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    tracing::info!(chunks = chunks.len(), "Export complete");
    Ok(())
}
