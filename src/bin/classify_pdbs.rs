//! Classify a batch of PDB IDs into complete, incomplete and not downloadable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pdb_classify::report::SEPARATOR;
use pdb_classify::{
    BatchRunner, CheckpointStore, Config, Outcome, ProcessingMode, RcsbRetriever, load_collection,
    report,
};

#[derive(Parser, Debug)]
#[command(about, version)]
struct Args {
    /// Processing mode: sequential or concurrent ("parallel" is accepted too)
    #[arg(long, alias = "classification_type", default_value_t = ProcessingMode::Concurrent)]
    classification_type: ProcessingMode,

    /// JSON file mapping group names to lists of PDB IDs
    #[arg(long, alias = "pdb_id_path", default_value = "pdb_ids.json")]
    pdb_id_path: PathBuf,

    /// Print the analysis summary
    #[arg(long)]
    verbose: bool,

    /// Optional JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory for the checkpoint files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory downloaded structures are written to
    #[arg(long)]
    pdb_dir: Option<PathBuf>,

    /// Checkpoint every N identifiers in sequential mode
    #[arg(long)]
    checkpoint_interval: Option<usize>,

    /// Maximum retrievals in flight in concurrent mode
    #[arg(long)]
    max_concurrent: Option<usize>,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.pdb_dir {
            config.pdb_dir = dir.clone();
        }
        if let Some(interval) = self.checkpoint_interval {
            config.checkpoint.interval = interval;
        }
        if let Some(width) = self.max_concurrent {
            config.retrieval.max_concurrent = width;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pdb_classify=info,classify_pdbs=info")),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let collection = load_collection(&args.pdb_id_path).await?;
    let store = CheckpointStore::new(&config);
    let retriever = RcsbRetriever::new(&config)?;

    let runner = BatchRunner::new(Arc::new(retriever), Arc::new(store.clone()), &config);
    let output = runner
        .run(&collection, args.classification_type)
        .await
        .context("classification run aborted")?;

    if args.verbose {
        report(&output.mappings, output.total);
    }

    println!(
        "Analysis done!\nPDB ID files saved at {}, {}, and {}\nPDB files saved at {}",
        store.path(Outcome::Complete).display(),
        store.path(Outcome::Incomplete).display(),
        store.path(Outcome::NotRetrievable).display(),
        config.pdb_dir.display(),
    );
    println!("{SEPARATOR}");

    Ok(())
}
