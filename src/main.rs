//! Binary entry point for the `chunk-mill` command.

mod args;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chunk_mill::vector::VectorMetadata;
use chunk_mill::{BatchSink, Config, Pipeline, embedding, vector};

use crate::args::{Args, Format};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let pipeline = Pipeline::new(args.pipeline_options(&config))?;

    let bytes = read_source(&args.source)?;
    let ranges = partition(bytes, args.chunk_size(&config));

    if args.index {
        let embedding = embedding::provider_for_model(config.embedding_model(), &config)?;
        let store = vector::store_for_provider(config.vector_store(), &config)?;
        let sink = BatchSink::new(embedding, store, config.max_concurrent_batches())?;
        let prefix = args.prefix.clone().unwrap_or_else(|| args.source.clone());

        sink.run(pipeline.run(ranges), &prefix, VectorMetadata::new())
            .await?;

        return Ok(());
    }

    for chunk in pipeline.run(ranges) {
        let chunk = chunk?;

        match args.format {
            Format::Text => println!("{chunk}"),
            Format::Json => println!("{}", serde_json::to_string(&chunk)?),
        }
    }

    Ok(())
}

/// Reads the whole source document from a file or stdin.
fn read_source(source: &str) -> Result<Vec<u8>> {
    if source == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;

        Ok(bytes)
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))
    }
}

/// Splits a document into fixed-size byte ranges with their offsets, the way
/// the upstream partitioner would.
fn partition(bytes: Vec<u8>, chunk_size: usize) -> Vec<(Vec<u8>, u64)> {
    let chunk_size = chunk_size.max(1);

    bytes
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, chunk)| (chunk.to_vec(), (index * chunk_size) as u64))
        .collect()
}
