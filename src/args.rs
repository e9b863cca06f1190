//! Command-line argument parsing and access.

use core::fmt::{self, Display, Formatter};

use clap::{Parser, ValueEnum};

use chunk_mill::Config;
use chunk_mill::PipelineOptions;

/// A utility for converting documents into token-bounded chunks.
#[derive(Clone, Debug, Parser)]
#[command(
    name = "chunk-mill",
    author,
    version,
    about,
    long_about = "Partition a document into byte ranges, heal characters and words split across \
                  the partition boundaries, and emit token-bounded chunks ready for embedding"
)]
pub(crate) struct Args {
    /// File path to use as input (use "-" for stdin).
    #[arg(value_name = "PATH", default_value = "-")]
    pub(crate) source: String,

    /// Byte size of the simulated upload partitions.
    #[arg(short = 'c', long, value_name = "BYTES")]
    pub(crate) chunk_size: Option<usize>,

    /// Minimum tokens per emitted chunk.
    #[arg(long, value_name = "COUNT")]
    pub(crate) min_tokens: Option<usize>,

    /// Maximum tokens per emitted chunk.
    #[arg(long, value_name = "COUNT")]
    pub(crate) max_tokens: Option<usize>,

    /// Token encoding name.
    #[arg(short = 'e', long, value_name = "NAME")]
    pub(crate) token_encoding: Option<String>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t, value_name = "FORMAT")]
    pub(crate) format: Format,

    /// Embed and upsert the chunks with the configured providers instead of
    /// printing them.
    #[arg(long)]
    pub(crate) index: bool,

    /// Vector id prefix when indexing (defaults to the source path).
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub(crate) prefix: Option<String>,
}

/// Output format for printed chunks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Byte span and text, one line per chunk.
    #[default]
    Text,
    /// One JSON object per chunk per line.
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
        };

        f.write_str(name)
    }
}

impl Args {
    /// Partition granularity, CLI flag over configuration.
    pub(crate) fn chunk_size(&self, config: &Config) -> usize {
        self.chunk_size.unwrap_or_else(|| config.chunk_size())
    }

    /// Pipeline options derived from configuration with CLI overrides.
    pub(crate) fn pipeline_options(&self, config: &Config) -> PipelineOptions {
        let mut options = config.pipeline_options();

        if let Some(min_tokens) = self.min_tokens {
            options = options.with_min_tokens(min_tokens);
        }

        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        if let Some(token_encoding) = &self.token_encoding {
            options = options.with_token_encoding(token_encoding);
        }

        options
    }
}
