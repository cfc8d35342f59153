//! `treesift` - build a keyword index over a classification and query it.

mod commands;
mod load;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use treesift_core::config::{IndexConfig, Linking, TermResolution};

#[derive(Parser)]
#[command(
    name = "treesift",
    about = "Keyword filtering for classification trees",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// How records are attached to their parents
    #[arg(long, global = true, value_enum, default_value_t = LinkingArg::ParentCode)]
    linking: LinkingArg,

    /// How query words are resolved to keyword identifiers
    #[arg(long, global = true, value_enum, default_value_t = ResolutionArg::Range)]
    resolution: ResolutionArg,

    /// Do not retry stop-word-only queries with stop words kept
    #[arg(long, global = true)]
    no_fallback: bool,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Suppress output and logs
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the classification by a free-text query
    Search {
        /// JSON file with an array of {code, parent, title} records
        file: PathBuf,

        /// Query words, each matched as a keyword prefix
        #[arg(default_value = "")]
        query: String,

        /// Filter the children of this code instead of the top level
        #[arg(long)]
        children_of: Option<String>,
    },

    /// Show index size statistics
    Stats {
        /// JSON file with an array of {code, parent, title} records
        file: PathBuf,
    },

    /// List dictionary keywords under a prefix
    Keywords {
        /// JSON file with an array of {code, parent, title} records
        file: PathBuf,

        /// Keyword prefix; lists every keyword when omitted
        #[arg(default_value = "")]
        prefix: String,

        /// Show at most this many keywords
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Output format for command results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LinkingArg {
    /// Each record names its parent's code
    ParentCode,
    /// Nest by code length
    CodeLength,
}

impl From<LinkingArg> for Linking {
    fn from(arg: LinkingArg) -> Self {
        match arg {
            LinkingArg::ParentCode => Linking::ParentCode,
            LinkingArg::CodeLength => Linking::CodeLength,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ResolutionArg {
    /// First..last identifier range under the prefix
    Range,
    /// Every identifier under the prefix
    Enumerate,
}

impl From<ResolutionArg> for TermResolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Range => TermResolution::Range,
            ResolutionArg::Enumerate => TermResolution::Enumerate,
        }
    }
}

impl Cli {
    fn index_config(&self) -> IndexConfig {
        let config = IndexConfig::default()
            .with_linking(self.linking.into())
            .with_resolution(self.resolution.into());
        if self.no_fallback {
            config.without_lenient_fallback()
        } else {
            config
        }
    }
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.index_config();
    let (format, quiet) = (cli.format, cli.quiet);

    match cli.command {
        Commands::Search {
            file,
            query,
            children_of,
        } => commands::search::run(&file, config, &query, children_of.as_deref(), format, quiet),
        Commands::Stats { file } => commands::stats::run(&file, config, format, quiet),
        Commands::Keywords {
            file,
            prefix,
            limit,
        } => commands::keywords::run(&file, config, &prefix, limit, format, quiet),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
