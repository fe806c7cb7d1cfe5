//! yamlnav CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod diagnostic;

use commands::FormatArg;

#[derive(Parser)]
#[command(name = "yamlnav")]
#[command(version)]
#[command(about = "Query YAML and JSON documents by path, with source locations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a path and show where it is (or would be) in the file
    Query {
        /// Input file
        file: PathBuf,

        /// Path expression, e.g. spec.containers[0].image
        path: String,

        /// Input format (inferred from the file extension by default)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Index of the document in a multi-document stream
        #[arg(short, long, default_value_t = 0)]
        document: usize,
    },

    /// List every string value with its path and position
    Strings {
        /// Input file
        file: PathBuf,

        /// Input format (inferred from the file extension by default)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List the kind and apiVersion of each document
    Kinds {
        /// Input file
        file: PathBuf,

        /// Input format (inferred from the file extension by default)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Only list documents of this kind
        #[arg(long)]
        kind: Option<String>,

        /// Only list documents with this apiVersion (requires --kind)
        #[arg(long, requires = "kind")]
        api_version: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yamlnav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            file,
            path,
            format,
            document,
        } => commands::query::execute(&file, &path, format, document),
        Commands::Strings { file, format } => commands::strings::execute(&file, format),
        Commands::Kinds {
            file,
            format,
            kind,
            api_version,
        } => commands::kinds::execute(&file, format, kind.as_deref(), api_version.as_deref()),
    }
}
