//! Ferrule CLI - GnuTLS priority string compiler.
//!
//! Commands:
//! - `ferrule validate` - Check a priority string for errors
//! - `ferrule compile` - Compile a priority string to backend configuration
//! - `ferrule tokens` - Dump the token stream for a priority string

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ferrule")]
#[command(about = "GnuTLS priority string compiler for native TLS backends")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a priority string for errors
    Validate {
        /// Priority string, e.g. "NORMAL:-VERS-TLS1.0:%SERVER_PRECEDENCE"
        priority: String,
    },

    /// Compile a priority string to backend configuration
    Compile {
        /// Priority string to compile
        priority: String,

        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Print the configuration fingerprint as well
        #[arg(long)]
        fingerprint: bool,
    },

    /// Dump the classified token stream for a priority string
    Tokens {
        /// Priority string to tokenize
        priority: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Validate { priority } => commands::validate::run(&priority),
        Commands::Compile {
            priority,
            output,
            format,
            fingerprint,
        } => commands::compile::run(&priority, output.as_deref(), &format, fingerprint),
        Commands::Tokens { priority } => commands::tokens::run(&priority),
    }
}
