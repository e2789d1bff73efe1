//! BlobDir CLI
//!
//! Command-line tools for BlobDir stores.
//!
//! # Commands
//!
//! - `put` / `get` / `set` / `rm` - Single object operations
//! - `ls` - List every stored object
//! - `verify` - Check the directory layout
//! - `owner` / `unlock` - Inspect or break the ownership lock

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// BlobDir command-line store tools.
#[derive(Parser)]
#[command(name = "blobdir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a new object and print its id
    Put {
        /// File to read the object from (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Print an object
    Get {
        /// Object id
        id: u64,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an object under a given id
    Set {
        /// Object id
        id: u64,

        /// File to read the object from (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Delete an object
    Rm {
        /// Object id
        id: u64,
    },

    /// List stored objects
    Ls {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify the store layout
    Verify,

    /// Show which holder owns the store
    Owner,

    /// Remove the ownership lock
    Unlock {
        /// Remove the lock even if another holder owns it
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Put { file } => {
            let path = cli.path.ok_or("Store path required for put")?;
            commands::objects::put(&path, file.as_deref())?;
        }
        Commands::Get { id, output } => {
            let path = cli.path.ok_or("Store path required for get")?;
            commands::objects::get(&path, id, output.as_deref())?;
        }
        Commands::Set { id, file } => {
            let path = cli.path.ok_or("Store path required for set")?;
            commands::objects::set(&path, id, file.as_deref())?;
        }
        Commands::Rm { id } => {
            let path = cli.path.ok_or("Store path required for rm")?;
            commands::objects::rm(&path, id)?;
        }
        Commands::Ls { format } => {
            let path = cli.path.ok_or("Store path required for ls")?;
            commands::list::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Store path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Owner => {
            let path = cli.path.ok_or("Store path required for owner")?;
            commands::lock::owner(&path)?;
        }
        Commands::Unlock { force } => {
            let path = cli.path.ok_or("Store path required for unlock")?;
            commands::lock::unlock(&path, force)?;
        }
        Commands::Version => {
            println!("BlobDir CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("BlobDir Core v{}", blobdir_core::VERSION);
        }
    }

    Ok(())
}
