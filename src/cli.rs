use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelfcast")]
#[command(author, version, about = "Serve audiobook folders as podcast feeds")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk the library root and update the index cache
    Scan {
        /// Re-read every directory instead of reusing indexed books
        #[arg(long)]
        full: bool,
    },

    /// Start the feed and media server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the RSS feed for one book
    Feed {
        /// Book hash
        #[arg(required = true)]
        hash: String,

        /// Base URL for enclosure links (defaults to the configured one)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Write a static `<hash>.xml` feed for every indexed book
    Export {
        /// Output directory
        #[arg(required = true)]
        dir: PathBuf,

        /// Base URL for enclosure links
        #[arg(long)]
        base_url: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
