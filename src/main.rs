mod cli;

use shelfcast::{config, export, server};
use shelfcast_library::{CacheStore, ScanOptions, Scanner};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "shelfcast=trace,shelfcast_library=trace,shelfcast_feed=debug,tower_http=debug".to_string()
        } else {
            "shelfcast=debug,shelfcast_library=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Scan { full } => scan(cli.config.as_deref(), full),
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Feed { hash, base_url } => print_feed(cli.config.as_deref(), &hash, base_url),
        Commands::Export { dir, base_url } => export_feeds(cli.config.as_deref(), &dir, &base_url),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("shelfcast {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn start_server(host: Option<String>, port: Option<u16>, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting shelfcast server");
    tracing::info!("Serving library indexed at {:?}", config.library.cache_path);

    server::start_server(config).await
}

fn scan(config_path: Option<&Path>, full: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let store = CacheStore::new(&config.library.cache_path);

    let previous = if full {
        Default::default()
    } else {
        store
            .load_or_empty()
            .with_context(|| format!("Failed to load index cache {:?}", store.path()))?
    };

    let (index, report) = Scanner::new(&config.library.root)
        .options(ScanOptions { full_rescan: full })
        .scan(&previous)
        .with_context(|| format!("Failed to scan {:?}", config.library.root))?;

    store
        .save(&index)
        .with_context(|| format!("Failed to write index cache {:?}", store.path()))?;

    println!("Scanned {}", config.library.root.display());
    println!("  Directories: {}", report.directories);
    println!("  Books: {} ({} reused, {} indexed)", index.len(), report.books_reused, report.books_indexed);
    println!("  Files skipped: {}", report.files_skipped);
    println!("  Cache: {}", store.path().display());

    Ok(())
}

/// Base URL used outside a request: explicit flag, then config, then the
/// listen address.
fn resolve_base_url(config: &config::Config, flag: Option<String>) -> String {
    flag.or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| format!("http://{}:{}/", config.server.host, config.server.port))
}

fn print_feed(config_path: Option<&Path>, hash: &str, base_url: Option<String>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let index = CacheStore::new(&config.library.cache_path).load()?;
    let base_url = resolve_base_url(&config, base_url);

    let xml = shelfcast_feed::feed_for(&index, hash, &base_url)?;
    print!("{}", xml);
    Ok(())
}

fn export_feeds(config_path: Option<&Path>, dir: &Path, base_url: &str) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let index = CacheStore::new(&config.library.cache_path).load()?;

    let written = export::export_feeds(&index, dir, base_url)
        .with_context(|| format!("Failed to export feeds to {:?}", dir))?;

    println!("Wrote {} feeds to {}", written.len(), dir.display());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("✓ Configuration is valid");
    println!("  Library root: {}", config.library.root.display());
    println!("  Root exists: {}", config.library.root.is_dir());
    println!("  Cache: {}", config.library.cache_path.display());
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Base URL: {}",
        config.server.base_url.as_deref().unwrap_or("(from Host header)")
    );
    println!("  Listing auth: {}", config.auth.credentials().is_some());

    Ok(())
}
