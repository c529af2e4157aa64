//! Fortuna CSPRNG CLI
//!
//! Demonstrates the generator: loads (or creates) the seed file, injects
//! sample entropy, reseeds, and prints random bytes as hex.

use clap::Parser;
use fortuna::{FileSeedStore, Fortuna, FortunaConfig, SeedStore};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fortuna", version, about = "Fortuna CSPRNG demonstration")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed file path (overrides the configuration file).
    #[arg(short, long)]
    seed_file: Option<PathBuf>,

    /// Number of random bytes to print.
    #[arg(short, long, default_value_t = 32)]
    bytes: usize,

    /// Entropy strings; the n-th string is routed to source id n.
    #[arg(short, long)]
    entropy: Vec<String>,

    /// Skip the reseed step.
    #[arg(long)]
    no_reseed: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), fortuna::FortunaError> {
    info!("Fortuna CSPRNG v{}", fortuna::VERSION);

    let mut config = match &args.config {
        Some(path) => FortunaConfig::from_file(path)?,
        None => FortunaConfig::default(),
    };
    if let Some(path) = &args.seed_file {
        config.storage.seed_path = path.clone();
    }

    let store = FileSeedStore::new(&config.storage.seed_path);
    let mut rng = Fortuna::from_config(store, &config)?;

    if args.entropy.is_empty() {
        // Sample input standing in for sensor readings or user activity.
        rng.add_entropy(&[0x01, 0x02, 0x03, 0x04], 0);
    } else {
        for (source, text) in (0u32..).zip(&args.entropy) {
            rng.add_entropy(text.as_bytes(), source);
        }
    }

    if args.no_reseed {
        warn!("Reseed skipped; output comes from the stored seed");
    } else {
        rng.reseed()?;
    }

    let output = rng.random_bytes(args.bytes)?;
    println!(
        "Generated random data: {}",
        output
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    );

    info!("Done. Reseed count: {}", rng.reseed_count());
    serve_metrics(&config, &rng)
}

/// Exports the final generator state until the process is stopped.
#[cfg(feature = "metrics")]
fn serve_metrics<S: SeedStore>(
    config: &FortunaConfig,
    rng: &Fortuna<S>,
) -> Result<(), fortuna::FortunaError> {
    use fortuna::metrics::{MetricsError, MetricsRegistry, MetricsServer, MetricsServerConfig};

    let Some(server_config) = MetricsServerConfig::from_config(&config.metrics) else {
        return Ok(());
    };

    let registry = MetricsRegistry::new()?;
    registry.update(&rng.snapshot());

    info!(port = config.metrics.port, "Serving metrics; stop with Ctrl-C");
    MetricsServer::new(server_config, registry)
        .run_blocking()
        .map_err(MetricsError::from)?;
    Ok(())
}

#[cfg(not(feature = "metrics"))]
fn serve_metrics<S: SeedStore>(
    config: &FortunaConfig,
    _rng: &Fortuna<S>,
) -> Result<(), fortuna::FortunaError> {
    if config.metrics.port != 0 {
        warn!(
            port = config.metrics.port,
            "Metrics port configured but this build lacks the `metrics` feature"
        );
    }
    Ok(())
}
