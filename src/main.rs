use clap::Parser;

use yarhs_static::config::{self, Config};
use yarhs_static::{logger, server};

/// Static file server driven by a middleware pipeline
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file, extension optional
    #[arg(short, long, env = "YARHS_CONFIG", default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?;
    logger::init(&cfg)?;

    // Create Tokio runtime, sizing the worker pool from the configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(server::run(cfg))?;
    Ok(())
}
