use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use field_projection::ProjectionPipeline;
use field_projection_projector::{run, ProjectorConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Tracing first, so settings loading and validation are logged.
    init_tracing(&ProjectorConfig::log_level_from_env());

    info!("field-projection projector starting");
    let config = ProjectorConfig::from_env().context("failed to load configuration")?;
    info!(
        key_projection = %config.settings.key_projection_type,
        value_projection = %config.settings.value_projection_type,
        "Configuration loaded"
    );

    let pipeline = ProjectionPipeline::from_settings(&config.settings);
    if pipeline.is_empty() {
        info!("no projection configured, documents pass through unchanged");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = run(stdin.lock(), BufWriter::new(stdout.lock()), &pipeline)
        .context("projection stream failed")?;

    info!(
        processed = stats.processed,
        passthrough = stats.passthrough,
        "field-projection projector stopped"
    );
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout carries the document stream
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
