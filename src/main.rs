//! Parking times seed generator

use std::io::{self, BufWriter};

use chrono::Local;
use parking_times_gen::{
    config::AppConfig, errors::GeneratorError, generator::RowGenerator, models::TimeWindow,
};
use tracing::info;

fn main() -> Result<(), GeneratorError> {
    dotenvy::dotenv().ok();

    // Standard output carries the SQL, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load()?;

    let now = Local::now();
    let window = TimeWindow::starting_today(&now, config.generator.horizon_days)?;
    info!(
        "Generating parking times from {} to {} (now {})",
        window.start, window.end, now
    );

    let generator = RowGenerator::new(config.generator, window)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    generator.write_insert(&mut out)?;

    Ok(())
}
