//! SQL generation for seeded parking availability

use std::io::Write;

use tracing::{debug, info};

use crate::{
    config::GeneratorConfig,
    errors::GeneratorError,
    models::{ParkingTime, TimeWindow},
};

pub const TABLE: &str = "parking_times";

pub const COLUMNS: [&str; 7] = [
    "zone_id",
    "spot_id",
    "time_code",
    "user_pid",
    "availability",
    "price",
    "seller_key",
];

/// Enumerates one row per zone, spot and time slot of a window.
pub struct RowGenerator {
    config: GeneratorConfig,
    window: TimeWindow,
}

impl RowGenerator {
    pub fn new(config: GeneratorConfig, window: TimeWindow) -> Result<Self, GeneratorError> {
        config.validate()?;

        info!(
            "Initializing RowGenerator: zones={}, spots_per_zone={}, slot_size={:?}, window=[{}, {}]",
            config.num_zones, config.spots_per_zone, config.slot_size, window.start, window.end
        );

        Ok(Self { config, window })
    }

    /// Rows in zone-major order, then spot, then time.
    pub fn rows(&self) -> impl Iterator<Item = ParkingTime<'_>> + '_ {
        let slot = self.config.slot_seconds();
        let spots = self.config.spots_per_zone;
        let seller_key = self.config.seller_key.as_str();
        let window = self.window;

        (1..=self.config.num_zones).flat_map(move |zone_id| {
            (1..=spots).flat_map(move |spot_id| {
                window
                    .time_codes(slot)
                    .map(move |time_code| ParkingTime::admin(zone_id, spot_id, time_code, seller_key))
            })
        })
    }

    /// Number of rows [`RowGenerator::rows`] yields
    pub fn expected_rows(&self) -> u64 {
        u64::from(self.config.num_zones)
            * u64::from(self.config.spots_per_zone)
            * self.window.slot_count(self.config.slot_seconds())
    }

    /// Write a single multi-row `INSERT` statement, returning the row count.
    ///
    /// Every row but the last ends with a comma, the last with a semicolon.
    pub fn write_insert<W: Write>(&self, out: &mut W) -> Result<u64, GeneratorError> {
        debug!("Writing {} rows into {}", self.expected_rows(), TABLE);

        write!(out, "INSERT INTO {}({})\r\nVALUES\n", TABLE, COLUMNS.join(", "))?;

        let mut written = 0;
        let mut rows = self.rows().peekable();
        while let Some(row) = rows.next() {
            let terminator = if rows.peek().is_some() { ',' } else { ';' };
            writeln!(out, "  {row}{terminator}")?;
            written += 1;
        }
        out.flush()?;

        info!("Wrote {} rows", written);
        Ok(written)
    }
}
