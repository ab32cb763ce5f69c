//! Data models.

use std::fmt;

use chrono::{DateTime, Days, NaiveDateTime, Offset, TimeDelta, TimeZone};

use crate::errors::GeneratorError;

/// Owner of all seeded availability
pub const ADMIN_USER: &str = "admin";

/// Price per slot for seeded rows
pub const DEFAULT_PRICE: f64 = 1.0;

/// Generation window in seconds from Unix epoch, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window from midnight of the day of `now` until `now` plus
    /// `horizon_days` calendar days, both resolved in the time zone of `now`.
    ///
    /// Wall-clock arithmetic is used, so a DST change inside the horizon moves
    /// the end by the offset difference. Ambiguous local times resolve to the
    /// earlier instant, local times skipped by a DST gap take the offset in
    /// effect before the gap.
    pub fn starting_today<Tz: TimeZone>(
        now: &DateTime<Tz>,
        horizon_days: u64,
    ) -> Result<Self, GeneratorError> {
        let tz = now.timezone();
        let local = now.naive_local();

        let midnight = local
            .date()
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| GeneratorError::UnresolvableTime(local.date().to_string()))?;
        let end = local
            .checked_add_days(Days::new(horizon_days))
            .ok_or_else(|| GeneratorError::UnresolvableTime(format!("{local} + {horizon_days}d")))?;

        let start = resolve_local(&tz, &midnight)?;
        let end = resolve_local(&tz, &end)?;

        Ok(Self::new(start.timestamp(), end.timestamp()))
    }

    /// Slot start times from `start` up to `end + slot` inclusive.
    ///
    /// The bound overshoots the window by one slot, so the last code lands at
    /// or after `end`. Codes past `i64::MAX` are not produced. `slot` must be
    /// positive.
    pub fn time_codes(&self, slot: i64) -> impl Iterator<Item = i64> {
        let step = usize::try_from(slot).unwrap_or(usize::MAX);
        (self.start..=self.end.saturating_add(slot)).step_by(step)
    }

    /// Number of items yielded by [`TimeWindow::time_codes`].
    pub fn slot_count(&self, slot: i64) -> u64 {
        let last = self.end.saturating_add(slot);
        if last < self.start {
            0
        } else {
            ((i128::from(last) - i128::from(self.start)) / i128::from(slot)) as u64 + 1
        }
    }
}

/// Map a wall-clock time to an instant in `tz`.
fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    local: &NaiveDateTime,
) -> Result<DateTime<Tz>, GeneratorError> {
    if let Some(resolved) = tz.from_local_datetime(local).earliest() {
        return Ok(resolved);
    }

    // Skipped by a DST gap: use the offset from a day earlier
    let unresolvable = || GeneratorError::UnresolvableTime(local.to_string());
    let day_before = local
        .checked_sub_signed(TimeDelta::days(1))
        .ok_or_else(unresolvable)?;
    let offset = tz
        .offset_from_local_datetime(&day_before)
        .earliest()
        .ok_or_else(unresolvable)?;
    let utc = local
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.fix().local_minus_utc())))
        .ok_or_else(unresolvable)?;

    Ok(tz.from_utc_datetime(&utc))
}

/// One row of table `parking_times`: availability of one spot for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingTime<'a> {
    pub zone_id: u32,
    pub spot_id: u32,
    /// Slot start in seconds from Unix epoch
    pub time_code: i64,
    pub user_pid: &'a str,
    pub availability: bool,
    pub price: f64,
    pub seller_key: &'a str,
}

impl<'a> ParkingTime<'a> {
    /// Available admin-owned slot at the default price.
    pub fn admin(zone_id: u32, spot_id: u32, time_code: i64, seller_key: &'a str) -> Self {
        Self {
            zone_id,
            spot_id,
            time_code,
            user_pid: ADMIN_USER,
            availability: true,
            price: DEFAULT_PRICE,
            seller_key,
        }
    }
}

/// Renders the row as an SQL tuple literal.
impl fmt::Display for ParkingTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {:.6}, {})",
            self.zone_id,
            self.spot_id,
            self.time_code,
            SqlString(self.user_pid),
            self.availability,
            self.price,
            SqlString(self.seller_key),
        )
    }
}

/// Single-quoted SQL string literal
struct SqlString<'a>(&'a str);

impl fmt::Display for SqlString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.replace('\'', "''"))
    }
}
