//! Date batching — the unit of fan-out to a source adapter.
//!
//! Sources publish one payload per feed per calendar day, in their own local
//! timezone. [`DateIter`] expands a resolved temporal mode into the finite
//! sequence of local dates whose files must be fetched.

use crate::options::TemporalMode;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// Finite, restartable iterator over the local calendar dates a request spans.
///
/// Range mode yields every local date touching `[start_at, end_at)`, boundary
/// dates inclusive, never a duplicate. Latest mode yields exactly today in
/// the source's zone. Forecast mode yields today plus an optional forward
/// horizon in days (the daily forecast file usually carries the whole
/// horizon, so the default horizon is zero).
#[derive(Debug, Clone)]
pub struct DateIter {
    next: NaiveDate,
    last: NaiveDate,
    done: bool,
}

impl DateIter {
    pub fn new(mode: &TemporalMode, tz: Tz, now: DateTime<Utc>) -> Self {
        Self::with_forecast_horizon(mode, tz, now, 0)
    }

    /// Like [`DateIter::new`] but with `horizon_days` extra dates after today
    /// in forecast mode.
    pub fn with_forecast_horizon(
        mode: &TemporalMode,
        tz: Tz,
        now: DateTime<Utc>,
        horizon_days: u64,
    ) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        let (first, last) = match mode {
            TemporalMode::Latest => (today, today),
            TemporalMode::Forecast => (
                today,
                today.checked_add_days(Days::new(horizon_days)).unwrap_or(today),
            ),
            TemporalMode::Range { start_at, end_at } => (
                start_at.with_timezone(&tz).date_naive(),
                end_at.with_timezone(&tz).date_naive(),
            ),
        };
        Self {
            next: first,
            last,
            done: first > last,
        }
    }
}

impl Iterator for DateIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        let date = self.next;
        match date.succ_opt() {
            Some(succ) if date < self.last => self.next = succ,
            _ => self.done = true,
        }
        Some(date)
    }
}
