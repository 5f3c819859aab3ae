//! Daily usage counter for the free screening tier.
//!
//! An explicit object held in `AppState` instead of process-global state.
//! The current date is always passed in by the caller.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Daily demo limit reached ({used}/{limit}). Try again tomorrow.")]
    LimitReached { used: u32, limit: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    pub day: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct UsageCounter {
    limit: u32,
    used: u32,
    day: NaiveDate,
}

impl UsageCounter {
    pub fn new(limit: u32, today: NaiveDate) -> Self {
        Self {
            limit,
            used: 0,
            day: today,
        }
    }

    /// Starts a fresh count when the calendar day has changed.
    pub fn roll(&mut self, today: NaiveDate) {
        if self.day != today {
            self.used = 0;
            self.day = today;
        }
    }

    pub fn check(&mut self, today: NaiveDate) -> Result<(), UsageError> {
        self.roll(today);
        if self.used >= self.limit {
            return Err(UsageError::LimitReached {
                used: self.used,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Counts one completed screening.
    pub fn record(&mut self, today: NaiveDate) {
        self.roll(today);
        self.used = self.used.saturating_add(1);
    }

    pub fn snapshot(&mut self, today: NaiveDate) -> UsageSnapshot {
        self.roll(today);
        UsageSnapshot {
            used: self.used,
            limit: self.limit,
            remaining: self.limit.saturating_sub(self.used),
            day: self.day,
        }
    }
}
