// ABOUTME: Resolves a time range selector and an anchor instant into a query window
// ABOUTME: Calendar arithmetic runs in a configured UTC offset; resolution is pure and total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Time Range Resolution
//!
//! | Range   | Start                     | Bucket |
//! |---------|---------------------------|--------|
//! | Daily   | start of the current day  | 1 day  |
//! | Weekly  | now − 7 days              | 1 day  |
//! | Monthly | now − 1 calendar month    | 1 day  |
//! | Yearly  | now − 1 calendar year     | 1 day  |
//!
//! Every range buckets by day, so wider ranges produce several buckets that
//! the aggregator reduces again.
//!
//! The window ends at `now`. When the start is not strictly before `now`
//! (a daily window requested exactly at local midnight) the window covers
//! the whole current day instead.

use cardio_core::constants::defaults;
use cardio_core::{TimeRange, Window};
use chrono::{DateTime, Days, Duration, FixedOffset, Months, NaiveTime, Offset, Utc};
use tracing::warn;

/// Maps `(TimeRange, now)` to a concrete [`Window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeResolver {
    calendar: FixedOffset,
}

impl Default for TimeRangeResolver {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeRangeResolver {
    /// Resolver whose days start at local midnight in `calendar`
    #[must_use]
    pub const fn new(calendar: FixedOffset) -> Self {
        Self { calendar }
    }

    /// Resolver using UTC days
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Offset calendar arithmetic is performed in
    #[must_use]
    pub const fn calendar(&self) -> FixedOffset {
        self.calendar
    }

    /// Width of every bucket
    #[must_use]
    pub fn bucket_interval() -> Duration {
        Duration::days(defaults::BUCKET_DAYS)
    }

    /// Local midnight of the day containing `now`, as a UTC instant
    ///
    /// Falls back to UTC midnight when the local day is not representable.
    #[must_use]
    pub fn start_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let utc_midnight = now.naive_utc().date().and_time(NaiveTime::MIN).and_utc();
        now.naive_utc()
            .checked_add_offset(self.calendar)
            .map(|local| local.date().and_time(NaiveTime::MIN))
            .and_then(|midnight| midnight.checked_sub_offset(self.calendar))
            .map_or(utc_midnight, |naive| naive.and_utc())
    }

    /// Resolve `range` anchored at `now`
    ///
    /// Never fails: if calendar arithmetic underflows, the start falls back
    /// to the start of the current day.
    #[must_use]
    pub fn resolve(&self, range: TimeRange, now: DateTime<Utc>) -> Window {
        let start_of_day = self.start_of_day(now);
        let local_now = now.with_timezone(&self.calendar);
        let start = match range {
            TimeRange::Daily => Some(start_of_day),
            TimeRange::Weekly => local_now
                .checked_sub_days(Days::new(defaults::WEEKLY_DAYS))
                .map(|local| local.with_timezone(&Utc)),
            TimeRange::Monthly => local_now
                .checked_sub_months(Months::new(defaults::MONTHLY_MONTHS))
                .map(|local| local.with_timezone(&Utc)),
            TimeRange::Yearly => local_now
                .checked_sub_months(Months::new(defaults::YEARLY_MONTHS))
                .map(|local| local.with_timezone(&Utc)),
        }
        .unwrap_or(start_of_day);

        Self::window_from(start, now).unwrap_or_else(|| {
            warn!(%range, %now, "No representable window around anchor instant");
            Window::epoch_day()
        })
    }

    fn window_from(start: DateTime<Utc>, now: DateTime<Utc>) -> Option<Window> {
        let bucket = Self::bucket_interval();
        if start < now {
            return Window::new(start, now, bucket);
        }
        match start.checked_add_signed(bucket) {
            Some(end) => Window::new(start, end, bucket),
            None => start
                .checked_sub_signed(bucket)
                .and_then(|earlier| Window::new(earlier, start, bucket)),
        }
    }
}
