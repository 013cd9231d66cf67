//! Human-readable identifiers for lots and pickups
//!
//! Format: `<PREFIX>-<YYYYMMDD>-<sequence>`, the sequence zero-padded and
//! counted per day from the highest suffix already issued that day.

use chrono::{DateTime, NaiveDate, Utc};

/// Dated sequence identifier scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdScheme {
    pub prefix: &'static str,
    /// Zero-padded sequence width
    pub width: usize,
    /// Epoch-millisecond digits used when the sequence cannot be issued
    pub fallback_digits: usize,
}

/// Lot numbers, e.g. "LOT-20240110-001"
pub const LOT_NUMBER: IdScheme = IdScheme {
    prefix: "LOT",
    width: 3,
    fallback_digits: 6,
};

/// Pickup ids, e.g. "PICKUP-20240110-0001"
pub const PICKUP_ID: IdScheme = IdScheme {
    prefix: "PICKUP",
    width: 4,
    fallback_digits: 4,
};

/// Next lot number for `now`'s UTC day
pub fn next_lot_number<'a, I>(existing: I, now: DateTime<Utc>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    LOT_NUMBER.next(existing, now)
}

/// Next pickup id for `now`'s UTC day
pub fn next_pickup_id<'a, I>(existing: I, now: DateTime<Utc>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    PICKUP_ID.next(existing, now)
}

impl IdScheme {
    /// "<PREFIX>-<YYYYMMDD>-"
    pub fn day_prefix(&self, day: NaiveDate) -> String {
        format!("{}-{}-", self.prefix, day.format("%Y%m%d"))
    }

    pub fn format(&self, day: NaiveDate, sequence: u32) -> String {
        format!(
            "{}{:0width$}",
            self.day_prefix(day),
            sequence,
            width = self.width
        )
    }

    /// Numeric suffix of an id issued on `day`
    pub fn sequence_of(&self, id: &str, day: NaiveDate) -> Option<u32> {
        let suffix = id.strip_prefix(&self.day_prefix(day))?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }

    /// Next id for `now`'s UTC day given every id already issued.
    ///
    /// Uses the maximum suffix among today's ids rather than the last stored
    /// one, so deletions and out-of-order storage cannot regress the sequence.
    /// Falls back to a timestamp suffix on overflow or collision.
    pub fn next<'a, I>(&self, existing: I, now: DateTime<Utc>) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let day = now.date_naive();
        let existing: Vec<&str> = existing.into_iter().collect();
        let max = existing
            .iter()
            .filter_map(|id| self.sequence_of(id, day))
            .max()
            .unwrap_or(0);

        match self.candidate(day, max) {
            Some(id) if !existing.contains(&id.as_str()) => id,
            _ => self.fallback(now),
        }
    }

    fn candidate(&self, day: NaiveDate, max: u32) -> Option<String> {
        let next = max.checked_add(1)?;
        let limit = 10u64.checked_pow(self.width as u32)?;
        if u64::from(next) >= limit {
            return None;
        }
        Some(self.format(day, next))
    }

    /// Timestamp-suffixed id; never fails
    pub fn fallback(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().unsigned_abs().to_string();
        let tail = &millis[millis.len().saturating_sub(self.fallback_digits)..];
        format!("{}{}", self.day_prefix(now.date_naive()), tail)
    }
}
