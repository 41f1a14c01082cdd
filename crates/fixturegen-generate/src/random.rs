//! Random number sources consumed by providers.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Produces raw randomness for generation.
///
/// Implementations are shared by every concurrent generation call against one
/// engine, so they must synchronize internally.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[min, max)`; returns `min` when the range is empty.
    fn next_in_range(&self, min: i64, max: i64) -> i64;

    fn fill_bytes(&self, buf: &mut [u8]);
}

/// ChaCha8 stream behind a lock.
pub struct ChaChaSource {
    rng: Mutex<ChaCha8Rng>,
}

impl ChaChaSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }
}

impl std::fmt::Debug for ChaChaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaChaSource").finish_non_exhaustive()
    }
}

impl RandomSource for ChaChaSource {
    fn next_in_range(&self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.lock().random_range(min..max)
    }

    fn fill_bytes(&self, buf: &mut [u8]) {
        self.rng.lock().fill_bytes(buf);
    }
}

const MAX_OFFSET_MINUTES: i64 = 14 * 60;

/// Typed draws layered over any [`RandomSource`].
pub trait RandomSourceExt: RandomSource {
    fn next_bool(&self) -> bool {
        self.next_in_range(0, 2) == 1
    }

    fn next_u8(&self) -> u8 {
        self.next_in_range(0, 256) as u8
    }

    fn next_i8(&self) -> i8 {
        self.next_in_range(i64::from(i8::MIN), i64::from(i8::MAX) + 1) as i8
    }

    fn next_i16(&self) -> i16 {
        self.next_in_range(i64::from(i16::MIN), i64::from(i16::MAX) + 1) as i16
    }

    fn next_u16(&self) -> u16 {
        self.next_in_range(0, i64::from(u16::MAX) + 1) as u16
    }

    fn next_i32(&self) -> i32 {
        self.next_in_range(i64::from(i32::MIN), i64::from(i32::MAX) + 1) as i32
    }

    fn next_u32(&self) -> u32 {
        u32::from_le_bytes(self.next_bytes())
    }

    fn next_i64(&self) -> i64 {
        i64::from_le_bytes(self.next_bytes())
    }

    fn next_u64(&self) -> u64 {
        u64::from_le_bytes(self.next_bytes())
    }

    fn next_f32(&self) -> f32 {
        self.next_i32() as f32
    }

    /// Reinterprets eight random bytes, so NaN and infinities can appear.
    fn next_f64(&self) -> f64 {
        f64::from_le_bytes(self.next_bytes())
    }

    /// One UTF-16 code unit; lone surrogates become U+FFFD.
    fn next_char(&self) -> char {
        let unit = u16::from_le_bytes(self.next_bytes());
        char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn next_decimal(&self) -> Decimal {
        let lo = self.next_i32() as u32;
        let mid = self.next_i32() as u32;
        let hi = self.next_i32() as u32;
        let negative = self.next_bool();
        let scale = self.next_in_range(0, 29) as u32;
        Decimal::from_parts(lo, mid, hi, negative, scale)
    }

    fn next_uuid(&self) -> Uuid {
        let mut bytes: [u8; 16] = self.next_bytes();
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Uuid::from_bytes(bytes)
    }

    fn next_date_time(&self) -> NaiveDateTime {
        let year = self.next_in_range(1, 10_000) as i32;
        let month = self.next_in_range(1, 13) as u32;
        let day = self.next_in_range(1, i64::from(days_in_month(year, month)) + 1) as u32;
        let hour = self.next_in_range(0, 24) as u32;
        let minute = self.next_in_range(0, 60) as u32;
        let second = self.next_in_range(0, 60) as u32;
        let milli = self.next_in_range(0, 1_000) as u32;
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
            .unwrap_or_default()
    }

    fn next_date_time_offset(&self) -> DateTime<FixedOffset> {
        let local = self.next_date_time();
        let minutes = self.next_in_range(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES + 1);
        FixedOffset::east_opt((minutes * 60) as i32)
            .and_then(|offset| offset.from_local_datetime(&local).single())
            .unwrap_or_default()
    }

    /// Random 100ns tick count truncated to microseconds.
    fn next_time_span(&self) -> TimeDelta {
        TimeDelta::microseconds(self.next_i64() / 10)
    }

    /// Uniform index in `[0, len)`; `0` for an empty range.
    fn next_index(&self, len: usize) -> usize {
        self.next_in_range(0, len as i64) as usize
    }

    fn next_bytes<const N: usize>(&self) -> [u8; N] {
        let mut bytes = [0u8; N];
        self.fill_bytes(&mut bytes);
        bytes
    }
}

impl<R: RandomSource + ?Sized> RandomSourceExt for R {}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .unwrap_or(28)
}
