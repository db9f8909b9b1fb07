//! Linear vesting over `[start_ts, start_ts + duration)`.
//!
//! - nothing is vested before `start_ts`
//! - everything is vested at and after `start_ts + duration`
//! - in between, `floor(total * elapsed / duration)` with the product taken in `u128`

use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize};

use crate::error::DripperError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    /// Vesting start (Unix seconds).
    pub start_ts: i64,
    /// Vesting window length in seconds, > 0.
    pub duration: u64,
}

impl VestingSchedule {
    pub const SIZE: usize =
        8 + // start_ts
        8;  // duration

    pub fn new(start_ts: i64, duration: u64) -> Result<Self, DripperError> {
        if duration == 0 {
            return Err(DripperError::InvalidConfiguration);
        }
        let schedule = Self { start_ts, duration };
        // The end boundary must be representable.
        schedule.checked_end_ts()?;
        Ok(schedule)
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// First timestamp at which everything is vested.
    pub fn end_ts(&self) -> i64 {
        self.checked_end_ts().unwrap_or(i64::MAX)
    }

    fn checked_end_ts(&self) -> Result<i64, DripperError> {
        let duration =
            i64::try_from(self.duration).map_err(|_| DripperError::InvalidConfiguration)?;
        self.start_ts
            .checked_add(duration)
            .ok_or(DripperError::InvalidConfiguration)
    }

    /// Seconds of the window that have passed at `now`, clamped to `[0, duration]`.
    pub fn elapsed(&self, now: i64) -> u64 {
        if now <= self.start_ts {
            return 0;
        }
        // now > start_ts, so the difference is positive and fits in u64.
        let elapsed = (now as i128 - self.start_ts as i128) as u64;
        elapsed.min(self.duration)
    }

    /// Portion of `total` vested at `now`. Never exceeds `total`.
    pub fn vested_amount(&self, total: u128, now: i64) -> Result<u128, DripperError> {
        let elapsed = self.elapsed(now);
        if elapsed == 0 {
            return Ok(0);
        }
        if elapsed == self.duration {
            return Ok(total);
        }
        total
            .checked_mul(elapsed as u128)
            .ok_or(DripperError::MathOverflow)?
            .checked_div(self.duration as u128)
            .ok_or(DripperError::MathOverflow)
    }
}
