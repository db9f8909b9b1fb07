use crate::engine::AssetKey;
use crate::error::DripperError;

/// Running total released to the beneficiary for one asset.
///
/// Loaded from `Dripper::native_released` or a `TokenRelease` account, advanced
/// only after the matching transfer succeeded, then written back by the handler.
/// Kept as `u128`: re-deposited releases let the lifetime total pass `u64::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseAccount {
    key: AssetKey,
    released: u128,
}

impl ReleaseAccount {
    pub fn new(key: AssetKey, released: u128) -> Self {
        Self { key, released }
    }

    /// Fresh account for an asset that has never been released.
    pub fn empty(key: AssetKey) -> Self {
        Self::new(key, 0)
    }

    pub fn key(&self) -> AssetKey {
        self.key
    }

    pub fn released(&self) -> u128 {
        self.released
    }

    /// `vested - released`, floored at zero.
    ///
    /// `vested` can fall below `released` after a sweep shrinks custody; the
    /// beneficiary is then owed nothing until the curve catches up again.
    /// The difference never exceeds custody, so it fits in `u64`.
    pub fn releasable(&self, vested: u128) -> u64 {
        u64::try_from(vested.saturating_sub(self.released)).unwrap_or(u64::MAX)
    }

    /// Total after releasing `amount`, without applying it.
    pub fn staged(&self, amount: u64) -> Result<u128, DripperError> {
        self.released
            .checked_add(amount as u128)
            .ok_or(DripperError::MathOverflow)
    }

    pub fn record(&mut self, amount: u64) -> Result<u128, DripperError> {
        self.released = self.staged(amount)?;
        Ok(self.released)
    }
}
