use anchor_lang::prelude::Pubkey;

use crate::engine::AssetKey;
use crate::error::DripperError;

/// Balance queries and outbound transfers for custodied assets.
///
/// Implementations must either move exactly `amount` or fail with no effect.
pub trait AssetLedger {
    /// Amount of `key` currently in custody.
    fn balance_of(&self, key: &AssetKey) -> Result<u64, DripperError>;

    /// Moves `amount` of `key` out of custody to `to`.
    fn transfer(&mut self, key: &AssetKey, to: &Pubkey, amount: u64) -> Result<(), DripperError>;
}

/// Read-only ledger over a balance observed once. Used by the view instructions.
#[derive(Clone, Copy, Debug)]
pub struct CustodySnapshot {
    key: AssetKey,
    balance: u64,
}

impl CustodySnapshot {
    pub fn new(key: AssetKey, balance: u64) -> Self {
        Self { key, balance }
    }
}

impl AssetLedger for CustodySnapshot {
    fn balance_of(&self, key: &AssetKey) -> Result<u64, DripperError> {
        if *key != self.key {
            return Err(DripperError::AssetMismatch);
        }
        Ok(self.balance)
    }

    fn transfer(
        &mut self,
        _key: &AssetKey,
        _to: &Pubkey,
        _amount: u64,
    ) -> Result<(), DripperError> {
        Err(DripperError::TransferFailed)
    }
}
