use anchor_lang::prelude::*;

use crate::constants::DRIPPER_SEED;
use crate::engine::{RoleRegistry, VestingSchedule};

/// Dripper state PDA. Seeds: `[DRIPPER_SEED, creator, id.to_le_bytes()]`.
///
/// Also the authority of every token vault it owns.
#[account]
pub struct Dripper {
    /// Payer of `initialize_dripper`; part of the PDA seeds.
    pub creator: Pubkey,
    /// Creator-chosen identifier; part of the PDA seeds.
    pub id: u64,
    /// Beneficiary, controller, governance, keeper.
    pub roles: RoleRegistry,
    /// Immutable vesting window.
    pub schedule: VestingSchedule,
    /// Lamports released to the beneficiary so far.
    pub native_released: u128,
    pub bump: u8,
    pub native_vault_bump: u8,
}

impl Dripper {
    pub const SIZE: usize =
        32 + // creator
        8 +  // id
        RoleRegistry::SIZE +
        VestingSchedule::SIZE +
        16 + // native_released
        1 +  // bump
        1;   // native_vault_bump

    /// Seeds the dripper signs with for vault transfers.
    pub fn signer_seeds<'a>(
        creator: &'a Pubkey,
        id_bytes: &'a [u8; 8],
        bump: &'a [u8; 1],
    ) -> [&'a [u8]; 4] {
        [DRIPPER_SEED, creator.as_ref(), id_bytes, bump]
    }
}
