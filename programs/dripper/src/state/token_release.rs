use anchor_lang::prelude::*;

/// Released total for one mint. Seeds: `[TOKEN_RELEASE_SEED, dripper, mint]`.
///
/// Created alongside the mint's vault; never reset or closed.
#[account]
pub struct TokenRelease {
    pub dripper: Pubkey,
    pub mint: Pubkey,
    /// Tokens released to the beneficiary so far.
    pub released: u128,
    pub bump: u8,
}

impl TokenRelease {
    pub const SIZE: usize =
        32 + // dripper
        32 + // mint
        16 + // released
        1;   // bump
}
