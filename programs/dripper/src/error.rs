use anchor_lang::prelude::*;

/// Error codes for the dripper program.
#[error_code]
pub enum DripperError {
    #[msg("Unauthorized: caller does not hold the required role")]
    Unauthorized,

    #[msg("Asset transfer failed")]
    TransferFailed,

    #[msg("Invalid configuration")]
    InvalidConfiguration,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Destination is not the beneficiary")]
    InvalidBeneficiary,

    #[msg("Destination is not the controller")]
    InvalidController,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Ledger does not hold the requested asset")]
    AssetMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
