use anchor_lang::prelude::*;

use crate::constants::{DRIPPER_SEED, NATIVE_VAULT_SEED};
use crate::engine::{AssetKey, DripperEngine, ReleaseAccount};
use crate::error::DripperError;
use crate::ledger::NativeVaultLedger;
use crate::state::Dripper;

/// Pays every vested, unreleased lamport to the beneficiary. Anyone may call.
pub fn release_native(ctx: Context<ReleaseNative>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let rent = Rent::get()?;
    let dripper_key = ctx.accounts.dripper.key();
    let vault_bump = [ctx.accounts.dripper.native_vault_bump];
    let vault_seeds: &[&[u8]] = &[NATIVE_VAULT_SEED, dripper_key.as_ref(), &vault_bump];
    let signer_seeds = &[vault_seeds];

    let ledger = NativeVaultLedger::new(
        ctx.accounts.native_vault.to_account_info(),
        ctx.accounts.beneficiary.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        signer_seeds,
        &rent,
    );
    let dripper = &mut ctx.accounts.dripper;
    let mut engine = DripperEngine::new(dripper.schedule, dripper.roles, ledger);
    let mut account = ReleaseAccount::new(AssetKey::Native, dripper.native_released);

    let released = engine.release(&mut account, now)?;
    dripper.native_released = account.released();

    emit!(NativeReleased {
        dripper: dripper_key,
        beneficiary: released.recipient,
        amount: released.amount,
        released_total: released.released_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseNative<'info> {
    #[account(
        mut,
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    #[account(
        mut,
        seeds = [NATIVE_VAULT_SEED, dripper.key().as_ref()],
        bump = dripper.native_vault_bump
    )]
    pub native_vault: SystemAccount<'info>,

    /// CHECK: Lamport destination only; pinned to the stored beneficiary.
    #[account(mut, address = dripper.roles.beneficiary @ DripperError::InvalidBeneficiary)]
    pub beneficiary: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct NativeReleased {
    pub dripper: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub released_total: u128,
}
