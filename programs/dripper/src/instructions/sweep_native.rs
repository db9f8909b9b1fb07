use anchor_lang::prelude::*;

use crate::constants::{DRIPPER_SEED, NATIVE_VAULT_SEED};
use crate::engine::{AssetKey, DripperEngine, ReleaseAccount};
use crate::error::DripperError;
use crate::ledger::NativeVaultLedger;
use crate::state::Dripper;

/// Sends lamports not currently releasable to the controller.
/// `amount = None` sweeps all of them. Controller or keeper only.
pub fn sweep_native(ctx: Context<SweepNative>, amount: Option<u64>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let rent = Rent::get()?;
    let dripper = &ctx.accounts.dripper;
    let dripper_key = dripper.key();
    let vault_bump = [dripper.native_vault_bump];
    let vault_seeds: &[&[u8]] = &[NATIVE_VAULT_SEED, dripper_key.as_ref(), &vault_bump];
    let signer_seeds = &[vault_seeds];

    let ledger = NativeVaultLedger::new(
        ctx.accounts.native_vault.to_account_info(),
        ctx.accounts.controller.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        signer_seeds,
        &rent,
    );
    let mut engine = DripperEngine::new(dripper.schedule, dripper.roles, ledger);
    let account = ReleaseAccount::new(AssetKey::Native, dripper.native_released);

    let swept = engine.sweep(&ctx.accounts.caller.key(), &account, amount, now)?;

    emit!(NativeSwept {
        dripper: dripper_key,
        caller: ctx.accounts.caller.key(),
        controller: swept.recipient,
        amount: swept.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SweepNative<'info> {
    #[account(
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

    /// CHECK: Lamport destination only; pinned to the stored controller.
    #[account(mut, address = dripper.roles.controller @ DripperError::InvalidController)]
    pub controller: UncheckedAccount<'info>,

    /// Controller or keeper; checked by the engine.
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct NativeSwept {
    pub dripper: Pubkey,
    pub caller: Pubkey,
    pub controller: Pubkey,
    pub amount: u64,
}
