use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::{DRIPPER_SEED, NATIVE_VAULT_SEED};
use crate::error::DripperError;
use crate::ledger::native_custody;
use crate::state::Dripper;

/// Explicit deposit hook for lamports. Plain transfers into the vault are
/// equally valid; this one just leaves an event behind.
pub fn deposit_native(ctx: Context<DepositNative>, amount: u64) -> Result<()> {
    require!(amount > 0, DripperError::InvalidAmount);

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.native_vault.to_account_info(),
            },
        ),
        amount,
    )?;

    let custody = native_custody(ctx.accounts.native_vault.lamports(), &Rent::get()?);
    emit!(NativeDeposited {
        dripper: ctx.accounts.dripper.key(),
        depositor: ctx.accounts.depositor.key(),
        amount,
        custody,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositNative<'info> {
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

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct NativeDeposited {
    pub dripper: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    /// Lamport custody after the deposit.
    pub custody: u64,
}
