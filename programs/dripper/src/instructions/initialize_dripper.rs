use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::{DRIPPER_SEED, NATIVE_VAULT_SEED, NATIVE_VAULT_SPACE};
use crate::engine::{RoleRegistry, VestingSchedule};
use crate::state::Dripper;

/// Construction-time configuration. Everything but `keeper` is fixed for life.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct InitializeDripperParams {
    /// Distinguishes drippers created by the same payer.
    pub id: u64,
    pub beneficiary: Pubkey,
    pub controller: Pubkey,
    pub governance: Pubkey,
    pub keeper: Pubkey,
    /// Vesting start (Unix seconds).
    pub start_ts: i64,
    /// Vesting window in seconds, > 0.
    pub duration: u64,
}

pub fn initialize_dripper(
    ctx: Context<InitializeDripper>,
    params: InitializeDripperParams,
) -> Result<()> {
    let roles = RoleRegistry::new(
        params.beneficiary,
        params.controller,
        params.governance,
        params.keeper,
    )?;
    let schedule = VestingSchedule::new(params.start_ts, params.duration)?;

    // The vault only persists once it holds its rent floor.
    let rent_floor = Rent::get()?.minimum_balance(NATIVE_VAULT_SPACE);
    let top_up = rent_floor.saturating_sub(ctx.accounts.native_vault.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.payer.to_account_info(),
                    to: ctx.accounts.native_vault.to_account_info(),
                },
            ),
            top_up,
        )?;
    }

    let dripper = &mut ctx.accounts.dripper;
    dripper.creator = ctx.accounts.payer.key();
    dripper.id = params.id;
    dripper.roles = roles;
    dripper.schedule = schedule;
    dripper.native_released = 0;
    dripper.bump = ctx.bumps.dripper;
    dripper.native_vault_bump = ctx.bumps.native_vault;

    emit!(DripperInitialized {
        dripper: dripper.key(),
        creator: dripper.creator,
        id: dripper.id,
        beneficiary: roles.beneficiary(),
        controller: roles.controller(),
        governance: roles.governance(),
        keeper: roles.keeper(),
        start_ts: schedule.start_ts(),
        duration: schedule.duration(),
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(params: InitializeDripperParams)]
pub struct InitializeDripper<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + Dripper::SIZE,
        seeds = [DRIPPER_SEED, payer.key().as_ref(), &params.id.to_le_bytes()],
        bump
    )]
    pub dripper: Account<'info, Dripper>,

    #[account(
        mut,
        seeds = [NATIVE_VAULT_SEED, dripper.key().as_ref()],
        bump
    )]
    pub native_vault: SystemAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct DripperInitialized {
    pub dripper: Pubkey,
    pub creator: Pubkey,
    pub id: u64,
    pub beneficiary: Pubkey,
    pub controller: Pubkey,
    pub governance: Pubkey,
    pub keeper: Pubkey,
    pub start_ts: i64,
    pub duration: u64,
}
