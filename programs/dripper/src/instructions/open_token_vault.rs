use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DRIPPER_SEED, TOKEN_RELEASE_SEED, TOKEN_VAULT_SEED};
use crate::state::{Dripper, TokenRelease};

/// Creates the custody vault and the released-total record for one mint.
/// Permissionless: the payer only funds rent.
pub fn open_token_vault(ctx: Context<OpenTokenVault>) -> Result<()> {
    let release = &mut ctx.accounts.token_release;
    release.dripper = ctx.accounts.dripper.key();
    release.mint = ctx.accounts.mint.key();
    release.released = 0;
    release.bump = ctx.bumps.token_release;

    emit!(TokenVaultOpened {
        dripper: release.dripper,
        mint: release.mint,
        vault: ctx.accounts.token_vault.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct OpenTokenVault<'info> {
    #[account(
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        token::mint = mint,
        token::authority = dripper,
        seeds = [TOKEN_VAULT_SEED, dripper.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        space = 8 + TokenRelease::SIZE,
        seeds = [TOKEN_RELEASE_SEED, dripper.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub token_release: Account<'info, TokenRelease>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct TokenVaultOpened {
    pub dripper: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
}
