use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DRIPPER_SEED, TOKEN_RELEASE_SEED, TOKEN_VAULT_SEED};
use crate::engine::{AssetKey, DripperEngine, ReleaseAccount};
use crate::error::DripperError;
use crate::ledger::TokenVaultLedger;
use crate::state::{Dripper, TokenRelease};

/// Pays every vested, unreleased token of one mint to the beneficiary. Anyone may call.
pub fn release_token(ctx: Context<ReleaseToken>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let dripper = &ctx.accounts.dripper;
    let dripper_key = dripper.key();
    let mint = ctx.accounts.mint.key();
    let id_bytes = dripper.id.to_le_bytes();
    let bump = [dripper.bump];
    let seeds = Dripper::signer_seeds(&dripper.creator, &id_bytes, &bump);
    let signer_seeds: &[&[&[u8]]] = &[&seeds[..]];

    let ledger = TokenVaultLedger::new(
        mint,
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_vault.amount,
        ctx.accounts.beneficiary_token_account.to_account_info(),
        ctx.accounts.beneficiary_token_account.owner,
        dripper.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        signer_seeds,
    );
    let mut engine = DripperEngine::new(dripper.schedule, dripper.roles, ledger);
    let token_release = &mut ctx.accounts.token_release;
    let mut account = ReleaseAccount::new(AssetKey::Token(mint), token_release.released);

    let released = engine.release(&mut account, now)?;
    token_release.released = account.released();

    emit!(TokenReleased {
        dripper: dripper_key,
        mint,
        beneficiary: released.recipient,
        amount: released.amount,
        released_total: released.released_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseToken<'info> {
    #[account(
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [TOKEN_VAULT_SEED, dripper.key().as_ref(), mint.key().as_ref()],
        bump,
        constraint = token_vault.mint == mint.key() @ DripperError::InvalidTokenMint,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [TOKEN_RELEASE_SEED, dripper.key().as_ref(), mint.key().as_ref()],
        bump = token_release.bump
    )]
    pub token_release: Account<'info, TokenRelease>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == mint.key() @ DripperError::InvalidTokenMint,
        constraint = beneficiary_token_account.owner == dripper.roles.beneficiary
            @ DripperError::InvalidBeneficiary,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokenReleased {
    pub dripper: Pubkey,
    pub mint: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub released_total: u128,
}
