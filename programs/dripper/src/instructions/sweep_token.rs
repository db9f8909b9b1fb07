use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DRIPPER_SEED, TOKEN_RELEASE_SEED, TOKEN_VAULT_SEED};
use crate::engine::{AssetKey, DripperEngine, ReleaseAccount};
use crate::error::DripperError;
use crate::ledger::TokenVaultLedger;
use crate::state::{Dripper, TokenRelease};

/// Sends tokens of one mint not currently releasable to the controller.
/// `amount = None` sweeps all of them. Controller or keeper only.
pub fn sweep_token(ctx: Context<SweepToken>, amount: Option<u64>) -> Result<()> {
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
        ctx.accounts.controller_token_account.to_account_info(),
        ctx.accounts.controller_token_account.owner,
        dripper.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        signer_seeds,
    );
    let mut engine = DripperEngine::new(dripper.schedule, dripper.roles, ledger);
    let released = ctx.accounts.token_release.released;
    let account = ReleaseAccount::new(AssetKey::Token(mint), released);

    let swept = engine.sweep(&ctx.accounts.caller.key(), &account, amount, now)?;

    emit!(TokenSwept {
        dripper: dripper_key,
        mint,
        caller: ctx.accounts.caller.key(),
        controller: swept.recipient,
        amount: swept.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SweepToken<'info> {
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
        seeds = [TOKEN_RELEASE_SEED, dripper.key().as_ref(), mint.key().as_ref()],
        bump = token_release.bump
    )]
    pub token_release: Account<'info, TokenRelease>,

    #[account(
        mut,
        constraint = controller_token_account.mint == mint.key() @ DripperError::InvalidTokenMint,
        constraint = controller_token_account.owner == dripper.roles.controller
            @ DripperError::InvalidController,
    )]
    pub controller_token_account: Account<'info, TokenAccount>,

    /// Controller or keeper; checked by the engine.
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokenSwept {
    pub dripper: Pubkey,
    pub mint: Pubkey,
    pub caller: Pubkey,
    pub controller: Pubkey,
    pub amount: u64,
}
