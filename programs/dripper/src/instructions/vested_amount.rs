use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::{DRIPPER_SEED, NATIVE_VAULT_SEED, TOKEN_RELEASE_SEED, TOKEN_VAULT_SEED};
use crate::engine::{AssetKey, CustodySnapshot, DripperEngine, ReleaseAccount};
use crate::error::DripperError;
use crate::ledger::native_custody;
use crate::state::{Dripper, TokenRelease};

/// Lamports vested at `timestamp` (past or future), via return data.
pub fn vested_amount_native(ctx: Context<NativeCustody>, timestamp: i64) -> Result<u128> {
    let (engine, account) = ctx.accounts.snapshot()?;
    Ok(engine.vested_amount(&account, timestamp)?)
}

/// Tokens of one mint vested at `timestamp` (past or future), via return data.
pub fn vested_amount_token(ctx: Context<TokenCustody>, timestamp: i64) -> Result<u128> {
    let (engine, account) = ctx.accounts.snapshot();
    Ok(engine.vested_amount(&account, timestamp)?)
}

/// Read-only view of the lamport custody.
#[derive(Accounts)]
pub struct NativeCustody<'info> {
    #[account(
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    #[account(
        seeds = [NATIVE_VAULT_SEED, dripper.key().as_ref()],
        bump = dripper.native_vault_bump
    )]
    pub native_vault: SystemAccount<'info>,
}

impl NativeCustody<'_> {
    pub fn snapshot(&self) -> Result<(DripperEngine<CustodySnapshot>, ReleaseAccount)> {
        let custody = native_custody(self.native_vault.lamports(), &Rent::get()?);
        let ledger = CustodySnapshot::new(AssetKey::Native, custody);
        let engine = DripperEngine::new(self.dripper.schedule, self.dripper.roles, ledger);
        Ok((engine, ReleaseAccount::new(AssetKey::Native, self.dripper.native_released)))
    }
}

/// Read-only view of one mint's custody.
#[derive(Accounts)]
pub struct TokenCustody<'info> {
    #[account(
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    pub mint: Account<'info, Mint>,

    #[account(
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
}

impl TokenCustody<'_> {
    pub fn snapshot(&self) -> (DripperEngine<CustodySnapshot>, ReleaseAccount) {
        let key = AssetKey::Token(self.mint.key());
        let ledger = CustodySnapshot::new(key, self.token_vault.amount);
        let engine = DripperEngine::new(self.dripper.schedule, self.dripper.roles, ledger);
        (engine, ReleaseAccount::new(key, self.token_release.released))
    }
}
