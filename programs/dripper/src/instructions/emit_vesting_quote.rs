use anchor_lang::prelude::*;

use crate::engine::{AssetKey, AssetLedger, DripperEngine, Quote};
use crate::instructions::{NativeCustody, TokenCustody};

/// Emits the full lamport accounting at `timestamp`.
pub fn emit_native_quote(ctx: Context<NativeCustody>, timestamp: i64) -> Result<()> {
    let (engine, account) = ctx.accounts.snapshot()?;
    let quote = engine.quote(&account, timestamp)?;
    emit!(VestingQuote::new(ctx.accounts.dripper.key(), &engine, quote));
    Ok(())
}

/// Emits the full accounting for one mint at `timestamp`.
pub fn emit_token_quote(ctx: Context<TokenCustody>, timestamp: i64) -> Result<()> {
    let (engine, account) = ctx.accounts.snapshot();
    let quote = engine.quote(&account, timestamp)?;
    emit!(VestingQuote::new(ctx.accounts.dripper.key(), &engine, quote));
    Ok(())
}

#[event]
pub struct VestingQuote {
    pub dripper: Pubkey,
    pub asset: AssetKey,
    pub timestamp: i64,
    pub start_ts: i64,
    pub end_ts: i64,
    pub custody: u64,
    pub vested_amount: u128,
    pub released_amount: u128,
    pub releasable: u64,
    pub sweepable: u64,
}

impl VestingQuote {
    fn new<L: AssetLedger>(dripper: Pubkey, engine: &DripperEngine<L>, quote: Quote) -> Self {
        Self {
            dripper,
            asset: quote.key,
            timestamp: quote.timestamp,
            start_ts: engine.schedule().start_ts(),
            end_ts: engine.schedule().end_ts(),
            custody: quote.custody,
            vested_amount: quote.vested,
            released_amount: quote.released,
            releasable: quote.releasable,
            sweepable: quote.sweepable,
        }
    }
}
