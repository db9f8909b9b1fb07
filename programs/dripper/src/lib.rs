use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod state;

pub use instructions::*;

declare_id!("HqDeaZJWNi3U1Jv1tE3PZ7rY2zLu3j8QVnHfWUuQtidJ");

#[program]
pub mod dripper {
    use super::*;

    pub fn initialize_dripper(
        ctx: Context<InitializeDripper>,
        params: InitializeDripperParams,
    ) -> Result<()> {
        instructions::initialize_dripper(ctx, params)
    }

    pub fn deposit_native(ctx: Context<DepositNative>, amount: u64) -> Result<()> {
        instructions::deposit_native(ctx, amount)
    }

    pub fn open_token_vault(ctx: Context<OpenTokenVault>) -> Result<()> {
        instructions::open_token_vault(ctx)
    }

    pub fn release_native(ctx: Context<ReleaseNative>) -> Result<()> {
        instructions::release_native(ctx)
    }

    pub fn release_token(ctx: Context<ReleaseToken>) -> Result<()> {
        instructions::release_token(ctx)
    }

    pub fn sweep_native(ctx: Context<SweepNative>, amount: Option<u64>) -> Result<()> {
        instructions::sweep_native(ctx, amount)
    }

    pub fn sweep_token(ctx: Context<SweepToken>, amount: Option<u64>) -> Result<()> {
        instructions::sweep_token(ctx, amount)
    }

    pub fn set_keeper(ctx: Context<SetKeeper>, new_keeper: Pubkey) -> Result<()> {
        instructions::set_keeper(ctx, new_keeper)
    }

    pub fn vested_amount_native(ctx: Context<NativeCustody>, timestamp: i64) -> Result<u128> {
        instructions::vested_amount_native(ctx, timestamp)
    }

    pub fn vested_amount_token(ctx: Context<TokenCustody>, timestamp: i64) -> Result<u128> {
        instructions::vested_amount_token(ctx, timestamp)
    }

    pub fn emit_native_quote(ctx: Context<NativeCustody>, timestamp: i64) -> Result<()> {
        instructions::emit_native_quote(ctx, timestamp)
    }

    pub fn emit_token_quote(ctx: Context<TokenCustody>, timestamp: i64) -> Result<()> {
        instructions::emit_token_quote(ctx, timestamp)
    }
}
