use anchor_lang::prelude::*;

use crate::constants::DRIPPER_SEED;
use crate::state::Dripper;

pub fn set_keeper(ctx: Context<SetKeeper>, new_keeper: Pubkey) -> Result<()> {
    let dripper_key = ctx.accounts.dripper.key();
    let governance = ctx.accounts.governance.key();
    let dripper = &mut ctx.accounts.dripper;

    let old_keeper = dripper.roles.set_keeper(&governance, new_keeper)?;

    emit!(KeeperSet {
        dripper: dripper_key,
        governance,
        old_keeper,
        new_keeper,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetKeeper<'info> {
    #[account(
        mut,
        seeds = [DRIPPER_SEED, dripper.creator.as_ref(), &dripper.id.to_le_bytes()],
        bump = dripper.bump
    )]
    pub dripper: Account<'info, Dripper>,

    /// Must match the stored governance; checked by the role registry.
    pub governance: Signer<'info>,
}

#[event]
pub struct KeeperSet {
    pub dripper: Pubkey,
    pub governance: Pubkey,
    pub old_keeper: Pubkey,
    pub new_keeper: Pubkey,
}
