use anchor_lang::prelude::{msg, AccountInfo, CpiContext, Pubkey};
use anchor_spl::token::{self, Transfer};

use crate::engine::{AssetKey, AssetLedger};
use crate::error::DripperError;

/// SPL custody held in a per-mint token vault whose authority is the dripper PDA.
pub struct TokenVaultLedger<'a, 'info> {
    mint: Pubkey,
    vault: AccountInfo<'info>,
    vault_amount: u64,
    destination: AccountInfo<'info>,
    destination_owner: Pubkey,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    authority_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> TokenVaultLedger<'a, 'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mint: Pubkey,
        vault: AccountInfo<'info>,
        vault_amount: u64,
        destination: AccountInfo<'info>,
        destination_owner: Pubkey,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        authority_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            mint,
            vault,
            vault_amount,
            destination,
            destination_owner,
            authority,
            token_program,
            authority_seeds,
        }
    }
}

impl AssetLedger for TokenVaultLedger<'_, '_> {
    fn balance_of(&self, key: &AssetKey) -> Result<u64, DripperError> {
        match key {
            AssetKey::Token(mint) if *mint == self.mint => Ok(self.vault_amount),
            _ => Err(DripperError::AssetMismatch),
        }
    }

    fn transfer(&mut self, key: &AssetKey, to: &Pubkey, amount: u64) -> Result<(), DripperError> {
        if self.destination_owner != *to {
            msg!("token transfer: destination owner {} is not {}", self.destination_owner, to);
            return Err(DripperError::TransferFailed);
        }
        let balance = self.balance_of(key)?;
        if amount > balance {
            msg!("token transfer: {} requested, {} in custody", amount, balance);
            return Err(DripperError::TransferFailed);
        }

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.destination.clone(),
                    authority: self.authority.clone(),
                },
                self.authority_seeds,
            ),
            amount,
        )
        .map_err(|err| {
            msg!("token transfer failed: {}", err);
            DripperError::TransferFailed
        })?;

        self.vault_amount = balance - amount;
        Ok(())
    }
}
