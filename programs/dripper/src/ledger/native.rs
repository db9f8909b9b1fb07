use anchor_lang::prelude::{msg, AccountInfo, CpiContext, Pubkey, Rent};
use anchor_lang::system_program::{self, Transfer};

use crate::constants::NATIVE_VAULT_SPACE;
use crate::engine::{AssetKey, AssetLedger};
use crate::error::DripperError;

/// Lamports in the vault above its rent-exempt floor.
pub fn native_custody(vault_lamports: u64, rent: &Rent) -> u64 {
    vault_lamports.saturating_sub(rent.minimum_balance(NATIVE_VAULT_SPACE))
}

/// Lamport custody held in the system-owned native vault PDA.
///
/// The vault signs its own outbound transfers with its PDA seeds and always
/// keeps its rent floor.
pub struct NativeVaultLedger<'a, 'info> {
    vault: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    vault_seeds: &'a [&'a [&'a [u8]]],
    rent_floor: u64,
}

impl<'a, 'info> NativeVaultLedger<'a, 'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        destination: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        vault_seeds: &'a [&'a [&'a [u8]]],
        rent: &Rent,
    ) -> Self {
        Self {
            vault,
            destination,
            system_program,
            vault_seeds,
            rent_floor: rent.minimum_balance(NATIVE_VAULT_SPACE),
        }
    }
}

impl AssetLedger for NativeVaultLedger<'_, '_> {
    fn balance_of(&self, key: &AssetKey) -> Result<u64, DripperError> {
        if !key.is_native() {
            return Err(DripperError::AssetMismatch);
        }
        Ok(self.vault.lamports().saturating_sub(self.rent_floor))
    }

    fn transfer(&mut self, key: &AssetKey, to: &Pubkey, amount: u64) -> Result<(), DripperError> {
        if self.destination.key != to {
            msg!("native transfer: destination {} is not {}", self.destination.key, to);
            return Err(DripperError::TransferFailed);
        }
        let balance = self.balance_of(key)?;
        if amount > balance {
            msg!("native transfer: {} requested, {} in custody", amount, balance);
            return Err(DripperError::TransferFailed);
        }

        system_program::transfer(
            CpiContext::new_with_signer(
                self.system_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.destination.clone(),
                },
                self.vault_seeds,
            ),
            amount,
        )
        .map_err(|err| {
            msg!("native transfer failed: {}", err);
            DripperError::TransferFailed
        })
    }
}
