use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize, Pubkey};

use crate::error::DripperError;

/// The four identities of a dripper. Only `keeper` changes after creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleRegistry {
    /// Receives every release.
    pub beneficiary: Pubkey,
    /// Receives every sweep; may sweep.
    pub controller: Pubkey,
    /// Sole authority over `keeper`.
    pub governance: Pubkey,
    /// Operational sweeper, replaceable by governance.
    pub keeper: Pubkey,
}

impl RoleRegistry {
    pub const SIZE: usize = 32 * 4;

    pub fn new(
        beneficiary: Pubkey,
        controller: Pubkey,
        governance: Pubkey,
        keeper: Pubkey,
    ) -> Result<Self, DripperError> {
        for identity in [&beneficiary, &controller, &governance, &keeper] {
            if *identity == Pubkey::default() {
                return Err(DripperError::InvalidConfiguration);
            }
        }
        Ok(Self {
            beneficiary,
            controller,
            governance,
            keeper,
        })
    }

    pub fn beneficiary(&self) -> Pubkey {
        self.beneficiary
    }

    pub fn controller(&self) -> Pubkey {
        self.controller
    }

    pub fn governance(&self) -> Pubkey {
        self.governance
    }

    pub fn keeper(&self) -> Pubkey {
        self.keeper
    }

    pub fn is_governance(&self, caller: &Pubkey) -> bool {
        *caller == self.governance
    }

    pub fn can_sweep(&self, caller: &Pubkey) -> bool {
        *caller == self.controller || *caller == self.keeper
    }

    pub fn authorize_sweep(&self, caller: &Pubkey) -> Result<(), DripperError> {
        if self.can_sweep(caller) {
            Ok(())
        } else {
            Err(DripperError::Unauthorized)
        }
    }

    /// Replaces the keeper and returns the previous one.
    pub fn set_keeper(
        &mut self,
        caller: &Pubkey,
        new_keeper: Pubkey,
    ) -> Result<Pubkey, DripperError> {
        if !self.is_governance(caller) {
            return Err(DripperError::Unauthorized);
        }
        if new_keeper == Pubkey::default() {
            return Err(DripperError::InvalidConfiguration);
        }
        Ok(std::mem::replace(&mut self.keeper, new_keeper))
    }
}
