use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize, Pubkey};

/// Identifies one custodied asset: lamports, or the tokens of a single SPL mint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Native,
    Token(Pubkey),
}

impl AssetKey {
    pub fn is_native(&self) -> bool {
        matches!(self, AssetKey::Native)
    }
}
