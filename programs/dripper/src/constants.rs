//! PDA seeds and program-wide limits.

/// Seed prefix for the `Dripper` state PDA: `[DRIPPER_SEED, creator, id_le_bytes]`.
pub const DRIPPER_SEED: &[u8] = b"dripper";

/// Seed prefix for the lamport vault: `[NATIVE_VAULT_SEED, dripper]`.
pub const NATIVE_VAULT_SEED: &[u8] = b"native_vault";

/// Seed prefix for a per-mint token vault: `[TOKEN_VAULT_SEED, dripper, mint]`.
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";

/// Seed prefix for a per-mint released total: `[TOKEN_RELEASE_SEED, dripper, mint]`.
pub const TOKEN_RELEASE_SEED: &[u8] = b"token_release";

/// The native vault carries no data; this is the size used for its rent floor.
pub const NATIVE_VAULT_SPACE: usize = 0;
