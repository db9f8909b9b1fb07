pub mod initialize_dripper;
pub mod deposit_native;
pub mod open_token_vault;
pub mod release_native;
pub mod release_token;
pub mod sweep_native;
pub mod sweep_token;
pub mod set_keeper;
pub mod vested_amount;
pub mod emit_vesting_quote;

pub use initialize_dripper::*;
pub use deposit_native::*;
pub use open_token_vault::*;
pub use release_native::*;
pub use release_token::*;
pub use sweep_native::*;
pub use sweep_token::*;
pub use set_keeper::*;
pub use vested_amount::*;
pub use emit_vesting_quote::*;
