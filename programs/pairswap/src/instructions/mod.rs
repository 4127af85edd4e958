pub mod initialize_pair;
pub mod manage_liquidity;
pub mod swap;
pub mod transfer_shares;
pub mod views;

pub use initialize_pair::*;
pub use manage_liquidity::*;
pub use swap::*;
pub use transfer_shares::*;
pub use views::*;
