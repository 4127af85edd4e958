use anchor_lang::prelude::*;

/// Share of every swap input that counts toward pricing (997/1000, a 0.3% fee)
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1_000;

/// Shares computed at bootstrap but never spendable by any holder
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Fixed-point scale of `get_price` results
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Holder of record for the minimum liquidity lock. Nobody can sign for it.
pub const LOCKED_SHARES_HOLDER: Pubkey = Pubkey::new_from_array([0; 32]);

#[constant]
pub const PAIR_SEED: &[u8] = b"pair";

#[constant]
pub const AUTHORITY_SEED: &[u8] = b"pool_authority";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const SHARES_SEED: &[u8] = b"shares";
