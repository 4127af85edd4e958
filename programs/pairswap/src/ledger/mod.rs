//! Ledgers the market reads and writes.
//!
//! Reserves and shares are key-value stores keyed by [`PairKey`]. Assets are
//! moved by an external [`AssetLedger`] the market never owns.
//!
//! Two families of implementations exist: the in-memory books in [`memory`]
//! used by the off-chain [`crate::exchange::Exchange`], and the account-backed
//! adapters in [`accounts`] used by the on-chain instructions.

pub mod accounts;
pub mod memory;

use crate::errors::AmmError;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

pub use accounts::*;
pub use memory::*;

/// Pooled amounts of a pair, in canonical `(asset0, asset1)` order
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: u64,
    pub reserve1: u64,
}

impl Reserves {
    pub fn new(reserve0: u64, reserve1: u64) -> Self {
        Self { reserve0, reserve1 }
    }

    /// Reserves seen from the caller's side of the pair
    pub fn oriented(&self, key: &PairKey, first: &Pubkey) -> (u64, u64) {
        key.orient(first, (self.reserve0, self.reserve1))
    }

    /// Apply a deposit on `asset`, failing on overflow instead of wrapping
    pub fn credit(self, key: &PairKey, asset: &Pubkey, amount: u64) -> Result<Self> {
        let (mine, other) = self.oriented(key, asset);
        let mine = mine
            .checked_add(amount)
            .ok_or(AmmError::ReserveOverflow)?;
        Ok(Self::from_oriented(key, asset, (mine, other)))
    }

    /// Apply a withdrawal on `asset`
    pub fn debit(self, key: &PairKey, asset: &Pubkey, amount: u64) -> Result<Self> {
        let (mine, other) = self.oriented(key, asset);
        let mine = mine
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLiquidity)?;
        Ok(Self::from_oriented(key, asset, (mine, other)))
    }

    /// Inverse of [`Reserves::oriented`]
    pub fn from_oriented(key: &PairKey, first: &Pubkey, values: (u64, u64)) -> Self {
        let (reserve0, reserve1) = key.orient(first, values);
        Self { reserve0, reserve1 }
    }
}

/// Authoritative per-pair reserve record
pub trait ReserveStore {
    /// Current reserves; a pair never written reads as zero
    fn reserves(&self, key: &PairKey) -> Result<Reserves>;

    /// Overwrite the stored reserves. Callers have already validated the amounts.
    fn set_reserves(&mut self, key: &PairKey, reserves: Reserves) -> Result<()>;
}

/// Per-pair pool share accounting
pub trait ShareLedger {
    fn total_shares(&self, key: &PairKey) -> Result<u64>;

    fn share_balance(&self, key: &PairKey, holder: &Pubkey) -> Result<u64>;

    /// Increase the total and the holder's balance together
    fn mint_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()>;

    /// Decrease the total and the holder's balance together
    fn burn_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()>;

    /// Move shares between holders; the total is unchanged
    fn transfer_shares(
        &mut self,
        key: &PairKey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()>;
}

/// External custody of the pooled assets
///
/// Any error aborts the whole operation that requested the movement.
pub trait AssetLedger {
    /// Move `amount` of `asset` out of the pool's `custody` account to `to`
    fn transfer(&mut self, asset: &Pubkey, custody: &Pubkey, to: &Pubkey, amount: u64)
        -> Result<()>;

    /// Move `amount` of `asset` from `from` to `to` on the pool's behalf
    fn transfer_from(&mut self, asset: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64)
        -> Result<()>;

    fn balance_of(&self, asset: &Pubkey, account: &Pubkey) -> u64;
}
