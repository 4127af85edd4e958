//! Liquidity and swap operations over injected ledgers.
//!
//! Every operation runs checks first, then writes the reserve and share
//! ledgers, and only then asks the asset ledger to move tokens. An asset
//! ledger that calls back into the pool therefore always observes reserves
//! and shares that already account for the transfer in flight.

pub mod liquidity;
pub mod swap;

#[cfg(test)]
mod testing;

use crate::errors::AmmError;
use crate::ledger::{AssetLedger, ReserveStore, ShareLedger};
use crate::math;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

pub use liquidity::*;
pub use swap::*;

/// Who is calling and when the transition executes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub caller: Pubkey,
    pub now: i64,
}

impl Invocation {
    pub fn new(caller: Pubkey, now: i64) -> Self {
        Self { caller, now }
    }

    fn ensure_not_expired(&self, deadline: i64) -> Result<()> {
        require!(self.now <= deadline, AmmError::Expired);
        Ok(())
    }
}

/// Reserves of `(a, b)` in the caller's order; zero for a pair never touched
pub fn get_reserves<R: ReserveStore>(reserves: &R, a: &Pubkey, b: &Pubkey) -> Result<(u64, u64)> {
    let key = PairKey::new(a, b)?;
    Ok(reserves.reserves(&key)?.oriented(&key, a))
}

/// Price of `a` in units of `b`, scaled by 10^18
pub fn get_price<R: ReserveStore>(reserves: &R, a: &Pubkey, b: &Pubkey) -> Result<u128> {
    let (reserve_a, reserve_b) = get_reserves(reserves, a, b)?;
    math::spot_price(reserve_a, reserve_b)
}

/// A pool engine bound to one set of ledgers for the length of a transition
pub struct Market<'a, R, S, A> {
    reserves: &'a mut R,
    shares: &'a mut S,
    assets: &'a mut A,
    custody: Pubkey,
}

impl<'a, R, S, A> Market<'a, R, S, A>
where
    R: ReserveStore,
    S: ShareLedger,
    A: AssetLedger,
{
    /// `custody` is the account holding every pooled asset on the asset ledger
    pub fn new(reserves: &'a mut R, shares: &'a mut S, assets: &'a mut A, custody: Pubkey) -> Self {
        Self {
            reserves,
            shares,
            assets,
            custody,
        }
    }

    pub fn custody(&self) -> Pubkey {
        self.custody
    }

    pub fn get_reserves(&self, a: &Pubkey, b: &Pubkey) -> Result<(u64, u64)> {
        get_reserves(&*self.reserves, a, b)
    }

    pub fn get_price(&self, a: &Pubkey, b: &Pubkey) -> Result<u128> {
        get_price(&*self.reserves, a, b)
    }

    pub fn total_shares(&self, a: &Pubkey, b: &Pubkey) -> Result<u64> {
        self.shares.total_shares(&PairKey::new(a, b)?)
    }

    pub fn share_balance(&self, a: &Pubkey, b: &Pubkey, holder: &Pubkey) -> Result<u64> {
        self.shares.share_balance(&PairKey::new(a, b)?, holder)
    }

    /// Give `amount` of the caller's shares in `(a, b)` to `to`
    pub fn transfer_shares(
        &mut self,
        invocation: &Invocation,
        a: &Pubkey,
        b: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, AmmError::ZeroInput);
        let key = PairKey::new(a, b)?;

        self.shares
            .transfer_shares(&key, &invocation.caller, to, amount)?;

        msg!("Shares transferred: {} to {}", amount, to);
        Ok(())
    }
}
