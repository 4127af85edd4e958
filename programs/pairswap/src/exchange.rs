//! Off-chain host for the market.
//!
//! On-chain, a failed instruction reverts every account write and CPI. Off-chain
//! there is no runtime to do that, so [`Exchange`] snapshots its books and the
//! asset ledger before each transition and puts them back when it fails.

use crate::ledger::{AssetLedger, ReserveBook, ShareBook, ShareLedger};
use crate::market::{
    self, Deposited, DepositParams, Invocation, Market, SwapParams, WithdrawParams, Withdrawn,
};
use crate::math;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

#[derive(Clone, Debug)]
pub struct Exchange<A> {
    custody: Pubkey,
    reserves: ReserveBook,
    shares: ShareBook,
    assets: A,
}

impl<A> Exchange<A>
where
    A: AssetLedger + Clone,
{
    /// `custody` is the exchange's own account on `assets`
    pub fn new(custody: Pubkey, assets: A) -> Self {
        Self {
            custody,
            reserves: ReserveBook::new(),
            shares: ShareBook::new(),
            assets,
        }
    }

    pub fn custody(&self) -> Pubkey {
        self.custody
    }

    pub fn reserves(&self) -> &ReserveBook {
        &self.reserves
    }

    pub fn shares(&self) -> &ShareBook {
        &self.shares
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Direct access for funding accounts between transitions
    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    pub fn get_reserves(&self, a: &Pubkey, b: &Pubkey) -> Result<(u64, u64)> {
        market::get_reserves(&self.reserves, a, b)
    }

    pub fn get_price(&self, a: &Pubkey, b: &Pubkey) -> Result<u128> {
        market::get_price(&self.reserves, a, b)
    }

    pub fn get_amount_out(&self, amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
        math::quote_out(amount_in, reserve_in, reserve_out)
    }

    /// Amount of B matching `amount_a` at the given reserve ratio
    pub fn quote(&self, amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64> {
        math::quote(amount_a, reserve_a, reserve_b)
    }

    pub fn total_shares(&self, a: &Pubkey, b: &Pubkey) -> Result<u64> {
        self.shares.total_shares(&PairKey::new(a, b)?)
    }

    pub fn share_balance(&self, a: &Pubkey, b: &Pubkey, holder: &Pubkey) -> Result<u64> {
        self.shares.share_balance(&PairKey::new(a, b)?, holder)
    }

    pub fn add_liquidity(&mut self, invocation: &Invocation, params: &DepositParams) -> Result<Deposited> {
        self.transact(|market| market.add_liquidity(invocation, params))
    }

    pub fn remove_liquidity(&mut self, invocation: &Invocation, params: &WithdrawParams) -> Result<Withdrawn> {
        self.transact(|market| market.remove_liquidity(invocation, params))
    }

    pub fn swap_exact_in(&mut self, invocation: &Invocation, params: &SwapParams) -> Result<u64> {
        self.transact(|market| market.swap_exact_in(invocation, params))
    }

    pub fn transfer_shares(
        &mut self,
        invocation: &Invocation,
        a: &Pubkey,
        b: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        self.transact(|market| market.transfer_shares(invocation, a, b, to, amount))
    }

    /// Run one transition; on error every ledger is restored to its prior state
    fn transact<T>(
        &mut self,
        transition: impl FnOnce(&mut Market<'_, ReserveBook, ShareBook, A>) -> Result<T>,
    ) -> Result<T> {
        let snapshot = (
            self.reserves.clone(),
            self.shares.clone(),
            self.assets.clone(),
        );

        let mut market = Market::new(
            &mut self.reserves,
            &mut self.shares,
            &mut self.assets,
            self.custody,
        );
        let outcome = transition(&mut market);

        if outcome.is_err() {
            (self.reserves, self.shares, self.assets) = snapshot;
        }
        outcome
    }
}
