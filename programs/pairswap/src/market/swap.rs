use super::{Invocation, Market};
use crate::errors::AmmError;
use crate::ledger::{AssetLedger, ReserveStore, ShareLedger};
use crate::math;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

/// Exact-input trade of `asset_in` for `asset_out`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    pub amount_in: u64,
    pub amount_out_min: u64,
    pub asset_in: Pubkey,
    pub asset_out: Pubkey,
    pub recipient: Pubkey,
    pub deadline: i64,
}

impl<R, S, A> Market<'_, R, S, A>
where
    R: ReserveStore,
    S: ShareLedger,
    A: AssetLedger,
{
    /// Swap an exact input against the pair's reserves; returns the amount sent to `recipient`
    pub fn swap_exact_in(&mut self, invocation: &Invocation, params: &SwapParams) -> Result<u64> {
        invocation.ensure_not_expired(params.deadline)?;

        let key = PairKey::new(&params.asset_in, &params.asset_out)?;
        let reserves = self.reserves.reserves(&key)?;
        let (reserve_in, reserve_out) = reserves.oriented(&key, &params.asset_in);

        let amount_out = math::quote_out(params.amount_in, reserve_in, reserve_out)?;
        require!(
            amount_out > 0 && amount_out >= params.amount_out_min,
            AmmError::InsufficientOutputAmount
        );

        let updated = reserves
            .credit(&key, &params.asset_in, params.amount_in)?
            .debit(&key, &params.asset_out, amount_out)?;

        self.reserves.set_reserves(&key, updated)?;

        self.assets.transfer_from(
            &params.asset_in,
            &invocation.caller,
            &self.custody,
            params.amount_in,
        )?;
        self.assets.transfer(
            &params.asset_out,
            &self.custody,
            &params.recipient,
            amount_out,
        )?;

        msg!(
            "Swap completed - Input: {}, Output: {}",
            params.amount_in,
            amount_out
        );

        Ok(amount_out)
    }
}
