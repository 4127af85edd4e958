use super::{Invocation, Market};
use crate::constants::{LOCKED_SHARES_HOLDER, MINIMUM_LIQUIDITY};
use crate::errors::AmmError;
use crate::ledger::{AssetLedger, ReserveStore, ShareLedger};
use crate::math;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

/// Deposit request; amounts are in the `(asset_a, asset_b)` order the caller chose
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositParams {
    pub asset_a: Pubkey,
    pub asset_b: Pubkey,
    pub amount_a_desired: u64,
    pub amount_b_desired: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub recipient: Pubkey,
    pub deadline: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deposited {
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
}

/// Withdrawal request, burning the caller's shares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawParams {
    pub asset_a: Pubkey,
    pub asset_b: Pubkey,
    pub shares: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub recipient: Pubkey,
    pub deadline: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawn {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Largest deposit at the current ratio that fits inside the desired amounts
fn optimal_amounts(params: &DepositParams, reserve_a: u64, reserve_b: u64) -> Result<(u64, u64)> {
    if reserve_a == 0 && reserve_b == 0 {
        return Ok((params.amount_a_desired, params.amount_b_desired));
    }
    require!(
        reserve_a > 0 && reserve_b > 0,
        AmmError::InsufficientLiquidity
    );

    let optimal_b = params.amount_a_desired as u128 * reserve_b as u128 / reserve_a as u128;
    if optimal_b <= params.amount_b_desired as u128 {
        let optimal_b = optimal_b as u64;
        require!(
            optimal_b >= params.amount_b_min,
            AmmError::InsufficientBAmount
        );
        return Ok((params.amount_a_desired, optimal_b));
    }

    let optimal_a = params.amount_b_desired as u128 * reserve_a as u128 / reserve_b as u128;
    require!(
        optimal_a <= params.amount_a_desired as u128,
        AmmError::InsufficientAAmount
    );
    let optimal_a = optimal_a as u64;
    require!(
        optimal_a >= params.amount_a_min,
        AmmError::InsufficientAAmount
    );
    Ok((optimal_a, params.amount_b_desired))
}

impl<R, S, A> Market<'_, R, S, A>
where
    R: ReserveStore,
    S: ShareLedger,
    A: AssetLedger,
{
    /// Deposit both assets at the pool ratio and mint shares to `recipient`
    ///
    /// The first deposit into an empty pair sets the ratio and mints
    /// `isqrt(amount_a * amount_b) - MINIMUM_LIQUIDITY`, with the minimum locked
    /// under the null holder for good.
    pub fn add_liquidity(&mut self, invocation: &Invocation, params: &DepositParams) -> Result<Deposited> {
        invocation.ensure_not_expired(params.deadline)?;

        let key = PairKey::new(&params.asset_a, &params.asset_b)?;
        let reserves = self.reserves.reserves(&key)?;
        let (reserve_a, reserve_b) = reserves.oriented(&key, &params.asset_a);

        let (amount_a, amount_b) = optimal_amounts(params, reserve_a, reserve_b)?;

        let total = self.shares.total_shares(&key)?;
        let bootstrap = total == 0;
        let shares = if bootstrap {
            let root = math::isqrt(amount_a as u128 * amount_b as u128) as u64;
            root.saturating_sub(MINIMUM_LIQUIDITY)
        } else {
            let from_a = math::proportion(amount_a, total, reserve_a)?;
            let from_b = math::proportion(amount_b, total, reserve_b)?;
            from_a.min(from_b)
        };
        require!(shares > 0, AmmError::InsufficientLiquidityMinted);

        let issued = if bootstrap {
            shares + MINIMUM_LIQUIDITY
        } else {
            shares
        };
        require!(
            total.checked_add(issued).is_some(),
            AmmError::ShareOverflow
        );

        let updated = reserves
            .credit(&key, &params.asset_a, amount_a)?
            .credit(&key, &params.asset_b, amount_b)?;

        if bootstrap {
            self.shares
                .mint_shares(&key, &LOCKED_SHARES_HOLDER, MINIMUM_LIQUIDITY)?;
        }
        self.shares.mint_shares(&key, &params.recipient, shares)?;
        self.reserves.set_reserves(&key, updated)?;

        self.assets
            .transfer_from(&params.asset_a, &invocation.caller, &self.custody, amount_a)?;
        self.assets
            .transfer_from(&params.asset_b, &invocation.caller, &self.custody, amount_b)?;

        msg!(
            "Liquidity added - A: {}, B: {}, shares: {}",
            amount_a,
            amount_b,
            shares
        );

        Ok(Deposited {
            amount_a,
            amount_b,
            shares,
        })
    }

    /// Burn the caller's shares and pay out the matching slice of both reserves
    pub fn remove_liquidity(&mut self, invocation: &Invocation, params: &WithdrawParams) -> Result<Withdrawn> {
        invocation.ensure_not_expired(params.deadline)?;
        require!(params.shares > 0, AmmError::ZeroInput);

        let key = PairKey::new(&params.asset_a, &params.asset_b)?;
        let balance = self.shares.share_balance(&key, &invocation.caller)?;
        require!(balance >= params.shares, AmmError::InsufficientShares);

        let total = self.shares.total_shares(&key)?;
        require!(total > 0, AmmError::InsufficientLiquidity);

        let reserves = self.reserves.reserves(&key)?;
        let (reserve_a, reserve_b) = reserves.oriented(&key, &params.asset_a);

        let amount_a = math::proportion(params.shares, reserve_a, total)?;
        let amount_b = math::proportion(params.shares, reserve_b, total)?;
        require!(
            amount_a >= params.amount_a_min,
            AmmError::InsufficientAAmount
        );
        require!(
            amount_b >= params.amount_b_min,
            AmmError::InsufficientBAmount
        );

        let updated = reserves
            .debit(&key, &params.asset_a, amount_a)?
            .debit(&key, &params.asset_b, amount_b)?;

        self.shares
            .burn_shares(&key, &invocation.caller, params.shares)?;
        self.reserves.set_reserves(&key, updated)?;

        self.assets
            .transfer(&params.asset_a, &self.custody, &params.recipient, amount_a)?;
        self.assets
            .transfer(&params.asset_b, &self.custody, &params.recipient, amount_b)?;

        msg!(
            "Liquidity removed - A: {}, B: {}, shares burned: {}",
            amount_a,
            amount_b,
            params.shares
        );

        Ok(Withdrawn { amount_a, amount_b })
    }
}
