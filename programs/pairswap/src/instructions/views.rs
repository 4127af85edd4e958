//! Read-only instructions. Results are returned through Anchor return data.

use crate::constants::PAIR_SEED;
use crate::math;
use crate::pair::PairKey;
use crate::state::PairState;
use anchor_lang::prelude::*;

/// Reserves of a pair in the caller's order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveQuote {
    pub reserve_a: u64,
    pub reserve_b: u64,
}

pub fn reserves(ctx: Context<ReadPair>, asset_a: Pubkey, asset_b: Pubkey) -> Result<ReserveQuote> {
    let pair = &ctx.accounts.pair;
    let key = PairKey::new(&asset_a, &asset_b)?;
    pair.ensure_key(&key)?;

    let (reserve_a, reserve_b) = pair.reserves.oriented(&key, &asset_a);
    Ok(ReserveQuote {
        reserve_a,
        reserve_b,
    })
}

/// Spot price of `asset_a` in `asset_b`, scaled by 10^18
pub fn price(ctx: Context<ReadPair>, asset_a: Pubkey, asset_b: Pubkey) -> Result<u128> {
    let quote = reserves(ctx, asset_a, asset_b)?;
    math::spot_price(quote.reserve_a, quote.reserve_b)
}

pub fn amount_out(_ctx: Context<Quote>, amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
    math::quote_out(amount_in, reserve_in, reserve_out)
}

#[derive(Accounts)]
pub struct ReadPair<'info> {
    #[account(
        seeds = [PAIR_SEED, pair.asset0.as_ref(), pair.asset1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Box<Account<'info, PairState>>,
}

/// Pure quote; touches no accounts
#[derive(Accounts)]
pub struct Quote {}
