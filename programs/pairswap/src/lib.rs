use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod exchange;
pub mod instructions;
pub mod ledger;
pub mod market;
pub mod math;
pub mod pair;
pub mod state;

use instructions::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod pairswap {
    use super::*;

    /// Create an empty pool for two distinct mints
    pub fn initialize_pair(ctx: Context<InitializePair>) -> Result<()> {
        instructions::initialize_pair::process(ctx)
    }

    /// Deposit both assets at the pool ratio and mint shares to `recipient`
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::manage_liquidity::deposit(
            ctx,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            deadline,
        )
    }

    /// Burn shares for a pro-rata cut of both reserves
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        shares: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::manage_liquidity::withdraw(ctx, shares, amount_a_min, amount_b_min, deadline)
    }

    /// Swap an exact input using the constant product formula with a 0.3% fee
    pub fn swap_exact_in(
        ctx: Context<SwapExactIn>,
        amount_in: u64,
        amount_out_min: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::swap::process(ctx, amount_in, amount_out_min, deadline)
    }

    pub fn transfer_shares(ctx: Context<TransferShares>, amount: u64) -> Result<()> {
        instructions::transfer_shares::process(ctx, amount)
    }

    pub fn get_reserves(
        ctx: Context<ReadPair>,
        asset_a: Pubkey,
        asset_b: Pubkey,
    ) -> Result<ReserveQuote> {
        instructions::views::reserves(ctx, asset_a, asset_b)
    }

    pub fn get_price(ctx: Context<ReadPair>, asset_a: Pubkey, asset_b: Pubkey) -> Result<u128> {
        instructions::views::price(ctx, asset_a, asset_b)
    }

    pub fn get_amount_out(
        ctx: Context<Quote>,
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> Result<u64> {
        instructions::views::amount_out(ctx, amount_in, reserve_in, reserve_out)
    }
}
