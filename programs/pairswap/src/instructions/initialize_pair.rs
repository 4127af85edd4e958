use crate::constants::{AUTHORITY_SEED, PAIR_SEED, VAULT_SEED};
use crate::errors::AmmError;
use crate::ledger::Reserves;
use crate::pair::{lower, upper, PairKey};
use crate::state::{PairState, ShareSupply};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Create the pair account and both vaults; the pool starts empty
pub fn process(ctx: Context<InitializePair>) -> Result<()> {
    let key = PairKey::new(&ctx.accounts.mint_a.key(), &ctx.accounts.mint_b.key())?;

    let pair = &mut ctx.accounts.pair;
    pair.asset0 = key.asset0;
    pair.asset1 = key.asset1;
    pair.reserves = Reserves::default();
    pair.supply = ShareSupply::default();
    pair.bump = ctx.bumps.pair;
    pair.authority_bump = ctx.bumps.pool_authority;

    msg!("Pair initialized: {} / {}", key.asset0, key.asset1);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePair<'info> {
    /// One mint of the pair, in any order
    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    /// The other mint of the pair
    #[account(constraint = mint_a.key() != mint_b.key() @ AmmError::IdenticalAssets)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    /// Pair state, addressed by the mints in canonical order
    #[account(
        init,
        payer = payer,
        space = 8 + PairState::INIT_SPACE,
        seeds = [
            PAIR_SEED,
            lower(&mint_a.key(), &mint_b.key()).as_ref(),
            upper(&mint_a.key(), &mint_b.key()).as_ref()
        ],
        bump,
    )]
    pub pair: Box<Account<'info, PairState>>,

    /// PDA that owns both vaults
    #[account(
        seeds = [AUTHORITY_SEED, pair.key().as_ref()],
        bump
    )]
    pub pool_authority: SystemAccount<'info>,

    /// Custody of mint A
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_a.key().as_ref()],
        bump,
        token::mint = mint_a,
        token::authority = pool_authority,
        token::token_program = token_program,
    )]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Custody of mint B
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_b.key().as_ref()],
        bump,
        token::mint = mint_b,
        token::authority = pool_authority,
        token::token_program = token_program,
    )]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}
