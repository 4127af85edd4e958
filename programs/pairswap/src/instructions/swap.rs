use crate::constants::{AUTHORITY_SEED, PAIR_SEED, VAULT_SEED};
use crate::errors::AmmError;
use crate::ledger::{TokenVaults, VaultLeg};
use crate::market::{Invocation, Market, SwapParams};
use crate::state::PairState;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Swap an exact amount of `mint_in` for as much `mint_out` as the curve gives
pub fn process(
    mut ctx: Context<SwapExactIn>,
    amount_in: u64,
    amount_out_min: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let pair_address = accounts.pair.key();
    let params = SwapParams {
        amount_in,
        amount_out_min,
        asset_in: accounts.mint_in.key(),
        asset_out: accounts.mint_out.key(),
        recipient: accounts.recipient_token_out.owner,
        deadline,
    };
    let invocation = Invocation::new(accounts.user.key(), now);

    // Setup PDA signer
    let authority_bump = [accounts.pair.authority_bump];
    let authority_seeds: [&[u8]; 3] = [AUTHORITY_SEED, pair_address.as_ref(), &authority_bump];
    let signer_seeds = [&authority_seeds[..]];

    let mut vaults = TokenVaults::new(
        accounts.token_program.to_account_info(),
        accounts.pool_authority.to_account_info(),
        &signer_seeds,
        accounts.user.to_account_info(),
        vec![
            VaultLeg::new(&accounts.mint_in, &accounts.vault_in, &accounts.user_token_in),
            VaultLeg::new(
                &accounts.mint_out,
                &accounts.vault_out,
                &accounts.recipient_token_out,
            ),
        ],
    );
    let custody = vaults.custody();

    let (mut reserves, mut shares) = accounts.pair.split(Vec::new());
    let mut market = Market::new(&mut reserves, &mut shares, &mut vaults, custody);

    market.swap_exact_in(&invocation, &params)?;
    Ok(())
}

#[derive(Accounts)]
pub struct SwapExactIn<'info> {
    /// Trader paying the input
    pub user: Signer<'info>,

    /// Mint being sold
    pub mint_in: Box<InterfaceAccount<'info, Mint>>,

    /// Mint being bought
    #[account(constraint = pair.matches(&mint_in.key(), &mint_out.key()) @ AmmError::PairMismatch)]
    pub mint_out: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [PAIR_SEED, pair.asset0.as_ref(), pair.asset1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Box<Account<'info, PairState>>,

    #[account(
        seeds = [AUTHORITY_SEED, pair.key().as_ref()],
        bump = pair.authority_bump
    )]
    pub pool_authority: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_in.key().as_ref()],
        bump,
        token::mint = mint_in,
        token::authority = pool_authority,
    )]
    pub vault_in: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_out.key().as_ref()],
        bump,
        token::mint = mint_out,
        token::authority = pool_authority,
    )]
    pub vault_out: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = mint_in, token::authority = user)]
    pub user_token_in: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the output; its owner is the recipient of record
    #[account(mut, token::mint = mint_out)]
    pub recipient_token_out: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}
