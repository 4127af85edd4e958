use crate::constants::{AUTHORITY_SEED, PAIR_SEED, SHARES_SEED, VAULT_SEED};
use crate::errors::AmmError;
use crate::ledger::{TokenVaults, VaultLeg};
use crate::market::{DepositParams, Invocation, Market, WithdrawParams};
use crate::state::{PairState, ShareBalance};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Add liquidity to the pair and mint shares to the recipient
pub fn deposit(
    mut ctx: Context<AddLiquidity>,
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let pair_address = accounts.pair.key();
    let recipient = accounts.recipient.key();
    accounts
        .recipient_shares
        .claim(pair_address, recipient, ctx.bumps.recipient_shares);

    let params = DepositParams {
        asset_a: accounts.mint_a.key(),
        asset_b: accounts.mint_b.key(),
        amount_a_desired,
        amount_b_desired,
        amount_a_min,
        amount_b_min,
        recipient,
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
            VaultLeg::new(&accounts.mint_a, &accounts.vault_a, &accounts.user_token_a),
            VaultLeg::new(&accounts.mint_b, &accounts.vault_b, &accounts.user_token_b),
        ],
    );
    let custody = vaults.custody();

    let (mut reserves, mut shares) = accounts
        .pair
        .split(vec![&mut **accounts.recipient_shares]);
    let mut market = Market::new(&mut reserves, &mut shares, &mut vaults, custody);

    market.add_liquidity(&invocation, &params)?;
    Ok(())
}

/// Remove liquidity by burning the caller's shares
pub fn withdraw(
    mut ctx: Context<RemoveLiquidity>,
    shares_to_burn: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let pair_address = accounts.pair.key();
    let params = WithdrawParams {
        asset_a: accounts.mint_a.key(),
        asset_b: accounts.mint_b.key(),
        shares: shares_to_burn,
        amount_a_min,
        amount_b_min,
        recipient: accounts.recipient_token_a.owner,
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
            VaultLeg::new(&accounts.mint_a, &accounts.vault_a, &accounts.recipient_token_a),
            VaultLeg::new(&accounts.mint_b, &accounts.vault_b, &accounts.recipient_token_b),
        ],
    );
    let custody = vaults.custody();

    let (mut reserves, mut shares) = accounts
        .pair
        .split(vec![&mut **accounts.holder_shares]);
    let mut market = Market::new(&mut reserves, &mut shares, &mut vaults, custody);

    market.remove_liquidity(&invocation, &params)?;
    Ok(())
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Depositor; pays both assets and rent for a new share account
    #[account(mut)]
    pub user: Signer<'info>,

    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    #[account(constraint = pair.matches(&mint_a.key(), &mint_b.key()) @ AmmError::PairMismatch)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

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
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_a.key().as_ref()],
        bump,
        token::mint = mint_a,
        token::authority = pool_authority,
    )]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_b.key().as_ref()],
        bump,
        token::mint = mint_b,
        token::authority = pool_authority,
    )]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = mint_a, token::authority = user)]
    pub user_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, token::mint = mint_b, token::authority = user)]
    pub user_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: only used as the owner key of the minted shares
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + ShareBalance::INIT_SPACE,
        seeds = [SHARES_SEED, pair.key().as_ref(), recipient.key().as_ref()],
        bump,
    )]
    pub recipient_shares: Box<Account<'info, ShareBalance>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    /// Share holder burning shares
    pub user: Signer<'info>,

    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    #[account(constraint = pair.matches(&mint_a.key(), &mint_b.key()) @ AmmError::PairMismatch)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

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
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_a.key().as_ref()],
        bump,
        token::mint = mint_a,
        token::authority = pool_authority,
    )]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pair.key().as_ref(), mint_b.key().as_ref()],
        bump,
        token::mint = mint_b,
        token::authority = pool_authority,
    )]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives asset A; its owner is the recipient of record
    #[account(mut, token::mint = mint_a)]
    pub recipient_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives asset B; must share the owner of `recipient_token_a`
    #[account(mut, token::mint = mint_b)]
    pub recipient_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [SHARES_SEED, pair.key().as_ref(), user.key().as_ref()],
        bump = holder_shares.bump,
    )]
    pub holder_shares: Box<Account<'info, ShareBalance>>,

    pub token_program: Interface<'info, TokenInterface>,
}
