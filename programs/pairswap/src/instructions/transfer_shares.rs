use crate::constants::{PAIR_SEED, SHARES_SEED};
use crate::errors::AmmError;
use crate::ledger::ShareLedger;
use crate::state::{PairState, ShareBalance};
use anchor_lang::prelude::*;

/// Move pool shares from the signer to another holder of the same pair
pub fn process(mut ctx: Context<TransferShares>, amount: u64) -> Result<()> {
    require!(amount > 0, AmmError::ZeroInput);

    let accounts = &mut ctx.accounts;
    let pair_address = accounts.pair.key();
    let owner = accounts.owner.key();
    let recipient = accounts.recipient.key();
    accounts
        .recipient_shares
        .claim(pair_address, recipient, ctx.bumps.recipient_shares);

    let key = accounts.pair.pair_key();
    let (_, mut shares) = accounts.pair.split(vec![
        &mut **accounts.owner_shares,
        &mut **accounts.recipient_shares,
    ]);
    shares.transfer_shares(&key, &owner, &recipient, amount)?;

    msg!("Shares transferred: {} to {}", amount, recipient);
    Ok(())
}

#[derive(Accounts)]
pub struct TransferShares<'info> {
    /// Current holder; pays rent for a new recipient account
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PAIR_SEED, pair.asset0.as_ref(), pair.asset1.as_ref()],
        bump = pair.bump
    )]
    pub pair: Box<Account<'info, PairState>>,

    #[account(
        mut,
        seeds = [SHARES_SEED, pair.key().as_ref(), owner.key().as_ref()],
        bump = owner_shares.bump,
    )]
    pub owner_shares: Box<Account<'info, ShareBalance>>,

    /// CHECK: only used as the holder key of the recipient's share account
    #[account(constraint = recipient.key() != owner.key() @ AmmError::ShareAccountMismatch)]
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + ShareBalance::INIT_SPACE,
        seeds = [SHARES_SEED, pair.key().as_ref(), recipient.key().as_ref()],
        bump,
    )]
    pub recipient_shares: Box<Account<'info, ShareBalance>>,

    pub system_program: Program<'info, System>,
}
