use super::{AssetLedger, Reserves, ReserveStore, ShareLedger};
use crate::constants::LOCKED_SHARES_HOLDER;
use crate::errors::AmmError;
use crate::pair::PairKey;
use crate::state::{ShareBalance, ShareSupply};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TransferChecked};

/// Reserve store backed by a single pair account
pub struct PairReserves<'a> {
    key: PairKey,
    slot: &'a mut Reserves,
}

impl<'a> PairReserves<'a> {
    pub fn new(key: PairKey, slot: &'a mut Reserves) -> Self {
        Self { key, slot }
    }
}

impl ReserveStore for PairReserves<'_> {
    fn reserves(&self, key: &PairKey) -> Result<Reserves> {
        require!(*key == self.key, AmmError::PairMismatch);
        Ok(*self.slot)
    }

    fn set_reserves(&mut self, key: &PairKey, reserves: Reserves) -> Result<()> {
        require!(*key == self.key, AmmError::PairMismatch);
        *self.slot = reserves;
        Ok(())
    }
}

/// Share ledger backed by a pair's supply and the share accounts passed to the instruction
///
/// The locked minimum lives in `ShareSupply::locked` instead of an account.
pub struct PairShares<'a> {
    key: PairKey,
    supply: &'a mut ShareSupply,
    holders: Vec<&'a mut ShareBalance>,
}

impl<'a> PairShares<'a> {
    pub fn new(key: PairKey, supply: &'a mut ShareSupply, holders: Vec<&'a mut ShareBalance>) -> Self {
        Self {
            key,
            supply,
            holders,
        }
    }

    fn holder(&self, holder: &Pubkey) -> Result<&ShareBalance> {
        self.holders
            .iter()
            .find(|account| account.holder == *holder)
            .map(|account| &**account)
            .ok_or_else(|| error!(AmmError::ShareAccountMismatch))
    }

    fn holder_mut(&mut self, holder: &Pubkey) -> Result<&mut ShareBalance> {
        self.holders
            .iter_mut()
            .find(|account| account.holder == *holder)
            .map(|account| &mut **account)
            .ok_or_else(|| error!(AmmError::ShareAccountMismatch))
    }

    fn debit(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        require_keys_neq!(*holder, LOCKED_SHARES_HOLDER, AmmError::InsufficientShares);

        let account = self.holder_mut(holder)?;
        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientShares)?;
        Ok(())
    }

    fn credit(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        let balance = if *holder == LOCKED_SHARES_HOLDER {
            &mut self.supply.locked
        } else {
            &mut self.holder_mut(holder)?.balance
        };
        *balance = balance.checked_add(amount).ok_or(AmmError::ShareOverflow)?;
        Ok(())
    }
}

impl ShareLedger for PairShares<'_> {
    fn total_shares(&self, key: &PairKey) -> Result<u64> {
        require!(*key == self.key, AmmError::PairMismatch);
        Ok(self.supply.total)
    }

    fn share_balance(&self, key: &PairKey, holder: &Pubkey) -> Result<u64> {
        require!(*key == self.key, AmmError::PairMismatch);
        if *holder == LOCKED_SHARES_HOLDER {
            return Ok(self.supply.locked);
        }
        Ok(self.holder(holder)?.balance)
    }

    fn mint_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()> {
        require!(*key == self.key, AmmError::PairMismatch);
        let total = self
            .supply
            .total
            .checked_add(amount)
            .ok_or(AmmError::ShareOverflow)?;

        self.credit(holder, amount)?;
        self.supply.total = total;
        Ok(())
    }

    fn burn_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()> {
        require!(*key == self.key, AmmError::PairMismatch);

        self.debit(holder, amount)?;
        self.supply.total = self
            .supply
            .total
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientShares)?;
        Ok(())
    }

    fn transfer_shares(
        &mut self,
        key: &PairKey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        require!(*key == self.key, AmmError::PairMismatch);

        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}

/// One side of a pair as seen by an instruction: the mint, the pool vault and
/// the user-side token account that pays in or receives out
pub struct VaultLeg<'info> {
    pub mint: AccountInfo<'info>,
    pub decimals: u8,
    pub vault: AccountInfo<'info>,
    pub vault_amount: u64,
    pub counterparty: AccountInfo<'info>,
    pub counterparty_owner: Pubkey,
    pub counterparty_amount: u64,
}

impl<'info> VaultLeg<'info> {
    pub fn new(
        mint: &InterfaceAccount<'info, Mint>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        counterparty: &InterfaceAccount<'info, TokenAccount>,
    ) -> Self {
        Self {
            mint: mint.to_account_info(),
            decimals: mint.decimals,
            vault: vault.to_account_info(),
            vault_amount: vault.amount,
            counterparty: counterparty.to_account_info(),
            counterparty_owner: counterparty.owner,
            counterparty_amount: counterparty.amount,
        }
    }
}

/// Amount held by a token account, read from its current data
fn token_amount(account: &AccountInfo) -> Result<u64> {
    let data = account.try_borrow_data()?;
    Ok(TokenAccount::try_deserialize(&mut &data[..])?.amount)
}

/// Fails unless a vault balance changed by exactly `amount`. Mints that withhold
/// a transfer fee end here.
fn ensure_moved(change: Option<u64>, amount: u64) -> Result<()> {
    require!(change == Some(amount), AmmError::AssetTransferFailed);
    Ok(())
}

/// Asset ledger that moves SPL tokens between the pool vaults and user accounts
pub struct TokenVaults<'a, 'info> {
    token_program: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    user: AccountInfo<'info>,
    legs: Vec<VaultLeg<'info>>,
}

impl<'a, 'info> TokenVaults<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
        user: AccountInfo<'info>,
        legs: Vec<VaultLeg<'info>>,
    ) -> Self {
        Self {
            token_program,
            authority,
            signer_seeds,
            user,
            legs,
        }
    }

    /// The pool authority; vaults are custodied by it
    pub fn custody(&self) -> Pubkey {
        self.authority.key()
    }

    fn leg_index(&self, asset: &Pubkey) -> Result<usize> {
        self.legs
            .iter()
            .position(|leg| leg.mint.key() == *asset)
            .ok_or_else(|| error!(AmmError::PairMismatch))
    }
}

impl AssetLedger for TokenVaults<'_, '_> {
    fn transfer(&mut self, asset: &Pubkey, custody: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let index = self.leg_index(asset)?;
        let leg = &self.legs[index];
        require_keys_eq!(*custody, self.authority.key(), AmmError::AssetTransferFailed);
        require_keys_eq!(*to, leg.counterparty_owner, AmmError::AssetTransferFailed);

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: leg.vault.clone(),
                    mint: leg.mint.clone(),
                    to: leg.counterparty.clone(),
                    authority: self.authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
            leg.decimals,
        )?;

        let vault_after = token_amount(&leg.vault)?;
        ensure_moved(leg.vault_amount.checked_sub(vault_after), amount)?;

        let leg = &mut self.legs[index];
        leg.vault_amount = vault_after;
        leg.counterparty_amount = token_amount(&leg.counterparty)?;
        Ok(())
    }

    fn transfer_from(&mut self, asset: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let index = self.leg_index(asset)?;
        let leg = &self.legs[index];
        require_keys_eq!(*from, self.user.key(), AmmError::AssetTransferFailed);
        require_keys_eq!(*to, self.authority.key(), AmmError::AssetTransferFailed);

        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                TransferChecked {
                    from: leg.counterparty.clone(),
                    mint: leg.mint.clone(),
                    to: leg.vault.clone(),
                    authority: self.user.clone(),
                },
            ),
            amount,
            leg.decimals,
        )?;

        // Reserves are credited with `amount`; the vault must have grown by exactly that
        let vault_after = token_amount(&leg.vault)?;
        ensure_moved(vault_after.checked_sub(leg.vault_amount), amount)?;

        let leg = &mut self.legs[index];
        leg.vault_amount = vault_after;
        leg.counterparty_amount = token_amount(&leg.counterparty)?;
        Ok(())
    }

    fn balance_of(&self, asset: &Pubkey, account: &Pubkey) -> u64 {
        let Ok(index) = self.leg_index(asset) else {
            return 0;
        };
        let leg = &self.legs[index];

        if *account == self.authority.key() {
            leg.vault_amount
        } else if *account == leg.counterparty_owner {
            leg.counterparty_amount
        } else {
            0
        }
    }
}
