use std::collections::{BTreeMap, BTreeSet};

use super::{AssetLedger, Reserves, ReserveStore, ShareLedger};
use crate::constants::LOCKED_SHARES_HOLDER;
use crate::errors::AmmError;
use crate::pair::PairKey;
use anchor_lang::prelude::*;

/// Reserve ledger holding every pair the exchange has touched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReserveBook {
    pairs: BTreeMap<PairKey, Reserves>,
}

impl ReserveBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&PairKey, &Reserves)> {
        self.pairs.iter()
    }
}

impl ReserveStore for ReserveBook {
    fn reserves(&self, key: &PairKey) -> Result<Reserves> {
        Ok(self.pairs.get(key).copied().unwrap_or_default())
    }

    fn set_reserves(&mut self, key: &PairKey, reserves: Reserves) -> Result<()> {
        self.pairs.insert(*key, reserves);
        Ok(())
    }
}

/// Share supply and holder balances of one pair
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareRegister {
    pub total: u64,
    pub balances: BTreeMap<Pubkey, u64>,
}

/// Share ledger scoped per pair: shares of one pair never redeem against another
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareBook {
    registers: BTreeMap<PairKey, ShareRegister>,
}

impl ShareBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, key: &PairKey) -> Option<&ShareRegister> {
        self.registers.get(key)
    }

    pub fn registers(&self) -> impl Iterator<Item = (&PairKey, &ShareRegister)> {
        self.registers.iter()
    }

    fn debit_holder(register: &mut ShareRegister, holder: &Pubkey, amount: u64) -> Result<()> {
        require_keys_neq!(*holder, LOCKED_SHARES_HOLDER, AmmError::InsufficientShares);

        let balance = register.balances.get(holder).copied().unwrap_or_default();
        let remaining = balance
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientShares)?;

        if remaining == 0 {
            register.balances.remove(holder);
        } else {
            register.balances.insert(*holder, remaining);
        }
        Ok(())
    }

    fn credit_holder(register: &mut ShareRegister, holder: &Pubkey, amount: u64) -> Result<()> {
        let balance = register.balances.entry(*holder).or_default();
        *balance = balance.checked_add(amount).ok_or(AmmError::ShareOverflow)?;
        Ok(())
    }
}

impl ShareLedger for ShareBook {
    fn total_shares(&self, key: &PairKey) -> Result<u64> {
        Ok(self.registers.get(key).map_or(0, |register| register.total))
    }

    fn share_balance(&self, key: &PairKey, holder: &Pubkey) -> Result<u64> {
        Ok(self
            .registers
            .get(key)
            .and_then(|register| register.balances.get(holder).copied())
            .unwrap_or_default())
    }

    fn mint_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()> {
        let register = self.registers.entry(*key).or_default();
        let total = register
            .total
            .checked_add(amount)
            .ok_or(AmmError::ShareOverflow)?;

        Self::credit_holder(register, holder, amount)?;
        register.total = total;
        Ok(())
    }

    fn burn_shares(&mut self, key: &PairKey, holder: &Pubkey, amount: u64) -> Result<()> {
        let register = self
            .registers
            .get_mut(key)
            .ok_or(AmmError::InsufficientShares)?;

        Self::debit_holder(register, holder, amount)?;
        register.total -= amount;
        Ok(())
    }

    fn transfer_shares(
        &mut self,
        key: &PairKey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        let register = self
            .registers
            .get_mut(key)
            .ok_or(AmmError::InsufficientShares)?;

        Self::debit_holder(register, from, amount)?;
        Self::credit_holder(register, to, amount)
    }
}

/// Balance sheet of arbitrary fungible assets, standing in for token programs off-chain
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryAssetLedger {
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
    frozen: BTreeSet<(Pubkey, Pubkey)>,
}

impl MemoryAssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` of `asset` out of thin air for `account`
    pub fn mint(&mut self, asset: &Pubkey, account: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry((*asset, *account)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(AmmError::AssetTransferFailed)?;
        Ok(())
    }

    /// Make every movement into or out of `account` for `asset` fail
    pub fn freeze(&mut self, asset: &Pubkey, account: &Pubkey) {
        self.frozen.insert((*asset, *account));
    }

    pub fn thaw(&mut self, asset: &Pubkey, account: &Pubkey) {
        self.frozen.remove(&(*asset, *account));
    }

    fn move_balance(&mut self, asset: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        require!(
            !self.frozen.contains(&(*asset, *from)) && !self.frozen.contains(&(*asset, *to)),
            AmmError::AssetTransferFailed
        );

        let source = self.balance_of(asset, from);
        let source = source
            .checked_sub(amount)
            .ok_or(AmmError::AssetTransferFailed)?;
        self.balances.insert((*asset, *from), source);

        let destination = self.balance_of(asset, to);
        let destination = destination
            .checked_add(amount)
            .ok_or(AmmError::AssetTransferFailed)?;
        self.balances.insert((*asset, *to), destination);

        Ok(())
    }
}

impl AssetLedger for MemoryAssetLedger {
    fn transfer(&mut self, asset: &Pubkey, custody: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.move_balance(asset, custody, to, amount)
    }

    fn transfer_from(&mut self, asset: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.move_balance(asset, from, to, amount)
    }

    fn balance_of(&self, asset: &Pubkey, account: &Pubkey) -> u64 {
        self.balances
            .get(&(*asset, *account))
            .copied()
            .unwrap_or_default()
    }
}
