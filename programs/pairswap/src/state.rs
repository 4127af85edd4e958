use crate::errors::AmmError;
use crate::ledger::{PairReserves, PairShares, Reserves};
use crate::pair::PairKey;
use anchor_lang::prelude::*;

/// Pool share supply of one pair
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShareSupply {
    /// Shares issued, including the locked minimum
    pub total: u64,

    /// Minimum liquidity credited to the null holder at bootstrap
    pub locked: u64,
}

/// Stores the state of one asset pair, addressed by its canonical mints
#[account]
#[derive(InitSpace, Default)]
pub struct PairState {
    /// Lower mint of the pair
    pub asset0: Pubkey,

    /// Higher mint of the pair
    pub asset1: Pubkey,

    /// Pooled amounts, in (asset0, asset1) order
    pub reserves: Reserves,

    pub supply: ShareSupply,

    pub bump: u8,

    /// Bump of the PDA that owns both vaults
    pub authority_bump: u8,
}

impl PairState {
    pub fn pair_key(&self) -> PairKey {
        PairKey {
            asset0: self.asset0,
            asset1: self.asset1,
        }
    }

    /// True when `a` and `b` are this pair's two mints, in either order
    pub fn matches(&self, a: &Pubkey, b: &Pubkey) -> bool {
        PairKey::new(a, b).is_ok_and(|key| key == self.pair_key())
    }

    pub fn ensure_key(&self, key: &PairKey) -> Result<()> {
        require!(*key == self.pair_key(), AmmError::PairMismatch);
        Ok(())
    }

    /// Borrow the reserve and share halves separately so the market can hold both
    pub fn split<'a>(
        &'a mut self,
        holders: Vec<&'a mut ShareBalance>,
    ) -> (PairReserves<'a>, PairShares<'a>) {
        let key = self.pair_key();
        (
            PairReserves::new(key, &mut self.reserves),
            PairShares::new(key, &mut self.supply, holders),
        )
    }
}

/// One holder's pool shares in one pair
#[account]
#[derive(InitSpace, Default)]
pub struct ShareBalance {
    pub pair: Pubkey,
    pub holder: Pubkey,
    pub balance: u64,
    pub bump: u8,
}

impl ShareBalance {
    /// Fill in the identity of a freshly created balance account
    pub fn claim(&mut self, pair: Pubkey, holder: Pubkey, bump: u8) {
        if self.holder == Pubkey::default() {
            self.pair = pair;
            self.holder = holder;
            self.bump = bump;
        }
    }
}
