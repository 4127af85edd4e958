use crate::errors::AmmError;
use anchor_lang::prelude::*;

/// Order-independent identity of a two-asset pool
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct PairKey {
    pub asset0: Pubkey,
    pub asset1: Pubkey,
}

/// Sort two distinct asset identifiers into `(asset0, asset1)` with `asset0 < asset1`
pub fn canonicalize(a: &Pubkey, b: &Pubkey) -> Result<(Pubkey, Pubkey)> {
    require_keys_neq!(*a, *b, AmmError::IdenticalAssets);

    let (asset0, asset1) = if a < b { (*a, *b) } else { (*b, *a) };
    require!(asset0 != Pubkey::default(), AmmError::ZeroAsset);

    Ok((asset0, asset1))
}

/// Lower of two keys; used where PDA seeds need the canonical order
pub fn lower(a: &Pubkey, b: &Pubkey) -> Pubkey {
    *a.min(b)
}

/// Higher of two keys; used where PDA seeds need the canonical order
pub fn upper(a: &Pubkey, b: &Pubkey) -> Pubkey {
    *a.max(b)
}

impl PairKey {
    pub fn new(a: &Pubkey, b: &Pubkey) -> Result<Self> {
        let (asset0, asset1) = canonicalize(a, b)?;
        Ok(Self { asset0, asset1 })
    }

    /// Reorder a canonical `(value0, value1)` so the value belonging to `first` comes first
    pub fn orient<T>(&self, first: &Pubkey, (value0, value1): (T, T)) -> (T, T) {
        debug_assert!(*first == self.asset0 || *first == self.asset1);
        if *first == self.asset0 {
            (value0, value1)
        } else {
            (value1, value0)
        }
    }
}
