//! In-memory books shared by the market unit tests

use super::Market;
use crate::ledger::{MemoryAssetLedger, ReserveBook, ShareBook};
use anchor_lang::prelude::*;

pub const NOW: i64 = 1_700_000_000;

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

pub fn custody() -> Pubkey {
    key(99)
}

pub struct Books {
    pub reserves: ReserveBook,
    pub shares: ShareBook,
    pub assets: MemoryAssetLedger,
}

impl Books {
    pub fn market(&mut self) -> Market<'_, ReserveBook, ShareBook, MemoryAssetLedger> {
        Market::new(&mut self.reserves, &mut self.shares, &mut self.assets, custody())
    }
}
