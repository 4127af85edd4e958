use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR, PRICE_SCALE};
use crate::errors::AmmError;
use alloy_primitives::U256;
use anchor_lang::prelude::*;

/// Floor of the square root, by Babylonian iteration
pub fn isqrt(y: u128) -> u128 {
    if y > 3 {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y != 0 {
        1
    } else {
        0
    }
}

/// Constant product output for an exact input, with the swap fee left in the pool
///
/// amount_out = amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)
pub fn quote_out(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
    require!(amount_in > 0, AmmError::ZeroInput);
    require!(
        reserve_in > 0 && reserve_out > 0,
        AmmError::InsufficientLiquidity
    );

    // amount_in * 997 * reserve_out can exceed 128 bits
    let amount_in_with_fee = U256::from(amount_in) * U256::from(FEE_NUMERATOR);
    let numerator = amount_in_with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(FEE_DENOMINATOR) + amount_in_with_fee;

    u64::try_from(numerator / denominator).map_err(|_| error!(AmmError::ReserveOverflow))
}

/// Amount of B worth `amount_a` at the current reserve ratio, rounded down
pub fn quote(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64> {
    require!(amount_a > 0, AmmError::ZeroInput);
    require!(
        reserve_a > 0 && reserve_b > 0,
        AmmError::InsufficientLiquidity
    );

    proportion(amount_a, reserve_b, reserve_a)
}

/// floor(amount * numerator / denominator) where the result must fit in u64
pub fn proportion(amount: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, AmmError::InsufficientLiquidity);

    let scaled = (amount as u128) * (numerator as u128) / (denominator as u128);
    u64::try_from(scaled).map_err(|_| error!(AmmError::ReserveOverflow))
}

/// Price of A in units of B, scaled by 10^18
pub fn spot_price(reserve_a: u64, reserve_b: u64) -> Result<u128> {
    require!(
        reserve_a > 0 && reserve_b > 0,
        AmmError::InsufficientLiquidity
    );

    Ok((reserve_b as u128) * PRICE_SCALE / (reserve_a as u128))
}
