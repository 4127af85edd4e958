use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Pair assets must be different")]
    IdenticalAssets,

    #[msg("Pair asset must not be the null identifier")]
    ZeroAsset,

    #[msg("Transaction deadline has passed")]
    Expired,

    #[msg("Asset A amount is below the minimum specified")]
    InsufficientAAmount,

    #[msg("Asset B amount is below the minimum specified")]
    InsufficientBAmount,

    #[msg("Output amount is less than the specified minimum")]
    InsufficientOutputAmount,

    #[msg("Pool has no liquidity for this operation")]
    InsufficientLiquidity,

    #[msg("Calculated share mint amount is zero or negative")]
    InsufficientLiquidityMinted,

    #[msg("Holder does not own enough pool shares")]
    InsufficientShares,

    #[msg("Input amount must be greater than zero")]
    ZeroInput,

    #[msg("Reserve would exceed the maximum representable amount")]
    ReserveOverflow,

    #[msg("Share supply would exceed the maximum representable amount")]
    ShareOverflow,

    #[msg("Asset ledger refused the transfer")]
    AssetTransferFailed,

    #[msg("Account does not belong to the requested pair")]
    PairMismatch,

    #[msg("Share account does not belong to the requested holder")]
    ShareAccountMismatch,
}
