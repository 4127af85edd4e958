use anchor_lang::error::Error;
use anchor_lang::prelude::Pubkey;
use pairswap::constants::{LOCKED_SHARES_HOLDER, MINIMUM_LIQUIDITY, PRICE_SCALE};
use pairswap::errors::AmmError;
use pairswap::exchange::Exchange;
use pairswap::ledger::{AssetLedger, MemoryAssetLedger};
use pairswap::market::{DepositParams, Invocation, SwapParams, WithdrawParams};
use proptest::prelude::*;
use rstest::{fixture, rstest};

const NOW: i64 = 1_700_000_000;
const FUNDING: u64 = 1_000_000;

fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

fn asset_a() -> Pubkey {
    key(1)
}

fn asset_b() -> Pubkey {
    key(2)
}

fn asset_c() -> Pubkey {
    key(3)
}

fn alice() -> Pubkey {
    key(10)
}

fn bob() -> Pubkey {
    key(11)
}

fn custody() -> Pubkey {
    key(99)
}

fn at(caller: Pubkey) -> Invocation {
    Invocation::new(caller, NOW)
}

fn deposit(a: Pubkey, b: Pubkey, amount_a: u64, amount_b: u64, recipient: Pubkey) -> DepositParams {
    DepositParams {
        asset_a: a,
        asset_b: b,
        amount_a_desired: amount_a,
        amount_b_desired: amount_b,
        amount_a_min: 0,
        amount_b_min: 0,
        recipient,
        deadline: NOW,
    }
}

fn withdraw(a: Pubkey, b: Pubkey, shares: u64, recipient: Pubkey) -> WithdrawParams {
    WithdrawParams {
        asset_a: a,
        asset_b: b,
        shares,
        amount_a_min: 0,
        amount_b_min: 0,
        recipient,
        deadline: NOW,
    }
}

fn swap(asset_in: Pubkey, asset_out: Pubkey, amount_in: u64, recipient: Pubkey) -> SwapParams {
    SwapParams {
        amount_in,
        amount_out_min: 0,
        asset_in,
        asset_out,
        recipient,
        deadline: NOW,
    }
}

/// Alice and Bob each hold `FUNDING` of every asset; no pools exist yet
#[fixture]
fn exchange() -> Exchange<MemoryAssetLedger> {
    let mut assets = MemoryAssetLedger::new();
    for asset in [asset_a(), asset_b(), asset_c()] {
        for holder in [alice(), bob()] {
            assets.mint(&asset, &holder, FUNDING).unwrap();
        }
    }
    Exchange::new(custody(), assets)
}

/// A/B pool bootstrapped by Alice with 10_000 A and 40_000 B
#[fixture]
fn seeded(mut exchange: Exchange<MemoryAssetLedger>) -> Exchange<MemoryAssetLedger> {
    exchange
        .add_liquidity(
            &at(alice()),
            &deposit(asset_a(), asset_b(), 10_000, 40_000, alice()),
        )
        .unwrap();
    exchange
}

/// Every register balances and custody holds exactly the recorded reserves
fn assert_books_consistent(exchange: &Exchange<MemoryAssetLedger>) {
    for (_, register) in exchange.shares().registers() {
        assert_eq!(register.balances.values().sum::<u64>(), register.total);
    }
    for (key, reserves) in exchange.reserves().pairs() {
        let assets = exchange.assets();
        assert_eq!(assets.balance_of(&key.asset0, &custody()), reserves.reserve0);
        assert_eq!(assets.balance_of(&key.asset1, &custody()), reserves.reserve1);
    }
}

#[rstest]
fn test_bootstrap_locks_minimum_liquidity(seeded: Exchange<MemoryAssetLedger>) {
    assert_eq!(seeded.total_shares(&asset_a(), &asset_b()).unwrap(), 20_000);
    assert_eq!(
        seeded
            .share_balance(&asset_a(), &asset_b(), &alice())
            .unwrap(),
        19_000
    );
    assert_eq!(
        seeded
            .share_balance(&asset_b(), &asset_a(), &LOCKED_SHARES_HOLDER)
            .unwrap(),
        MINIMUM_LIQUIDITY
    );
    assert_books_consistent(&seeded);
}

#[rstest]
fn test_reserves_follow_caller_order(seeded: Exchange<MemoryAssetLedger>) {
    assert_eq!(
        seeded.get_reserves(&asset_a(), &asset_b()).unwrap(),
        (10_000, 40_000)
    );
    assert_eq!(
        seeded.get_reserves(&asset_b(), &asset_a()).unwrap(),
        (40_000, 10_000)
    );
    assert_eq!(
        seeded.get_reserves(&asset_a(), &asset_c()).unwrap(),
        (0, 0)
    );
}

#[rstest]
fn test_price_in_both_directions(seeded: Exchange<MemoryAssetLedger>) {
    assert_eq!(
        seeded.get_price(&asset_a(), &asset_b()).unwrap(),
        4 * PRICE_SCALE
    );
    assert_eq!(
        seeded.get_price(&asset_b(), &asset_a()).unwrap(),
        PRICE_SCALE / 4
    );
    assert_eq!(
        seeded.get_price(&asset_a(), &asset_c()).unwrap_err(),
        Error::from(AmmError::InsufficientLiquidity)
    );
}

#[rstest]
fn test_stateless_quotes(exchange: Exchange<MemoryAssetLedger>) {
    assert_eq!(exchange.get_amount_out(100, 1_000, 1_000).unwrap(), 90);
    assert_eq!(exchange.quote(1_100, 11_000, 36_374).unwrap(), 3_637);
    assert_eq!(
        exchange.get_amount_out(100, 0, 1_000).unwrap_err(),
        Error::from(AmmError::InsufficientLiquidity)
    );
}

#[rstest]
fn test_deposit_swap_deposit_withdraw(mut seeded: Exchange<MemoryAssetLedger>) {
    let out = seeded
        .swap_exact_in(&at(bob()), &swap(asset_a(), asset_b(), 1_000, bob()))
        .unwrap();
    assert_eq!(out, 3_626);
    assert_eq!(
        seeded.get_reserves(&asset_a(), &asset_b()).unwrap(),
        (11_000, 36_374)
    );

    let deposited = seeded
        .add_liquidity(
            &at(bob()),
            &deposit(asset_a(), asset_b(), 1_100, 10_000, bob()),
        )
        .unwrap();
    assert_eq!(
        (deposited.amount_a, deposited.amount_b, deposited.shares),
        (1_100, 3_637, 1_999)
    );
    assert_eq!(seeded.total_shares(&asset_a(), &asset_b()).unwrap(), 21_999);

    let withdrawn = seeded
        .remove_liquidity(
            &at(alice()),
            &withdraw(asset_a(), asset_b(), 19_000, alice()),
        )
        .unwrap();
    assert_eq!((withdrawn.amount_a, withdrawn.amount_b), (10_450, 34_556));

    let assets = seeded.assets();
    assert_eq!(assets.balance_of(&asset_a(), &alice()), FUNDING - 10_000 + 10_450);
    assert_eq!(assets.balance_of(&asset_b(), &alice()), FUNDING - 40_000 + 34_556);
    assert_books_consistent(&seeded);
}

#[rstest]
#[case(3_331, 99_999, (3_331, 11_014), 6_055, (3_330, 11_012))]
#[case(1_234, 5_000, (1_234, 4_080), 2_243, (1_233, 4_079))]
#[case(7, 29, (7, 23), 12, (6, 21))]
#[case(50_000, 1_000, (302, 1_000), 549, (301, 998))]
fn test_follow_up_depositor_round_trip(
    mut seeded: Exchange<MemoryAssetLedger>,
    #[case] amount_a: u64,
    #[case] amount_b: u64,
    #[case] used: (u64, u64),
    #[case] minted: u64,
    #[case] returned: (u64, u64),
) {
    // Skew the pool away from a round ratio first
    seeded
        .swap_exact_in(&at(alice()), &swap(asset_a(), asset_b(), 1_000, alice()))
        .unwrap();

    let deposited = seeded
        .add_liquidity(
            &at(bob()),
            &deposit(asset_a(), asset_b(), amount_a, amount_b, bob()),
        )
        .unwrap();
    assert_eq!((deposited.amount_a, deposited.amount_b), used);
    assert_eq!(deposited.shares, minted);

    let (reserve_a, reserve_b) = seeded.get_reserves(&asset_a(), &asset_b()).unwrap();
    let total = seeded.total_shares(&asset_a(), &asset_b()).unwrap();

    let withdrawn = seeded
        .remove_liquidity(
            &at(bob()),
            &withdraw(asset_a(), asset_b(), deposited.shares, bob()),
        )
        .unwrap();
    assert_eq!((withdrawn.amount_a, withdrawn.amount_b), returned);

    // Never more than went in; at most one share's worth plus rounding less
    assert!(withdrawn.amount_a <= deposited.amount_a);
    assert!(withdrawn.amount_b <= deposited.amount_b);
    assert!(deposited.amount_a - withdrawn.amount_a <= reserve_a / total + 1);
    assert!(deposited.amount_b - withdrawn.amount_b <= reserve_b / total + 1);
    assert_eq!(
        seeded.share_balance(&asset_a(), &asset_b(), &bob()).unwrap(),
        0
    );
    assert_books_consistent(&seeded);
}

#[rstest]
fn test_full_exit_leaves_locked_remainder(mut seeded: Exchange<MemoryAssetLedger>) {
    seeded
        .remove_liquidity(
            &at(alice()),
            &withdraw(asset_b(), asset_a(), 19_000, alice()),
        )
        .unwrap();

    assert_eq!(
        seeded.get_reserves(&asset_a(), &asset_b()).unwrap(),
        (500, 2_000)
    );
    assert_eq!(
        seeded.total_shares(&asset_a(), &asset_b()).unwrap(),
        MINIMUM_LIQUIDITY
    );
    assert_eq!(seeded.assets().balance_of(&asset_a(), &alice()), FUNDING - 500);
    assert_books_consistent(&seeded);
}

#[rstest]
#[case::add(0)]
#[case::remove(1)]
#[case::swap(2)]
fn test_expired_call_changes_nothing(mut seeded: Exchange<MemoryAssetLedger>, #[case] op: u8) {
    let before = seeded.clone();
    let late = Invocation::new(alice(), NOW + 1);

    let err = match op {
        0 => seeded
            .add_liquidity(&late, &deposit(asset_a(), asset_b(), 100, 400, alice()))
            .map(|_| ()),
        1 => seeded
            .remove_liquidity(&late, &withdraw(asset_a(), asset_b(), 100, alice()))
            .map(|_| ()),
        _ => seeded
            .swap_exact_in(&late, &swap(asset_a(), asset_b(), 100, alice()))
            .map(|_| ()),
    }
    .unwrap_err();

    assert_eq!(err, Error::from(AmmError::Expired));
    assert_eq!(seeded.reserves(), before.reserves());
    assert_eq!(seeded.shares(), before.shares());
    assert_eq!(seeded.assets(), before.assets());
}

#[rstest]
fn test_failed_transfer_rolls_back_swap(mut seeded: Exchange<MemoryAssetLedger>) {
    seeded.assets_mut().freeze(&asset_b(), &bob());
    let before = seeded.clone();

    let err = seeded
        .swap_exact_in(&at(bob()), &swap(asset_a(), asset_b(), 1_000, bob()))
        .unwrap_err();

    assert_eq!(err, Error::from(AmmError::AssetTransferFailed));
    assert_eq!(seeded.reserves(), before.reserves());
    assert_eq!(seeded.assets(), before.assets());
    assert_eq!(seeded.assets().balance_of(&asset_a(), &bob()), FUNDING);
}

#[rstest]
fn test_failed_payout_rolls_back_withdrawal(mut seeded: Exchange<MemoryAssetLedger>) {
    seeded.assets_mut().freeze(&asset_b(), &alice());
    let before = seeded.clone();

    let err = seeded
        .remove_liquidity(
            &at(alice()),
            &withdraw(asset_a(), asset_b(), 1_000, alice()),
        )
        .unwrap_err();

    assert_eq!(err, Error::from(AmmError::AssetTransferFailed));
    assert_eq!(seeded.shares(), before.shares());
    assert_eq!(seeded.reserves(), before.reserves());
    assert_eq!(seeded.assets(), before.assets());

    seeded.assets_mut().thaw(&asset_b(), &alice());
    seeded
        .remove_liquidity(
            &at(alice()),
            &withdraw(asset_a(), asset_b(), 1_000, alice()),
        )
        .unwrap();
    assert_books_consistent(&seeded);
}

#[rstest]
fn test_underfunded_depositor_is_rejected(mut exchange: Exchange<MemoryAssetLedger>) {
    let err = exchange
        .add_liquidity(
            &at(alice()),
            &deposit(asset_a(), asset_b(), FUNDING + 1, 4_000, alice()),
        )
        .unwrap_err();

    assert_eq!(err, Error::from(AmmError::AssetTransferFailed));
    assert_eq!(exchange.total_shares(&asset_a(), &asset_b()).unwrap(), 0);
    assert_eq!(
        exchange.get_reserves(&asset_a(), &asset_b()).unwrap(),
        (0, 0)
    );
}

#[rstest]
fn test_shares_are_scoped_per_pair(mut seeded: Exchange<MemoryAssetLedger>) {
    seeded
        .add_liquidity(
            &at(bob()),
            &deposit(asset_a(), asset_c(), 5_000, 5_000, bob()),
        )
        .unwrap();

    let err = seeded
        .remove_liquidity(
            &at(alice()),
            &withdraw(asset_a(), asset_c(), 100, alice()),
        )
        .unwrap_err();
    assert_eq!(err, Error::from(AmmError::InsufficientShares));

    assert_eq!(
        seeded.total_shares(&asset_c(), &asset_a()).unwrap(),
        5_000
    );
    assert_eq!(
        seeded
            .share_balance(&asset_a(), &asset_c(), &alice())
            .unwrap(),
        0
    );
    assert_books_consistent(&seeded);
}

#[rstest]
fn test_transfer_shares_then_redeem(mut seeded: Exchange<MemoryAssetLedger>) {
    seeded
        .transfer_shares(&at(alice()), &asset_a(), &asset_b(), &bob(), 5_000)
        .unwrap();
    assert_eq!(
        seeded.share_balance(&asset_a(), &asset_b(), &bob()).unwrap(),
        5_000
    );

    let withdrawn = seeded
        .remove_liquidity(&at(bob()), &withdraw(asset_a(), asset_b(), 5_000, bob()))
        .unwrap();
    assert_eq!((withdrawn.amount_a, withdrawn.amount_b), (2_500, 10_000));
    assert_eq!(seeded.total_shares(&asset_a(), &asset_b()).unwrap(), 15_000);
    assert_books_consistent(&seeded);
}

#[rstest]
fn test_transfer_shares_rejections(mut seeded: Exchange<MemoryAssetLedger>) {
    let err = seeded
        .transfer_shares(&at(alice()), &asset_a(), &asset_b(), &bob(), 0)
        .unwrap_err();
    assert_eq!(err, Error::from(AmmError::ZeroInput));

    let err = seeded
        .transfer_shares(&at(alice()), &asset_a(), &asset_b(), &bob(), 19_001)
        .unwrap_err();
    assert_eq!(err, Error::from(AmmError::InsufficientShares));

    let err = seeded
        .transfer_shares(
            &at(LOCKED_SHARES_HOLDER),
            &asset_a(),
            &asset_b(),
            &bob(),
            1,
        )
        .unwrap_err();
    assert_eq!(err, Error::from(AmmError::InsufficientShares));
    assert_eq!(
        seeded
            .share_balance(&asset_a(), &asset_b(), &LOCKED_SHARES_HOLDER)
            .unwrap(),
        MINIMUM_LIQUIDITY
    );
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Swap { a_to_b: bool, amount: u64 },
    Add { amount_a: u64, amount_b: u64 },
    Remove { shares: u64 },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (any::<bool>(), 1..50_000u64).prop_map(|(a_to_b, amount)| Step::Swap { a_to_b, amount }),
        (1..50_000u64, 1..50_000u64).prop_map(|(amount_a, amount_b)| Step::Add { amount_a, amount_b }),
        (1..25_000u64).prop_map(|shares| Step::Remove { shares }),
    ]
}

proptest! {
    #[test]
    fn prop_books_stay_consistent(steps in prop::collection::vec(step(), 1..40)) {
        let mut exchange = seeded(exchange());

        for step in steps {
            let (reserve_a, reserve_b) = exchange.get_reserves(&asset_a(), &asset_b()).unwrap();
            let product = reserve_a as u128 * reserve_b as u128;

            let result = match step {
                Step::Swap { a_to_b, amount } => {
                    let (from, to) = if a_to_b { (asset_a(), asset_b()) } else { (asset_b(), asset_a()) };
                    exchange.swap_exact_in(&at(bob()), &swap(from, to, amount, bob())).map(|_| ())
                }
                Step::Add { amount_a, amount_b } => exchange
                    .add_liquidity(&at(bob()), &deposit(asset_a(), asset_b(), amount_a, amount_b, bob()))
                    .map(|_| ()),
                Step::Remove { shares } => exchange
                    .remove_liquidity(&at(alice()), &withdraw(asset_a(), asset_b(), shares, alice()))
                    .map(|_| ()),
            };

            if result.is_ok() {
                if let Step::Swap { .. } = step {
                    let (after_a, after_b) = exchange.get_reserves(&asset_a(), &asset_b()).unwrap();
                    prop_assert!(after_a as u128 * after_b as u128 >= product);
                }
            }
            assert_books_consistent(&exchange);
            prop_assert!(exchange.total_shares(&asset_a(), &asset_b()).unwrap() >= MINIMUM_LIQUIDITY);
        }
    }
}
