//! Property-based tests using `proptest` for pool and math invariants.
//!
//! 1. **Power accuracy**: `pow(b, n)` tracks `b^n` for integer `n`.
//! 2. **Zero exponent**: `pow(b, 0) == 1` on the whole domain.
//! 3. **No value creation**: provide then withdraw never returns more
//!    than was provided.
//! 4. **Invariant preservation**: with a zero fee, `B_a^w_a · B_b^w_b`
//!    is non-decreasing across swaps.
//! 5. **Listing idempotence**: identical `get_pairs` calls return
//!    identical pages.

use proptest::prelude::*;

use crate::config::RegistryConfig;
use crate::domain::{Amount, AssetType, FeeRate, PairKey, Side, Timestamp, WeightSchedule, Weights};
use crate::ledger::{Coin, MintCapability};
use crate::math::{pow, Decimal};
use crate::pools::WeightedPool;
use crate::registry::PairRegistry;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn pair_key(a: &str, b: &str, s: &str) -> PairKey {
    let Ok(k) = PairKey::new(AssetType::new(a), AssetType::new(b), AssetType::new(s)) else {
        panic!("valid key");
    };
    k
}

fn make_pool(key: PairKey, fee_rate: FeeRate) -> WeightedPool {
    let cap = MintCapability::new(key.share_token().clone(), 0);
    let Ok(pool) = WeightedPool::new(key, cap, fee_rate) else {
        panic!("valid pool");
    };
    pool
}

/// A pool seeded with `(ra, rb)` and static weights `(wa, 100 - wa)`.
fn make_seeded(ra: u128, rb: u128, wa: u128, fee_rate: FeeRate) -> WeightedPool {
    let key = pair_key("X", "Y", "LP");
    let mut pool = make_pool(key.clone(), fee_rate);
    let Ok(quote) = pool.quote_provide(Amount::new(ra), Amount::new(rb)) else {
        panic!("valid first provide");
    };
    let mut coin_a = Coin::new(key.asset_a().clone(), Amount::new(ra));
    let mut coin_b = Coin::new(key.asset_b().clone(), Amount::new(rb));
    let Ok(()) = pool.apply_provide(&quote, &mut coin_a, &mut coin_b) else {
        panic!("apply first provide");
    };
    let Ok(weights) = Weights::from_ratios(wa, 100 - wa, 100) else {
        panic!("valid weights");
    };
    pool.set_schedule(WeightSchedule::fixed(weights));
    pool
}

/// `w_a · ln(B_a) + w_b · ln(B_b)`, the log of the weighted invariant.
fn log_invariant(pool: &WeightedPool, wa: u128) -> f64 {
    let wa = wa as f64 / 100.0;
    let wb = 1.0 - wa;
    wa * (pool.balance_a().get() as f64).ln() + wb * (pool.balance_b().get() as f64).ln()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Balances in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Weight of asset A in percent; B gets the rest.  The extremes cover
/// LBP endpoints such as 99/1, where the swap exponent reaches 99.
fn weight_strategy() -> impl Strategy<Value = u128> {
    1u128..=99u128
}

/// Power bases in [0.2, 1.8], in thousandths.
fn base_strategy() -> impl Strategy<Value = u128> {
    200u128..=1_800u128
}

// ---------------------------------------------------------------------------
// Property 1 & 2: PowerApprox
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_pow_matches_reference(
        base in base_strategy(),
        exponent in 0u32..=4u32,
    ) {
        let Ok(b) = Decimal::from_ratio(base, 1_000) else {
            return Ok(());
        };
        let Ok(e) = Decimal::from_int(u128::from(exponent)) else {
            return Ok(());
        };
        let Ok(approx) = pow(b, e) else {
            return Err(TestCaseError::fail(format!("pow({b}, {e}) failed")));
        };

        let exact = (base as f64 / 1_000.0).powi(exponent as i32);
        let diff = (approx.to_f64_lossy() - exact).abs();
        prop_assert!(
            diff <= exact * 1e-6 + 1e-9,
            "pow({}, {}) = {} but reference is {}",
            b, e, approx, exact
        );
    }

    #[test]
    fn prop_pow_defined_on_whole_domain(
        raw in 1u128..2 * Decimal::SCALE,
        exponent in 0u128..=1_000u128,
    ) {
        let Ok(e) = Decimal::from_ratio(exponent, 1_000) else {
            return Ok(());
        };
        let base = Decimal::from_raw(raw);
        let Ok(value) = pow(base, e) else {
            return Err(TestCaseError::fail(format!("pow({base}, {e}) failed")));
        };
        // x^e with e <= 1 never exceeds max(x, 1) beyond rounding.
        let bound = base.max(Decimal::ONE).to_f64_lossy() + 1e-9;
        prop_assert!(value.to_f64_lossy() <= bound, "pow({}, {}) = {}", base, e, value);
    }

    #[test]
    fn prop_pow_zero_exponent_is_one(raw in 1u128..2 * Decimal::SCALE) {
        prop_assert_eq!(pow(Decimal::from_raw(raw), Decimal::ZERO), Ok(Decimal::ONE));
    }
}

// ---------------------------------------------------------------------------
// Property 3: No value creation on provide / withdraw
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_provide_withdraw_creates_no_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        a_in in 1u128..=1_000_000u128,
        b_in in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_seeded(ra, rb, 50, FeeRate::ZERO);
        let key = pool.key().clone();

        let Ok(provide) = pool.quote_provide(Amount::new(a_in), Amount::new(b_in)) else {
            return Ok(());
        };
        prop_assert!(provide.amount_a().get() <= a_in);
        prop_assert!(provide.amount_b().get() <= b_in);

        let mut coin_a = Coin::new(key.asset_a().clone(), Amount::new(a_in));
        let mut coin_b = Coin::new(key.asset_b().clone(), Amount::new(b_in));
        prop_assert!(pool.apply_provide(&provide, &mut coin_a, &mut coin_b).is_ok());

        let Ok(withdraw) = pool.quote_withdraw(provide.shares()) else {
            return Err(TestCaseError::fail("withdraw of fresh shares failed"));
        };
        prop_assert!(withdraw.amount_a() <= provide.amount_a());
        prop_assert!(withdraw.amount_b() <= provide.amount_b());

        let Ok((_out_a, _out_b)) = pool.apply_withdraw(&withdraw) else {
            return Err(TestCaseError::fail("apply withdraw failed"));
        };
        prop_assert!(pool.balance_a().get() >= ra);
        prop_assert!(pool.balance_b().get() >= rb);
        prop_assert_eq!(pool.share_supply(), Amount::new(ra.max(rb)));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Weighted invariant under zero-fee swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_zero_fee_swaps_preserve_invariant(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        swaps in prop::collection::vec((1u128..=50u128, any::<bool>()), 1..8),
    ) {
        let mut pool = make_seeded(ra, rb, wa, FeeRate::ZERO);
        let key = pool.key().clone();
        let now = Timestamp::ZERO;

        for (permille, offer_a) in swaps {
            let before = log_invariant(&pool, wa);
            let side = if offer_a { Side::A } else { Side::B };
            let offer = (pool.balance(side).get() * permille / 1_000).max(1);

            let Ok(quote) = pool.quote_swap(Amount::new(offer), side, now) else {
                continue;
            };
            let mut coin = Coin::new(key.asset(side).clone(), Amount::new(offer));
            let Ok(_paid) = pool.apply_swap(&quote, &mut coin) else {
                return Err(TestCaseError::fail("apply swap failed after quote"));
            };

            let after = log_invariant(&pool, wa);
            prop_assert!(
                after >= before - 1e-9,
                "invariant decreased: {} -> {}",
                before, after
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Listing idempotence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_get_pairs_is_idempotent(
        ids in prop::collection::btree_set(0u32..1_000u32, 0..40),
        cursor in proptest::option::of(0u32..1_000u32),
        limit in proptest::option::of(1usize..=150usize),
    ) {
        let mut registry = PairRegistry::default();
        for id in &ids {
            let key = pair_key(&format!("A{id:04}"), "B", &format!("S{id:04}"));
            prop_assert!(registry.insert(make_pool(key, FeeRate::ZERO)).is_ok());
        }
        let cursor = cursor.map(|id| pair_key(&format!("A{id:04}"), "B", &format!("S{id:04}")));

        let Ok(first) = registry.get_pairs(cursor.as_ref(), limit) else {
            return Err(TestCaseError::fail("get_pairs failed"));
        };
        let Ok(second) = registry.get_pairs(cursor.as_ref(), limit) else {
            return Err(TestCaseError::fail("get_pairs failed"));
        };
        prop_assert_eq!(&first, &second);

        let max = RegistryConfig::default().max_page_size();
        prop_assert!(first.pairs.len() <= max);
        prop_assert!(first.pairs.windows(2).all(|w| w[0].key() < w[1].key()));
    }
}
