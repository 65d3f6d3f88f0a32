pub mod fees;

use crate::constants::stable_pool::{A_PRECISION, FEE_DENOM, VIRTUAL_PRICE_PRECISION};
use crate::math::{casted_mul, MathError};
use ink::prelude::{vec, vec::Vec};
use primitive_types::U256;

use fees::Fees;

/// Max number of iterations for curve computation using Newton–Raphson method
pub const MAX_ITERATIONS: u8 = 255;

#[inline]
fn within_one(a: U256, b: U256) -> bool {
    if a > b {
        a - b <= U256::one()
    } else {
        b - a <= U256::one()
    }
}

#[inline]
fn to_u128(value: U256, code: u8) -> Result<u128, MathError> {
    value.try_into().map_err(|_| MathError::CastOverflow(code))
}

/// Rescales native `amounts` to comparable amounts with `TOKEN_TARGET_DECIMALS`.
pub fn to_comparable_amounts(amounts: &[u128], precisions: &[u128]) -> Result<Vec<u128>, MathError> {
    amounts
        .iter()
        .zip(precisions.iter())
        .map(|(&amount, &precision)| {
            amount
                .checked_mul(precision)
                .ok_or(MathError::MulOverflow(1))
        })
        .collect()
}

/// Computes stable swap invariant (D) of comparable amounts `xp`
/// given precise amplification coefficient (A * A_PRECISION).
pub fn compute_d(xp: &[u128], amp_coef_precise: u128) -> Result<U256, MathError> {
    // SUM{x_i}
    let amount_sum = xp.iter().try_fold(U256::zero(), |acc, &amount| {
        acc.checked_add(amount.into())
            .ok_or(MathError::AddOverflow(1))
    })?;
    if amount_sum.is_zero() {
        return Ok(U256::zero());
    }
    let n = U256::from(xp.len() as u64);
    let a_precision = U256::from(A_PRECISION);
    // A * n
    let n_a = casted_mul(amp_coef_precise, xp.len() as u128);
    // A * n * SUM{x_i} / A_PRECISION
    let n_a_sum = n_a
        .checked_mul(amount_sum)
        .ok_or(MathError::MulOverflow(2))?
        .checked_div(a_precision)
        .ok_or(MathError::DivByZero(1))?;
    // A * n - A_PRECISION
    let n_a_sub_one = n_a
        .checked_sub(a_precision)
        .ok_or(MathError::SubUnderflow(1))?;
    let mut d = amount_sum;
    for _ in 0..MAX_ITERATIONS {
        let d_next = compute_d_next(d, n, xp, n_a_sum, n_a_sub_one)?;
        if within_one(d_next, d) {
            return Ok(d_next);
        }
        d = d_next;
    }
    Err(MathError::DidNotConverge(1))
}

fn compute_d_next(
    d_prev: U256,
    n: U256,
    xp: &[u128],
    n_a_sum: U256,
    n_a_sub_one: U256,
) -> Result<U256, MathError> {
    let mut d_prod = d_prev;
    // d_prod = ... * [d_prev / (x_(i) * n)] * ...
    for &x in xp {
        d_prod = d_prod
            .checked_mul(d_prev)
            .ok_or(MathError::MulOverflow(3))?
            .checked_div(
                U256::from(x)
                    .checked_mul(n)
                    .ok_or(MathError::MulOverflow(4))?,
            )
            .ok_or(MathError::DivByZero(2))?;
    }
    // (n_a_sum + d_prod * n) * d_prev
    let numerator = d_prod
        .checked_mul(n)
        .ok_or(MathError::MulOverflow(5))?
        .checked_add(n_a_sum)
        .ok_or(MathError::AddOverflow(2))?
        .checked_mul(d_prev)
        .ok_or(MathError::MulOverflow(6))?;
    // (A * n - A_PRECISION) * d_prev / A_PRECISION + (n + 1) * d_prod
    let denominator = n_a_sub_one
        .checked_mul(d_prev)
        .ok_or(MathError::MulOverflow(7))?
        .checked_div(A_PRECISION.into())
        .ok_or(MathError::DivByZero(3))?
        .checked_add(
            n.checked_add(U256::one())
                .ok_or(MathError::AddOverflow(3))?
                .checked_mul(d_prod)
                .ok_or(MathError::MulOverflow(8))?,
        )
        .ok_or(MathError::AddOverflow(4))?;
    numerator
        .checked_div(denominator)
        .ok_or(MathError::DivByZero(4))
}

/// Solves `y^2 + (b - d) * y = c` for `y` with Newton–Raphson starting at `y = d`.
fn solve_y(b: U256, c: U256, d: U256, code: u8) -> Result<u128, MathError> {
    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_prev = y;
        let numerator = y
            .checked_mul(y)
            .ok_or(MathError::MulOverflow(code))?
            .checked_add(c)
            .ok_or(MathError::AddOverflow(code))?;
        let denominator = y
            .checked_mul(2.into())
            .ok_or(MathError::MulOverflow(code))?
            .checked_add(b)
            .ok_or(MathError::AddOverflow(code))?
            .checked_sub(d)
            .ok_or(MathError::SubUnderflow(code))?;
        y = numerator
            .checked_div(denominator)
            .ok_or(MathError::DivByZero(code))?;
        if within_one(y, y_prev) {
            return to_u128(y, code);
        }
    }
    Err(MathError::DidNotConverge(code))
}

/// Builds `(b, c)` of the single-unknown quadratic from the known balances.
/// `known` yields every comparable amount except the unknown one.
fn y_coefficients(
    known: impl Iterator<Item = u128>,
    n: u128,
    d: U256,
    amp_coef_precise: u128,
    code: u8,
) -> Result<(U256, U256), MathError> {
    let n_a = casted_mul(amp_coef_precise, n);
    let n_u256 = U256::from(n);
    let mut c = d;
    let mut sum = U256::zero();
    // sum = ... + x_(i') + ...
    // c = ... * d / (x_(i') * n) * ...
    for x in known {
        sum = sum.checked_add(x.into()).ok_or(MathError::AddOverflow(code))?;
        c = c
            .checked_mul(d)
            .ok_or(MathError::MulOverflow(code))?
            .checked_div(
                U256::from(x)
                    .checked_mul(n_u256)
                    .ok_or(MathError::MulOverflow(code))?,
            )
            .ok_or(MathError::DivByZero(code))?;
    }
    // c = c * d * A_PRECISION / (A * n * n)
    c = c
        .checked_mul(d)
        .ok_or(MathError::MulOverflow(code))?
        .checked_mul(A_PRECISION.into())
        .ok_or(MathError::MulOverflow(code))?
        .checked_div(
            n_a.checked_mul(n_u256)
                .ok_or(MathError::MulOverflow(code))?,
        )
        .ok_or(MathError::DivByZero(code))?;
    // b = sum + d * A_PRECISION / (A * n), d is subtracted in every iteration
    let b = d
        .checked_mul(A_PRECISION.into())
        .ok_or(MathError::MulOverflow(code))?
        .checked_div(n_a)
        .ok_or(MathError::DivByZero(code))?
        .checked_add(sum)
        .ok_or(MathError::AddOverflow(code))?;
    Ok((b, c))
}

/// Returns new comparable amount of `token_y_id`
/// given new comparable amount `new_x` of `token_x_id`, keeping D of `xp` constant.
///
/// NOTICE: it does not check if `token_x_id` != `token_y_id` and if tokens' `id`s are out of bounds
pub fn compute_y(
    amp_coef_precise: u128,
    token_x_id: usize,
    token_y_id: usize,
    new_x: u128,
    xp: &[u128],
) -> Result<u128, MathError> {
    let d = compute_d(xp, amp_coef_precise)?;
    let known = xp.iter().enumerate().filter_map(|(idx, &x)| {
        if idx == token_x_id {
            Some(new_x)
        } else if idx != token_y_id {
            Some(x)
        } else {
            None
        }
    });
    let (b, c) = y_coefficients(known, xp.len() as u128, d, amp_coef_precise, 10)?;
    solve_y(b, c, d, 11)
}

/// Returns comparable amount of `token_id` for which the invariant of `xp`
/// equals the given `d`, all other amounts unchanged.
///
/// NOTICE: it does not check if `token_id` is out of bounds
pub fn compute_y_d(
    amp_coef_precise: u128,
    token_id: usize,
    xp: &[u128],
    d: U256,
) -> Result<u128, MathError> {
    let known = xp
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != token_id)
        .map(|(_, &x)| x);
    let (b, c) = y_coefficients(known, xp.len() as u128, d, amp_coef_precise, 20)?;
    solve_y(b, c, d, 21)
}

/// Compute swap result after an exchange given `token_in_amount` of the `token_in_idx`.
/// `reserves` are native amounts and `precisions` their rescaling factors.
/// panics if token ids are out of bounds.
/// NOTICE: it does not check if `token_in_idx` != `token_out_idx`.
/// Returns (amount_out, fee), `amount_out` is a native amount of `token_out_idx`
/// while `fee` is a comparable amount.
pub fn swap_to(
    token_in_idx: usize,
    token_in_amount: u128,
    token_out_idx: usize,
    reserves: &[u128],
    precisions: &[u128],
    fees: &Fees,
    amp_coef_precise: u128,
) -> Result<(u128, u128), MathError> {
    let xp = to_comparable_amounts(reserves, precisions)?;
    let new_x = token_in_amount
        .checked_mul(precisions[token_in_idx])
        .ok_or(MathError::MulOverflow(30))?
        .checked_add(xp[token_in_idx])
        .ok_or(MathError::AddOverflow(30))?;
    let y = compute_y(amp_coef_precise, token_in_idx, token_out_idx, new_x, &xp)?;
    // sub 1 in case there are any rounding errors
    let dy = xp[token_out_idx]
        .checked_sub(y)
        .ok_or(MathError::SubUnderflow(30))?
        .checked_sub(1)
        .ok_or(MathError::SubUnderflow(31))?;
    // fees are applied to "token_out" amount
    let fee = fees.swap_fee_from_gross(dy)?;
    let amount_out = dy
        .checked_sub(fee)
        .ok_or(MathError::SubUnderflow(32))?
        .checked_div(precisions[token_out_idx])
        .ok_or(MathError::DivByZero(30))?;
    Ok((amount_out, fee))
}

/// Applies the imbalance fee to `new_reserves` in place.
/// Ideal reserve of each token is its old reserve scaled by `d_1 / d_0`.
/// Returns fee charged per token, in native amounts.
fn charge_imbalance_fees(
    new_reserves: &mut [u128],
    old_reserves: &[u128],
    d_0: U256,
    d_1: U256,
    fees: &Fees,
) -> Result<Vec<u128>, MathError> {
    let n_coins = old_reserves.len() as u32;
    let mut charged = Vec::with_capacity(old_reserves.len());
    for (new_reserve, &old_reserve) in new_reserves.iter_mut().zip(old_reserves.iter()) {
        let ideal_reserve = to_u128(
            d_1.checked_mul(old_reserve.into())
                .ok_or(MathError::MulOverflow(40))?
                .checked_div(d_0)
                .ok_or(MathError::DivByZero(40))?,
            40,
        )?;
        let difference = ideal_reserve.abs_diff(*new_reserve);
        let fee = fees.normalized_trade_fee(n_coins, difference)?;
        *new_reserve = new_reserve
            .checked_sub(fee)
            .ok_or(MathError::SubUnderflow(40))?;
        charged.push(fee);
    }
    Ok(charged)
}

/// Compute the amount of LP tokens to mint after a deposit.
/// If `pool_token_supply` is zero, the minted amount equals D of the new reserves.
/// return <lp_amount_to_mint, fee_charged_per_token>
pub fn compute_lp_amount_for_deposit(
    deposit_amounts: &[u128],
    old_reserves: &[u128],
    precisions: &[u128],
    pool_token_supply: u128,
    fees: &Fees,
    amp_coef_precise: u128,
) -> Result<(u128, Vec<u128>), MathError> {
    let mut new_reserves = old_reserves
        .iter()
        .zip(deposit_amounts.iter())
        .map(|(reserve, &amount)| {
            reserve
                .checked_add(amount)
                .ok_or(MathError::AddOverflow(41))
        })
        .collect::<Result<Vec<u128>, MathError>>()?;
    // Invariant after change
    let d_1 = compute_d(
        &to_comparable_amounts(&new_reserves, precisions)?,
        amp_coef_precise,
    )?;
    if pool_token_supply == 0 {
        return Ok((to_u128(d_1, 41)?, vec![0; old_reserves.len()]));
    }
    // Initial invariant
    let d_0 = compute_d(
        &to_comparable_amounts(old_reserves, precisions)?,
        amp_coef_precise,
    )?;
    if d_1 <= d_0 {
        return Err(MathError::SubUnderflow(41));
    }
    // Recalculate the invariant accounting for fees
    let charged = charge_imbalance_fees(&mut new_reserves, old_reserves, d_0, d_1, fees)?;
    let d_2 = compute_d(
        &to_comparable_amounts(&new_reserves, precisions)?,
        amp_coef_precise,
    )?;
    // d1 >= d2 > d0, (d2-d0) => mint_shares (charged fee)
    let mint_shares = to_u128(
        d_2.checked_sub(d_0)
            .ok_or(MathError::SubUnderflow(42))?
            .checked_mul(pool_token_supply.into())
            .ok_or(MathError::MulOverflow(41))?
            .checked_div(d_0)
            .ok_or(MathError::DivByZero(41))?,
        42,
    )?;
    Ok((mint_shares, charged))
}

/// Given `withdraw_amounts` user wants to get, the reserves and lp token supply,
/// return <lp_amount_to_burn, fee_charged_per_token>.
/// The burned amount is rounded up by one unit in favour of the pool,
/// zero is returned only if the withdrawal does not lower the invariant.
pub fn compute_lp_amount_for_withdraw(
    withdraw_amounts: &[u128],
    old_reserves: &[u128],
    precisions: &[u128],
    pool_token_supply: u128,
    fees: &Fees,
    amp_coef_precise: u128,
) -> Result<(u128, Vec<u128>), MathError> {
    // Initial invariant, D0
    let d_0 = compute_d(
        &to_comparable_amounts(old_reserves, precisions)?,
        amp_coef_precise,
    )?;
    // real invariant after withdraw, D1
    let mut new_reserves = old_reserves
        .iter()
        .zip(withdraw_amounts.iter())
        .map(|(reserve, &amount)| {
            reserve
                .checked_sub(amount)
                .ok_or(MathError::SubUnderflow(50))
        })
        .collect::<Result<Vec<u128>, MathError>>()?;
    let d_1 = compute_d(
        &to_comparable_amounts(&new_reserves, precisions)?,
        amp_coef_precise,
    )?;
    // Recalculate the invariant accounting for fees
    let charged = charge_imbalance_fees(&mut new_reserves, old_reserves, d_0, d_1, fees)?;
    let d_2 = compute_d(
        &to_comparable_amounts(&new_reserves, precisions)?,
        amp_coef_precise,
    )?;
    // d0 > d1 >= d2, (d0-d2) => burn_shares (plus fee)
    let burn_shares = to_u128(
        d_0.checked_sub(d_2)
            .ok_or(MathError::SubUnderflow(51))?
            .checked_mul(pool_token_supply.into())
            .ok_or(MathError::MulOverflow(50))?
            .checked_div(d_0)
            .ok_or(MathError::DivByZero(50))?,
        50,
    )?;
    if burn_shares == 0 {
        return Ok((0, charged));
    }
    Ok((
        burn_shares
            .checked_add(1)
            .ok_or(MathError::AddOverflow(50))?,
        charged,
    ))
}

/// Compute amounts to withdraw for burning `lp_amount` in the balanced way (no fee).
pub fn compute_amounts_given_lp(
    lp_amount: u128,
    reserves: &[u128],
    pool_token_supply: u128,
) -> Result<Vec<u128>, MathError> {
    reserves
        .iter()
        .map(|&reserve| {
            to_u128(
                casted_mul(reserve, lp_amount)
                    .checked_div(pool_token_supply.into())
                    .ok_or(MathError::DivByZero(60))?,
                60,
            )
        })
        .collect()
}

/// Compute the amount of `token_idx` received for burning `lp_amount`.
/// Withdrawing from a single token implicitly moves the pool away from balance,
/// so the imbalance fee is charged on the hypothetical reduction of every token.
/// NOTICE: it does not check if `token_idx` is out of bounds.
/// return <amount_out, fee>, both native amounts of `token_idx`.
pub fn compute_withdraw_one_token(
    lp_amount: u128,
    token_idx: usize,
    reserves: &[u128],
    precisions: &[u128],
    pool_token_supply: u128,
    fees: &Fees,
    amp_coef_precise: u128,
) -> Result<(u128, u128), MathError> {
    let xp = to_comparable_amounts(reserves, precisions)?;
    let d_0 = compute_d(&xp, amp_coef_precise)?;
    // d_1 = d_0 - lp_amount * d_0 / supply
    let d_1 = d_0
        .checked_sub(
            d_0.checked_mul(lp_amount.into())
                .ok_or(MathError::MulOverflow(70))?
                .checked_div(pool_token_supply.into())
                .ok_or(MathError::DivByZero(70))?,
        )
        .ok_or(MathError::SubUnderflow(70))?;
    let new_y = compute_y_d(amp_coef_precise, token_idx, &xp, d_1)?;

    let fee_per_token = U256::from(fees.fee_per_token(xp.len() as u32)?);
    let xp_reduced = xp
        .iter()
        .enumerate()
        .map(|(idx, &x)| {
            let x_scaled = x_times_ratio(x, d_1, d_0)?;
            let expected_change = if idx == token_idx {
                x_scaled
                    .checked_sub(new_y)
                    .ok_or(MathError::SubUnderflow(71))?
            } else {
                x.checked_sub(x_scaled)
                    .ok_or(MathError::SubUnderflow(72))?
            };
            let fee = to_u128(
                fee_per_token
                    .checked_mul(expected_change.into())
                    .ok_or(MathError::MulOverflow(71))?
                    .checked_div(FEE_DENOM.into())
                    .ok_or(MathError::DivByZero(71))?,
                71,
            )?;
            x.checked_sub(fee).ok_or(MathError::SubUnderflow(73))
        })
        .collect::<Result<Vec<u128>, MathError>>()?;

    let dy = xp_reduced[token_idx]
        .checked_sub(compute_y_d(amp_coef_precise, token_idx, &xp_reduced, d_1)?)
        .ok_or(MathError::SubUnderflow(74))?;
    // sub 1 in case there are any rounding errors
    let amount_out = dy
        .checked_sub(1)
        .ok_or(MathError::SubUnderflow(75))?
        .checked_div(precisions[token_idx])
        .ok_or(MathError::DivByZero(72))?;
    let fee = xp[token_idx]
        .checked_sub(new_y)
        .ok_or(MathError::SubUnderflow(76))?
        .checked_div(precisions[token_idx])
        .ok_or(MathError::DivByZero(73))?
        .checked_sub(amount_out)
        .ok_or(MathError::SubUnderflow(77))?;
    Ok((amount_out, fee))
}

fn x_times_ratio(x: u128, num: U256, denom: U256) -> Result<u128, MathError> {
    to_u128(
        num.checked_mul(x.into())
            .ok_or(MathError::MulOverflow(78))?
            .checked_div(denom)
            .ok_or(MathError::DivByZero(78))?,
        78,
    )
}

/// Invariant value of a single LP token, with `VIRTUAL_PRICE_PRECISION`.
/// Returns 0 if no LP token has been issued.
pub fn compute_virtual_price(
    reserves: &[u128],
    precisions: &[u128],
    pool_token_supply: u128,
    amp_coef_precise: u128,
) -> Result<u128, MathError> {
    if pool_token_supply == 0 {
        return Ok(0);
    }
    let d = compute_d(
        &to_comparable_amounts(reserves, precisions)?,
        amp_coef_precise,
    )?;
    to_u128(
        d.checked_mul(VIRTUAL_PRICE_PRECISION.into())
            .ok_or(MathError::MulOverflow(80))?
            .checked_div(pool_token_supply.into())
            .ok_or(MathError::DivByZero(80))?,
        80,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = 1_000_000_000_000_000_000;
    const A_50: u128 = 50 * A_PRECISION;

    fn d_of(xp: &[u128], amp: u128) -> U256 {
        compute_d(xp, amp).unwrap_or_else(|err| panic!("Should compute: {err:?}"))
    }

    #[test]
    fn d_of_empty_pool_is_zero() {
        assert_eq!(compute_d(&[0, 0, 0], A_50), Ok(U256::zero()));
    }

    #[test]
    fn d_of_balanced_pool_is_sum() {
        assert_eq!(d_of(&[ONE, ONE], A_50), U256::from(2 * ONE));
        assert_eq!(d_of(&[ONE, ONE, ONE], A_50), U256::from(3 * ONE));
    }

    #[test]
    fn d_computation_high_amp_coef() {
        let reserve_0: u128 = 400_000_000_000;
        let reserve_1: u128 = 500_000_000_000;
        let d = d_of(&[reserve_0, reserve_1], 1_000_000 * A_PRECISION);
        let sum = U256::from(reserve_0 + reserve_1);
        assert!(d < sum, "Invariant should be less than const sum invariant");
        assert!(
            sum - d < sum / U256::from(100_000u64),
            "Invariant should be close to constant sum invariant"
        );
        let low_amp_d = d_of(&[reserve_0, reserve_1], A_50);
        assert!(low_amp_d < d, "Invariant should grow with amplification");
    }

    #[test]
    fn d_computation_low_amp_coef() {
        let reserve_0: u128 = 400_000_000_000;
        let reserve_1: u128 = 500_000_000_000;
        let d = d_of(&[reserve_0, reserve_1], A_PRECISION);
        assert!(
            d < (reserve_0 + reserve_1).into(),
            "Invariant should be less than const sum invariant"
        );
        let prod_d = casted_mul(reserve_0, reserve_1).integer_sqrt() * U256::from(2u64);
        assert!(
            d > prod_d,
            "Invariant should be greater than const prod invariant"
        );
    }

    #[test]
    fn d_with_zero_balance_in_non_empty_pool_fails() {
        assert_eq!(compute_d(&[ONE, 0], A_50), Err(MathError::DivByZero(2)));
    }

    #[test]
    fn y_keeps_invariant() {
        let xp = vec![3 * ONE, 5 * ONE, 7 * ONE];
        let d = d_of(&xp, A_50);
        let new_x = 4 * ONE;
        let y = compute_y(A_50, 0, 2, new_x, &xp).unwrap();
        assert!(y < xp[2]);
        let d_after = d_of(&[new_x, xp[1], y], A_50);
        let diff = if d_after > d { d_after - d } else { d - d_after };
        assert!(diff <= U256::from(1_000u64), "D drifted by {diff}");
    }

    #[test]
    fn y_computation_low_amp_coef() {
        let reserve_0: u128 = 400_000_000_000;
        let reserve_1: u128 = 500_000_000_000;
        let reserve_delta: u128 = 40_000_000_000;
        let reserve_0_after = reserve_0 - reserve_delta;
        let reserve_1_after = compute_y(
            A_PRECISION,
            0,
            1,
            reserve_0_after,
            &[reserve_0, reserve_1],
        )
        .unwrap_or_else(|err| panic!("Should compute y. Err: {err:?}"));
        assert!(
            reserve_1_after > reserve_1 + reserve_delta,
            "Destination reserve change should be greater than in const sum swap"
        );
        let const_prod_y = (reserve_1 * reserve_0) / reserve_0_after;
        assert!(
            const_prod_y > reserve_1_after,
            "Destination reserve change should be less than in const prod swap"
        );
    }

    #[test]
    fn y_d_at_current_d_returns_current_balance() {
        let xp = vec![2 * ONE, 3 * ONE];
        let d = d_of(&xp, A_50);
        let y = compute_y_d(A_50, 1, &xp, d).unwrap();
        assert!(y.abs_diff(xp[1]) <= 10, "y: {y}");
    }

    #[test]
    fn y_d_decreases_with_target_d() {
        let xp = vec![2 * ONE, 3 * ONE, ONE];
        let d = d_of(&xp, A_50);
        let lower = compute_y_d(A_50, 0, &xp, d * U256::from(9u64) / U256::from(10u64)).unwrap();
        let current = compute_y_d(A_50, 0, &xp, d).unwrap();
        assert!(lower < current);
    }

    #[test]
    fn swap_to_balanced_pool() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let (amount_out, fee) =
            swap_to(0, ONE / 10, 1, &[ONE, ONE], &[1, 1], &fees, A_50).unwrap();
        assert_eq!(amount_out, 99_702_611_562_565_289);
        assert!(fee > 0);
    }

    #[test]
    fn swap_to_without_fee_is_not_better_than_one_to_one() {
        let reserves = vec![100_000_000_000, 100_000_000_000];
        let (amount_out, fee) = swap_to(
            0,
            10_000_000_000,
            1,
            &reserves,
            &[1, 1],
            &Fees::zero(),
            1000 * A_PRECISION,
        )
        .unwrap();
        assert_eq!(fee, 0, "Fee should be 0");
        assert!(amount_out < 10_000_000_000);
        assert!(amount_out > 9_990_000_000);
    }

    #[test]
    fn swap_to_rescales_precisions() {
        // 6 decimal token against 18 decimal token
        let precisions = vec![1, 1_000_000_000_000];
        let reserves = vec![1_000 * ONE, 1_000 * 1_000_000];
        let (amount_out, _) =
            swap_to(0, ONE, 1, &reserves, &precisions, &Fees::zero(), A_50).unwrap();
        assert!(amount_out < 1_000_000);
        assert!(amount_out > 999_000);
    }

    #[test]
    fn initial_deposit_mints_d() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let (minted, charged) =
            compute_lp_amount_for_deposit(&[ONE, ONE], &[0, 0], &[1, 1], 0, &fees, A_50).unwrap();
        assert_eq!(minted, 2 * ONE);
        assert_eq!(charged, vec![0, 0]);
    }

    #[test]
    fn imbalanced_deposit_is_charged() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let (minted, charged) = compute_lp_amount_for_deposit(
            &[ONE, 3 * ONE],
            &[ONE, ONE],
            &[1, 1],
            2 * ONE,
            &fees,
            A_50,
        )
        .unwrap();
        assert_eq!(minted, 3_991_672_211_258_372_957);
        assert!(charged.iter().all(|&fee| fee > 0));
    }

    #[test]
    fn balanced_deposit_is_not_charged() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let (minted, charged) = compute_lp_amount_for_deposit(
            &[ONE, ONE],
            &[ONE, ONE],
            &[1, 1],
            2 * ONE,
            &fees,
            A_50,
        )
        .unwrap();
        assert_eq!(minted, 2 * ONE);
        assert_eq!(charged, vec![0, 0]);
    }

    #[test]
    fn balanced_withdraw_by_amounts_burns_share_plus_one() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let reserves = vec![2 * ONE, 2 * ONE];
        let (burned, charged) = compute_lp_amount_for_withdraw(
            &[ONE, ONE],
            &reserves,
            &[1, 1],
            4 * ONE,
            &fees,
            A_50,
        )
        .unwrap();
        assert_eq!(burned, 2 * ONE + 1);
        assert_eq!(charged, vec![0, 0]);
    }

    #[test]
    fn imbalanced_withdraw_burns_more_than_balanced() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let reserves = vec![2 * ONE, 2 * ONE];
        let (burned, _) = compute_lp_amount_for_withdraw(
            &[2 * ONE - ONE / 2, ONE / 2],
            &reserves,
            &[1, 1],
            4 * ONE,
            &fees,
            A_50,
        )
        .unwrap();
        assert!(burned > 2 * ONE + 1);
    }

    #[test]
    fn proportional_amounts() {
        let amounts = compute_amounts_given_lp(ONE, &[3 * ONE, 5], 4 * ONE).unwrap();
        assert_eq!(amounts, vec![3 * ONE / 4, 1]);
        assert_eq!(
            compute_amounts_given_lp(ONE, &[ONE], 0),
            Err(MathError::DivByZero(60))
        );
    }

    #[test]
    fn withdraw_one_token_is_charged() {
        let fees = Fees::new(10_000_000, 0).unwrap();
        let reserves = vec![ONE, ONE];
        let (amount_out, fee) =
            compute_withdraw_one_token(ONE / 10, 0, &reserves, &[1, 1], 2 * ONE, &fees, A_50)
                .unwrap();
        assert!(amount_out < ONE / 10);
        assert!(fee > 0);
        let (no_fee_out, zero_fee) = compute_withdraw_one_token(
            ONE / 10,
            0,
            &reserves,
            &[1, 1],
            2 * ONE,
            &Fees::zero(),
            A_50,
        )
        .unwrap();
        assert!(no_fee_out > amount_out);
        assert!(zero_fee <= 1);
    }

    #[test]
    fn virtual_price_of_fresh_pool() {
        assert_eq!(
            compute_virtual_price(&[ONE, ONE], &[1, 1], 2 * ONE, A_50),
            Ok(ONE)
        );
        assert_eq!(compute_virtual_price(&[0, 0], &[1, 1], 0, A_50), Ok(0));
    }
}
