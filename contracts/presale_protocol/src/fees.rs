//! Fee, penalty, and allocation arithmetic.
//!
//! Pure `i128` floor math, kept free of any `Env` access so every formula
//! can be unit-tested directly. Multiplications are checked; a `None`
//! return means the caller must surface [`crate::Error::Overflow`].

/// Hard ceiling for the owner-adjustable platform fee.
pub const FEE_CEILING_PCT: u32 = 10;

/// Fixed early-exit penalty. Deliberately not owner-adjustable so it stays
/// a credible deterrent against cap-gaming.
pub const PULL_OUT_PENALTY_PCT: u32 = 2;

/// Split `amount` into `(fee, net)` under the platform fee percentage.
///
/// `pct` is read from protocol config at settlement time and is already
/// bounded by [`FEE_CEILING_PCT`], so the multiplication cannot overflow
/// for any amount a token can hold.
pub fn platform_fee_split(amount: i128, pct: u32) -> (i128, i128) {
    let fee = amount * pct as i128 / 100;
    (fee, amount - fee)
}

/// Split a pulled-out contribution into `(penalty, refund)`.
pub fn pull_out_split(amount: i128) -> (i128, i128) {
    let penalty = amount * PULL_OUT_PENALTY_PCT as i128 / 100;
    (penalty, amount - penalty)
}

/// Sale units awarded for `take` raise units in a Fixed round:
/// `floor(take * sale_units_total / hard_cap)`.
pub fn fixed_allocation(take: i128, sale_units_total: i128, hard_cap: i128) -> Option<i128> {
    take.checked_mul(sale_units_total).map(|n| n / hard_cap)
}

/// Sale units awarded for a contribution in a Dynamic round after
/// finalization: `floor(contribution * sale_units_total / amount_raised)`.
pub fn pro_rata_allocation(
    contribution: i128,
    sale_units_total: i128,
    amount_raised: i128,
) -> Option<i128> {
    contribution
        .checked_mul(sale_units_total)
        .map(|n| n / amount_raised)
}

/// Clamp an allocation so `sold + amount` never exceeds `total`. Only ever
/// reduces the amount.
pub fn clamp_to_remaining(amount: i128, sold: i128, total: i128) -> i128 {
    let remaining = total - sold;
    if amount > remaining {
        remaining
    } else {
        amount
    }
}
