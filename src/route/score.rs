//! Liquidity scoring and the weighted ranking of assembled routes.

use alloy::primitives::U256;
use num_bigint::{BigInt, Sign};

use crate::error::{Error, Result};
use crate::fraction::Fraction;

use super::assemble::Route;

/// A route paired with its computed liquidity proxy.
#[derive(Clone, Debug)]
pub struct EvaluatedRoute {
    /// The scored route
    pub route: Route,
    /// Estimate of how much value the route could carry
    pub liquidity: U256,
}

/// Fixed-point scale of the hop-count discount: six decimals.
const DISCOUNT_DECIMALS: u64 = 1_000_000;

/// Intermediate carrier for the exact liquidity before ranking; the sort
/// key derived from it lives in a parallel tuple and is dropped after the
/// sort, so the route itself is never touched.
struct ScoredRoute {
    /// The scored route
    route: Route,
    /// Exact truncated liquidity
    liquidity: BigInt,
}

/// Score every route and return them sorted by discounted liquidity,
/// highest first.
///
/// `weight` in `[0, 1]` discounts longer routes by `weight^(hops - 1)`,
/// applied at six-decimal fixed-point precision; a weight of 1 disables the
/// discount. The sort is stable, so routes with an equal key keep their
/// discovery order.
///
/// # Errors
/// * [`Error::MalformedRoute`] when a route's steps are not linked; route
///   assembly must never let one through, so this signals a defect.
/// * [`Error::DivisionByZero`] when a zero reserve enters a division.
pub fn evaluate_and_sort(routes: Vec<Route>, weight: f64) -> Result<Vec<EvaluatedRoute>> {
    let mut scored = Vec::with_capacity(routes.len());
    for route in routes {
        if !route.is_linked() {
            return Err(Error::MalformedRoute);
        }
        let liquidity = route_liquidity(&route)?.to_integer();
        scored.push(ScoredRoute { route, liquidity });
    }
    let sorted = sort_by_weighted_liquidity(scored, weight);
    Ok(sorted
        .into_iter()
        .map(|scored| EvaluatedRoute {
            liquidity: to_u256(&scored.liquidity),
            route: scored.route,
        })
        .collect())
}

/// Propagate reserves along the route to estimate how much value it could
/// carry.
///
/// The running value seeds from the first real step's end reserve (1 when
/// the first step has no reserves, which assembly should have prevented).
/// Each later step either scales the running value by `end/begin` - when it
/// still fits under the step's begin reserve - or resets it to the step's
/// own end reserve, which then acts as the new bottleneck. Steps without
/// reserves are carried over unchanged.
fn route_liquidity(route: &Route) -> Result<Fraction> {
    let steps = route.steps();
    let Some(first) = steps.first() else {
        return Ok(Fraction::from_integer(0));
    };
    let mut result = match first.end_reserve {
        Some(reserve) if first.has_reserves() => Fraction::from_u256(reserve),
        _ => Fraction::from_integer(1),
    };
    for step in &steps[1..] {
        let (Some(begin_reserve), Some(end_reserve)) = (step.begin_reserve, step.end_reserve)
        else {
            continue;
        };
        let begin = Fraction::from_u256(begin_reserve);
        if result.lt(&begin) {
            result = result.mul(&Fraction::from_u256(end_reserve)).div(&begin)?;
        } else {
            result = Fraction::from_u256(end_reserve);
        }
    }
    Ok(result)
}

/// Order routes by liquidity discounted for hop count, highest first.
///
/// The key is `liquidity * floor(1e6 * weight^(hops - 1)) / 1e6` over
/// exact integers; it exists only for the duration of the sort.
fn sort_by_weighted_liquidity(routes: Vec<ScoredRoute>, weight: f64) -> Vec<ScoredRoute> {
    let decimal = BigInt::from(DISCOUNT_DECIMALS);
    let mut keyed: Vec<(BigInt, ScoredRoute)> = routes
        .into_iter()
        .map(|scored| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let coefficient = weight.powi(scored.route.hops() as i32 - 1);
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let multiplier = (DISCOUNT_DECIMALS as f64 * coefficient).floor() as u64;
            let key = &scored.liquidity * multiplier / &decimal;
            (key, scored)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, scored)| scored).collect()
}

/// Narrow an exact non-negative liquidity back to a 256-bit word.
///
/// The propagation never produces a value above the largest end reserve on
/// the route, so the saturating arms are unreachable for well-formed
/// reserves.
fn to_u256(value: &BigInt) -> U256 {
    if value.sign() == Sign::Minus {
        return U256::ZERO;
    }
    let (_, bytes) = value.to_bytes_be();
    if bytes.len() > 32 {
        U256::MAX
    } else {
        U256::from_be_slice(&bytes)
    }
}
