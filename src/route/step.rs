//! Route steps and the enumeration of candidate pools between token pairs.

use alloy::primitives::{Address, U256};

use crate::exchange::Exchange;
use crate::helper::{ConfirmedPool, ConfirmedPools};

/// A hypothesized pool connecting `begin` to `end` on one exchange.
///
/// The address is derived deterministically from the exchange's factory
/// constants; nothing has confirmed yet that the pool exists on-chain, so
/// there are no reserves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingStep {
    /// Derived address of the would-be pool
    pub address: Address,
    /// Token the step starts from
    pub begin: Address,
    /// Token the step ends at
    pub end: Address,
    /// Factory of the exchange the pool would belong to
    pub creator: Address,
}

/// One confirmed hop of a route: a pool known to exist on-chain, with its
/// reserves assigned to the begin and end sides.
///
/// Reserves are optional: a step without them is tolerated defensively at
/// scoring time but must never be produced by [`confirm_steps`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteStep {
    /// Address of the pool
    pub address: Address,
    /// Token the step starts from
    pub begin: Address,
    /// Token the step ends at
    pub end: Address,
    /// Reserve of the `begin` token held by the pool
    pub begin_reserve: Option<U256>,
    /// Reserve of the `end` token held by the pool
    pub end_reserve: Option<U256>,
    /// Factory that deployed the pool, when known
    pub creator: Option<Address>,
}

impl RouteStep {
    /// Attach confirmed reserves to a missing step.
    ///
    /// The pool's `reserve0` belongs to whichever of `begin`/`end` has the
    /// lexicographically smaller address, matching the canonical token
    /// ordering of the factories.
    #[must_use]
    pub fn from_confirmed(step: &MissingStep, pool: &ConfirmedPool) -> Self {
        let (begin_reserve, end_reserve) = if step.begin < step.end {
            (pool.reserve0, pool.reserve1)
        } else {
            (pool.reserve1, pool.reserve0)
        };
        Self {
            address: step.address,
            begin: step.begin,
            end: step.end,
            begin_reserve: Some(begin_reserve),
            end_reserve: Some(end_reserve),
            creator: Some(step.creator),
        }
    }

    /// Whether both side reserves are known.
    #[must_use]
    pub const fn has_reserves(&self) -> bool {
        self.begin_reserve.is_some() && self.end_reserve.is_some()
    }
}

/// The six candidate groups produced by missing-step enumeration, named
/// after the token pairs they connect: source `a`, target `b`, source-side
/// intermediates `x`, target-side intermediates `y`.
#[derive(Clone, Debug, Default)]
pub struct MissingStepGroups {
    /// Source directly to target
    pub ab: Vec<MissingStep>,
    /// Source to each source-side intermediate
    pub ax: Vec<MissingStep>,
    /// Source to each target-side intermediate
    pub ay: Vec<MissingStep>,
    /// Each source-side intermediate to target
    pub xb: Vec<MissingStep>,
    /// Each target-side intermediate to target
    pub yb: Vec<MissingStep>,
    /// Every source-side to every target-side intermediate
    pub xy: Vec<MissingStep>,
}

/// Confirmed counterparts of [`MissingStepGroups`] after the reserve fetch
/// dropped the pools that do not exist.
#[derive(Clone, Debug, Default)]
pub struct RouteStepGroups {
    /// Source directly to target
    pub ab: Vec<RouteStep>,
    /// Source to each source-side intermediate
    pub ax: Vec<RouteStep>,
    /// Source to each target-side intermediate
    pub ay: Vec<RouteStep>,
    /// Each source-side intermediate to target
    pub xb: Vec<RouteStep>,
    /// Each target-side intermediate to target
    pub yb: Vec<RouteStep>,
    /// Every source-side to every target-side intermediate
    pub xy: Vec<RouteStep>,
}

/// Enumerate every candidate pool across the six token-pair groups on all
/// `exchanges`.
///
/// Pure combinatorics: with `|x| = m`, `|y| = n` and `k` exchanges the
/// groups have sizes `k`, `m*k`, `n*k`, `m*k`, `n*k` and `m*n*k`.
#[must_use]
pub fn make_missing_steps(
    a: Address,
    b: Address,
    x: &[Address],
    y: &[Address],
    exchanges: &[Exchange],
) -> MissingStepGroups {
    MissingStepGroups {
        ab: make_missing_steps_on_exchanges(a, b, exchanges),
        ax: one_to_many(a, x, exchanges),
        ay: one_to_many(a, y, exchanges),
        xb: many_to_one(x, b, exchanges),
        yb: many_to_one(y, b, exchanges),
        xy: many_to_many(x, y, exchanges),
    }
}

/// Candidate pools between one token pair, one per exchange.
///
/// A pair of equal tokens yields no steps: no factory deploys a pool from a
/// token to itself.
#[must_use]
pub fn make_missing_steps_on_exchanges(
    begin: Address,
    end: Address,
    exchanges: &[Exchange],
) -> Vec<MissingStep> {
    if begin == end {
        return Vec::new();
    }
    exchanges
        .iter()
        .map(|&exchange| MissingStep {
            address: exchange.pool_address(begin, end),
            begin,
            end,
            creator: exchange.factory(),
        })
        .collect()
}

/// Steps from one token to each of `ends`.
fn one_to_many(begin: Address, ends: &[Address], exchanges: &[Exchange]) -> Vec<MissingStep> {
    ends.iter()
        .flat_map(|&end| make_missing_steps_on_exchanges(begin, end, exchanges))
        .collect()
}

/// Steps from each of `begins` to one token.
fn many_to_one(begins: &[Address], end: Address, exchanges: &[Exchange]) -> Vec<MissingStep> {
    begins
        .iter()
        .flat_map(|&begin| make_missing_steps_on_exchanges(begin, end, exchanges))
        .collect()
}

/// Steps for the full cartesian product of `begins` and `ends`.
fn many_to_many(begins: &[Address], ends: &[Address], exchanges: &[Exchange]) -> Vec<MissingStep> {
    begins
        .iter()
        .flat_map(|&begin| one_to_many(begin, ends, exchanges))
        .collect()
}

/// Keep the steps whose pool exists on-chain, attaching their reserves.
///
/// Steps whose address is absent from `pools` were reported nonexistent by
/// the helper contract and are dropped entirely.
#[must_use]
pub fn confirm_steps(missing: &[MissingStep], pools: &ConfirmedPools) -> Vec<RouteStep> {
    missing
        .iter()
        .filter_map(|step| {
            pools
                .get(step.address)
                .map(|pool| RouteStep::from_confirmed(step, pool))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::route::test_helpers::*;

    #[test]
    fn test_make_missing_steps_on_exchanges() {
        let begin = address!("0x16b24a1538e374099c0c99a612d7b35b3526ae78");
        let end = address!("0xec90e559b61dee9dc54aaf5086a1085e77fe7185");
        let exchanges = [Exchange::Pancake, Exchange::Pancake2];

        let steps = make_missing_steps_on_exchanges(begin, end, &exchanges);

        assert_eq!(
            steps,
            vec![
                MissingStep {
                    address: address!("0x6e0a2065a267a0d3f8bbb58d38e5507f6743f8e5"),
                    begin,
                    end,
                    creator: address!("0xbcfccbde45ce874adcb698cc183debcf17952812"),
                },
                MissingStep {
                    address: address!("0xdd84230fad8b42ca0f03054541d207ae29a35bf5"),
                    begin,
                    end,
                    creator: address!("0xca143ce32fe78f1f7019d7d551a6402fc5350c73"),
                },
            ]
        );
    }

    #[test]
    fn test_make_missing_steps_on_exchanges_same_token() {
        let token = address!("0x16b24a1538e374099c0c99a612d7b35b3526ae78");
        let exchanges = [Exchange::Pancake, Exchange::Pancake2];

        assert!(make_missing_steps_on_exchanges(token, token, &exchanges).is_empty());
    }

    #[test]
    fn test_make_missing_steps_group_sizes() {
        let a = addr(0xA0);
        let b = addr(0xB0);
        let x = [addr(0x01), addr(0x02), addr(0x03)];
        let y = [addr(0x04), addr(0x05)];
        let exchanges = [Exchange::Pancake, Exchange::Pancake2, Exchange::Ape];

        let groups = make_missing_steps(a, b, &x, &y, &exchanges);

        // m = 3, n = 2, k = 3.
        assert_eq!(groups.ab.len(), 3);
        assert_eq!(groups.ax.len(), 9);
        assert_eq!(groups.ay.len(), 6);
        assert_eq!(groups.xb.len(), 9);
        assert_eq!(groups.yb.len(), 6);
        assert_eq!(groups.xy.len(), 18);
    }

    #[test]
    fn test_make_missing_steps_skips_shared_intermediate() {
        let a = addr(0xA0);
        let b = addr(0xB0);
        // The same token shows up on both intermediate sides; the x==y
        // pairs must contribute nothing to the cartesian group.
        let shared = [addr(0x01)];
        let exchanges = [Exchange::Pancake];

        let groups = make_missing_steps(a, b, &shared, &shared, &exchanges);

        assert_eq!(groups.ax.len(), 1);
        assert_eq!(groups.yb.len(), 1);
        assert!(groups.xy.is_empty());
    }

    #[test]
    fn test_from_confirmed_assigns_reserve_sides() {
        let lower = addr(0x01);
        let upper = addr(0x02);
        let pool = ConfirmedPool {
            address: addr(0xAA),
            reserve0: U256::from(100),
            reserve1: U256::from(50),
        };

        // Begin is the lexicographically smaller token: it owns reserve0.
        let forward = RouteStep::from_confirmed(
            &MissingStep {
                address: addr(0xAA),
                begin: lower,
                end: upper,
                creator: addr(0xFE),
            },
            &pool,
        );
        assert_eq!(forward.begin_reserve, Some(U256::from(100)));
        assert_eq!(forward.end_reserve, Some(U256::from(50)));

        // Reversed direction swaps the sides.
        let backward = RouteStep::from_confirmed(
            &MissingStep {
                address: addr(0xAA),
                begin: upper,
                end: lower,
                creator: addr(0xFE),
            },
            &pool,
        );
        assert_eq!(backward.begin_reserve, Some(U256::from(50)));
        assert_eq!(backward.end_reserve, Some(U256::from(100)));
        assert!(backward.has_reserves());
    }

    #[test]
    fn test_confirm_steps_drops_missing_pools() {
        let missing = vec![
            MissingStep {
                address: addr(0xAA),
                begin: addr(0x01),
                end: addr(0x02),
                creator: addr(0xFE),
            },
            MissingStep {
                address: addr(0xAB),
                begin: addr(0x02),
                end: addr(0x03),
                creator: addr(0xFE),
            },
        ];
        let pools = confirmed_pools(&[(0xAB, 7, 9)]);

        let confirmed = confirm_steps(&missing, &pools);

        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].address, addr(0xAB));
        assert!(confirmed[0].has_reserves());
    }
}
