//! Joining confirmed steps into linked, deduplicated multi-hop routes.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use alloy::primitives::{keccak256, Address, B256};
use itertools::iproduct;

use super::step::{RouteStep, RouteStepGroups};

/// Substituted for a missing creator when hashing a route identity, so the
/// identity stays stable whether or not the factory is known.
const NO_CREATOR: Address = Address::new([0xff; 20]);

/// An ordered chain of confirmed steps carrying value from the source token
/// to the target token.
///
/// Routes compare and hash by their content identity, so two routes built
/// from different step objects but describing the same pool sequence are
/// equal. A route is never mutated after assembly.
#[derive(Clone, Debug)]
pub struct Route {
    /// The hops, in traversal order
    steps: Vec<RouteStep>,
}

impl Route {
    /// Wrap a step sequence into a route.
    #[must_use]
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }

    /// The hops, in traversal order.
    #[must_use]
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Number of hops.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    /// 32-byte content identity: the digest, in step order, of each step's
    /// begin, end and creator (the all-ones address stands in for an
    /// unknown creator).
    #[must_use]
    pub fn identity(&self) -> B256 {
        let mut data = Vec::with_capacity(self.steps.len() * 60);
        for step in &self.steps {
            data.extend_from_slice(step.begin.as_slice());
            data.extend_from_slice(step.end.as_slice());
            data.extend_from_slice(step.creator.unwrap_or(NO_CREATOR).as_slice());
        }
        keccak256(data)
    }

    /// Whether every consecutive step pair hands over at the same token.
    /// Routes of one step are trivially linked.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.steps
            .windows(2)
            .all(|pair| pair[0].end == pair[1].begin)
    }

    /// A route crossing the same pool twice is degenerate.
    fn has_duplicate_pool(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.steps.len());
        self.steps.iter().any(|step| !seen.insert(step.address))
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Join the confirmed step groups into every valid route of 1-3 hops.
///
/// 1-hop routes come straight from the direct group; 2-hop routes join the
/// source-to-intermediate groups with their intermediate-to-target
/// counterparts; 3-hop routes chain through both intermediate sides. Only
/// linked combinations survive, routes revisiting a pool are dropped, and
/// duplicates collapse to their first occurrence in discovery order.
#[must_use]
pub fn make_routes(groups: &RouteStepGroups) -> Vec<Route> {
    let mut routes: Vec<Route> = Vec::new();
    routes.extend(
        groups
            .ab
            .iter()
            .map(|step| Route::new(vec![step.clone()])),
    );
    routes.extend(join_two(&groups.ax, &groups.xb));
    routes.extend(join_two(&groups.ay, &groups.yb));
    routes.extend(join_three(&groups.ax, &groups.xy, &groups.yb));

    dedup_routes(routes.into_iter().filter(|route| !route.has_duplicate_pool()))
}

/// Linked 2-hop combinations of `first` and `second`.
fn join_two(first: &[RouteStep], second: &[RouteStep]) -> Vec<Route> {
    iproduct!(first, second)
        .filter(|(s0, s1)| s0.end == s1.begin)
        .map(|(s0, s1)| Route::new(vec![s0.clone(), s1.clone()]))
        .collect()
}

/// Fully connected 3-hop combinations of the three groups.
fn join_three(first: &[RouteStep], middle: &[RouteStep], last: &[RouteStep]) -> Vec<Route> {
    iproduct!(first, middle, last)
        .filter(|(s0, s1, s2)| s0.end == s1.begin && s1.end == s2.begin)
        .map(|(s0, s1, s2)| Route::new(vec![s0.clone(), s1.clone(), s2.clone()]))
        .collect()
}

/// Collapse routes with equal identity; the first occurrence wins and
/// discovery order is preserved.
fn dedup_routes(routes: impl IntoIterator<Item = Route>) -> Vec<Route> {
    let mut seen = HashSet::new();
    routes
        .into_iter()
        .filter(|route| seen.insert(route.identity()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::route::test_helpers::*;

    #[test]
    fn test_one_hop_routes() {
        let groups = RouteStepGroups {
            ab: vec![step(0x10, 0xA0, 0xB0, 100, 50), step(0x11, 0xA0, 0xB0, 30, 70)],
            ..RouteStepGroups::default()
        };

        let routes = make_routes(&groups);

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].hops(), 1);
        assert_eq!(routes[0].steps()[0].address, addr(0x10));
        assert!(routes.iter().all(Route::is_linked));
    }

    #[test]
    fn test_two_hop_routes_keep_only_linked() {
        let groups = RouteStepGroups {
            // a -> x1 and a -> x2.
            ax: vec![step(0x10, 0xA0, 0x01, 100, 200), step(0x11, 0xA0, 0x02, 100, 200)],
            // Only x1 continues to b.
            xb: vec![step(0x12, 0x01, 0xB0, 200, 400)],
            ..RouteStepGroups::default()
        };

        let routes = make_routes(&groups);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hops(), 2);
        assert_eq!(routes[0].steps()[0].address, addr(0x10));
        assert_eq!(routes[0].steps()[1].address, addr(0x12));
    }

    #[test]
    fn test_three_hop_routes_fully_connected() {
        let groups = RouteStepGroups {
            ax: vec![step(0x10, 0xA0, 0x01, 100, 200)],
            xy: vec![
                step(0x11, 0x01, 0x02, 200, 300),
                // Starts at the wrong intermediate; never linked.
                step(0x12, 0x03, 0x02, 200, 300),
            ],
            yb: vec![step(0x13, 0x02, 0xB0, 300, 400)],
            ..RouteStepGroups::default()
        };

        let routes = make_routes(&groups);

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].hops(), 3);
        assert!(routes[0].is_linked());
    }

    #[test]
    fn test_route_with_duplicate_pool_is_dropped() {
        let groups = RouteStepGroups {
            // The same pool address appears on both hops.
            ax: vec![step(0x10, 0xA0, 0x01, 100, 200)],
            xb: vec![step(0x10, 0x01, 0xB0, 200, 400)],
            ..RouteStepGroups::default()
        };

        assert!(make_routes(&groups).is_empty());
    }

    #[test]
    fn test_duplicate_routes_collapse() {
        // The same pool reachable through both intermediate sides produces
        // the same 1-hop content twice at different positions.
        let direct = step(0x10, 0xA0, 0xB0, 100, 50);
        let groups = RouteStepGroups {
            ab: vec![direct.clone(), direct],
            ..RouteStepGroups::default()
        };

        let routes = make_routes(&groups);

        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn test_identity_ignores_reserves() {
        let route_a = route(&[(0x10, 0xA0, 0xB0, 100, 50)]);
        let route_b = route(&[(0x10, 0xA0, 0xB0, 9_000, 5_000)]);

        assert_eq!(route_a.identity(), route_b.identity());
        assert_eq!(route_a, route_b);
    }

    #[test]
    fn test_identity_substitutes_missing_creator() {
        let mut anonymous = step(0x10, 0xA0, 0xB0, 100, 50);
        anonymous.creator = None;
        let mut max_creator = step(0x10, 0xA0, 0xB0, 100, 50);
        max_creator.creator = Some(NO_CREATOR);

        assert_eq!(
            Route::new(vec![anonymous]).identity(),
            Route::new(vec![max_creator]).identity()
        );
    }

    #[test]
    fn test_is_linked() {
        assert!(route(&[(0x10, 0xA0, 0xB0, 1, 1)]).is_linked());
        assert!(route(&[(0x10, 0xA0, 0x01, 1, 1), (0x11, 0x01, 0xB0, 1, 1)]).is_linked());
        assert!(!route(&[(0x10, 0xA0, 0x01, 1, 1), (0x11, 0x02, 0xB0, 1, 1)]).is_linked());
    }
}
