//! Builders for route tests: tagged addresses instead of full 20-byte
//! literals keep the scenarios readable.

use alloy::primitives::{Address, U256};

use crate::helper::ConfirmedPools;

use super::assemble::Route;
use super::step::RouteStep;

/// Address with every byte zero except the last.
#[allow(dead_code)]
pub fn addr(tag: u8) -> Address {
    Address::with_last_byte(tag)
}

/// A confirmed step between two tagged tokens.
#[allow(dead_code)]
pub fn step(pool: u8, begin: u8, end: u8, begin_reserve: u64, end_reserve: u64) -> RouteStep {
    RouteStep {
        address: addr(pool),
        begin: addr(begin),
        end: addr(end),
        begin_reserve: Some(U256::from(begin_reserve)),
        end_reserve: Some(U256::from(end_reserve)),
        creator: Some(addr(0xEE)),
    }
}

/// A route from `(pool, begin, end, begin_reserve, end_reserve)` tuples.
#[allow(dead_code)]
pub fn route(steps: &[(u8, u8, u8, u64, u64)]) -> Route {
    Route::new(
        steps
            .iter()
            .map(|&(pool, begin, end, begin_reserve, end_reserve)| {
                step(pool, begin, end, begin_reserve, end_reserve)
            })
            .collect(),
    )
}

/// Confirmed pools from `(pool, reserve0, reserve1)` tuples.
#[allow(dead_code, clippy::unwrap_used)]
pub fn confirmed_pools(pools: &[(u8, u64, u64)]) -> ConfirmedPools {
    ConfirmedPools::from_reserves(
        &pools.iter().map(|&(pool, _, _)| addr(pool)).collect::<Vec<_>>(),
        pools
            .iter()
            .map(|&(_, reserve0, reserve1)| [U256::from(reserve0), U256::from(reserve1)])
            .collect(),
    )
    .unwrap()
}
