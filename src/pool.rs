//! Pool listings from the top-reserve service and the intermediate-token
//! selection that feeds route enumeration.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, U256};
use serde::Deserialize;

/// One pool entry from the top-reserve listing.
///
/// `address0` and `address1` come back in no guaranteed order; callers must
/// match the side against the token they care about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    /// Address of the pool contract
    pub address: Address,
    /// One of the pool's two tokens
    pub address0: Address,
    /// The pool's other token
    pub address1: Address,
    /// The factory that deployed the pool
    pub creator: Address,
    /// Reserve held on the `address0` side
    pub reserve0: U256,
    /// Reserve held on the `address1` side
    pub reserve1: U256,
}

/// Wire form of a pool entry: six hex-encoded string fields.
#[derive(Deserialize)]
struct RawPool {
    /// Pool contract address, `0x` + 40 hex digits
    address: String,
    /// First token address
    address0: String,
    /// Second token address
    address1: String,
    /// Deploying factory address
    creator: String,
    /// Heximal reserve on the `address0` side
    reserve0: String,
    /// Heximal reserve on the `address1` side
    reserve1: String,
}

impl RawPool {
    /// Validate every field and produce the typed pool.
    fn into_pool(self) -> Result<Pool, String> {
        Ok(Pool {
            address: parse_address(&self.address).map_err(|e| format!("address: {e}"))?,
            address0: parse_address(&self.address0).map_err(|e| format!("address0: {e}"))?,
            address1: parse_address(&self.address1).map_err(|e| format!("address1: {e}"))?,
            creator: parse_address(&self.creator).map_err(|e| format!("creator: {e}"))?,
            reserve0: parse_reserve(&self.reserve0).map_err(|e| format!("reserve0: {e}"))?,
            reserve1: parse_reserve(&self.reserve1).map_err(|e| format!("reserve1: {e}"))?,
        })
    }
}

/// Parse a strict `0x` + 40 hex digit address.
fn parse_address(value: &str) -> Result<Address, String> {
    if !value.starts_with("0x") || value.len() != 42 {
        return Err("expect heximal 20 bytes".to_string());
    }
    value
        .parse::<Address>()
        .map_err(|_| "expect heximal 20 bytes".to_string())
}

/// Parse a `0x`-prefixed heximal quantity into a 256-bit reserve.
fn parse_reserve(value: &str) -> Result<U256, String> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| "expect heximal".to_string())?;
    U256::from_str_radix(digits, 16).map_err(|_| "expect heximal".to_string())
}

/// Pool listings keyed by the token they were queried for.
///
/// The value of each entry is the list of pools that have the key token on
/// one side, as returned by the listing service.
#[derive(Clone, Debug, Default)]
pub struct TopReservePools(HashMap<Address, Vec<Pool>>);

impl TopReservePools {
    /// Parse and validate a listing-service response body.
    ///
    /// # Errors
    /// Returns the first validation failure as a message; the caller wraps
    /// it into [`crate::error::Error::Endpoint`] together with the response
    /// status.
    pub fn from_json(body: &str) -> Result<Self, String> {
        let raw: HashMap<String, Vec<RawPool>> = serde_json::from_str(body)
            .map_err(|e| format!("expect JSON object of pool lists: {e}"))?;
        let mut map = HashMap::with_capacity(raw.len());
        for (token, pools) in raw {
            let key = parse_address(&token).map_err(|e| format!("{token}: {e}"))?;
            let pools = pools
                .into_iter()
                .enumerate()
                .map(|(index, pool)| {
                    pool.into_pool().map_err(|e| format!("{token}: [{index}]: {e}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            map.insert(key, pools);
        }
        Ok(Self(map))
    }

    /// Build a listing from already-typed entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (Address, Vec<Pool>)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// The pools listed for `token`, if the service returned any.
    #[must_use]
    pub fn get(&self, token: Address) -> Option<&[Pool]> {
        self.0.get(&token).map(Vec::as_slice)
    }
}

/// Candidate intermediate tokens for `token`, best-funded pools first.
///
/// Pools are ranked by descending reserve on the queried token's side (the
/// sort is stable, so ties keep listing order), then the opposite token of
/// each pool is collected in first-seen order. A token absent from the
/// listing yields an empty list; a pool with neither side matching `token`
/// is malformed input and is skipped.
#[must_use]
pub fn intermediate_tokens(pools: &TopReservePools, token: Address) -> Vec<Address> {
    let Some(list) = pools.get(token) else {
        return Vec::new();
    };
    let mut ranked: Vec<&Pool> = list.iter().collect();
    ranked.sort_by(|a, b| reserve_of(b, token).cmp(&reserve_of(a, token)));
    let opposites = ranked.into_iter().filter_map(|pool| {
        if pool.address0 == token {
            Some(pool.address1)
        } else if pool.address1 == token {
            Some(pool.address0)
        } else {
            None
        }
    });
    unique_addresses(opposites)
}

/// Reserve held on `token`'s side of `pool`.
fn reserve_of(pool: &Pool, token: Address) -> U256 {
    if pool.address0 == token {
        pool.reserve0
    } else {
        pool.reserve1
    }
}

/// Deduplicate by address equality, keeping first-seen order.
#[must_use]
pub fn unique_addresses(addresses: impl IntoIterator<Item = Address>) -> Vec<Address> {
    let mut seen = HashSet::new();
    addresses
        .into_iter()
        .filter(|address| seen.insert(*address))
        .collect()
}
