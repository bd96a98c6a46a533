//! Batch reading of on-chain pool reserves through the helper contract.

use std::collections::HashMap;

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    sol,
};
use log::debug;
use url::Url;

use crate::error::{Error, Result};

sol!(
    #[sol(rpc)]
    "contracts/src/PoolQuery.sol"
);

/// Sentinel the helper contract returns in the first reserve slot of a pool
/// that does not exist on-chain.
pub const POOL_NO_RESERVE: U256 = U256::MAX;

/// Reserves of a pool confirmed to exist on-chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmedPool {
    /// Address of the pool
    pub address: Address,
    /// Reserve of the pool's canonical first token
    pub reserve0: U256,
    /// Reserve of the pool's canonical second token
    pub reserve1: U256,
}

/// Confirmed pools keyed by pool address.
#[derive(Clone, Debug, Default)]
pub struct ConfirmedPools(HashMap<Address, ConfirmedPool>);

impl ConfirmedPools {
    /// Pair up the requested addresses with the returned reserve pairs,
    /// dropping every pool the helper marked nonexistent.
    ///
    /// # Errors
    /// [`Error::Rpc`] when the helper returned a different number of
    /// reserve pairs than addresses requested; same-order correspondence is
    /// the contract, so a mismatch is unrecoverable.
    pub fn from_reserves(addresses: &[Address], reserves: Vec<[U256; 2]>) -> Result<Self> {
        if addresses.len() != reserves.len() {
            return Err(Error::Rpc(format!(
                "expect {} reserve pairs, got {}",
                addresses.len(),
                reserves.len()
            )));
        }
        let mut map = HashMap::with_capacity(addresses.len());
        for (&address, [reserve0, reserve1]) in addresses.iter().zip(reserves) {
            if reserve0 == POOL_NO_RESERVE {
                continue;
            }
            map.insert(
                address,
                ConfirmedPool {
                    address,
                    reserve0,
                    reserve1,
                },
            );
        }
        Ok(Self(map))
    }

    /// The confirmed pool at `address`, if it exists on-chain.
    #[must_use]
    pub fn get(&self, address: Address) -> Option<&ConfirmedPool> {
        self.0.get(&address)
    }

    /// Number of confirmed pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no pool was confirmed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reads pool reserves in one batched call against the helper contract.
pub struct ReserveHelper {
    /// Address of the deployed helper contract
    contract_address: Address,
    /// HTTP provider for the chain node
    provider: RootProvider<Ethereum>,
}

impl ReserveHelper {
    /// Connect to the node at `node_endpoint` and bind the helper contract
    /// at `contract_address`.
    #[must_use]
    pub fn new(node_endpoint: &Url, contract_address: Address) -> Self {
        let provider = ProviderBuilder::new().on_http(node_endpoint.clone());
        Self {
            contract_address,
            provider: (*provider.root()).clone(),
        }
    }

    /// Fetch reserves for `addresses`, keeping only the pools that exist.
    ///
    /// # Errors
    /// [`Error::Rpc`] when the call itself fails or the response pairs do
    /// not line up with the request.
    pub async fn get_pools(&self, addresses: &[Address]) -> Result<ConfirmedPools> {
        let query = PoolQuery::new(self.contract_address, &self.provider);
        let reserves = query
            .getReserves(addresses.to_vec())
            .gas(30_000_000)
            .call()
            .await
            .map_err(|e| Error::Rpc(e.to_string()))?
            ._0;
        let pools = ConfirmedPools::from_reserves(addresses, reserves)?;
        debug!(
            "helper: {} of {} candidate pools exist on-chain",
            pools.len(),
            addresses.len()
        );
        Ok(pools)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::with_last_byte(tag)
    }

    #[test]
    fn test_from_reserves_drops_sentinel_rows() {
        let addresses = [addr(1), addr(2), addr(3)];
        let reserves = vec![
            [U256::from(100), U256::from(50)],
            [POOL_NO_RESERVE, U256::ZERO],
            [U256::from(7), U256::from(9)],
        ];

        let pools = ConfirmedPools::from_reserves(&addresses, reserves).unwrap();

        assert_eq!(pools.len(), 2);
        assert!(pools.get(addr(2)).is_none());
        assert_eq!(
            pools.get(addr(3)).unwrap(),
            &ConfirmedPool {
                address: addr(3),
                reserve0: U256::from(7),
                reserve1: U256::from(9),
            }
        );
    }

    #[test]
    fn test_from_reserves_count_mismatch() {
        let addresses = [addr(1), addr(2)];
        let reserves = vec![[U256::from(1), U256::from(2)]];

        let err = ConfirmedPools::from_reserves(&addresses, reserves).unwrap_err();

        assert_eq!(err.to_string(), "chain endpoint: expect 2 reserve pairs, got 1");
    }

    #[test]
    fn test_sentinel_only_checked_on_first_slot() {
        // A max value in the second slot is an (absurd) reserve, not the
        // nonexistence marker.
        let addresses = [addr(1)];
        let reserves = vec![[U256::from(5), POOL_NO_RESERVE]];

        let pools = ConfirmedPools::from_reserves(&addresses, reserves).unwrap();

        assert_eq!(pools.len(), 1);
    }
}
