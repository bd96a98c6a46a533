use alloy::primitives::{address, Address};

/// Default endpoint of the pool listing service
pub const SWAP_ENDPOINT_DEFAULT: &str = "https://api.lz.finance/swap/";

/// Default endpoint of a public BNB Smart Chain node
pub const NODE_ENDPOINT_DEFAULT: &str = "https://bsc-dataseed2.binance.org/";

/// Address of the deployed reserve helper contract
pub const CONTRACT_HELPER_DEFAULT: Address =
    address!("0xe7c43509fd53f9834eedd0635db826cbfbc8ad32");
