//! The closed registry of supported exchanges and the deterministic
//! derivation of their pool addresses.
//!
//! Every exchange here deploys constant-product pools through a factory
//! whose CREATE2 scheme fixes the pool address from the factory address,
//! the sorted token pair and the pool init code hash. Knowing the three
//! constants is enough to compute where a pool *would* live without asking
//! the chain whether it exists.

use std::str::FromStr;

use alloy::primitives::{address, b256, keccak256, Address, B256};
use derive_more::Display;

use crate::error::Error;

/// The exchanges a route query considers unless the caller names its own
/// set.
pub const DEFAULT_EXCHANGES: [Exchange; 9] = [
    Exchange::Pancake,
    Exchange::Pancake2,
    Exchange::Jul,
    Exchange::Ape,
    Exchange::Bi,
    Exchange::Mdex,
    Exchange::Cafe,
    Exchange::Jet,
    Exchange::Baby,
];

/// A factory-style exchange on BNB Smart Chain.
///
/// The factory address and init code hash of each variant are protocol
/// constants resolved by exhaustive match, so adding an exchange is a
/// compile-checked extension point.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Exchange {
    /// `PancakeSwap` V1
    #[display("pancake")]
    Pancake,
    /// `PancakeSwap` V2
    #[display("pancake2")]
    Pancake2,
    /// `BakerySwap`
    #[display("bakery")]
    Bakery,
    /// `JulSwap`
    #[display("jul")]
    Jul,
    /// `ApeSwap`
    #[display("ape")]
    Ape,
    /// `BurgerSwap`
    #[display("burger")]
    Burger,
    /// `BiSwap`
    #[display("bi")]
    Bi,
    /// Mdex
    #[display("mdex")]
    Mdex,
    /// `CafeSwap`
    #[display("cafe")]
    Cafe,
    /// `JetSwap`
    #[display("jet")]
    Jet,
    /// `BabySwap`
    #[display("baby")]
    Baby,
    /// `OpenOcean`
    #[display("openocean")]
    OpenOcean,
}

impl Exchange {
    /// Address of the factory contract that deploys this exchange's pools.
    #[must_use]
    pub const fn factory(self) -> Address {
        match self {
            Self::Pancake => address!("0xbcfccbde45ce874adcb698cc183debcf17952812"),
            Self::Pancake2 => address!("0xca143ce32fe78f1f7019d7d551a6402fc5350c73"),
            Self::Bakery => address!("0x01bf7c66c6bd861915cdaae475042d3c4bae16a7"),
            Self::Jul => address!("0x553990f2cba90272390f62c5bdb1681ffc899675"),
            Self::Ape => address!("0x0841bd0b734e4f5853f0dd8d7ea041c241fb0da6"),
            Self::Burger => address!("0x8a1e9d3aebbbd5ba2a64d3355a48dd5e9b511256"),
            Self::Bi => address!("0x858e3312ed3a876947ea49d572a7c42de08af7ee"),
            Self::Mdex => address!("0x3cd1c46068daea5ebb0d3f55f6915b10648062b8"),
            Self::Cafe => address!("0x3e708fdbe3ada63fc94f8f61811196f1302137ad"),
            Self::Jet => address!("0x0eb58e5c8aa63314ff5547289185cc4583dfcbd5"),
            Self::Baby => address!("0x86407bea2078ea5f5eb5a52b2caa963bc1f889da"),
            Self::OpenOcean => address!("0xd76d8c2a7ca0a1609aea0b9b5017b3f7782891bf"),
        }
    }

    /// Hash of the pool contract init code the factory deploys with.
    #[must_use]
    pub const fn init_code_hash(self) -> B256 {
        match self {
            Self::Pancake => {
                b256!("0xd0d4c4cd0848c93cb4fd1f498d7013ee6bfb25783ea21593d5834f5d250ece66")
            }
            Self::Pancake2 => {
                b256!("0x00fb7f630766e6a796048ea87d01acd3068e8ff67d078148a3fa3f4a84f69bd5")
            }
            Self::Bakery => {
                b256!("0xe2e87433120e32c4738a7d8f3271f3d872cbe16241d67537139158d90bac61d3")
            }
            Self::Jul => {
                b256!("0xb1e98e21a5335633815a8cfb3b580071c2e4561c50afd57a8746def9ed890b18")
            }
            Self::Ape => {
                b256!("0xf4ccce374816856d11f00e4069e7cada164065686fbef53c6167a63ec2fd8c5b")
            }
            Self::Burger => {
                b256!("0x9e2f28ebeccb25f4ead99c3f563bb6a201e2014a501d90dd0a9382bb1f5f4d0e")
            }
            Self::Bi => {
                b256!("0xfea293c909d87cd4153593f077b76bb7e94340200f4ee84211ae8e4f9bd7ffdf")
            }
            Self::Mdex => {
                b256!("0x0d994d996174b05cfc7bed897dc1b20b4c458fc8d64fe98bc78b3c64a6b4d093")
            }
            Self::Cafe => {
                b256!("0x90bcdb5d0bf0e8db3852b0b7d7e05cc8f7c6eb6d511213c5ba02d1d1dbeda8d3")
            }
            Self::Jet => {
                b256!("0x3125d0a15fa7af49ce234ba1cf5f931bad0504242e0e1ee9fcd7d1d7aa88c651")
            }
            Self::Baby => {
                b256!("0x48c8bec5512d397a5d512fbb7d83d515e7b6d91e9838730bd1aa1b16575da7f5")
            }
            Self::OpenOcean => {
                b256!("0xe7da666f616ba3bdb18c6908b22d556a41659bdd652762c246b8d1fa4f7506b4")
            }
        }
    }

    /// Compute the address this exchange's factory would assign to the pool
    /// of `token_a` and `token_b`, without any network call.
    ///
    /// The pair is sorted by raw byte order before hashing, so the result
    /// does not depend on argument order. Equal tokens are a caller bug and
    /// must be rejected upstream; the derivation itself stays total.
    #[must_use]
    pub fn pool_address(self, token_a: Address, token_b: Address) -> Address {
        let (lower, upper) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        let mut pair = [0u8; 40];
        pair[..20].copy_from_slice(lower.as_slice());
        pair[20..].copy_from_slice(upper.as_slice());
        let salt = keccak256(pair);
        self.factory().create2(salt, self.init_code_hash())
    }
}

impl FromStr for Exchange {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        match value {
            "pancake" => Ok(Self::Pancake),
            "pancake2" => Ok(Self::Pancake2),
            "bakery" => Ok(Self::Bakery),
            "jul" => Ok(Self::Jul),
            "ape" => Ok(Self::Ape),
            "burger" => Ok(Self::Burger),
            "bi" => Ok(Self::Bi),
            "mdex" => Ok(Self::Mdex),
            "cafe" => Ok(Self::Cafe),
            "jet" => Ok(Self::Jet),
            "baby" => Ok(Self::Baby),
            "openocean" => Ok(Self::OpenOcean),
            other => Err(Error::UnknownExchange(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_address_known_pairs() {
        // Pairs and expected pool addresses confirmed against live BSC
        // factories.
        let token_a = address!("0x16b24a1538e374099c0c99a612d7b35b3526ae78");
        let token_b = address!("0xec90e559b61dee9dc54aaf5086a1085e77fe7185");
        let token_c = address!("0x6ba61fa68bedde4c162b92fe87d7ae67054afc05");

        for (exchange, begin, end, expected) in &[
            (
                Exchange::Pancake,
                token_a,
                token_b,
                address!("0x6e0a2065a267a0d3f8bbb58d38e5507f6743f8e5"),
            ),
            (
                Exchange::Pancake2,
                token_a,
                token_b,
                address!("0xdd84230fad8b42ca0f03054541d207ae29a35bf5"),
            ),
            (
                Exchange::Pancake,
                token_a,
                token_c,
                address!("0x733ee2dbba0913e9fe55d98f88d31a0a98505d38"),
            ),
            (
                Exchange::Pancake2,
                token_a,
                token_c,
                address!("0x19979d298a2720f597189fda8c6e89dbe6fe0cfa"),
            ),
        ] {
            assert_eq!(exchange.pool_address(*begin, *end), *expected);
        }
    }

    #[test]
    fn test_pool_address_order_independent() {
        let token_a = address!("0x16b24a1538e374099c0c99a612d7b35b3526ae78");
        let token_b = address!("0xec90e559b61dee9dc54aaf5086a1085e77fe7185");

        for exchange in [
            Exchange::Pancake,
            Exchange::Pancake2,
            Exchange::Bakery,
            Exchange::Jul,
            Exchange::Ape,
            Exchange::Burger,
            Exchange::Bi,
            Exchange::Mdex,
            Exchange::Cafe,
            Exchange::Jet,
            Exchange::Baby,
            Exchange::OpenOcean,
        ] {
            assert_eq!(
                exchange.pool_address(token_a, token_b),
                exchange.pool_address(token_b, token_a),
            );
        }
    }

    #[test]
    fn test_exchanges_derive_distinct_addresses() {
        let token_a = address!("0x16b24a1538e374099c0c99a612d7b35b3526ae78");
        let token_b = address!("0xec90e559b61dee9dc54aaf5086a1085e77fe7185");

        let mut addresses: Vec<Address> = DEFAULT_EXCHANGES
            .iter()
            .map(|exchange| exchange.pool_address(token_a, token_b))
            .collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), DEFAULT_EXCHANGES.len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pancake2".parse::<Exchange>().unwrap(), Exchange::Pancake2);
        assert_eq!("mdex".parse::<Exchange>().unwrap(), Exchange::Mdex);

        let err = "sushi".parse::<Exchange>().unwrap_err();
        assert_eq!(err.to_string(), "unknown exchange: sushi");
    }

    #[test]
    fn test_display_round_trip() {
        for exchange in DEFAULT_EXCHANGES {
            assert_eq!(
                exchange.to_string().parse::<Exchange>().unwrap(),
                exchange
            );
        }
    }
}
