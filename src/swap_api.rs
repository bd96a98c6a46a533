//! HTTP client for the `swap_api` pool listing service.

use std::time::Duration;

use alloy::primitives::Address;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};
use crate::pool::TopReservePools;

/// Default number of pools requested per queried token.
pub const TOP_RESERVE_LIMIT_DEFAULT: usize = 8;

/// Most token addresses accepted by one listing call.
const MAX_QUERY_TOKENS: usize = 16;

/// Client for the pool listing service.
pub struct SwapApi {
    /// Base endpoint of the service
    endpoint: Url,
    /// The HTTP client
    client: Client,
}

impl SwapApi {
    /// Build a client against `endpoint`.
    ///
    /// # Errors
    /// [`Error::Endpoint`] when the underlying HTTP client cannot be
    /// initialized.
    pub fn new(endpoint: Url) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Endpoint {
                status: 0,
                body: e.to_string(),
            })?;
        Ok(Self { endpoint, client })
    }

    /// Call `GET /pool/top-token-reserve` for 1-16 token addresses,
    /// requesting at most `limit` pools per token.
    ///
    /// The service orders entries however it likes; callers re-sort.
    ///
    /// # Errors
    /// * [`Error::Validation`] when the address count is out of range.
    /// * [`Error::Endpoint`] for a non-success status, a transport failure
    ///   (status 0) or a body that fails validation - always carrying the
    ///   status and the raw body or failure message.
    pub async fn pools_by_top_token_reserve(
        &self,
        addresses: &[Address],
        limit: usize,
    ) -> Result<TopReservePools> {
        if addresses.is_empty() || addresses.len() > MAX_QUERY_TOKENS {
            return Err(Error::Validation {
                field: "addresses",
                reason: format!("expect 1..=16 items, got {}", addresses.len()),
            });
        }
        let url = self
            .endpoint
            .join("pool/top-token-reserve")
            .map_err(|e| Error::Endpoint {
                status: 0,
                body: e.to_string(),
            })?;
        let joined = addresses
            .iter()
            .map(|address| format!("{address:#x}"))
            .collect::<Vec<_>>()
            .join(",");
        let limit_value = limit.to_string();

        debug!("swap_api: listing top-reserve pools for {joined}");
        let response = self
            .client
            .get(url)
            .query(&[("a", joined.as_str()), ("l", limit_value.as_str())])
            .send()
            .await
            .map_err(|e| Error::Endpoint {
                status: 0,
                body: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| Error::Endpoint {
            status,
            body: e.to_string(),
        })?;
        if !(200..300).contains(&status) {
            return Err(Error::Endpoint { status, body });
        }
        TopReservePools::from_json(&body).map_err(|message| Error::Endpoint {
            status,
            body: message,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api() -> SwapApi {
        SwapApi::new(Url::parse("https://api.lz.finance/swap/").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_empty_address_list() {
        let err = api()
            .pools_by_top_token_reserve(&[], TOP_RESERVE_LIMIT_DEFAULT)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "addresses: expect 1..=16 items, got 0");
    }

    #[tokio::test]
    async fn test_rejects_too_many_addresses() {
        let addresses: Vec<Address> = (1..=17).map(Address::with_last_byte).collect();

        let err = api()
            .pools_by_top_token_reserve(&addresses, TOP_RESERVE_LIMIT_DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation { field: "addresses", .. }));
    }
}
