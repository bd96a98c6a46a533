//! The route query entry point: configuration, option validation and the
//! end-to-end pipeline.

use alloy::primitives::Address;
use log::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::exchange::{Exchange, DEFAULT_EXCHANGES};
use crate::helper::ReserveHelper;
use crate::pool::{intermediate_tokens, TopReservePools};
use crate::route::assemble::make_routes;
use crate::route::score::{evaluate_and_sort, EvaluatedRoute};
use crate::route::step::{
    confirm_steps, make_missing_steps, MissingStepGroups, RouteStepGroups,
};
use crate::swap_api::{SwapApi, TOP_RESERVE_LIMIT_DEFAULT};
use crate::utils::constants::{
    CONTRACT_HELPER_DEFAULT, NODE_ENDPOINT_DEFAULT, SWAP_ENDPOINT_DEFAULT,
};

/// Endpoints and contract address the client talks to.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Endpoint of the pool listing service
    pub swap_endpoint: Url,
    /// Endpoint of a BNB Smart Chain node
    pub node_endpoint: Url,
    /// Address of the deployed reserve helper contract
    pub helper_address: Address,
}

impl Default for ClientConfig {
    // Both endpoint constants are valid URLs, parsing cannot fail.
    #[allow(clippy::unwrap_used)]
    fn default() -> Self {
        Self {
            swap_endpoint: Url::parse(SWAP_ENDPOINT_DEFAULT).unwrap(),
            node_endpoint: Url::parse(NODE_ENDPOINT_DEFAULT).unwrap(),
            helper_address: CONTRACT_HELPER_DEFAULT,
        }
    }
}

/// Tunables of one route query.
#[derive(Clone, Debug)]
pub struct RouteQueryOptions {
    /// Maximum number of routes returned
    pub limit: usize,
    /// How many intermediate tokens to explore on the source side, 1-16
    pub source_token_quantity: usize,
    /// How many intermediate tokens to explore on the target side, 1-16
    pub target_token_quantity: usize,
    /// Hop-count discount factor in `[0, 1]`; 1 disables the discount
    pub weight: f64,
    /// Exchanges considered when deriving candidate pools
    pub exchanges: Vec<Exchange>,
}

impl Default for RouteQueryOptions {
    fn default() -> Self {
        Self {
            limit: 1,
            source_token_quantity: 1,
            target_token_quantity: 1,
            weight: 1.0,
            exchanges: DEFAULT_EXCHANGES.to_vec(),
        }
    }
}

impl RouteQueryOptions {
    /// Check every option against its declared range.
    fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(Error::Validation {
                field: "limit",
                reason: "expect integer greater or equal 1".to_string(),
            });
        }
        if !(1..=16).contains(&self.source_token_quantity) {
            return Err(Error::Validation {
                field: "source_token_quantity",
                reason: "expect integer in [1, 16]".to_string(),
            });
        }
        if !(1..=16).contains(&self.target_token_quantity) {
            return Err(Error::Validation {
                field: "target_token_quantity",
                reason: "expect integer in [1, 16]".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(Error::Validation {
                field: "weight",
                reason: "expect number in [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

/// Entry point for route discovery.
///
/// Owns the two collaborator services and runs the pipeline: listing
/// lookup, intermediate-token selection, candidate enumeration, on-chain
/// reserve confirmation, route assembly, scoring. The whole pipeline is
/// request-scoped; nothing survives between calls.
pub struct Client {
    /// Pool listing service
    swap_api: SwapApi,
    /// On-chain reserve reader
    helper: ReserveHelper,
}

impl Client {
    /// Build a client from `config`.
    ///
    /// # Errors
    /// * If the HTTP client cannot be initialized
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            swap_api: SwapApi::new(config.swap_endpoint)?,
            helper: ReserveHelper::new(&config.node_endpoint, config.helper_address),
        })
    }

    /// Find the best routes carrying `source` to `target`.
    ///
    /// Returns at most `options.limit` routes of 1-3 hops, ordered by the
    /// liquidity proxy discounted for hop count.
    ///
    /// # Errors
    /// * [`Error::Validation`] before any I/O when `source == target` or an
    ///   option is out of range.
    /// * [`Error::Endpoint`] / [`Error::Rpc`] when a collaborator call
    ///   fails; nothing is retried and no partial result is produced.
    /// * [`Error::MalformedRoute`] if assembly hands scoring an unlinked
    ///   route, which would be a bug here rather than bad input.
    pub async fn get_routes(
        &self,
        source: Address,
        target: Address,
        options: &RouteQueryOptions,
    ) -> Result<Vec<EvaluatedRoute>> {
        options.validate()?;
        if source == target {
            return Err(Error::Validation {
                field: "source and target",
                reason: "expect difference".to_string(),
            });
        }

        let listings = self
            .swap_api
            .pools_by_top_token_reserve(&[source, target], TOP_RESERVE_LIMIT_DEFAULT)
            .await?;
        let steps = self.load_steps(&listings, source, target, options).await?;
        let routes = make_routes(&steps);
        debug!("routes: assembled {} candidates", routes.len());

        let evaluated = evaluate_and_sort(routes, options.weight)?;
        Ok(evaluated.into_iter().take(options.limit).collect())
    }

    /// Select intermediate tokens from the listings, enumerate candidate
    /// pools and confirm them on-chain.
    async fn load_steps(
        &self,
        listings: &TopReservePools,
        source: Address,
        target: Address,
        options: &RouteQueryOptions,
    ) -> Result<RouteStepGroups> {
        let x = intermediate_tokens(listings, source);
        let y = intermediate_tokens(listings, target);
        let x = &x[..x.len().min(options.source_token_quantity)];
        let y = &y[..y.len().min(options.target_token_quantity)];
        debug!(
            "routes: exploring {} source-side and {} target-side intermediates",
            x.len(),
            y.len()
        );

        let missing = make_missing_steps(source, target, x, y, &options.exchanges);
        self.load_route_steps(&missing).await
    }

    /// Fetch reserves for every candidate pool; steps whose pool does not
    /// exist on-chain are excluded from the result.
    async fn load_route_steps(&self, missing: &MissingStepGroups) -> Result<RouteStepGroups> {
        let addresses: Vec<Address> = [
            &missing.ab,
            &missing.ax,
            &missing.ay,
            &missing.xb,
            &missing.yb,
            &missing.xy,
        ]
        .into_iter()
        .flatten()
        .map(|step| step.address)
        .collect();

        let pools = self.helper.get_pools(&addresses).await?;

        Ok(RouteStepGroups {
            ab: confirm_steps(&missing.ab, &pools),
            ax: confirm_steps(&missing.ax, &pools),
            ay: confirm_steps(&missing.ay, &pools),
            xb: confirm_steps(&missing.xb, &pools),
            yb: confirm_steps(&missing.yb, &pools),
            xy: confirm_steps(&missing.xy, &pools),
        })
    }
}
