/*!
 * # Hop - Multi-Hop Swap Route Discovery
 *
 * Hop is a client library that discovers candidate multi-hop swap routes
 * between two tokens across the constant-product exchanges of BNB Smart
 * Chain, and ranks them by a depth-discounted liquidity heuristic.
 *
 * ## How a query runs
 *
 * - **Listing lookup**: ask the pool listing service for the best-funded
 *   pools around the source and target tokens
 * - **Candidate enumeration**: derive, purely from factory constants, the
 *   addresses of every pool that could connect the relevant token pairs
 * - **Reserve confirmation**: read actual reserves for the candidates in
 *   one batched contract call, discarding pools that do not exist
 * - **Assembly and ranking**: join confirmed steps into linked 1-3 hop
 *   routes, deduplicate them and sort by estimated liquidity
 *
 * ## Module Structure
 *
 * - `client`: the public route query surface
 * - `exchange`: supported exchanges and deterministic pool addresses
 * - `fraction`: exact rational arithmetic for reserve math
 * - `route`: step enumeration, route assembly and scoring
 * - `pool`, `swap_api`, `helper`: listing data and the two collaborators
 */

/// Route query entry point, configuration and options
pub mod client;
/// Failure taxonomy of the crate
pub mod error;
/// Exchange registry and pool address derivation
pub mod exchange;
/// Exact rational arithmetic for reserve math
pub mod fraction;
/// On-chain reserve helper service
pub mod helper;
/// Pool listings and intermediate token selection
pub mod pool;
/// Route steps, assembly and scoring
pub mod route;
/// Pool listing service client
pub mod swap_api;
/// Utility functions and helpers
pub mod utils;

pub use client::{Client, ClientConfig, RouteQueryOptions};
pub use error::{Error, Result};
pub use exchange::{Exchange, DEFAULT_EXCHANGES};
pub use route::assemble::Route;
pub use route::score::EvaluatedRoute;
pub use route::step::{MissingStep, RouteStep};
