//! # Route Module
//!
//! Everything between "which pools might connect these tokens" and "here
//! are the best routes": candidate step enumeration, combinatorial
//! assembly into linked multi-hop routes, and liquidity scoring.

/// Combinatorial joining of confirmed steps into routes
pub mod assemble;
/// Liquidity scoring and ranking
pub mod score;
/// Route steps and missing-step enumeration
pub mod step;
/// Test builders shared by the route tests
mod test_helpers;
