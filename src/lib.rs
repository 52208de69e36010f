//! Route Graph
//!
//! Two pieces of an AMM route-pricing engine:
//! - `cartographer`: a deterministic fallback pool set built from per-chain
//!   base tokens when no live indexer is available
//! - `gas`: a per-chain gas cost model for multi-hop swap routes

pub mod cartographer;
pub mod chains;
pub mod config;
pub mod error;
pub mod gas;
pub mod tokens;

pub use cartographer::{
    synthesize, CandidateGraph, ChainRegistry, Create2PairDeriver, PoolAddressDeriver, PoolSource,
    StaticPoolProvider, SyntheticPoolRecord,
};
pub use chains::ChainId;
pub use config::Config;
pub use error::{ConfigError, DeriveError};
pub use gas::{GasModel, RouteCostBreakdown, RouteShape};
pub use tokens::{Currency, Token};
