//! The Cartographer: fallback candidate pool graph
//!
//! Responsible for:
//! - Holding the per-chain base token baskets and pair factories
//! - Deriving pool addresses from token pairs
//! - Synthesizing a static pool set when no live source is available

mod deriver;
mod graph;
mod registry;
mod static_pools;

pub use deriver::{Create2PairDeriver, PoolAddressDeriver};
pub use graph::CandidateGraph;
pub use registry::{
    default_entries, default_venue, ChainEntry, ChainRegistry, PairVenue, SPOOKY_FACTORY,
    SPOOKY_FACTORY_FANTOM, SPOOKY_INIT_CODE_HASH, V2_FACTORY_MAINNET, V2_FACTORY_SEPOLIA,
    V2_INIT_CODE_HASH,
};
pub use static_pools::{
    candidate_pairs, synthesize, PoolSource, StaticPoolProvider, SyntheticPoolRecord, TokenRef,
};
