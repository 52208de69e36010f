//! Per-chain gas cost tables
//!
//! One `GasCostTable` per chain, all integer gas units. `GasCostTables` is only
//! constructible when every `ChainId` has a table.

use alloy_primitives::U256;
use std::collections::HashMap;

use crate::chains::ChainId;
use crate::error::ConfigError;

// ============================================
// STANDARD VALUES
// ============================================

pub const STANDARD_BASE_SWAP: u64 = 2_000;
pub const STANDARD_PER_HOP: u64 = 80_000;
pub const STANDARD_PER_INIT_TICK: u64 = 31_000;
pub const STANDARD_SINGLE_HOP_OVERHEAD: u64 = 15_000;
pub const STANDARD_NATIVE_WRAP: u64 = 27_938;
pub const STANDARD_NATIVE_UNWRAP: u64 = 36_000;

/// Arbitrum's L2 execution is priced higher per swap
pub const ARBITRUM_BASE_SWAP: u64 = 5_000;

/// BitTorrent Chain runs at roughly 10x mainnet gas across the board, plus a
/// flat surcharge on every token path
pub const BITTORRENT_MULTIPLIER: u64 = 10;
pub const BITTORRENT_FLAT_TOKEN_OVERHEAD: u64 = 1_500_000;

// ============================================
// TABLE
// ============================================

/// Gas constants for one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasCostTable {
    pub base_swap: U256,
    pub per_hop: U256,
    pub per_init_tick: U256,
    pub single_hop_overhead: U256,
    pub native_wrap_overhead: U256,
    pub native_unwrap_overhead: U256,
    /// Added to every token path on this chain, independent of its tokens
    pub flat_token_overhead: U256,
}

impl GasCostTable {
    /// Values shared by most EVM chains
    pub fn standard() -> Self {
        Self {
            base_swap: U256::from(STANDARD_BASE_SWAP),
            per_hop: U256::from(STANDARD_PER_HOP),
            per_init_tick: U256::from(STANDARD_PER_INIT_TICK),
            single_hop_overhead: U256::from(STANDARD_SINGLE_HOP_OVERHEAD),
            native_wrap_overhead: U256::from(STANDARD_NATIVE_WRAP),
            native_unwrap_overhead: U256::from(STANDARD_NATIVE_UNWRAP),
            flat_token_overhead: U256::ZERO,
        }
    }

    fn arbitrum() -> Self {
        Self {
            base_swap: U256::from(ARBITRUM_BASE_SWAP),
            ..Self::standard()
        }
    }

    fn bittorrent() -> Self {
        let x = U256::from(BITTORRENT_MULTIPLIER);
        let standard = Self::standard();
        Self {
            base_swap: standard.base_swap * x,
            per_hop: standard.per_hop * x,
            per_init_tick: standard.per_init_tick * x,
            single_hop_overhead: standard.single_hop_overhead * x,
            native_wrap_overhead: standard.native_wrap_overhead * x,
            native_unwrap_overhead: standard.native_unwrap_overhead * x,
            flat_token_overhead: U256::from(BITTORRENT_FLAT_TOKEN_OVERHEAD),
        }
    }

    /// Built-in table for `chain`. Exhaustive on purpose: a new chain does not
    /// compile until it is given a table.
    pub fn default_for(chain: ChainId) -> Self {
        match chain {
            ChainId::ArbitrumOne | ChainId::ArbitrumGoerli => Self::arbitrum(),
            ChainId::BitTorrentMainnet => Self::bittorrent(),
            ChainId::Mainnet
            | ChainId::Goerli
            | ChainId::Sepolia
            | ChainId::Optimism
            | ChainId::OptimismGoerli
            | ChainId::Polygon
            | ChainId::PolygonMumbai
            | ChainId::Celo
            | ChainId::CeloAlfajores
            | ChainId::Gnosis
            | ChainId::Moonbeam
            | ChainId::Bnb
            | ChainId::Avalanche
            | ChainId::Base
            | ChainId::BaseGoerli
            | ChainId::Fantom
            | ChainId::Eon
            | ChainId::BeraTestnet
            | ChainId::SonicTestnet
            | ChainId::GoatTestnet => Self::standard(),
        }
    }
}

/// Built-in tables for every chain
pub fn default_tables() -> HashMap<ChainId, GasCostTable> {
    ChainId::ALL
        .into_iter()
        .map(|chain| (chain, GasCostTable::default_for(chain)))
        .collect()
}

// ============================================
// TOTAL TABLE SET
// ============================================

/// A `GasCostTable` for every chain
#[derive(Debug, Clone)]
pub struct GasCostTables {
    // Indexed by `ChainId::index()`
    tables: Vec<GasCostTable>,
}

impl GasCostTables {
    pub fn new(mut tables: HashMap<ChainId, GasCostTable>) -> Result<Self, ConfigError> {
        let dense = ChainId::ALL
            .into_iter()
            .map(|chain| tables.remove(&chain).ok_or(ConfigError::MissingGasTable(chain)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tables: dense })
    }

    pub fn with_defaults() -> Self {
        Self {
            tables: ChainId::ALL.into_iter().map(GasCostTable::default_for).collect(),
        }
    }

    pub fn get(&self, chain: ChainId) -> &GasCostTable {
        &self.tables[chain.index()]
    }
}

impl Default for GasCostTables {
    fn default() -> Self {
        Self::with_defaults()
    }
}
