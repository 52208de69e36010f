//! Chain Token Registry
//!
//! Per-chain basket of base tokens plus the constant-product pair factory used
//! to derive pool addresses on that chain. Built once, validated to cover every
//! `ChainId`, then shared read-only.

use alloy_primitives::{address, b256, Address, B256};
use std::collections::{HashMap, HashSet};

use crate::chains::ChainId;
use crate::error::ConfigError;
use crate::tokens::{self, Token};

// ============================================
// PAIR VENUE
// ============================================

/// Canonical V2 factory on mainnet and the Goerli testnet
pub const V2_FACTORY_MAINNET: Address = address!("5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// V2 factory on Sepolia
pub const V2_FACTORY_SEPOLIA: Address = address!("F62c03E08ada871A0bEb309762E260a7a6a880E6");

/// keccak256 of the V2 pair creation code
pub const V2_INIT_CODE_HASH: B256 =
    b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

// V2 factories on L2s and sidechains, all sharing `V2_INIT_CODE_HASH`
pub const V2_FACTORY_OPTIMISM: Address = address!("0c3c1c532F1e39EdF36BE9Fe0bE1410313E074Bf");
pub const V2_FACTORY_ARBITRUM: Address = address!("f1D7CC64Fb4452F05c498126312eBE29f30Fbcf9");
pub const V2_FACTORY_POLYGON_AVALANCHE: Address =
    address!("9e5A52f57b3038F1B8EeE45F28b3C1967e22799C");
pub const V2_FACTORY_BASE_BNB: Address = address!("8909Dc15e40173Ff4699343b6eB8132c65e18eC6");

/// SpookySwap V2 factory on Fantom
pub const SPOOKY_FACTORY_FANTOM: Address = address!("152eE697f2E276fA89E96742e9bB9aB1F2E61bE3");

/// SpookySwap V2 factory on BitTorrent, EON and the testnets
pub const SPOOKY_FACTORY: Address = address!("EE4bC42157cf65291Ba2FE839AE127e3Cc76f741");

/// keccak256 of the SpookySwap pair creation code
pub const SPOOKY_INIT_CODE_HASH: B256 =
    b256!("cdf2deca40a0bd56de8e3ce5c7df6727e5b1bf2ac96f283fa9c4b3e6b42ea9d2");

/// Deployment parameters of a pair factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairVenue {
    pub factory: Address,
    pub init_code_hash: B256,
}

impl PairVenue {
    pub const fn new(factory: Address, init_code_hash: B256) -> Self {
        Self {
            factory,
            init_code_hash,
        }
    }
}

/// Everything the registry knows about one chain
#[derive(Debug, Clone, Default)]
pub struct ChainEntry {
    /// Tokens most likely to have liquidity against anything else. May be empty.
    pub bases: Vec<Token>,

    /// `None` when the pair protocol is not deployed on this chain. Synthesis
    /// fails with `DeriveError::NoPairFactory` if it has a pair to derive here.
    pub venue: Option<PairVenue>,
}

impl ChainEntry {
    pub fn new(bases: Vec<Token>, venue: Option<PairVenue>) -> Self {
        Self { bases, venue }
    }

    /// No base tokens and no venue
    pub fn undeployed() -> Self {
        Self::default()
    }
}

// ============================================
// REGISTRY
// ============================================

/// Immutable, total mapping from chain to its `ChainEntry`
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    // Indexed by `ChainId::index()`; length is always `ChainId::ALL.len()`
    entries: Vec<ChainEntry>,
}

impl ChainRegistry {
    /// Build a registry, rejecting any gap or inconsistency
    pub fn new(mut entries: HashMap<ChainId, ChainEntry>) -> Result<Self, ConfigError> {
        let mut dense = Vec::with_capacity(ChainId::ALL.len());

        for chain in ChainId::ALL {
            let entry = entries
                .remove(&chain)
                .ok_or(ConfigError::MissingChain(chain))?;
            Self::validate_entry(chain, &entry)?;
            dense.push(entry);
        }

        Ok(Self { entries: dense })
    }

    fn validate_entry(chain: ChainId, entry: &ChainEntry) -> Result<(), ConfigError> {
        if !entry.bases.is_empty() && entry.venue.is_none() {
            return Err(ConfigError::MissingVenue { chain });
        }

        let mut seen = HashSet::new();
        for token in &entry.bases {
            if token.chain != chain {
                return Err(ConfigError::ForeignBaseToken {
                    chain,
                    token: token.address,
                    token_chain: token.chain,
                });
            }
            if !seen.insert(token.address) {
                return Err(ConfigError::DuplicateBaseToken {
                    chain,
                    token: token.address,
                });
            }
        }

        Ok(())
    }

    /// Registry with the built-in deployment data
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(default_entries())
    }

    pub fn entry(&self, chain: ChainId) -> &ChainEntry {
        &self.entries[chain.index()]
    }

    pub fn bases(&self, chain: ChainId) -> &[Token] {
        &self.entry(chain).bases
    }

    pub fn venue(&self, chain: ChainId) -> Option<&PairVenue> {
        self.entry(chain).venue.as_ref()
    }

    pub fn is_base(&self, token: &Token) -> bool {
        self.bases(token.chain).contains(token)
    }

    /// Iterate `(chain, entry)` in `ChainId::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &ChainEntry)> {
        ChainId::ALL.into_iter().zip(self.entries.iter())
    }
}

/// Pair factory for `chain`, if the protocol is deployed there
pub fn default_venue(chain: ChainId) -> Option<PairVenue> {
    let (factory, init_code_hash) = match chain {
        ChainId::Mainnet | ChainId::Goerli => (V2_FACTORY_MAINNET, V2_INIT_CODE_HASH),
        ChainId::Sepolia => (V2_FACTORY_SEPOLIA, V2_INIT_CODE_HASH),
        ChainId::Optimism => (V2_FACTORY_OPTIMISM, V2_INIT_CODE_HASH),
        ChainId::ArbitrumOne => (V2_FACTORY_ARBITRUM, V2_INIT_CODE_HASH),
        ChainId::Polygon | ChainId::Avalanche => (V2_FACTORY_POLYGON_AVALANCHE, V2_INIT_CODE_HASH),
        ChainId::Base | ChainId::Bnb => (V2_FACTORY_BASE_BNB, V2_INIT_CODE_HASH),
        ChainId::Fantom => (SPOOKY_FACTORY_FANTOM, SPOOKY_INIT_CODE_HASH),
        ChainId::BitTorrentMainnet
        | ChainId::Eon
        | ChainId::BeraTestnet
        | ChainId::SonicTestnet
        | ChainId::GoatTestnet => (SPOOKY_FACTORY, SPOOKY_INIT_CODE_HASH),
        ChainId::OptimismGoerli
        | ChainId::ArbitrumGoerli
        | ChainId::PolygonMumbai
        | ChainId::Celo
        | ChainId::CeloAlfajores
        | ChainId::Gnosis
        | ChainId::Moonbeam
        | ChainId::BaseGoerli => return None,
    };

    Some(PairVenue::new(factory, init_code_hash))
}

/// Built-in entries for every chain
pub fn default_entries() -> HashMap<ChainId, ChainEntry> {
    ChainId::ALL
        .into_iter()
        .map(|chain| {
            let entry = match default_venue(chain) {
                Some(venue) => ChainEntry::new(tokens::default_bases(chain), Some(venue)),
                None => ChainEntry::undeployed(),
            };
            (chain, entry)
        })
        .collect()
}
