//! Configuration
//!
//! Defaults are built in. A TOML file (path in `ROUTEGRAPH_CONFIG`) can add or
//! replace base token baskets, pair factories, gas table values and expensive
//! token surcharges per chain. Everything is validated when the registry and
//! gas model are built, before any query runs.
//!
//! ```toml
//! chain = "fantom"
//!
//! [chains.fantom]
//! factory = "0x..."
//! init_code_hash = "0x..."
//! bases = [{ address = "0x21be370D5312f44cB42ce377BC9b8a0cEF1A4C83", decimals = 18, symbol = "WFTM" }]
//!
//! [gas.bittorrent]
//! per_hop = 750000
//!
//! [[expensive_tokens]]
//! chain = "mainnet"
//! address = "0x..."
//! surcharge = 90000
//! ```

use alloy_primitives::{Address, B256, U256};
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::cartographer::{default_entries, ChainEntry, ChainRegistry, PairVenue, V2_INIT_CODE_HASH};
use crate::chains::ChainId;
use crate::error::ConfigError;
use crate::gas::{default_tables, ExpensiveTokenTable, GasCostTable, GasCostTables, GasModel};
use crate::tokens::Token;

// ============================================
// CONFIG SECTIONS
// ============================================

/// A token as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

fn default_decimals() -> u8 {
    18
}

/// Replaces parts of one chain's registry entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainOverride {
    /// Mark the pair protocol as not deployed; clears bases and venue
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_code_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bases: Option<Vec<TokenConfig>>,
}

/// Replaces individual values of one chain's gas table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasOverride {
    pub base_swap: Option<u64>,
    pub per_hop: Option<u64>,
    pub per_init_tick: Option<u64>,
    pub single_hop_overhead: Option<u64>,
    pub native_wrap_overhead: Option<u64>,
    pub native_unwrap_overhead: Option<u64>,
    pub flat_token_overhead: Option<u64>,
}

impl GasOverride {
    fn apply(&self, table: &mut GasCostTable) {
        let fields = [
            (self.base_swap, &mut table.base_swap),
            (self.per_hop, &mut table.per_hop),
            (self.per_init_tick, &mut table.per_init_tick),
            (self.single_hop_overhead, &mut table.single_hop_overhead),
            (self.native_wrap_overhead, &mut table.native_wrap_overhead),
            (self.native_unwrap_overhead, &mut table.native_unwrap_overhead),
            (self.flat_token_overhead, &mut table.flat_token_overhead),
        ];

        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = U256::from(value);
            }
        }
    }
}

/// Additional token with an expensive transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensiveTokenEntry {
    pub chain: String,
    pub address: String,
    pub surcharge: u64,
}

// ============================================
// MAIN CONFIGURATION
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain used when a command does not name one
    pub chain: String,

    /// Registry overrides keyed by chain name or numeric id
    pub chains: BTreeMap<String, ChainOverride>,

    /// Gas table overrides keyed by chain name or numeric id
    pub gas: BTreeMap<String, GasOverride>,

    /// Surcharges added on top of the built-in expensive tokens
    pub expensive_tokens: Vec<ExpensiveTokenEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainId::Mainnet.name().to_string(),
            chains: BTreeMap::new(),
            gas: BTreeMap::new(),
            expensive_tokens: Vec::new(),
        }
    }
}

impl Config {
    /// Load from `.env` / environment: `ROUTEGRAPH_CONFIG` points at an optional
    /// TOML file, `CHAIN` overrides the default chain.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match env::var("ROUTEGRAPH_CONFIG") {
            Ok(path) => {
                debug!("Loading config from {}", path);
                Self::from_file(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(chain) = env::var("CHAIN") {
            config.chain = chain;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn chain_id(&self) -> Result<ChainId, ConfigError> {
        self.chain.parse()
    }

    /// Built-in registry with this config's overrides applied
    pub fn build_registry(&self) -> Result<ChainRegistry, ConfigError> {
        let mut entries = default_entries();

        for (key, over) in &self.chains {
            let chain: ChainId = key.parse()?;
            let current = entries.remove(&chain).unwrap_or_default();
            entries.insert(chain, merge_chain(chain, current, over)?);
        }

        ChainRegistry::new(entries)
    }

    /// Built-in gas model with this config's overrides applied
    pub fn build_gas_model(&self) -> Result<GasModel, ConfigError> {
        let mut tables: HashMap<ChainId, GasCostTable> = default_tables();

        for (key, over) in &self.gas {
            let chain: ChainId = key.parse()?;
            let table = tables
                .get_mut(&chain)
                .ok_or(ConfigError::MissingGasTable(chain))?;
            over.apply(table);
        }

        let mut expensive = ExpensiveTokenTable::with_defaults();
        for entry in &self.expensive_tokens {
            let chain: ChainId = entry.chain.parse()?;
            let address = parse_address("expensive_tokens.address", &entry.address)?;
            expensive.insert(chain, address, U256::from(entry.surcharge));
        }

        Ok(GasModel::new(GasCostTables::new(tables)?, expensive))
    }

    /// Check that everything parses and the resulting tables are total
    pub fn validate(&self) -> Result<()> {
        self.chain_id()?;
        self.build_registry()?;
        self.build_gas_model()?;
        Ok(())
    }
}

fn merge_chain(chain: ChainId, current: ChainEntry, over: &ChainOverride) -> Result<ChainEntry, ConfigError> {
    if over.disabled {
        return Ok(ChainEntry::undeployed());
    }

    let factory = over
        .factory
        .as_deref()
        .map(|s| parse_address(&format!("chains.{}.factory", chain), s))
        .transpose()?;
    let init_code_hash = over
        .init_code_hash
        .as_deref()
        .map(|s| {
            B256::from_str(s).map_err(|_| ConfigError::InvalidValue {
                field: format!("chains.{}.init_code_hash", chain),
                reason: format!("not a 32-byte hex value: {}", s),
            })
        })
        .transpose()?;

    let venue = match (factory, init_code_hash, current.venue) {
        (Some(factory), Some(hash), _) => Some(PairVenue::new(factory, hash)),
        (Some(factory), None, existing) => Some(PairVenue::new(
            factory,
            existing.map_or(V2_INIT_CODE_HASH, |v| v.init_code_hash),
        )),
        (None, Some(hash), Some(existing)) => Some(PairVenue::new(existing.factory, hash)),
        (None, Some(_), None) => {
            return Err(ConfigError::InvalidValue {
                field: format!("chains.{}.init_code_hash", chain),
                reason: "set without a factory".to_string(),
            })
        }
        (None, None, existing) => existing,
    };

    let bases = match &over.bases {
        Some(list) => list
            .iter()
            .map(|t| -> Result<Token, ConfigError> {
                let address = parse_address(&format!("chains.{}.bases", chain), &t.address)?;
                let token = Token::new(chain, address, t.decimals);
                Ok(match &t.symbol {
                    Some(symbol) => token.with_symbol(symbol.clone()),
                    None => token,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?,
        None => current.bases,
    };

    Ok(ChainEntry::new(bases, venue))
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    Address::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartographer::{SPOOKY_INIT_CODE_HASH, V2_FACTORY_MAINNET};
    use crate::tokens::mainnet;

    const FANTOM_TOML: &str = r#"
chain = "fantom"

[chains.fantom]
factory = "0x1111111111111111111111111111111111111111"
bases = [
    { address = "0x21be370D5312f44cB42ce377BC9b8a0cEF1A4C83", symbol = "WFTM" },
    { address = "0x2222222222222222222222222222222222222222", decimals = 6 },
]

[gas.bittorrent]
per_hop = 750000

[[expensive_tokens]]
chain = "1"
address = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
surcharge = 1000
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chain_id().unwrap(), ChainId::Mainnet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chain_override() {
        let config = Config::from_toml(FANTOM_TOML).unwrap();
        assert_eq!(config.chain_id().unwrap(), ChainId::Fantom);

        let registry = config.build_registry().unwrap();
        let bases = registry.bases(ChainId::Fantom);
        assert_eq!(bases.len(), 2);
        assert_eq!(bases[0].decimals, 18);
        assert_eq!(bases[0].symbol.as_deref(), Some("WFTM"));
        assert_eq!(bases[1].decimals, 6);

        // Factory replaced, built-in init code hash kept
        let venue = registry.venue(ChainId::Fantom).unwrap();
        assert_eq!(venue.factory, Address::repeat_byte(0x11));
        assert_eq!(venue.init_code_hash, SPOOKY_INIT_CODE_HASH);

        // Untouched chains keep their defaults
        assert_eq!(registry.bases(ChainId::Mainnet).len(), 5);
    }

    #[test]
    fn test_gas_override() {
        let config = Config::from_toml(FANTOM_TOML).unwrap();
        let model = config.build_gas_model().unwrap();

        assert_eq!(model.per_hop_cost(ChainId::BitTorrentMainnet), U256::from(750_000));
        assert_eq!(model.base_swap_cost(ChainId::BitTorrentMainnet), U256::from(200_000));

        let path = [Token::new(ChainId::Mainnet, mainnet::USDC, 6)];
        assert_eq!(model.token_path_overhead(ChainId::Mainnet, &path), U256::from(1_000));

        // Built-in surcharges are still there
        let path = [Token::new(ChainId::Mainnet, mainnet::LDO, 18)];
        assert_eq!(model.token_path_overhead(ChainId::Mainnet, &path), U256::from(150_000));
    }

    #[test]
    fn test_disable_chain() {
        let config = Config::from_toml("[chains.mainnet]\ndisabled = true\n").unwrap();
        let registry = config.build_registry().unwrap();
        assert!(registry.bases(ChainId::Mainnet).is_empty());
        assert!(registry.venue(ChainId::Mainnet).is_none());
    }

    #[test]
    fn test_init_code_hash_only_keeps_factory() {
        let toml = r#"
[chains.sepolia]
init_code_hash = "0x0000000000000000000000000000000000000000000000000000000000000001"
"#;
        let registry = Config::from_toml(toml).unwrap().build_registry().unwrap();
        let venue = registry.venue(ChainId::Sepolia).unwrap();
        assert_ne!(venue.factory, V2_FACTORY_MAINNET);
        assert_eq!(venue.init_code_hash, B256::with_last_byte(1));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_chain = Config::from_toml("[chains.solana]\ndisabled = true\n").unwrap();
        assert_eq!(
            bad_chain.build_registry().unwrap_err(),
            ConfigError::UnknownChain("solana".to_string())
        );

        let bad_address =
            Config::from_toml("[chains.fantom]\nfactory = \"0x1234\"\n").unwrap();
        assert!(matches!(
            bad_address.build_registry().unwrap_err(),
            ConfigError::InvalidAddress { .. }
        ));

        let orphan_hash = Config::from_toml(
            "[chains.gnosis]\ninit_code_hash = \"0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f\"\n",
        )
        .unwrap();
        assert!(matches!(
            orphan_hash.build_registry().unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));

        // Bases with no venue anywhere
        let no_venue = Config::from_toml(
            "[chains.gnosis]\nbases = [{ address = \"0x2222222222222222222222222222222222222222\" }]\n",
        )
        .unwrap();
        assert_eq!(
            no_venue.build_registry().unwrap_err(),
            ConfigError::MissingVenue { chain: ChainId::Gnosis }
        );
        assert!(no_venue.validate().is_err());
    }
}
