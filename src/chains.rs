//! Supported chains
//!
//! Every per-chain table in this crate (base tokens, pair venues, gas costs)
//! is keyed by `ChainId` and must cover all of `ChainId::ALL`.

use std::str::FromStr;

use crate::error::ConfigError;

/// A target EVM network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainId {
    Mainnet,
    Goerli,
    Sepolia,
    Optimism,
    OptimismGoerli,
    ArbitrumOne,
    ArbitrumGoerli,
    Polygon,
    PolygonMumbai,
    Celo,
    CeloAlfajores,
    Gnosis,
    Moonbeam,
    Bnb,
    Avalanche,
    Base,
    BaseGoerli,
    BitTorrentMainnet,
    Fantom,
    Eon,
    BeraTestnet,
    SonicTestnet,
    GoatTestnet,
}

impl ChainId {
    /// All supported chains, in declaration order
    pub const ALL: [ChainId; 23] = [
        ChainId::Mainnet,
        ChainId::Goerli,
        ChainId::Sepolia,
        ChainId::Optimism,
        ChainId::OptimismGoerli,
        ChainId::ArbitrumOne,
        ChainId::ArbitrumGoerli,
        ChainId::Polygon,
        ChainId::PolygonMumbai,
        ChainId::Celo,
        ChainId::CeloAlfajores,
        ChainId::Gnosis,
        ChainId::Moonbeam,
        ChainId::Bnb,
        ChainId::Avalanche,
        ChainId::Base,
        ChainId::BaseGoerli,
        ChainId::BitTorrentMainnet,
        ChainId::Fantom,
        ChainId::Eon,
        ChainId::BeraTestnet,
        ChainId::SonicTestnet,
        ChainId::GoatTestnet,
    ];

    /// Position in `ChainId::ALL`. Dense per-chain tables are indexed by this.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Numeric EVM chain id
    pub const fn id(self) -> u64 {
        match self {
            ChainId::Mainnet => 1,
            ChainId::Goerli => 5,
            ChainId::Sepolia => 11155111,
            ChainId::Optimism => 10,
            ChainId::OptimismGoerli => 420,
            ChainId::ArbitrumOne => 42161,
            ChainId::ArbitrumGoerli => 421613,
            ChainId::Polygon => 137,
            ChainId::PolygonMumbai => 80001,
            ChainId::Celo => 42220,
            ChainId::CeloAlfajores => 44787,
            ChainId::Gnosis => 100,
            ChainId::Moonbeam => 1284,
            ChainId::Bnb => 56,
            ChainId::Avalanche => 43114,
            ChainId::Base => 8453,
            ChainId::BaseGoerli => 84531,
            ChainId::BitTorrentMainnet => 199,
            ChainId::Fantom => 250,
            ChainId::Eon => 7332,
            ChainId::BeraTestnet => 80085,
            ChainId::SonicTestnet => 64165,
            ChainId::GoatTestnet => 48816,
        }
    }

    /// Kebab-case name, used in config files and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            ChainId::Mainnet => "mainnet",
            ChainId::Goerli => "goerli",
            ChainId::Sepolia => "sepolia",
            ChainId::Optimism => "optimism",
            ChainId::OptimismGoerli => "optimism-goerli",
            ChainId::ArbitrumOne => "arbitrum-one",
            ChainId::ArbitrumGoerli => "arbitrum-goerli",
            ChainId::Polygon => "polygon",
            ChainId::PolygonMumbai => "polygon-mumbai",
            ChainId::Celo => "celo",
            ChainId::CeloAlfajores => "celo-alfajores",
            ChainId::Gnosis => "gnosis",
            ChainId::Moonbeam => "moonbeam",
            ChainId::Bnb => "bnb",
            ChainId::Avalanche => "avalanche",
            ChainId::Base => "base",
            ChainId::BaseGoerli => "base-goerli",
            ChainId::BitTorrentMainnet => "bittorrent",
            ChainId::Fantom => "fantom",
            ChainId::Eon => "eon",
            ChainId::BeraTestnet => "bera-testnet",
            ChainId::SonicTestnet => "sonic-testnet",
            ChainId::GoatTestnet => "goat-testnet",
        }
    }

    /// Look up a chain by its numeric id
    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ChainId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u64>() {
            return Self::from_id(id).ok_or_else(|| ConfigError::UnknownChain(s.to_string()));
        }

        let lower = s.to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| ConfigError::UnknownChain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, chain) in ChainId::ALL.iter().enumerate() {
            assert_eq!(chain.index(), i, "{} out of order", chain);
        }
    }

    #[test]
    fn test_parse_by_name_and_id() {
        assert_eq!("mainnet".parse::<ChainId>().unwrap(), ChainId::Mainnet);
        assert_eq!("ARBITRUM_ONE".parse::<ChainId>().unwrap(), ChainId::ArbitrumOne);
        assert_eq!("199".parse::<ChainId>().unwrap(), ChainId::BitTorrentMainnet);
        assert!("solana".parse::<ChainId>().is_err());
        assert!("999999".parse::<ChainId>().is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u64> = ChainId::ALL.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ChainId::ALL.len());
    }
}
