//! Token definitions
//!
//! A `Token` is identified by its chain and address only. Symbol and decimals
//! are descriptive and never take part in equality, hashing, or ordering, so
//! every filter and dedup step in the crate can rely on plain `==`.

use alloy_primitives::{address, Address};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::chains::ChainId;
use crate::error::ConfigError;

/// An ERC-20 token on a specific chain
#[derive(Debug, Clone)]
pub struct Token {
    pub chain: ChainId,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain.hash(state);
        self.address.hash(state);
    }
}

impl Token {
    pub fn new(chain: ChainId, address: Address, decimals: u8) -> Self {
        Self {
            chain,
            address,
            decimals,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Canonical pair order: the token with the lower address is `token0`
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }

    /// Put two tokens into `(token0, token1)` order
    pub fn sorted_pair<'a>(a: &'a Token, b: &'a Token) -> (&'a Token, &'a Token) {
        if a.sorts_before(b) {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Lowercase `0x` hex id, as used by subgraph schemas
    pub fn subgraph_id(&self) -> String {
        subgraph_id(&self.address)
    }

    /// Symbol if known, otherwise a shortened address
    pub fn label(&self) -> String {
        match &self.symbol {
            Some(symbol) => symbol.clone(),
            None => format!("0x{}...", &hex::encode(self.address)[..6]),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{} ({})", symbol, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Lowercase `0x` hex form of an address
pub fn subgraph_id(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Either the chain's native asset or an ERC-20 token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Currency {
    Native(ChainId),
    Token(Token),
}

impl Currency {
    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn chain(&self) -> ChainId {
        match self {
            Currency::Native(chain) => *chain,
            Currency::Token(token) => token.chain,
        }
    }

    /// The ERC-20 form of this currency. Native resolves to the wrapped-native
    /// token when one is known for the chain.
    pub fn wrapped(&self) -> Option<Token> {
        match self {
            Currency::Native(chain) => wrapped_native(*chain),
            Currency::Token(token) => Some(token.clone()),
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

// ============================================
// WELL-KNOWN ADDRESSES
// ============================================

pub mod mainnet {
    use super::*;

    pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    pub const DAI: Address = address!("6B175474E89094C44Da98b954EedcdeCB5BE3830");
    pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    pub const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
    pub const WBTC: Address = address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599");

    // Transfers cost well above a plain ERC-20 transfer
    pub const AAVE: Address = address!("7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9");
    pub const LDO: Address = address!("5A98FcBEA516Cf06857215779Fd812CA3beF1B32");
}

pub mod goerli {
    use super::*;

    pub const WETH: Address = address!("B4FBF271143F4FBf7B91A5ded31805e42b2208d6");
}

pub mod sepolia {
    use super::*;

    pub const WETH: Address = address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14");
}

pub mod bittorrent {
    use super::*;

    pub const WBTT: Address = address!("23181F21DEa5936e24163FFABa4Ea3B316B57f3C");
    // Bridged from Ethereum
    pub const USDC: Address = address!("AE17940943BA9440540940DB0F1877f101D39e8b");
    pub const USDT: Address = address!("E887512ab8BC60BcC9224e1c3b5Be68E26048B8B");
    pub const WBTC: Address = address!("9888221fE6B5A2ad4cE7266c7826D2AD74D40CcF");
    pub const ETH: Address = address!("1249C65AfB11D179FFB3CE7D4eEDd1D9b98AD006");
}

pub mod fantom {
    use super::*;

    pub const WFTM: Address = address!("21be370D5312f44cB42ce377BC9b8a0cEF1A4C83");
    pub const USDC_AXL: Address = address!("1B6382DBDEa11d97f24495C9A90b7c88469134a4");
    pub const USDC_LZ: Address = address!("28a92dde19D9989F39A49905d7C9C2FAc7799bDf");
}

pub mod eon {
    use super::*;

    pub const WZEN: Address = address!("F5cB8652a84329A2016A386206761f455bCEDab6");
    pub const USDC_LZ: Address = address!("CC44eB064CD32AAfEEb2ebb2a47bE0B882383b53");
}

pub mod bera_testnet {
    use super::*;

    pub const WBERA: Address = address!("5806E416dA447b267cEA759358cF22Cc41FAE80F");
    pub const USDC: Address = address!("6581e59A1C8dA66eD0D313a0d4029DcE2F746Cc5");
}

pub mod sonic_testnet {
    use super::*;

    pub const WS: Address = address!("309C92261178fA0CF748A855e90Ae73FDb79EBc7");
    pub const USDC: Address = address!("A4879Fed32Ecbef99399e5cbC247E533421C4eC6");
}

pub mod goat_testnet {
    use super::*;

    // Predeployed wrapped BTC
    pub const WGBTC: Address = address!("bC10000000000000000000000000000000000000");
}

/// OP-stack predeploy, shared by Optimism and Base
const OP_STACK_WETH: Address = address!("4200000000000000000000000000000000000006");

/// Wrapped form of the chain's native asset, where the address is well known
pub fn wrapped_native(chain: ChainId) -> Option<Token> {
    let (address, symbol) = match chain {
        ChainId::Mainnet => (mainnet::WETH, "WETH"),
        ChainId::Goerli => (goerli::WETH, "WETH"),
        ChainId::Sepolia => (sepolia::WETH, "WETH"),
        ChainId::Optimism | ChainId::Base => (OP_STACK_WETH, "WETH"),
        ChainId::ArbitrumOne => (address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"), "WETH"),
        ChainId::Polygon => (address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"), "WMATIC"),
        ChainId::Bnb => (address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"), "WBNB"),
        ChainId::Avalanche => (address!("B31f66AA3C1e785363F0875A1B74E27b85FD66c7"), "WAVAX"),
        ChainId::Gnosis => (address!("e91D153E0b41518A2Ce8Dd3D7944Fa863463a97d"), "WXDAI"),
        ChainId::Celo => (address!("471EcE3750Da237f93B8E339c536989b8978a438"), "CELO"),
        ChainId::BitTorrentMainnet => (bittorrent::WBTT, "WBTT"),
        ChainId::Fantom => (fantom::WFTM, "WFTM"),
        ChainId::Eon => (eon::WZEN, "WZEN"),
        ChainId::BeraTestnet => (bera_testnet::WBERA, "WBERA"),
        ChainId::SonicTestnet => (sonic_testnet::WS, "wS"),
        ChainId::GoatTestnet => (goat_testnet::WGBTC, "WGBTC"),
        _ => return None,
    };

    Some(Token::new(chain, address, 18).with_symbol(symbol))
}

/// Default base tokens for Ethereum mainnet
pub fn mainnet_bases() -> Vec<Token> {
    vec![
        Token::new(ChainId::Mainnet, mainnet::WETH, 18).with_symbol("WETH"),
        Token::new(ChainId::Mainnet, mainnet::DAI, 18).with_symbol("DAI"),
        Token::new(ChainId::Mainnet, mainnet::USDC, 6).with_symbol("USDC"),
        Token::new(ChainId::Mainnet, mainnet::USDT, 6).with_symbol("USDT"),
        Token::new(ChainId::Mainnet, mainnet::WBTC, 8).with_symbol("WBTC"),
    ]
}

/// Built-in base token basket for `chain`, wrapped native first. Empty where
/// the pair protocol has no liquidity worth routing through.
pub fn default_bases(chain: ChainId) -> Vec<Token> {
    let extra: Vec<Token> = match chain {
        ChainId::Mainnet => return mainnet_bases(),
        // USDC on GOAT testnet has no fixed address yet; add it under [chains.goat-testnet]
        ChainId::Goerli | ChainId::Sepolia | ChainId::GoatTestnet => Vec::new(),
        ChainId::BitTorrentMainnet => vec![
            Token::new(chain, bittorrent::USDC, 6).with_symbol("USDC"),
            Token::new(chain, bittorrent::USDT, 6).with_symbol("USDT"),
            Token::new(chain, bittorrent::WBTC, 8).with_symbol("WBTC"),
            Token::new(chain, bittorrent::ETH, 18).with_symbol("ETH"),
        ],
        ChainId::Fantom => vec![
            Token::new(chain, fantom::USDC_AXL, 6).with_symbol("axlUSDC"),
            Token::new(chain, fantom::USDC_LZ, 6).with_symbol("lzUSDC"),
        ],
        ChainId::Eon => vec![Token::new(chain, eon::USDC_LZ, 6).with_symbol("lzUSDC")],
        ChainId::BeraTestnet => vec![Token::new(chain, bera_testnet::USDC, 6).with_symbol("USDC")],
        ChainId::SonicTestnet => vec![Token::new(chain, sonic_testnet::USDC, 6).with_symbol("USDC")],
        _ => return Vec::new(),
    };

    wrapped_native(chain).into_iter().chain(extra).collect()
}

/// Tokens the CLI can resolve by symbol
pub fn known_tokens(chain: ChainId) -> Vec<Token> {
    let mut tokens = default_bases(chain);
    if chain == ChainId::Mainnet {
        tokens.push(Token::new(chain, mainnet::AAVE, 18).with_symbol("AAVE"));
        tokens.push(Token::new(chain, mainnet::LDO, 18).with_symbol("LDO"));
    }

    if let Some(wrapped) = wrapped_native(chain) {
        if !tokens.contains(&wrapped) {
            tokens.push(wrapped);
        }
    }

    tokens
}

/// Resolve a symbol (case-insensitive) or a hex address to a token on `chain`.
/// Unknown addresses are assumed to have 18 decimals.
pub fn resolve_token(chain: ChainId, input: &str) -> Result<Token, ConfigError> {
    let input = input.trim();
    let known = known_tokens(chain);

    if let Some(token) = known
        .iter()
        .find(|t| t.symbol.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(input)))
    {
        return Ok(token.clone());
    }

    let address = Address::from_str(input).map_err(|_| ConfigError::InvalidAddress {
        field: "token".to_string(),
        value: input.to_string(),
    })?;

    Ok(known
        .into_iter()
        .find(|t| t.address == address)
        .unwrap_or_else(|| Token::new(chain, address, 18)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_symbol_and_decimals() {
        let a = Token::new(ChainId::Mainnet, mainnet::USDC, 6).with_symbol("USDC");
        let b = Token::new(ChainId::Mainnet, mainnet::USDC, 18);
        assert_eq!(a, b);

        let other_chain = Token::new(ChainId::Goerli, mainnet::USDC, 6);
        assert_ne!(a, other_chain);
    }

    #[test]
    fn test_sorted_pair() {
        let usdc = Token::new(ChainId::Mainnet, mainnet::USDC, 6);
        let weth = Token::new(ChainId::Mainnet, mainnet::WETH, 18);

        // 0xA0b8... < 0xC02a...
        assert!(usdc.sorts_before(&weth));
        assert!(!weth.sorts_before(&usdc));

        let (t0, t1) = Token::sorted_pair(&weth, &usdc);
        assert_eq!(t0, &usdc);
        assert_eq!(t1, &weth);
        assert_eq!(Token::sorted_pair(&usdc, &weth), (t0, t1));
    }

    #[test]
    fn test_subgraph_id_is_lowercase() {
        let weth = Token::new(ChainId::Mainnet, mainnet::WETH, 18);
        assert_eq!(weth.subgraph_id(), "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
    }

    #[test]
    fn test_native_currency() {
        let eth = Currency::Native(ChainId::Mainnet);
        assert!(eth.is_native());
        assert_eq!(eth.wrapped().unwrap().address, mainnet::WETH);

        let usdc: Currency = Token::new(ChainId::Mainnet, mainnet::USDC, 6).into();
        assert!(!usdc.is_native());
        assert_eq!(usdc.chain(), ChainId::Mainnet);

        assert!(Currency::Native(ChainId::Moonbeam).wrapped().is_none());
    }

    #[test]
    fn test_resolve_token() {
        let usdc = resolve_token(ChainId::Mainnet, "usdc").unwrap();
        assert_eq!(usdc.address, mainnet::USDC);
        assert_eq!(usdc.decimals, 6);

        let by_address =
            resolve_token(ChainId::Mainnet, "0x6B175474E89094C44Da98b954EedcdeCB5BE3830").unwrap();
        assert_eq!(by_address.symbol.as_deref(), Some("DAI"));

        let unknown =
            resolve_token(ChainId::Mainnet, "0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(unknown.decimals, 18);
        assert!(unknown.symbol.is_none());

        assert!(resolve_token(ChainId::Mainnet, "not-a-token").is_err());

        let lz = resolve_token(ChainId::Fantom, "LZUSDC").unwrap();
        assert_eq!(lz.address, fantom::USDC_LZ);
        assert_eq!(lz.decimals, 6);
    }

    #[test]
    fn test_default_bases_start_with_wrapped_native() {
        for chain in [ChainId::BitTorrentMainnet, ChainId::Fantom, ChainId::Eon] {
            let bases = default_bases(chain);
            assert_eq!(Some(&bases[0]), wrapped_native(chain).as_ref(), "{}", chain);
            assert!(bases.iter().all(|t| t.chain == chain));
        }
        assert!(default_bases(ChainId::Optimism).is_empty());
    }
}
