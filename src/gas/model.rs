//! Gas Cost Model
//!
//! Every term a route-ranking caller needs, each defined for every chain.
//! `breakdown` adds them up for one route shape; how the total is weighed
//! against output amounts is the caller's business.

use alloy_primitives::U256;
use tracing::trace;

use super::overhead::ExpensiveTokenTable;
use super::table::{GasCostTable, GasCostTables};
use crate::chains::ChainId;
use crate::tokens::{Currency, Token};

/// Crossing an uninitialized tick is free
pub const COST_PER_UNINIT_TICK: U256 = U256::ZERO;

/// Gas cost terms indexed by chain
#[derive(Debug, Clone)]
pub struct GasModel {
    tables: GasCostTables,
    expensive_tokens: ExpensiveTokenTable,
}

impl GasModel {
    pub fn new(tables: GasCostTables, expensive_tokens: ExpensiveTokenTable) -> Self {
        Self {
            tables,
            expensive_tokens,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GasCostTables::with_defaults(), ExpensiveTokenTable::with_defaults())
    }

    pub fn table(&self, chain: ChainId) -> &GasCostTable {
        self.tables.get(chain)
    }

    pub fn expensive_tokens(&self) -> &ExpensiveTokenTable {
        &self.expensive_tokens
    }

    pub fn base_swap_cost(&self, chain: ChainId) -> U256 {
        self.table(chain).base_swap
    }

    pub fn per_initialized_tick_cost(&self, chain: ChainId) -> U256 {
        self.table(chain).per_init_tick
    }

    pub fn cost_per_uninitialized_tick(&self) -> U256 {
        COST_PER_UNINIT_TICK
    }

    pub fn per_hop_cost(&self, chain: ChainId) -> U256 {
        self.table(chain).per_hop
    }

    pub fn single_hop_overhead(&self, chain: ChainId) -> U256 {
        self.table(chain).single_hop_overhead
    }

    pub fn native_wrap_overhead(&self, chain: ChainId) -> U256 {
        self.table(chain).native_wrap_overhead
    }

    pub fn native_unwrap_overhead(&self, chain: ChainId) -> U256 {
        self.table(chain).native_unwrap_overhead
    }

    /// Chain-wide flat overhead plus surcharges for designated tokens in the path
    pub fn token_path_overhead(&self, chain: ChainId, path: &[Token]) -> U256 {
        self.table(chain)
            .flat_token_overhead
            .saturating_add(self.expensive_tokens.path_surcharge(chain, path))
    }

    /// Wrap cost if the route starts from the native asset, otherwise unwrap
    /// cost if it ends in it, otherwise zero. Never both.
    pub fn native_overhead(&self, chain: ChainId, input: &Currency, output: &Currency) -> U256 {
        if input.is_native() {
            return self.native_wrap_overhead(chain);
        }
        if output.is_native() {
            return self.native_unwrap_overhead(chain);
        }
        U256::ZERO
    }

    /// Every cost term for one route
    pub fn breakdown(&self, route: &RouteShape) -> RouteCostBreakdown {
        let chain = route.chain;
        let hops = route.hops();

        let breakdown = RouteCostBreakdown {
            base: self.base_swap_cost(chain),
            hops: self.per_hop_cost(chain).saturating_mul(U256::from(hops)),
            initialized_ticks: self
                .per_initialized_tick_cost(chain)
                .saturating_mul(U256::from(route.initialized_ticks_crossed)),
            single_hop: if hops == 1 {
                self.single_hop_overhead(chain)
            } else {
                U256::ZERO
            },
            token_path: self.token_path_overhead(chain, &route.token_path),
            native: self.native_overhead(chain, &route.input, &route.output),
        };

        trace!("{}: {} hops -> {:?}", chain, hops, breakdown);
        breakdown
    }
}

impl Default for GasModel {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================
// ROUTE SHAPE & BREAKDOWN
// ============================================

/// What the cost model needs to know about a candidate route
#[derive(Debug, Clone)]
pub struct RouteShape {
    pub chain: ChainId,
    /// Tokens visited, input first
    pub token_path: Vec<Token>,
    pub initialized_ticks_crossed: u64,
    pub input: Currency,
    pub output: Currency,
}

impl RouteShape {
    /// Route over ERC-20 tokens only; input and output are the path's ends
    pub fn through(chain: ChainId, token_path: Vec<Token>, initialized_ticks_crossed: u64) -> Option<Self> {
        let input = Currency::Token(token_path.first()?.clone());
        let output = Currency::Token(token_path.last()?.clone());
        Some(Self {
            chain,
            token_path,
            initialized_ticks_crossed,
            input,
            output,
        })
    }

    pub fn with_input(mut self, input: Currency) -> Self {
        self.input = input;
        self
    }

    pub fn with_output(mut self, output: Currency) -> Self {
        self.output = output;
        self
    }

    /// Pools traversed
    pub fn hops(&self) -> u64 {
        self.token_path.len().saturating_sub(1) as u64
    }
}

/// Cost terms of one route, in gas units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteCostBreakdown {
    pub base: U256,
    pub hops: U256,
    pub initialized_ticks: U256,
    pub single_hop: U256,
    pub token_path: U256,
    pub native: U256,
}

impl RouteCostBreakdown {
    pub fn total(&self) -> U256 {
        [
            self.hops,
            self.initialized_ticks,
            self.single_hop,
            self.token_path,
            self.native,
        ]
        .into_iter()
        .fold(self.base, |acc, term| acc.saturating_add(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::mainnet;
    use alloy_primitives::Address;

    fn t(address: Address) -> Token {
        Token::new(ChainId::Mainnet, address, 18)
    }

    #[test]
    fn test_terms_defined_for_every_chain() {
        let model = GasModel::with_defaults();
        for chain in ChainId::ALL {
            assert!(model.base_swap_cost(chain) > U256::ZERO, "{}", chain);
            assert!(model.per_hop_cost(chain) > U256::ZERO, "{}", chain);
            assert!(model.per_initialized_tick_cost(chain) > U256::ZERO, "{}", chain);
            assert!(model.single_hop_overhead(chain) > U256::ZERO, "{}", chain);
            assert!(model.native_wrap_overhead(chain) > U256::ZERO, "{}", chain);
            assert!(model.native_unwrap_overhead(chain) > U256::ZERO, "{}", chain);
        }
        assert_eq!(model.cost_per_uninitialized_tick(), U256::ZERO);
    }

    #[test]
    fn test_three_hop_cost_contribution() {
        let model = GasModel::with_defaults();
        let route = RouteShape::through(
            ChainId::Mainnet,
            vec![t(mainnet::USDC), t(mainnet::WETH), t(mainnet::DAI), t(mainnet::WBTC)],
            0,
        )
        .unwrap();

        let b = model.breakdown(&route);
        assert_eq!(b.hops, U256::from(240_000));
        assert_eq!(b.single_hop, U256::ZERO);
        assert_eq!(b.token_path, U256::ZERO);
        assert_eq!(b.native, U256::ZERO);
        assert_eq!(b.total(), U256::from(2_000 + 240_000));
    }

    #[test]
    fn test_single_hop_breakdown() {
        let model = GasModel::with_defaults();
        let route = RouteShape::through(ChainId::Mainnet, vec![t(mainnet::AAVE), t(mainnet::WETH)], 2)
            .unwrap()
            .with_output(Currency::Native(ChainId::Mainnet));

        let b = model.breakdown(&route);
        assert_eq!(b.base, U256::from(2_000));
        assert_eq!(b.hops, U256::from(80_000));
        assert_eq!(b.initialized_ticks, U256::from(62_000));
        assert_eq!(b.single_hop, U256::from(15_000));
        assert_eq!(b.token_path, U256::from(150_000));
        assert_eq!(b.native, U256::from(36_000));
        assert_eq!(
            b.total(),
            U256::from(2_000 + 80_000 + 62_000 + 15_000 + 150_000 + 36_000)
        );
    }

    #[test]
    fn test_native_overhead_is_exclusive() {
        let model = GasModel::with_defaults();
        let chain = ChainId::Mainnet;
        let eth = Currency::Native(chain);
        let usdc = Currency::Token(t(mainnet::USDC));

        let wrap = model.native_wrap_overhead(chain);
        let unwrap = model.native_unwrap_overhead(chain);

        assert_eq!(model.native_overhead(chain, &eth, &usdc), wrap);
        assert_eq!(model.native_overhead(chain, &usdc, &eth), unwrap);
        assert_eq!(model.native_overhead(chain, &usdc, &usdc), U256::ZERO);

        let both = model.native_overhead(chain, &eth, &eth);
        assert!(both == wrap || both == unwrap || both == U256::ZERO);
        assert_ne!(both, wrap + unwrap);
    }

    #[test]
    fn test_bittorrent_flat_token_overhead() {
        let model = GasModel::with_defaults();
        let path = [
            Token::new(ChainId::BitTorrentMainnet, mainnet::USDC, 6),
            Token::new(ChainId::BitTorrentMainnet, mainnet::WETH, 18),
        ];
        assert_eq!(
            model.token_path_overhead(ChainId::BitTorrentMainnet, &path),
            U256::from(1_500_000)
        );
        assert_eq!(model.token_path_overhead(ChainId::Polygon, &[]), U256::ZERO);
    }

    #[test]
    fn test_empty_path_has_no_hops() {
        assert!(RouteShape::through(ChainId::Mainnet, vec![], 0).is_none());

        let route = RouteShape::through(ChainId::Mainnet, vec![t(mainnet::USDC)], 0).unwrap();
        assert_eq!(route.hops(), 0);
    }
}
