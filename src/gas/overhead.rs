//! Token-specific transfer surcharges
//!
//! Some tokens run extra logic on every transfer (governance snapshots,
//! external controllers). Routes touching them pay a fixed surcharge per
//! designated token. The table is pure data; add entries, not branches.

use alloy_primitives::{Address, U256};
use std::collections::{HashMap, HashSet};

use crate::chains::ChainId;
use crate::tokens::{mainnet, Token};

/// AAVE snapshots voting power on every transfer
pub const AAVE_TRANSFER_OVERHEAD: u64 = 150_000;

/// LDO calls out to an external token controller on every transfer
pub const LDO_TRANSFER_OVERHEAD: u64 = 150_000;

/// (chain, token) → surcharge in gas units
#[derive(Debug, Clone, Default)]
pub struct ExpensiveTokenTable {
    surcharges: HashMap<(ChainId, Address), U256>,
}

impl ExpensiveTokenTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.insert(ChainId::Mainnet, mainnet::AAVE, U256::from(AAVE_TRANSFER_OVERHEAD));
        table.insert(ChainId::Mainnet, mainnet::LDO, U256::from(LDO_TRANSFER_OVERHEAD));
        table
    }

    /// Set (or replace) the surcharge for a token
    pub fn insert(&mut self, chain: ChainId, token: Address, surcharge: U256) {
        self.surcharges.insert((chain, token), surcharge);
    }

    pub fn get(&self, chain: ChainId, token: Address) -> Option<U256> {
        self.surcharges.get(&(chain, token)).copied()
    }

    pub fn len(&self) -> usize {
        self.surcharges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surcharges.is_empty()
    }

    /// Sum of surcharges for the designated tokens present in `path`. A token
    /// that appears more than once is charged once.
    pub fn path_surcharge(&self, chain: ChainId, path: &[Token]) -> U256 {
        let distinct: HashSet<Address> = path.iter().map(|t| t.address).collect();

        distinct
            .into_iter()
            .filter_map(|address| self.get(chain, address))
            .fold(U256::ZERO, |acc, s| acc.saturating_add(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mainnet_token(address: Address) -> Token {
        Token::new(ChainId::Mainnet, address, 18)
    }

    #[test]
    fn test_surcharges_are_additive() {
        let table = ExpensiveTokenTable::with_defaults();

        let plain = [mainnet_token(mainnet::USDC), mainnet_token(mainnet::WETH)];
        assert_eq!(table.path_surcharge(ChainId::Mainnet, &plain), U256::ZERO);

        let aave = [mainnet_token(mainnet::AAVE), mainnet_token(mainnet::WETH)];
        assert_eq!(table.path_surcharge(ChainId::Mainnet, &aave), U256::from(150_000));

        let both = [
            mainnet_token(mainnet::AAVE),
            mainnet_token(mainnet::WETH),
            mainnet_token(mainnet::LDO),
        ];
        assert_eq!(table.path_surcharge(ChainId::Mainnet, &both), U256::from(300_000));
    }

    #[test]
    fn test_repeated_token_charged_once() {
        let table = ExpensiveTokenTable::with_defaults();
        let path = [
            mainnet_token(mainnet::AAVE),
            mainnet_token(mainnet::WETH),
            mainnet_token(mainnet::AAVE),
        ];
        assert_eq!(table.path_surcharge(ChainId::Mainnet, &path), U256::from(150_000));
    }

    #[test]
    fn test_other_chains_pay_nothing() {
        let table = ExpensiveTokenTable::with_defaults();
        let path = [Token::new(ChainId::Polygon, mainnet::AAVE, 18)];
        assert_eq!(table.path_surcharge(ChainId::Polygon, &path), U256::ZERO);
    }

    #[test]
    fn test_insert_extends_table() {
        let mut table = ExpensiveTokenTable::empty();
        assert!(table.is_empty());

        table.insert(ChainId::Base, mainnet::USDC, U256::from(42));
        assert_eq!(table.len(), 1);
        let path = [Token::new(ChainId::Base, mainnet::USDC, 6)];
        assert_eq!(table.path_surcharge(ChainId::Base, &path), U256::from(42));
    }
}
