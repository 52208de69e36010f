//! Pool Address Derivation
//!
//! The synthesizer treats derivation as an opaque pure function behind
//! `PoolAddressDeriver`. `Create2PairDeriver` is the constant-product pair
//! scheme: `CREATE2(factory, keccak256(token0 ++ token1), init_code_hash)`.

use alloy_primitives::{keccak256, Address, B256};

use crate::error::DeriveError;
use crate::tokens::Token;

/// Deterministic pool address from a canonically ordered token pair.
///
/// Implementations must be pure and safe to call from many threads at once.
pub trait PoolAddressDeriver: Send + Sync {
    fn derive(
        &self,
        token0: &Token,
        token1: &Token,
        factory: Address,
        init_code_hash: B256,
    ) -> Result<Address, DeriveError>;
}

/// CREATE2 address of a V2-style pair
#[derive(Debug, Clone, Copy, Default)]
pub struct Create2PairDeriver;

impl Create2PairDeriver {
    /// Salt is keccak256 of the two addresses packed back to back
    pub fn salt(token0: Address, token1: Address) -> B256 {
        let mut packed = [0u8; 40];
        packed[..20].copy_from_slice(token0.as_slice());
        packed[20..].copy_from_slice(token1.as_slice());
        keccak256(packed)
    }
}

impl PoolAddressDeriver for Create2PairDeriver {
    fn derive(
        &self,
        token0: &Token,
        token1: &Token,
        factory: Address,
        init_code_hash: B256,
    ) -> Result<Address, DeriveError> {
        if token0.address == token1.address {
            return Err(DeriveError::IdenticalTokens(token0.address));
        }
        if !token0.sorts_before(token1) {
            return Err(DeriveError::Unsorted {
                token0: token0.address,
                token1: token1.address,
            });
        }

        let salt = Self::salt(token0.address, token1.address);
        Ok(factory.create2(salt, init_code_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartographer::registry::{V2_FACTORY_MAINNET, V2_INIT_CODE_HASH};
    use crate::chains::ChainId;
    use crate::tokens::mainnet;
    use alloy_primitives::address;

    fn token(addr: Address) -> Token {
        Token::new(ChainId::Mainnet, addr, 18)
    }

    #[test]
    fn test_known_mainnet_pairs() {
        let deriver = Create2PairDeriver;

        // USDC/WETH
        let pool = deriver
            .derive(
                &token(mainnet::USDC),
                &token(mainnet::WETH),
                V2_FACTORY_MAINNET,
                V2_INIT_CODE_HASH,
            )
            .unwrap();
        assert_eq!(pool, address!("B4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc"));

        // DAI/WETH
        let pool = deriver
            .derive(
                &token(mainnet::DAI),
                &token(mainnet::WETH),
                V2_FACTORY_MAINNET,
                V2_INIT_CODE_HASH,
            )
            .unwrap();
        assert_eq!(pool, address!("A478c2975Ab1Ea89e8196811F51A7B7Ade33eB11"));
    }

    #[test]
    fn test_rejects_non_canonical_input() {
        let deriver = Create2PairDeriver;
        let usdc = token(mainnet::USDC);
        let weth = token(mainnet::WETH);

        let err = deriver
            .derive(&weth, &usdc, V2_FACTORY_MAINNET, V2_INIT_CODE_HASH)
            .unwrap_err();
        assert!(matches!(err, DeriveError::Unsorted { .. }));

        let err = deriver
            .derive(&usdc, &usdc, V2_FACTORY_MAINNET, V2_INIT_CODE_HASH)
            .unwrap_err();
        assert_eq!(err, DeriveError::IdenticalTokens(mainnet::USDC));
    }
}
