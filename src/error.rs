//! Error types

use alloy_primitives::Address;
use thiserror::Error;

use crate::chains::ChainId;

/// A per-chain table or config value is missing or inconsistent.
///
/// These are deployment/configuration mistakes, not data conditions, and are
/// raised when a registry or gas table is constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("No token registry entry for chain {0}")]
    MissingChain(ChainId),

    #[error("No gas cost table for chain {0}")]
    MissingGasTable(ChainId),

    #[error("Chain {chain} has base tokens but no pair factory configured")]
    MissingVenue { chain: ChainId },

    #[error("Base token {token} is registered under {chain} but belongs to {token_chain}")]
    ForeignBaseToken {
        chain: ChainId,
        token: Address,
        token_chain: ChainId,
    },

    #[error("Base token {token} listed twice for chain {chain}")]
    DuplicateBaseToken { chain: ChainId, token: Address },

    #[error("Invalid address for {field}: {value}")]
    InvalidAddress { field: String, value: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Pool address derivation failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error("Cannot derive a pool for identical tokens {0}")]
    IdenticalTokens(Address),

    #[error("No pair factory configured for chain {0}")]
    NoPairFactory(ChainId),

    #[error("Tokens not in canonical order: {token0} must sort before {token1}")]
    Unsorted { token0: Address, token1: Address },

    #[error("Pool address derivation failed: {0}")]
    Failed(String),
}
