//! Static Pool Synthesizer
//!
//! Fallback pool source for when no live indexer is reachable. Builds every
//! pair worth considering from the chain's base tokens (plus the inquiry pair,
//! if given), derives each pair's pool address, and returns records shaped like
//! the live subgraph's. Liquidity figures are placeholders and must not be used
//! for pricing.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::deriver::PoolAddressDeriver;
use super::registry::ChainRegistry;
use crate::chains::ChainId;
use crate::error::DeriveError;
use crate::tokens::{subgraph_id, Token};

// ============================================
// PLACEHOLDER FIGURES
// ============================================

const PLACEHOLDER_LIQUIDITY: &str = "100";
const PLACEHOLDER_AMOUNT: u64 = 100;

// ============================================
// RECORD TYPES (subgraph schema)
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub id: String,
}

/// One pool, in the same shape the live subgraph returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticPoolRecord {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
    pub liquidity: String,
    pub supply: u64,
    pub reserve: u64,
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: u64,
}

impl SyntheticPoolRecord {
    fn placeholder(pool: Address, token0: &Token, token1: &Token) -> Self {
        Self {
            id: subgraph_id(&pool),
            token0: TokenRef {
                id: token0.subgraph_id(),
            },
            token1: TokenRef {
                id: token1.subgraph_id(),
            },
            liquidity: PLACEHOLDER_LIQUIDITY.to_string(),
            supply: PLACEHOLDER_AMOUNT,
            reserve: PLACEHOLDER_AMOUNT,
            reserve_usd: PLACEHOLDER_AMOUNT,
        }
    }
}

// ============================================
// POOL SOURCE
// ============================================

/// Anything that can answer "which pools might route `token_in` to `token_out`"
pub trait PoolSource: Send + Sync {
    fn pools(
        &self,
        token_in: Option<&Token>,
        token_out: Option<&Token>,
    ) -> Result<Vec<SyntheticPoolRecord>, DeriveError>;
}

/// `PoolSource` that never leaves the process
#[derive(Clone)]
pub struct StaticPoolProvider {
    chain: ChainId,
    registry: Arc<ChainRegistry>,
    deriver: Arc<dyn PoolAddressDeriver>,
}

impl StaticPoolProvider {
    pub fn new(
        chain: ChainId,
        registry: Arc<ChainRegistry>,
        deriver: Arc<dyn PoolAddressDeriver>,
    ) -> Self {
        Self {
            chain,
            registry,
            deriver,
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }
}

impl PoolSource for StaticPoolProvider {
    fn pools(
        &self,
        token_in: Option<&Token>,
        token_out: Option<&Token>,
    ) -> Result<Vec<SyntheticPoolRecord>, DeriveError> {
        info!("In static pool provider for {}", self.chain);
        synthesize(
            &self.registry,
            self.deriver.as_ref(),
            self.chain,
            token_in,
            token_out,
        )
    }
}

// ============================================
// CANDIDATE PAIRS
// ============================================

/// Raw candidate pairs, before filtering: every base × base combination and,
/// when both inquiry tokens are given, the inquiry pair plus each inquiry token
/// against every base.
pub fn candidate_pairs<'a>(
    bases: &'a [Token],
    token_in: Option<&'a Token>,
    token_out: Option<&'a Token>,
) -> Vec<(Option<&'a Token>, Option<&'a Token>)> {
    let mut pairs: Vec<(Option<&Token>, Option<&Token>)> = bases
        .iter()
        .flat_map(|base| bases.iter().map(move |other| (Some(base), Some(other))))
        .collect();

    if token_in.is_some() && token_out.is_some() {
        pairs.push((token_in, token_out));
        pairs.extend(bases.iter().map(|base| (token_in, Some(base))));
        pairs.extend(bases.iter().map(|base| (token_out, Some(base))));
    }

    pairs
}

/// Drop pairs with a missing side or the same token on both sides. A shared
/// address counts as the same token even if the chain tags disagree.
fn usable_pair<'a>(pair: (Option<&'a Token>, Option<&'a Token>)) -> Option<(&'a Token, &'a Token)> {
    match pair {
        (Some(a), Some(b)) if a.address != b.address && a != b => Some((a, b)),
        _ => None,
    }
}

/// Build the fallback pool set for `chain`.
///
/// Output has no duplicate pool ids and no self-pairs, and is identical for
/// identical inputs. Derivation errors are returned as-is. A chain with no pair
/// factory fails with `DeriveError::NoPairFactory` as soon as there is a pair to
/// derive.
pub fn synthesize(
    registry: &ChainRegistry,
    deriver: &dyn PoolAddressDeriver,
    chain: ChainId,
    token_in: Option<&Token>,
    token_out: Option<&Token>,
) -> Result<Vec<SyntheticPoolRecord>, DeriveError> {
    let candidates = candidate_pairs(registry.bases(chain), token_in, token_out);
    let total_candidates = candidates.len();

    let mut seen: HashSet<Address> = HashSet::new();
    let mut records = Vec::new();

    for (a, b) in candidates.into_iter().filter_map(usable_pair) {
        let venue = registry
            .venue(chain)
            .ok_or(DeriveError::NoPairFactory(chain))?;
        let (token0, token1) = Token::sorted_pair(a, b);
        let pool = deriver.derive(token0, token1, venue.factory, venue.init_code_hash)?;

        if !seen.insert(pool) {
            continue;
        }

        records.push(SyntheticPoolRecord::placeholder(pool, token0, token1));
    }

    debug!(
        "{}: {} candidate pairs -> {} static pools",
        chain,
        total_candidates,
        records.len()
    );

    Ok(records)
}
