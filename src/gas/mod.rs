//! Gas Cost Model
//!
//! Responsible for:
//! - Per-chain constant tables (base, per hop, per initialized tick, wrap/unwrap)
//! - Surcharges for tokens with expensive transfer logic
//! - Breaking a route down into its cost terms
//!
//! Integer gas units only. No floating point in this module.

mod model;
mod overhead;
mod table;

pub use model::{GasModel, RouteCostBreakdown, RouteShape, COST_PER_UNINIT_TICK};
pub use overhead::{ExpensiveTokenTable, AAVE_TRANSFER_OVERHEAD, LDO_TRANSFER_OVERHEAD};
pub use table::{default_tables, GasCostTable, GasCostTables};
