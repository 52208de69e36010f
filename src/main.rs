//! routegraph - fallback pool graph and gas cost inspector
//!
//! Run with: cargo run -- pools --chain mainnet --token-in AAVE --token-out LDO
//!
//! Commands:
//! - `pools`: synthesize the static candidate pool set for a chain
//! - `gas`: break down the gas estimate for a token path
//! - `chains`: show registry and gas table entries for every chain

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use console::style;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routegraph::cartographer::{CandidateGraph, Create2PairDeriver, PoolSource, StaticPoolProvider};
use routegraph::tokens::resolve_token;
use routegraph::{ChainId, ChainRegistry, Config, Currency, GasModel, RouteShape, SyntheticPoolRecord};

#[derive(Parser)]
#[command(name = "routegraph", version, about = "Fallback pool graph and gas cost model")]
struct Cli {
    /// Chain name or numeric id (defaults to CHAIN / config file / mainnet)
    #[arg(long, global = true)]
    chain: Option<String>,

    /// TOML config file (defaults to ROUTEGRAPH_CONFIG)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize the static candidate pool set
    Pools {
        /// Input token (symbol or address)
        #[arg(long, requires = "token_out")]
        token_in: Option<String>,

        /// Output token (symbol or address)
        #[arg(long, requires = "token_in")]
        token_out: Option<String>,

        /// Print the pool set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Break down the gas estimate for a route
    Gas {
        /// Comma-separated token path, input first (symbols or addresses)
        #[arg(long, value_delimiter = ',', required = true)]
        path: Vec<String>,

        /// Initialized ticks crossed along the route
        #[arg(long, default_value_t = 0)]
        ticks: u64,

        /// Route starts from the native asset
        #[arg(long)]
        native_in: bool,

        /// Route ends in the native asset
        #[arg(long)]
        native_out: bool,
    },

    /// Show every chain's registry entry and gas table
    Chains,
}

/// JSON output of `pools --json`
#[derive(Serialize)]
struct PoolSnapshot<'a> {
    generated_at: DateTime<Utc>,
    chain: &'a str,
    chain_id: u64,
    pools: &'a [SyntheticPoolRecord],
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("routegraph=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(chain) = &cli.chain {
        config.chain = chain.clone();
    }

    let chain = config.chain_id()?;
    let registry = Arc::new(config.build_registry()?);
    let gas_model = config.build_gas_model()?;
    debug!("Configuration validated for {} chains", ChainId::ALL.len());

    match cli.command {
        Command::Pools {
            token_in,
            token_out,
            json,
        } => run_pools(chain, registry, token_in, token_out, json),
        Command::Gas {
            path,
            ticks,
            native_in,
            native_out,
        } => run_gas(chain, &gas_model, &path, ticks, native_in, native_out),
        Command::Chains => {
            print_chains(&registry, &gas_model);
            Ok(())
        }
    }
}

fn run_pools(
    chain: ChainId,
    registry: Arc<ChainRegistry>,
    token_in: Option<String>,
    token_out: Option<String>,
    json: bool,
) -> Result<()> {
    let token_in = token_in.map(|s| resolve_token(chain, &s)).transpose()?;
    let token_out = token_out.map(|s| resolve_token(chain, &s)).transpose()?;

    let provider = StaticPoolProvider::new(chain, registry, Arc::new(Create2PairDeriver));
    let pools = provider.pools(token_in.as_ref(), token_out.as_ref())?;

    if json {
        let snapshot = PoolSnapshot {
            generated_at: Utc::now(),
            chain: chain.name(),
            chain_id: chain.id(),
            pools: &pools,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        style(format!(" Static pools on {} ({} total)", chain, pools.len())).cyan().bold()
    );
    println!("{}", style("═══════════════════════════════════════════════════════════════").cyan());
    for (i, pool) in pools.iter().enumerate() {
        println!(
            "  {:>3}. {}  {} / {}",
            i + 1,
            style(&pool.id).green(),
            pool.token0.id,
            pool.token1.id
        );
    }
    println!();

    if let (Some(a), Some(b)) = (&token_in, &token_out) {
        let graph = CandidateGraph::from_records(&pools);
        let direct = graph.has_pool(a.address, b.address);
        let reachable = graph.is_reachable(a.address, b.address);
        info!(
            "{} -> {}: direct pool {}, reachable {}",
            a.label(),
            b.label(),
            direct,
            reachable
        );
    }

    Ok(())
}

fn run_gas(
    chain: ChainId,
    gas_model: &GasModel,
    path: &[String],
    ticks: u64,
    native_in: bool,
    native_out: bool,
) -> Result<()> {
    let tokens = path
        .iter()
        .map(|s| resolve_token(chain, s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut route =
        RouteShape::through(chain, tokens, ticks).ok_or_else(|| eyre!("Token path is empty"))?;
    if native_in {
        route = route.with_input(Currency::Native(chain));
    }
    if native_out {
        route = route.with_output(Currency::Native(chain));
    }

    let breakdown = gas_model.breakdown(&route);
    let labels: Vec<String> = route.token_path.iter().map(|t| t.label()).collect();

    println!();
    println!(
        "{}",
        style(format!(" Gas estimate on {}: {}", chain, labels.join(" → "))).cyan().bold()
    );
    println!("{}", style("═══════════════════════════════════════════════════════════════").cyan());
    print_term("Base swap", breakdown.base);
    print_term(&format!("Hops ({})", route.hops()), breakdown.hops);
    print_term(&format!("Initialized ticks ({})", ticks), breakdown.initialized_ticks);
    print_term("Single-hop overhead", breakdown.single_hop);
    print_term("Token overhead", breakdown.token_path);
    print_term("Native wrap/unwrap", breakdown.native);
    println!("  {}", style("───────────────────────────────────────────").dim());
    println!("  {:<28} {}", style("TOTAL").bold(), style(breakdown.total()).green().bold());
    println!();

    Ok(())
}

fn print_term(label: &str, value: U256) {
    println!("  {:<28} {}", label, value);
}

fn print_chains(registry: &ChainRegistry, gas_model: &GasModel) {
    println!();
    println!(
        "  {:<16} {:>9}  {:>5}  {:<8} {:>8} {:>8} {:>8}",
        "CHAIN", "ID", "BASES", "VENUE", "BASE", "HOP", "TICK"
    );
    for (chain, entry) in registry.iter() {
        let table = gas_model.table(chain);
        let venue = if entry.venue.is_some() {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!(
            "  {:<16} {:>9}  {:>5}  {:<8} {:>8} {:>8} {:>8}",
            chain.name(),
            chain.id(),
            entry.bases.len(),
            venue,
            table.base_swap,
            table.per_hop,
            table.per_init_tick
        );
    }
    println!();
}
