//! Diagnostic tool - Check configuration health
//!
//! Run with: cargo run --bin diagnose
//!
//! Builds the registry and gas model from the current environment/config
//! file and reports, per chain, whether static pools can be synthesized.

use std::env;

use routegraph::cartographer::{synthesize, Create2PairDeriver};
use routegraph::{ChainId, Config};

fn main() {
    println!("🔍 ROUTEGRAPH DIAGNOSTIC CHECK\n");

    dotenvy::dotenv().ok();

    println!("═══════════════════════════════════════════════════");
    println!("                  CONFIGURATION                     ");
    println!("═══════════════════════════════════════════════════\n");

    let checks = [
        ("CHAIN", "mainnet", "Default chain"),
        ("ROUTEGRAPH_CONFIG", "(none)", "TOML overrides file"),
        ("RUST_LOG", "routegraph=info", "Log filter"),
    ];

    for (key, default, desc) in checks {
        let value = env::var(key).unwrap_or_else(|_| default.to_string());
        let marker = if env::var(key).is_err() { "(default)" } else { "(from env)" };
        println!("  {}: {} {}", key, value, marker);
        println!("    └─ {}\n", desc);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("  ❌ Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            println!("  ❌ Token registry invalid: {}", e);
            std::process::exit(1);
        }
    };

    let gas_model = match config.build_gas_model() {
        Ok(model) => model,
        Err(e) => {
            println!("  ❌ Gas tables invalid: {}", e);
            std::process::exit(1);
        }
    };

    println!("═══════════════════════════════════════════════════");
    println!("                  PER-CHAIN STATUS                  ");
    println!("═══════════════════════════════════════════════════\n");

    let mut deployed = 0;
    let mut failures = Vec::new();
    for chain in ChainId::ALL {
        let bases = registry.bases(chain);
        let pools = synthesize(&registry, &Create2PairDeriver, chain, None, None);
        let base_swap = gas_model.base_swap_cost(chain);

        match pools {
            Ok(pools) if registry.venue(chain).is_some() => {
                deployed += 1;
                println!(
                    "  ✅ {:<16} {} bases, {} static pools, base swap {} gas",
                    chain.name(),
                    bases.len(),
                    pools.len(),
                    base_swap
                );
            }
            Ok(_) => {
                println!(
                    "  ⚪ {:<16} no pair factory, base swap {} gas",
                    chain.name(),
                    base_swap
                );
            }
            Err(e) => {
                println!("  ❌ {:<16} derivation failed: {}", chain.name(), e);
                failures.push(chain);
            }
        }
    }

    println!("\n═══════════════════════════════════════════════════");
    println!("                     STATUS                         ");
    println!("═══════════════════════════════════════════════════\n");
    println!(
        "  {} of {} chains have a pair factory configured",
        deployed,
        ChainId::ALL.len()
    );
    let (healthy, line) = status_line(&failures);
    println!("  {}\n", line);
    if !healthy {
        std::process::exit(1);
    }
}

/// Final verdict; only healthy when no chain failed derivation
fn status_line(failures: &[ChainId]) -> (bool, String) {
    if failures.is_empty() {
        return (true, "✅ Registry and gas tables cover every chain".to_string());
    }

    let names: Vec<&str> = failures.iter().map(|c| c.name()).collect();
    (false, format!("❌ Pool derivation failed on: {}", names.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let (healthy, line) = status_line(&[]);
        assert!(healthy);
        assert!(line.starts_with("✅"));

        let (healthy, line) = status_line(&[ChainId::Fantom, ChainId::Eon]);
        assert!(!healthy);
        assert!(!line.contains("✅"));
        assert!(line.ends_with("fantom, eon"));
    }
}
