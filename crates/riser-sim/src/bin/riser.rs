//! # riser
//!
//! Command-line front end for the riser calculator.
//!
//! ## Usage
//!
//! ```bash
//! # Table of per-floor levels
//! riser simulate --building tower.toml --catalogue parts.toml --margins margins.toml
//!
//! # Constraint-aware selection, JSON report on stdout
//! riser simulate --building tower.toml --catalogue parts.json --strategy margin-aware --json
//!
//! # Per-component breakdown
//! riser simulate --building tower.toml --catalogue parts.toml --trace
//!
//! # SNR estimate after an amplifier
//! riser snr --level 72.5 --noise-figure 6
//!
//! # Synthetic catalogue for load tests
//! riser generate --seed 7 --per-category 10 > parts.toml
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-floor detail.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use riser_calc::{compute_snr, Optimizer, OptimizerConfig, StrategyKind};
use riser_common::margins::margins_from_toml_str;
use riser_common::{Amplifier, BuildingConfig, Category, ComponentCatalog};
use riser_sim::scenario::{CatalogueConfig, CatalogueGenerator};
use riser_sim::{render_schematic, render_trace, Simulation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "riser", about = "Building signal-distribution calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation for a building.
    Simulate {
        /// Building configuration (TOML).
        #[arg(long)]
        building: PathBuf,

        /// Component catalogue (TOML, or JSON when the extension is .json).
        #[arg(long)]
        catalogue: PathBuf,

        /// Quality margins (TOML with [[margins]] entries).
        #[arg(long)]
        margins: Option<PathBuf>,

        /// Selection strategy: cheapest | margin-aware.
        #[arg(long, default_value = "cheapest")]
        strategy: StrategyKind,

        /// Categories that must be installed on every floor.
        #[arg(long, value_delimiter = ',')]
        require: Option<Vec<Category>>,

        /// Print the full report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print a text schematic instead of the table.
        #[arg(long, default_value_t = false)]
        schematic: bool,

        /// Print each component's contribution per floor.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Estimate SNR for a level, optionally after an amplifier.
    Snr {
        #[arg(long, allow_hyphen_values = true)]
        level: f64,

        #[arg(long)]
        noise_figure: Option<f64>,
    },
    /// Print a deterministic synthetic catalogue as TOML.
    Generate {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[arg(long, default_value_t = 4)]
        per_category: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            building,
            catalogue,
            margins,
            strategy,
            require,
            json,
            schematic,
            trace,
        } => {
            let building = BuildingConfig::from_toml_str(&read(&building)?)
                .map_err(anyhow::Error::msg)
                .context("loading building")?;
            let catalog = load_catalogue(&catalogue)?;
            let margins = match margins {
                Some(path) => margins_from_toml_str(&read(&path)?)
                    .map_err(anyhow::Error::msg)
                    .context("loading margins")?,
                None => Vec::new(),
            };

            let mut config = OptimizerConfig::from(&building);
            config.strategy = strategy;
            if let Some(required) = require {
                config.required = required;
            }

            let report = Simulation::new(&building, &catalog, &margins)
                .with_optimizer(Optimizer::new(config))
                .run()?;

            if json {
                println!("{}", report.to_json_pretty()?);
            } else if schematic {
                print!("{}", render_schematic(&report));
            } else if trace {
                print!("{}", render_trace(&report));
            } else {
                print_table(&report);
            }
        }
        Command::Snr {
            level,
            noise_figure,
        } => {
            let amp = noise_figure.map(|nf| Amplifier {
                id: String::new(),
                model: String::from("cli"),
                cost: 0.0,
                attenuation: 0.0,
                gain: 0.0,
                noise_figure: nf,
            });
            println!("{:.2}", compute_snr(level, amp.as_ref()));
        }
        Command::Generate { seed, per_category } => {
            let catalog = CatalogueGenerator::new(CatalogueConfig {
                seed,
                per_category,
                ..CatalogueConfig::default()
            })
            .generate();
            print!(
                "{}",
                catalog.to_toml_string().map_err(anyhow::Error::msg)?
            );
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_catalogue(path: &Path) -> anyhow::Result<ComponentCatalog> {
    let text = read(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        ComponentCatalog::from_json_str(&text)
    } else {
        ComponentCatalog::from_toml_str(&text)
    };
    parsed
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("loading catalogue {}", path.display()))
}

fn print_table(report: &riser_sim::SimulationReport) {
    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>9}  verdict",
        "floor", "in dBuV", "out dBuV", "outlet", "cost"
    );
    for f in &report.floors {
        let outlet = f
            .outlet_level
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".into());
        let verdict = match f.pass {
            Some(true) => "pass",
            Some(false) => "FAIL",
            None => "unchecked",
        };
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>10} {:>9.2}  {}",
            f.floor, f.input_level, f.output_level, outlet, f.cost, verdict
        );
    }
    println!(
        "total cost {:.2} ({} failing, {} unchecked)",
        report.summary.total_cost,
        report.summary.failing_floors.len(),
        report.summary.unchecked_floors.len()
    );
}
