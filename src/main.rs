//! VioFlux - Entry point
//!
//! CLI Usage:
//!   vioflux pathway                         # List genes
//!   vioflux modules                         # List control modules
//!   vioflux simulate --levels 0.5,1,1,0.5,0.2
//!   vioflux simulate --modules CRISPRa_Ec,CRISPRi_dCas9,... --json out.json
//!   vioflux grid --csv exports/grid.csv --all

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vioflux::{
    export::{export_report_json, write_grid_csv},
    simulation::GridSearch,
    Configuration, ModuleKind, Parameters, PathwayModel, SimulationRequest,
};

#[derive(Parser)]
#[command(name = "vioflux", version, about = "Epigenetic tuning simulator for the violacein pathway")]
struct Cli {
    /// Directory containing violacein_pathway.tsv and epigenetic_modules.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Parameters JSON file (defaults are used if missing)
    #[arg(long, global = true, default_value = "data/parameters.json")]
    params: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pathway genes in step order
    Pathway,
    /// List available control modules
    Modules,
    /// Simulate one configuration
    Simulate {
        /// Module per gene (comma-separated); defaults to the grid module everywhere
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,
        /// Level per gene (comma-separated); defaults to 0.5 everywhere
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        levels: Vec<f64>,
        #[arg(long)]
        supply_cap: Option<f64>,
        #[arg(long)]
        gamma_burden: Option<f64>,
        #[arg(long)]
        p_softmin: Option<f64>,
        /// Write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Rank every OFF/MED/ON combination
    Grid {
        /// Number of ranked rows to print
        #[arg(long)]
        top_k: Option<usize>,
        /// Write the ranking as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write every combination to the CSV, not just the top rows
        #[arg(long)]
        all: bool,
    },
}

const DEFAULT_LEVEL: f64 = 0.5;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut params = Parameters::load_or_default(&cli.params);
    if let Some(dir) = cli.data_dir {
        params.data_dir = dir;
    }
    params.validate()?;

    let model = PathwayModel::load_from_dir(&params.data_dir, &params.rules)
        .with_context(|| format!("loading pathway data from {}", params.data_dir.display()))?;
    log::info!(
        "Loaded {} genes and {} modules",
        model.gene_count(),
        model.modules().len()
    );

    match cli.command {
        Command::Pathway => print_pathway(&model),
        Command::Modules => print_modules(&model),
        Command::Simulate {
            modules,
            levels,
            supply_cap,
            gamma_burden,
            p_softmin,
            json,
        } => {
            let n = model.gene_count();
            let modules = if modules.is_empty() {
                let default_module = grid_module_id(&model, &params);
                vec![default_module; n]
            } else {
                modules
            };
            let levels = if levels.is_empty() { vec![DEFAULT_LEVEL; n] } else { levels };
            let request = SimulationRequest {
                modules,
                levels,
                supply_cap,
                gamma_burden,
                p_softmin,
            };
            run_simulation(&model, request, &params, json)?;
        }
        Command::Grid { top_k, csv, all } => {
            if let Some(top_k) = top_k {
                params.grid.top_k = top_k;
            }
            params.validate()?;
            run_grid(&model, &params, csv, all)?;
        }
    }

    Ok(())
}

fn grid_module_id(model: &PathwayModel, params: &Parameters) -> String {
    params
        .grid
        .module_id
        .as_deref()
        .filter(|id| model.module(id).is_ok())
        .unwrap_or(model.modules()[0].id.as_str())
        .to_string()
}

fn print_pathway(model: &PathwayModel) {
    println!("=== Pathway ===");
    println!("{:<4} {:<8} {:>10} {:>10}", "step", "gene", "baseline_k", "burden_w");
    for (i, gene) in model.genes().iter().enumerate() {
        println!(
            "{:<4} {:<8} {:>10.2} {:>10.2}",
            i + 1,
            gene.id,
            gene.baseline_k,
            gene.burden_w
        );
    }
    if let Some(gate) = &model.rules().gate {
        println!("Gate gene: {} (threshold {:.2})", gate.gene_id, gate.threshold);
    }
    if let Some(shunt) = &model.rules().shunt {
        println!("Shunt-prone gene: {}", shunt.gene_id);
    }
}

fn print_modules(model: &PathwayModel) {
    println!("=== Modules ===");
    for module in model.modules() {
        let extra = match module.kind {
            ModuleKind::Activator { a_max } => format!("A_max={:.2}", a_max),
            ModuleKind::Repressor { min_fold } => format!("min_fold={:.2}", min_fold),
            ModuleKind::Binary | ModuleKind::Neutral => String::new(),
        };
        println!(
            "{:<16} {:<10} EC50={:.2} h={:.1} leak={:.2} {}",
            module.id,
            module.kind.name(),
            module.ec50,
            module.hill_n,
            module.leak,
            extra
        );
    }
}

fn run_simulation(
    model: &PathwayModel,
    request: SimulationRequest,
    base: &Parameters,
    json: Option<PathBuf>,
) -> Result<()> {
    let (config, params): (Configuration, Parameters) = request.into_parts(base);
    params.validate()?;
    let result = vioflux::simulate(model, &config, &params)?;

    println!("=== Simulation ===");
    for ((gene, module), level) in model.gene_ids().zip(&config.modules).zip(&config.levels) {
        println!("  {:<8} {:<16} level={:.2}", gene, module, level);
    }
    println!();
    println!("Yield: {:.4}", result.yield_value);
    println!(
        "Bottleneck: {} | F_core={:.4} | F={:.4} | supply cap={:.2}",
        result.flux.bottleneck_gene,
        result.flux.fcore,
        result.flux.flux,
        params.simulation.supply_cap
    );
    println!(
        "Burden φ={:.3} → penalty {:.4}",
        result.burden.phi, result.burden.penalty
    );
    println!("Imbalance penalty: {:.4}", result.imbalance_penalty);
    println!("Shunt leak: {:.3}", result.leak);

    println!("\n--- Sensitivity ---");
    for s in &result.sensitivities {
        let bar = "#".repeat((s.influence * 30.0).round() as usize);
        println!("  {:<8} {:.3} {}", s.gene, s.influence, bar);
    }

    if !result.notes.is_empty() {
        println!("\n--- Notes ---");
        for note in &result.notes {
            println!("⚠️  {}", note);
        }
    }

    if let Some(path) = json {
        export_report_json(&result, &path)?;
        println!("\nReport written to {}", path.display());
    }
    Ok(())
}

fn run_grid(model: &PathwayModel, params: &Parameters, csv: Option<PathBuf>, all: bool) -> Result<()> {
    let search = GridSearch::new(model, &params.simulation, &params.grid)?;
    let ranked = search.run_all()?;
    let total = ranked.len();
    let top = &ranked[..params.grid.top_k.min(total)];

    println!(
        "=== Grid search: {} on every gene, levels {:?} ===",
        search.module().id,
        params.grid.levels
    );
    println!("Total combinations: {}\n", total);
    println!("{:>4} {:>8} {:<10} config", "rank", "yield", "bottleneck");
    for (i, entry) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8.4} {:<10} {}",
            i + 1,
            entry.yield_value,
            entry.bottleneck_gene,
            entry.label
        );
    }

    if let Some(path) = csv {
        let gene_ids: Vec<String> = model.gene_ids().map(str::to_string).collect();
        let rows = if all { &ranked[..] } else { top };
        write_grid_csv(&gene_ids, rows, &path)?;
        println!("\nGrid written to {}", path.display());
    }
    Ok(())
}
