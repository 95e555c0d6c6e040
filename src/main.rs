use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cutlist_optimizer::config::OptimizeRequest;
use cutlist_optimizer::input::{parse_cut, parse_kerf, parse_stock};
use cutlist_optimizer::render;
use cutlist_optimizer::types::{CutPlacement, Mode, OptimizationResult};
use cutlist_optimizer::units::format_dimension;
use cutlist_optimizer::validate::validate_request;

#[derive(Parser)]
#[command(
    name = "cutlist",
    version,
    about = "Cut-list optimizer for boards (linear) and sheet goods"
)]
struct Cli {
    /// Optimization mode: linear or sheet
    #[arg(long, default_value = "linear", value_parser = parse_mode)]
    mode: Mode,

    /// Stock as [label=]L:qty or [label=]LxW:qty (e.g. 96:5 96x48:2)
    #[arg(long, num_args = 1.., required_unless_present = "input")]
    stock: Vec<String>,

    /// Cuts as [label=]L:qty or [label=]LxW:qty[:grain] (e.g. shelf=30x12:4:grain)
    #[arg(long = "cuts", num_args = 1.., required_unless_present = "input")]
    cuts: Vec<String>,

    /// Blade kerf: inches (0.125, 1/8) or preset (standard, thin, thick, none)
    #[arg(long, default_value = "standard", value_parser = parse_kerf_arg)]
    kerf: f64,

    /// Read the request from a JSON file instead of the flags above
    #[arg(long, conflicts_with_all = ["stock", "cuts"])]
    input: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Show an ASCII layout of each stock unit
    #[arg(long)]
    layout: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}

fn parse_kerf_arg(s: &str) -> Result<f64, String> {
    parse_kerf(s).map_err(|e| e.to_string())
}

fn build_request(cli: &Cli) -> Result<OptimizeRequest> {
    if let Some(path) = &cli.input {
        return OptimizeRequest::load(path)
            .with_context(|| format!("Failed to load request from {}", path.display()));
    }

    let cuts = cli
        .cuts
        .iter()
        .enumerate()
        .map(|(i, c)| parse_cut(c, i))
        .collect::<Result<Vec<_>, _>>()?;
    let stock = cli
        .stock
        .iter()
        .enumerate()
        .map(|(i, s)| parse_stock(s, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OptimizeRequest {
        mode: cli.mode,
        cuts,
        stock,
        kerf: cli.kerf,
    })
}

fn print_plans(mode: Mode, result: &OptimizationResult, layout: bool) {
    for (i, plan) in result.plans.iter().enumerate() {
        println!("{} {} ({}):", plan.stock_label, i + 1, plan.stock_id);
        for cut in &plan.cuts {
            let size = match cut.placement.width() {
                Some(w) => format!(
                    "{}x{}",
                    format_dimension(cut.placement.length()),
                    format_dimension(w)
                ),
                None => format_dimension(cut.placement.length()),
            };
            match cut.placement {
                CutPlacement::Sheet { x, y, rotated, .. } => {
                    let rot = if rotated { " [rotated]" } else { "" };
                    println!(
                        "  {} {} @ ({}, {}){}",
                        cut.cut_label,
                        size,
                        format_dimension(x),
                        format_dimension(y),
                        rot
                    );
                }
                CutPlacement::Linear { .. } => {
                    println!("  {} {}", cut.cut_label, size);
                }
            }
        }
        if layout {
            match mode {
                Mode::Linear => print!("{}", render::render_linear(plan)),
                Mode::Sheet => print!("{}", render::render_sheet(plan)),
            }
        }
        println!();
    }

    let summary = &result.summary;
    let unit = match mode {
        Mode::Linear => "in",
        Mode::Sheet => "sq in",
    };
    println!(
        "Summary: {} stock unit{} used, {:.1}% waste ({:.2} {})",
        summary.total_stock_used,
        if summary.total_stock_used == 1 { "" } else { "s" },
        summary.waste_percentage,
        summary.total_waste,
        unit,
    );
    if mode == Mode::Linear {
        println!(
            "Linear feet: {:.2} used of {:.2} available",
            summary.total_linear_feet_used, summary.total_linear_feet_available
        );
    }
    if !summary.unplaced_cuts.is_empty() {
        println!("Unplaced: {}", summary.unplaced_cuts.join(", "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let request = build_request(&cli)?;
    validate_request(&request)?;

    info!(
        mode = %request.mode,
        cuts = request.cuts.len(),
        stock = request.stock.len(),
        kerf = request.kerf,
        "optimizing"
    );
    let result = request.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        print_plans(request.mode, &result, cli.layout);
    }

    if let Some(message) = &result.error {
        error!("{}", message);
        std::process::exit(1);
    }

    Ok(())
}
