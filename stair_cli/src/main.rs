//! # Stair CLI
//!
//! Loads a stair description (JSON or TOML) or builds a preset, assembles
//! the model, prints a summary and the JSON model for renderers and
//! exporters. Logs go to stderr so stdout stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use stair_core::calculations::compliance::BlondelBand;
use stair_core::calculations::connector::ConnectorShape;
use stair_core::calculations::stair::{assemble, StairInput, StairModel, StairType};
use stair_core::config::{load_stair_input, model_to_json};
use stair_core::presets::preset;
use stair_core::units::{round2, Centimeters, Meters};
use stair_core::StairError;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "stair_cli")]
#[command(about = "Compute stair geometry: flights, landings, winders and totals")]
#[command(version)]
struct Cli {
    /// Stair description (.json or .toml).
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Use a built-in preset instead of a configuration file.
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Total floor-to-floor height for a preset (cm).
    #[arg(long, default_value = "300.0")]
    total_height: f64,

    /// Stair width for a preset (cm).
    #[arg(long, default_value = "100.0")]
    width: f64,

    /// Check Blondel values against the strict 62-64 cm band.
    #[arg(long)]
    strict_blondel: bool,

    /// Print only the JSON model.
    #[arg(long)]
    json_only: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Straight,
    LLanding,
    LWinder,
    ULanding,
    UWinder,
    ThreeFlight,
}

impl PresetArg {
    fn to_core(self) -> StairType {
        match self {
            PresetArg::Straight => StairType::Straight,
            PresetArg::LLanding => StairType::LLanding,
            PresetArg::LWinder => StairType::LWinder,
            PresetArg::ULanding => StairType::ULanding,
            PresetArg::UWinder => StairType::UWinder,
            PresetArg::ThreeFlight => StairType::ThreeFlight,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(stair_error) = e.downcast_ref::<StairError>() {
                if let Ok(json) = serde_json::to_string_pretty(stair_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    let mut input = load_input(cli)?;
    if cli.strict_blondel {
        input.compliance.blondel_band = BlondelBand::STRICT;
    }

    let model = assemble(&input)?;
    if !cli.json_only {
        print_summary(&model);
        println!();
        println!("JSON Output:");
    }
    println!("{}", model_to_json(&model)?);
    Ok(())
}

fn load_input(cli: &Cli) -> CliResult<StairInput> {
    match (&cli.config, cli.preset) {
        (Some(path), _) => {
            tracing::info!(path = %path.display(), "loading configuration");
            Ok(load_stair_input(path)?)
        }
        (None, Some(p)) => {
            tracing::info!(preset = p.to_core().tag(), "building preset");
            Ok(preset(p.to_core(), cli.total_height, cli.width)?)
        }
        (None, None) => Err("either a configuration file or --preset is required".into()),
    }
}

fn print_summary(model: &StairModel) {
    let title = if model.label.is_empty() {
        model.stair_type.display_name()
    } else {
        model.label.as_str()
    };

    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("  {}", model.stair_type.display_name());
    println!("═══════════════════════════════════════");
    println!();

    for geo in &model.ramps {
        let ramp = &geo.ramp;
        println!("Ramp {}:", geo.index + 1);
        println!("  Height:  {} cm", round2(ramp.height_cm));
        println!("  Risers:  {} x {} cm", ramp.num_risers, round2(ramp.actual_riser_cm));
        println!("  Treads:  {} x {} cm", ramp.num_treads, round2(ramp.actual_tread_cm));
        println!("  Run:     {} cm", round2(ramp.total_run_cm));
        println!("  Slope:   {}°", round2(ramp.slope_angle_deg));
        if let (Some(value), Some(ok)) = (ramp.blondel_value_cm, ramp.blondel_ok) {
            println!("  Blondel: {} cm {}", round2(value), status_icon(ok));
        }
        println!();
    }

    for connector in &model.connectors {
        match &connector.shape {
            ConnectorShape::Landing(landing) => {
                println!("Landing {}:", connector.index + 1);
                println!("  Depth:   {} cm", round2(landing.depth_cm));
                println!("  Turn:    {}° {:?}", landing.turn_angle_deg, landing.turn);
                println!("  Level:   {} cm", round2(landing.elevation_cm));
            }
            ConnectorShape::Winder(winder) => {
                println!("Winders {}:", connector.index + 1);
                println!("  Wedges:  {} x {}°", winder.steps.len(), round2(winder.step_angle_deg));
                println!("  Turn:    {}° {:?}", winder.turn_angle_deg, winder.turn);
                println!("  Risers:  {} cm", round2(winder.riser_height_cm));
                println!(
                    "  Radii:   {} / {} cm",
                    round2(winder.inner_radius_cm),
                    round2(winder.outer_radius_cm)
                );
            }
        }
        println!();
    }

    let totals = &model.totals;
    println!("Totals:");
    println!(
        "  Height:  {} cm ({} m)",
        round2(totals.total_height_cm),
        round2(Meters::from(Centimeters(totals.total_height_cm)).value())
    );
    println!(
        "  Run:     {} cm ({} m)",
        round2(totals.total_run_cm),
        round2(Meters::from(Centimeters(totals.total_run_cm)).value())
    );
    println!("  Width:   {} cm", round2(totals.stair_width_cm));
    println!("  Risers:  {}", totals.total_risers);
    println!("  Treads:  {}", totals.total_treads);
    println!(
        "  Plan:    {} x {} cm",
        round2(model.bounds.width()),
        round2(model.bounds.height())
    );
    println!();

    println!("═══════════════════════════════════════");
    if model.warnings.is_empty() {
        println!("  COMPLIANCE: {}", status_icon(true));
    } else {
        println!("  COMPLIANCE: {} ({} warning(s))", status_icon(false), model.warnings.len());
        for warning in &model.warnings {
            println!("  - {}", warning);
        }
    }
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[WARN]" }
}
