//! # rc_cli
//!
//! Command-line front-end for `rc_core`.
//!
//! ```text
//! rc_cli [CASE_FILE] [--json]
//! ```
//!
//! Without a case file a built-in demo section is analysed. `--json` prints
//! the results as JSON only. Log verbosity follows `RUST_LOG`.

use std::path::Path;
use std::process::ExitCode;

use rc_core::calculations::{calculate, StressStrainInput, StressStrainResult};
use rc_core::errors::CalcError;
use rc_core::file_io::load_case_file;
use rc_core::loads::LoadCase;
use rc_core::materials::ConcreteMaterial;
use rc_core::section::Section;
use rc_core::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    path: Option<String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args { path: None, json: false };
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            args.json = true;
        } else if args.path.is_none() {
            args.path = Some(arg);
        } else {
            warn!(argument = %arg, "ignoring extra argument");
        }
    }
    args
}

/// 1000 x 800 mm wall strip, C30/37, 5⌀14 top and 4⌀20 bottom.
fn demo_inputs() -> Vec<StressStrainInput> {
    let section = Section::new(1000.0, 800.0, ConcreteMaterial::from_characteristic_strength(30.0))
        .with_rebar_layer(5, 14.0, -340.0)
        .with_rebar_layer(4, 20.0, 340.0);

    vec![
        StressStrainInput {
            label: "Demo: N + M".to_string(),
            section: section.clone(),
            loads: LoadCase::new("ULS-1").with_axial_force(50_000.0).with_moment(450.0e6),
        },
        StressStrainInput {
            label: "Demo: compression + hogging".to_string(),
            section,
            loads: LoadCase::new("ULS-2").with_axial_force(-500_000.0).with_moment(-450.0e6),
        },
    ]
}

fn load_inputs(path: Option<&str>) -> Result<Vec<StressStrainInput>, CalcError> {
    match path {
        Some(path) => {
            let file = load_case_file(Path::new(path))?;
            info!(path, cases = file.cases.len(), "case file loaded");
            Ok(file.cases)
        }
        None => {
            info!("no case file given, running demo");
            Ok(demo_inputs())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rc_cli=info,rc_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args();

    let inputs = match load_inputs(args.path.as_deref()) {
        Ok(inputs) => inputs,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut results = Vec::with_capacity(inputs.len());
    for input in &inputs {
        match calculate(input) {
            Ok(result) => {
                if !args.json {
                    print_report(input, &result);
                }
                results.push(result);
            }
            Err(e) => {
                eprintln!("Case '{}' failed", input.label);
                report_error(&e);
                return ExitCode::FAILURE;
            }
        }
    }

    let json = match results_json(&results) {
        Ok(json) => json,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if !args.json {
        println!();
        println!("JSON Output (for API use):");
    }
    println!("{}", json);

    ExitCode::SUCCESS
}

fn print_report(input: &StressStrainInput, result: &StressStrainResult) {
    let section = &input.section;
    let loads = &input.loads;

    println!("═══════════════════════════════════════");
    println!("  {}", result.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Section:  {:.0} x {:.0} mm", section.width_mm, section.height_mm);
    println!("  Concrete: {}", section.concrete);
    println!("  Rebars:   {} (A_s = {:.0} mm²)", section.rebars.len(), section.rebar_area_mm2());
    let n_ed: KiloNewtons = Newtons(loads.axial_force()).into();
    let m_ed: KiloNewtonMeters = NewtonMillimeters(loads.moment()).into();
    println!("  N_Ed = {:.1} kN", n_ed.value());
    println!("  M_Ed = {:.1} kNm", m_ed.value());
    println!("  Situation: {} (γ_s = {:.2}, γ_c = {:.2})",
        loads.design_situation,
        result.gamma_s,
        result.gamma_c
    );
    println!();
    println!("Neutral Axis:");
    println!("  Compressed edge: {}", result.most_strained_side);
    println!("  x_u = {:.2} mm {}", result.x_u_mm, status_icon(result.solver.converged));
    println!("  Iterations: {} ({} evaluations)",
        result.solver.iterations,
        result.solver.evaluations
    );
    println!();
    println!("Concrete:");
    println!("  ε_c = {:.4} ‰", result.concrete_strain * 1.0e3);
    println!("  σ_c = {:.2} MPa", result.concrete_stress_mpa);
    println!("  F_c = {:.1} kN", KiloNewtons::from(Newtons(result.concrete_force_n)).value());

    if !result.rebars.is_empty() {
        println!();
        println!("Rebars (f_yd = {:.1} MPa):", result.design_yield_strength_mpa);
        for rebar in &result.rebars {
            println!("  y = {:>7.1} mm  ε = {:>8.4} ‰  σ = {:>7.1} MPa{}",
                rebar.y_mm,
                rebar.strain * 1.0e3,
                rebar.stress_mpa,
                if rebar.yielded { "  [YIELD]" } else { "" }
            );
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("  {} of {} bars yielded",
        result.yielded_rebar_count(),
        result.rebars.len()
    );
    println!("═══════════════════════════════════════");
    println!();
}

fn results_json(results: &[StressStrainResult]) -> Result<String, CalcError> {
    serde_json::to_string_pretty(results).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(converged: bool) -> &'static str {
    if converged { "[OK]" } else { "[NOT CONVERGED]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_results_serialize() {
        let results: Vec<StressStrainResult> = demo_inputs().iter().map(|i| calculate(i).unwrap()).collect();
        let json = results_json(&results).unwrap();
        assert!(json.contains("Demo: N + M"));
        assert!(json.contains("\"most_strained_side\": \"UPPER_EDGE\""));
    }

    #[test]
    fn test_empty_results_serialize() {
        assert_eq!(results_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_demo_without_case_file() {
        let inputs = load_inputs(None).unwrap();
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_missing_case_file_is_file_error() {
        let err = load_inputs(Some("/nonexistent/rc_cli/case.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
