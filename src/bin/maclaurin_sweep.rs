use std::path::{Path, PathBuf};

use maclaurin::{
    display::{format_max_error, StatCard},
    inputs::{parse_degree_field, parse_step_field, RawInputs},
    normalize_inputs, MaclaurinSeries, Sweep, SweepParams,
};

const USAGE: &str = "Usage: maclaurin_sweep [degree=<n>] [step=<x>] [lower=<x>] [upper=<x>] [config=<file.json>] [format=table|json] [plot=<file.png>]";

enum Format {
    Table,
    Json,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "help" || arg == "--help" || arg == "-h") {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    //
    // Config file first, so that arguments override it
    let mut raw = RawInputs::default();
    if let Some(path) = args.iter().find_map(|arg| arg.strip_prefix("config=")) {
        raw = RawInputs::from_json_file(path).unwrap_or_else(|err| {
            eprintln!("Failed to load config file {path}: {err}");
            std::process::exit(1);
        });
    }

    let mut format = Format::Table;
    let mut plot_path = None;
    for arg in &args {
        if let Some(option) = arg.strip_prefix("degree=") {
            raw.degree = parse_degree_field(option);
        } else if let Some(option) = arg.strip_prefix("step=") {
            raw.step = parse_step_field(option);
        } else if let Some(option) = arg.strip_prefix("lower=") {
            raw.lower = parse_step_field(option);
        } else if let Some(option) = arg.strip_prefix("upper=") {
            raw.upper = parse_step_field(option);
        } else if let Some(option) = arg.strip_prefix("format=") {
            format = match option {
                "table" => Format::Table,
                "json" => Format::Json,
                _ => {
                    eprintln!("Unsupported format: {option}");
                    std::process::exit(1);
                }
            };
        } else if let Some(option) = arg.strip_prefix("plot=") {
            plot_path = Some(PathBuf::from(option));
        } else if !arg.starts_with("config=") {
            eprintln!("Unknown argument: {arg}\n{USAGE}");
            std::process::exit(1);
        }
    }

    let params = normalize_inputs(&raw);
    report_fallbacks(&raw, &params);

    let sweep = Sweep::run(&params);
    match format {
        Format::Table => {
            println!("{}", MaclaurinSeries::<f64>::new(params.degree).equation());
            println!("{} samples over [{}, {}]\n", sweep.len(), params.lower, params.upper);
            println!("{}", StatCard::new(&sweep));
            if !sweep.is_empty() {
                println!("MAE        {}", format_max_error(sweep.mean_absolute_error()));
                println!("RMSE       {}", format_max_error(sweep.root_mean_squared_error()));
            }
        }

        Format::Json => match serde_json::to_string_pretty(&sweep) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize sweep: {err}");
                std::process::exit(1);
            }
        },
    }

    if let Some(path) = plot_path {
        plot(&sweep, &path);
    }
}

/// Tells the user about any value that was swapped for its fallback
#[allow(clippy::cast_precision_loss)]
fn report_fallbacks(raw: &RawInputs, params: &SweepParams) {
    if raw.degree != params.degree as f64 {
        eprintln!("[ degree={} is not a whole number >= 0, using {} ]", raw.degree, params.degree);
    }
    if raw.step != params.step {
        eprintln!("[ step={} is unusable, using {} ]", raw.step, params.step);
    }
    if raw.lower != params.lower {
        eprintln!("[ lower={} is not finite, using {} ]", raw.lower, params.lower);
    }
    if raw.upper != params.upper {
        eprintln!("[ upper={} is not finite, using {} ]", raw.upper, params.upper);
    }
    if params.lower > params.upper {
        eprintln!("[ lower is above upper, nothing to sample ]");
    }
}

#[cfg(feature = "plotting")]
fn plot(sweep: &Sweep, path: &Path) {
    match maclaurin::plotting::SweepChart::default().render_png(sweep, path) {
        Ok(()) => eprintln!("Wrote plot to {}", path.display()),
        Err(err) => {
            eprintln!("Failed to plot {}: {err}", path.display());
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "plotting"))]
fn plot(_: &Sweep, path: &Path) {
    eprintln!(
        "Cannot write {}: built without the `plotting` feature",
        path.display()
    );
    std::process::exit(1);
}
