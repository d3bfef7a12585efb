//! Footprint CLI
//!
//! Computes the footprint of an inputs file, or compares it across
//! candidate countries, and prints the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use textile_footprint::codec;
use textile_footprint::{
    country_scenarios, CompareConfig, Comparator, Country, Db, FootprintError, FootprintResult,
    Simulator,
};

/// CLI configuration
#[derive(Default)]
struct Config {
    /// Dataset directory; the embedded dataset when unset
    data_dir: Option<PathBuf>,
    /// Candidate countries for a comparison
    compare: Vec<Country>,
    pretty: bool,
    workers: Option<usize>,
    inputs: Option<PathBuf>,
}

fn usage() {
    println!("footprint - textile life-cycle CO2 footprint");
    println!();
    println!("USAGE:");
    println!("    footprint [OPTIONS] <INPUTS.json>");
    println!();
    println!("OPTIONS:");
    println!("    -d, --data-dir <DIR>        Dataset directory [default: embedded dataset]");
    println!("    -c, --compare <CC,CC,...>   Compare editable stages across countries");
    println!("    -w, --workers <N>           Comparison worker threads [default: 4]");
    println!("        --pretty                Pretty-print JSON output");
    println!("    -h, --help                  Print help information");
    println!();
    println!("Logging is controlled by RUST_LOG [default: warn].");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(2);
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                let Some(dir) = args.get(i + 1) else {
                    fail("--data-dir requires a value");
                };
                config.data_dir = Some(PathBuf::from(dir));
                i += 2;
            }
            "--compare" | "-c" => {
                let Some(list) = args.get(i + 1) else {
                    fail("--compare requires a value");
                };
                config.compare = list
                    .split(',')
                    .filter(|code| !code.trim().is_empty())
                    .map(|code| {
                        Country::new(code).unwrap_or_else(|e| fail(&e.to_string()))
                    })
                    .collect();
                i += 2;
            }
            "--workers" | "-w" => {
                let Some(n) = args.get(i + 1) else {
                    fail("--workers requires a value");
                };
                let n: usize = n
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("invalid worker count: {n}")));
                config.workers = Some(n);
                i += 2;
            }
            "--pretty" => {
                config.pretty = true;
                i += 1;
            }
            "--help" | "-h" => {
                usage();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => fail(&format!("unknown argument: {arg}")),
            path => {
                if config.inputs.is_some() {
                    fail(&format!("unexpected argument: {path}"));
                }
                config.inputs = Some(PathBuf::from(path));
                i += 1;
            }
        }
    }
    config
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> FootprintResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| FootprintError::internal(format!("encode output: {e}")))
}

fn run(config: Config) -> FootprintResult<String> {
    let Some(path) = config.inputs else {
        fail("missing <INPUTS.json>; see --help");
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|e| FootprintError::internal(format!("read {}: {e}", path.display())))?;
    let inputs = codec::inputs_from_json(&json)?;

    let db = match &config.data_dir {
        Some(dir) => Db::from_dir(dir)?,
        None => Db::builtin()?,
    };

    if config.compare.is_empty() {
        let sim = Simulator::from_inputs(&inputs, &db)?;
        return if config.pretty {
            Ok(codec::to_json_pretty(&sim)?)
        } else {
            Ok(codec::to_json(&sim)?)
        };
    }

    let mut compare_config = CompareConfig::default();
    if let Some(workers) = config.workers {
        compare_config.workers = workers;
    }
    let comparator = Comparator::start(db, compare_config)?;
    let outcomes = comparator.compare(country_scenarios(&inputs, &config.compare));
    let reports: Vec<_> = outcomes.iter().map(|o| o.report()).collect();
    to_json(&reports, config.pretty)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(parse_args()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(target: "textile_footprint::cli", error = %e, fatal = e.is_fatal(), "cli.failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
