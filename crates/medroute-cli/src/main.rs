//! MedRoute console.
//!
//! Seeds a hospital either from interactive prompts or from a scenario
//! file, prints the shortest distances from the central department, then
//! runs the numbered menu until the operator exits.
//!
//! Usage:
//!   medroute
//!   medroute --scenario data/scenarios/general_hospital.json
//!   medroute --max-patients 50 -vv

mod menu;
mod prompt;
mod render;
mod setup;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use medroute_logic::scenario::Scenario;
use medroute_logic::session::Session;
use medroute_logic::HospitalError;

use crate::prompt::Prompter;

#[derive(Parser, Debug)]
#[command(name = "medroute")]
#[command(version)]
#[command(about = "Hospital resource allocation over a department distance graph")]
struct Args {
    /// Load departments, corridors and the central department from a JSON
    /// scenario instead of prompting for them.
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Refuse admissions once this many patients are in the hospital.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_patients: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_scenario(path: &Path, max_patients: Option<usize>) -> Result<Session> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let mut scenario = Scenario::from_json(&json)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    if max_patients.is_some() {
        scenario.max_patients = max_patients;
    }
    log::info!(
        "Loaded scenario {:?} with {} departments",
        scenario.name.as_deref().unwrap_or("unnamed"),
        scenario.departments.len()
    );
    Ok(Session::from_scenario(&scenario)?)
}

fn run(args: Args) -> Result<()> {
    let max_patients = args
        .max_patients
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let mut session = match &args.scenario {
        Some(path) => load_scenario(path, max_patients)?,
        None => Session::new(setup::prompt_setup(&mut prompter, max_patients)?)?,
    };

    write!(prompter.output(), "{}", render::distances(session.distances()))?;
    menu::run_menu(&mut prompter, &mut session)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        let fatal = e
            .downcast_ref::<HospitalError>()
            .is_some_and(HospitalError::is_fatal);
        if fatal {
            eprintln!("Fatal: {:#}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
