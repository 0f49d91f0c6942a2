//! Refugee incident sandbox
//!
//! Fires the "refugee chased" incident against an in-memory host, prints the
//! dialog, applies a choice and shows what ends up in the incident queue.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use incident_events::IncidentKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use refugee_incident::{
    default_config_toml, DialogStep, IncidentConfig, IncidentRegistry, PresentedDialog,
    RegistryError, SandboxHost, SandboxScenario,
};
use tracing_subscriber::EnvFilter;

/// Which option to pick on the root dialog node
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Choice {
    Accept,
    Reject,
    /// Leave the dialog open
    None,
}

impl Choice {
    fn option_index(self) -> Option<usize> {
        match self {
            Choice::Accept => Some(0),
            Choice::Reject => Some(1),
            Choice::None => None,
        }
    }
}

/// Command line arguments for the sandbox
#[derive(Parser, Debug)]
#[command(name = "refugee_incident")]
#[command(about = "Runs the refugee chased incident in a sandbox world")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Scenario JSON file (defaults to the bundled Riverside scenario)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Incident config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Option to pick once the dialog is shown
    #[arg(long, value_enum, default_value_t = Choice::Accept)]
    choice: Choice,

    /// Ticks to advance after the choice
    #[arg(long, default_value_t = 2500)]
    advance: u64,

    /// Print the default config and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.print_default_config {
        print!("{}", default_config_toml());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => IncidentConfig::from_file(path)?,
        None => IncidentConfig::default(),
    };
    let scenario = match &args.scenario {
        Some(path) => SandboxScenario::from_file(path)?,
        None => SandboxScenario::sample(),
    };

    let mut host = SandboxHost::from_scenario(scenario);
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let registry = IncidentRegistry::with_refugee_worker(&config)?;
    let area = host.area().clone();

    println!("Refugee Incident Sandbox");
    println!("========================");
    println!("Seed: {}", args.seed);
    println!("Area: {} ({}x{})", area.label, area.width, area.height);
    println!("Tick: {}", host.tick());
    println!();

    match registry.fire(IncidentKind::RefugeeChased, &area, &mut host, &mut rng) {
        Ok(()) => {}
        Err(RegistryError::Aborted(kind, reason)) => {
            println!("{} did not trigger: {}", kind, reason);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let Some(PresentedDialog { title, mut session }) = host.take_presented() else {
        return Err("incident fired but presented no dialog".into());
    };

    println!("== {} ==", title);
    if let Some(node) = session.current() {
        println!("{}", node.text);
    }
    println!();
    for (i, label) in session.option_labels().iter().enumerate() {
        println!("  [{}] {}", i, label);
    }
    println!();

    let Some(index) = args.choice.option_index() else {
        println!("Dialog left open.");
        return Ok(());
    };

    println!("Choosing {:?}", args.choice);
    let mut step = session.choose(index, &mut host, &mut rng)?;
    while let DialogStep::Moved(_) = step {
        if let Some(node) = session.current() {
            println!("{}", node.text);
        }
        // Follow-up nodes carry a single acknowledgement option
        step = session.choose(0, &mut host, &mut rng)?;
    }
    println!();

    println!("Queued incidents:");
    if host.queue().is_empty() {
        println!("  (none)");
    }
    for incident in host.queue().to_vec() {
        println!("  {}", incident.to_jsonl()?);
    }

    if args.advance > 0 {
        let fired = host.advance(args.advance);
        println!();
        println!("Advanced to tick {}: {} incident(s) fired", host.tick(), fired.len());
        for incident in fired {
            println!(
                "  {} {} against {} ({:.1} points)",
                incident.incident_id, incident.kind, incident.parms.target, incident.parms.points
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["refugee_incident"]);

        assert_eq!(args.seed, 42);
        assert_eq!(args.choice, Choice::Accept);
        assert!(args.scenario.is_none());
        assert!(!args.print_default_config);
    }

    #[test]
    fn test_choice_parsing() {
        let args = Args::parse_from(["refugee_incident", "--choice", "reject", "--seed", "7"]);

        assert_eq!(args.choice, Choice::Reject);
        assert_eq!(args.choice.option_index(), Some(1));
        assert_eq!(args.seed, 7);
        assert_eq!(Choice::None.option_index(), None);
    }

    #[test]
    fn test_run_with_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[raid]\npoints_factor = 2.0\n").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let args = Args::parse_from(["refugee_incident", "--config", &path, "--advance", "0"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_run_missing_scenario_fails() {
        let args = Args::parse_from(["refugee_incident", "--scenario", "/nonexistent/scenario.json"]);
        assert!(run(&args).is_err());
    }
}
