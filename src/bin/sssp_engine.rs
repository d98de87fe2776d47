use std::{env, process};

use sssp_engine::{
    EngineError, Scenario, ScenarioReport,
    cli::{CommandLineConfig, OutputFormat},
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let scenario = match load_scenario(&config) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&config, &scenario) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn load_scenario(config: &CommandLineConfig) -> Result<Scenario, EngineError> {
    let mut scenario = match config.command.as_str() {
        "run" => match &config.scenario {
            Some(path) => Scenario::from_path(path)?,
            None => return Err(EngineError::scenario("run requires a scenario path")),
        },
        "demo" => demo_scenario(),
        other => return Err(EngineError::scenario(format!("unknown command {other}"))),
    };
    if let Some(policy) = config.policy {
        scenario.query_policy = policy;
    }
    if let Some(max) = config.max_cycles {
        scenario.max_cycles = Some(max);
    }
    scenario.validate()?;
    Ok(scenario)
}

fn run_command(config: &CommandLineConfig, scenario: &Scenario) -> Result<(), EngineError> {
    let report = scenario.run(config.trace)?;
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &ScenarioReport) {
    for line in &report.traces {
        println!("{line}");
    }
    for outcome in &report.outcomes {
        println!(
            "{}->{}: {} (cycle {})",
            outcome.src, outcome.dst, outcome.result, outcome.latency
        );
    }
    println!(
        "cycles={} enqueues={} edges_consumed={}",
        report.stats.cycles, report.stats.enqueues, report.stats.edges_consumed
    );
}

fn demo_scenario() -> Scenario {
    Scenario {
        num_entries: 6,
        edges: vec![
            (0, 1),
            (1, 2),
            (1, 3),
            (2, 3),
            (2, 1),
            (3, 1),
            (3, 4),
            (4, 5),
            (4, 1),
        ],
        queries: vec![(0, 5)],
        query_policy: Default::default(),
        max_cycles: None,
    }
}
