//! ows-replay: run a JSON scenario through an adjudication session.
//!
//! Usage:
//!   ows-replay run --scenario turn1.json --seed 7 --rules rules.json
//!   ows-replay rules > rules.json

use std::path::PathBuf;
use std::process;

use ows_core::commands::parse_requests;
use ows_core::config::RulesConfig;
use ows_engine::{AdjudicationSession, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "rules" => cmd_rules(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "ows-replay: OWS adjudication replay tool\n\
         \n\
         Commands:\n\
         \n\
         run     Adjudicate a JSON list of requests and print the journal\n\
         \n\
           --scenario <path>  Scenario file (JSON array of requests)\n\
           --seed <N>         Dice seed (default: 42)\n\
           --rules <path>     Rules file (optional, default rules otherwise)\n\
         \n\
         rules   Print the default rules as JSON\n\
         \n\
         Set RUST_LOG=debug to see each adjudication as it happens.\n"
    );
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .map(|pair| pair[1].as_str())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let scenario = match parse_flag(args, "--scenario") {
        Some(p) => PathBuf::from(p),
        None => fail("--scenario <path> is required"),
    };

    let seed = match parse_flag(args, "--seed") {
        Some(s) => s
            .parse::<u64>()
            .unwrap_or_else(|_| fail(format!("invalid seed: {s}"))),
        None => SessionConfig::default().seed,
    };

    let rules = match parse_flag(args, "--rules") {
        Some(p) => RulesConfig::load(p).unwrap_or_else(|e| fail(format!("loading rules: {e}"))),
        None => RulesConfig::default(),
    };

    let text = std::fs::read_to_string(&scenario)
        .unwrap_or_else(|e| fail(format!("reading {}: {e}", scenario.display())));
    let requests = parse_requests(&text)
        .unwrap_or_else(|e| fail(format!("parsing {}: {e}", scenario.display())));

    tracing::info!(
        scenario = %scenario.display(),
        seed,
        requests = requests.len(),
        "replaying scenario"
    );

    let mut session = AdjudicationSession::new(SessionConfig { seed, rules });
    for (index, request) in requests.into_iter().enumerate() {
        if let Err(e) = session.process(request) {
            fail(format!("request {}: {e}", index + 1));
        }
    }

    let status = session.dashboard().status();
    tracing::info!(
        turn = session.turn(),
        records = session.journal().len(),
        strike_actions = status.strike_actions,
        isr_die = %status.isr_die,
        "replay finished"
    );

    match session.journal_json() {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}

// --- Rules command ---

fn cmd_rules() {
    match RulesConfig::default().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => fail(e),
    }
}
