//! Command-line interface for armylist
//! This binary flattens army list exports, files them into a knowledge bank and classifies them.
//!
//! Usage:
//!   armylist flatten `<path>` [--format `<format>`]                        - Print the flattened army list
//!   armylist learn `<path>` --bank `<file>` --archetype `<label>`          - File a list under an archetype
//!   armylist classify `<path>` --bank `<file>` [--config `<file>`] [-k N] [--weighted]
//!                                                                      - Label a list with its archetype
//!   armylist distance `<a>` `<b>` [--config `<file>`]                      - Print the distance between two lists
//!
//! Logging goes to stderr and is controlled through `RUST_LOG` (default `warn`).

use armylist::army::bank::store;
use armylist::army::classifier::{classify, VoteMode};
use armylist::army::config::Loader;
use armylist::army::distance::army_distance;
use armylist::army::items::FlatArmyList;
use armylist::{flatten, Archetype, KnowledgeBank};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("armylist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for flattening and classifying army list exports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("flatten")
                .about("Print the flattened army list")
                .arg(
                    Arg::new("path")
                        .help("Path to the army list export")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "yaml", "text"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("learn")
                .about("File an army list under an archetype")
                .arg(
                    Arg::new("path")
                        .help("Path to the army list export")
                        .required(true)
                        .index(1),
                )
                .arg(bank_arg())
                .arg(
                    Arg::new("archetype")
                        .long("archetype")
                        .short('a')
                        .help("Archetype label, within the list's faction")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Label an army list with the archetype of its nearest neighbours")
                .arg(
                    Arg::new("path")
                        .help("Path to the army list export")
                        .required(true)
                        .index(1),
                )
                .arg(bank_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("k")
                        .short('k')
                        .help("Number of neighbours that vote")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("weighted")
                        .long("weighted")
                        .help("Weigh votes by inverse distance")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("distance")
                .about("Print the weighted distance between two army lists")
                .arg(
                    Arg::new("first")
                        .help("Path to the first army list export")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("second")
                        .help("Path to the second army list export")
                        .required(true)
                        .index(2),
                )
                .arg(config_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("flatten", flatten_matches)) => {
            let path = flatten_matches.get_one::<String>("path").unwrap();
            let format = flatten_matches.get_one::<String>("format").unwrap();
            handle_flatten_command(path, format)
        }
        Some(("learn", learn_matches)) => {
            let path = learn_matches.get_one::<String>("path").unwrap();
            let bank = learn_matches.get_one::<String>("bank").unwrap();
            let label = learn_matches.get_one::<String>("archetype").unwrap();
            handle_learn_command(path, bank, label)
        }
        Some(("classify", classify_matches)) => handle_classify_command(classify_matches),
        Some(("distance", distance_matches)) => {
            let first = distance_matches.get_one::<String>("first").unwrap();
            let second = distance_matches.get_one::<String>("second").unwrap();
            let config = distance_matches.get_one::<String>("config");
            handle_distance_command(first, second, config.map(String::as_str))
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn bank_arg() -> Arg {
    Arg::new("bank")
        .long("bank")
        .short('b')
        .help("Path to the knowledge bank (JSON)")
        .required(true)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("Settings file layered over the built-in defaults (TOML)")
}

/// Read and flatten an export, naming the file in any error.
fn read_list(path: &str) -> Result<FlatArmyList, Box<dyn Error>> {
    let source =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let list = flatten(&source).map_err(|e| format!("{}: {}", path, e))?;
    Ok(list)
}

/// Handle the flatten command
fn handle_flatten_command(path: &str, format: &str) -> CliResult {
    let list = read_list(path)?;
    let output = match format {
        "yaml" => serde_yaml::to_string(&list)?,
        "text" => list.to_string(),
        _ => format!("{}\n", serde_json::to_string_pretty(&list)?),
    };
    print!("{}", output);
    Ok(())
}

/// Handle the learn command
fn handle_learn_command(path: &str, bank_path: &str, label: &str) -> CliResult {
    let list = read_list(path)?;
    let mut bank = if Path::new(bank_path).exists() {
        store::load(bank_path)?
    } else {
        KnowledgeBank::new()
    };

    let archetype = Archetype::new(list.faction().clone(), label);
    bank.insert(archetype.clone(), list)?;
    store::save(&bank, bank_path)?;

    println!(
        "Filed under {}, {} list(s) on file",
        archetype,
        bank.lists(&archetype).len()
    );
    Ok(())
}

/// Handle the classify command
fn handle_classify_command(matches: &ArgMatches) -> CliResult {
    let path = matches.get_one::<String>("path").unwrap();
    let bank_path = matches.get_one::<String>("bank").unwrap();

    let mut loader = loader(matches.get_one::<String>("config").map(String::as_str));
    if let Some(k) = matches.get_one::<usize>("k") {
        loader = loader.with_neighbours(*k)?;
    }
    if matches.get_flag("weighted") {
        loader = loader.with_vote(VoteMode::DistanceWeighted)?;
    }
    let config = loader.build()?.classifier_config()?;

    let list = read_list(path)?;
    let bank = store::load(bank_path)?;

    match classify(&list, &bank, &config) {
        Some(archetype) => println!("{}", archetype.label),
        None => println!("unknown"),
    }
    Ok(())
}

/// Handle the distance command
fn handle_distance_command(first: &str, second: &str, config: Option<&str>) -> CliResult {
    let weights = loader(config).build()?.classifier_config()?.weights;
    let first = read_list(first)?;
    let second = read_list(second)?;

    if first.faction() != second.faction() {
        tracing::warn!(
            first = %first.faction(),
            second = %second.faction(),
            "comparing army lists of different factions"
        );
    }

    let distance = army_distance(&first.canonicalize(), &second.canonicalize(), weights);
    println!("{}", distance);
    Ok(())
}

fn loader(config: Option<&str>) -> Loader {
    match config {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    }
}
