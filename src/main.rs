use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use runbook::parsing;
use runbook::problem;

fn main() -> ExitCode {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("runbook")
        .version(VERSION)
        .propagate_version(true)
        .about("The runbook scenario compiler.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("check")
                .about("Compile the given scenario and report diagnostics")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The markdown file containing the scenario you want to check."),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Compile the given scenario and print it as JSON")
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Indent the JSON output for human consumption."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The markdown file containing the scenario you want to dump."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            if let Some(filename) = submatches.get_one::<String>("filename") {
                check(Path::new(filename))
            } else {
                ExitCode::FAILURE
            }
        }
        Some(("dump", submatches)) => {
            let pretty = submatches.get_flag("pretty");
            if let Some(filename) = submatches.get_one::<String>("filename") {
                dump(Path::new(filename), pretty)
            } else {
                ExitCode::FAILURE
            }
        }
        _ => {
            println!("usage: runbook [COMMAND] ...");
            println!("Try '--help' for more information.");
            ExitCode::SUCCESS
        }
    }
}

fn check(filename: &Path) -> ExitCode {
    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return ExitCode::FAILURE;
        }
    };

    let parsed = parsing::parse(&content);

    for warning in &parsed.warnings {
        eprintln!("{}", problem::concise_warning(warning, filename));
    }
    for error in &parsed.errors {
        eprintln!("{}", problem::concise_error(error, filename));
    }

    if parsed
        .errors
        .is_empty()
    {
        println!(
            "{}: {} tasks, {} warnings",
            filename.display(),
            parsed
                .scenario
                .tasks
                .len(),
            parsed
                .warnings
                .len()
        );
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn dump(filename: &Path, pretty: bool) -> ExitCode {
    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return ExitCode::FAILURE;
        }
    };

    let parsed = parsing::parse(&content);

    let rendered = if pretty {
        serde_json::to_string_pretty(&parsed.scenario)
    } else {
        serde_json::to_string(&parsed.scenario)
    };

    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: serializing scenario: {}", error);
            ExitCode::FAILURE
        }
    }
}
