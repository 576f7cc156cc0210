//! CODEOWNERS lookup CLI
//!
//! A command-line tool that shows who owns the files of a repository.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, LookupMode, ValidatedConfig};
use cli::output::{HumanOutput, JsonOutput, PathOwnership};
use cli::walker::expand_paths;
use codeowners_ruleset::Ruleset;

fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the lookup with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let use_colors = !args.json && io::stdout().is_terminal();

    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let _ = HumanOutput::new(&mut stderr, use_colors).write_error(&e.to_string());
            return ExitCode::StartupFailure;
        }
    };

    debug!("Validated configuration: {:?}", config);
    info!("Repository path: {}", config.repo_path.display());
    info!("CODEOWNERS file: {}", config.codeowners_path.display());

    let ruleset = match config.load_ruleset() {
        Ok(ruleset) => ruleset,
        Err(e) => {
            let _ = HumanOutput::new(&mut stderr, use_colors).write_error(&e.to_string());
            return ExitCode::StartupFailure;
        }
    };

    if config.canonical {
        if let Err(e) = write!(stdout, "{}", ruleset) {
            error!("Failed to write output: {}", e);
            return ExitCode::StartupFailure;
        }
        return ExitCode::Success;
    }

    let paths = expand_paths(&config.repo_path, &config.paths, &config.walker);
    info!("Looking up {} path(s)", paths.len());

    let ownerships = lookup(&ruleset, &config.mode, &paths);
    let total = ownerships.len();
    let reported: Vec<PathOwnership> = ownerships
        .into_iter()
        .filter(|ownership| !config.unowned_only || ownership.is_unowned())
        .collect();
    let unowned = reported.iter().filter(|o| o.is_unowned()).count();
    debug!("{} of {} path(s) unowned", unowned, total);

    let written = if config.json_output {
        let mut json = JsonOutput::new(ruleset.source().to_string());
        for ownership in reported {
            json.add(ownership);
        }
        json.write(&mut stdout)
    } else {
        write_human(&mut stdout, &reported, total, unowned, use_colors)
    };
    if let Err(e) = written {
        error!("Failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    config.exit_code_for_results(unowned)
}

/// Resolves the deciding rules of every path.
fn lookup(ruleset: &Ruleset, mode: &LookupMode, paths: &[String]) -> Vec<PathOwnership> {
    match mode {
        LookupMode::Overall => paths
            .iter()
            .zip(ruleset.match_paths(paths))
            .map(|(path, rule)| PathOwnership::new(path.as_str(), rule))
            .collect(),
        LookupMode::Section(section) => paths
            .iter()
            .map(|path| PathOwnership::new(path.as_str(), ruleset.match_section(section, path)))
            .collect(),
        LookupMode::AllSections => paths
            .iter()
            .map(|path| PathOwnership::new(path.as_str(), ruleset.match_sections(path)))
            .collect(),
    }
}

fn write_human<W: Write>(
    writer: &mut W,
    reported: &[PathOwnership],
    total: usize,
    unowned: usize,
    use_colors: bool,
) -> io::Result<()> {
    let mut output = HumanOutput::new(writer, use_colors);
    for ownership in reported {
        output.write_path(ownership)?;
    }
    output.write_summary(total, unowned)
}
