//! Generate CODEOWNERS fixtures for benchmarking.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Generates deterministic fixtures using the same presets as the Rust benchmarks,
//! plus a matching list of repository paths.

use codeowners_ruleset::generate::{GeneratorConfig, generate, generate_paths};
use std::{fs, io, path::Path, path::PathBuf, process::ExitCode};

/// Type alias for fixture preset entries.
type PresetEntry = (&'static str, fn() -> GeneratorConfig);

/// Fixture presets - keep in sync with benches/fixtures.rs
const PRESETS: &[PresetEntry] = &[
    ("small", GeneratorConfig::small),
    ("medium", || GeneratorConfig::medium().with_sections(2)),
    ("large", || GeneratorConfig::large().with_sections(4)),
    ("xlarge", GeneratorConfig::xlarge),
];

const PATH_COUNT: usize = 2_000;
const PATH_SEED: u64 = 7;

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/cli/fixtures"));

    if let Err(e) = run(&output_dir) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    for (name, config_fn) in PRESETS {
        let config = config_fn();
        let content = generate(&config);
        let path = output_dir.join(format!("{name}.codeowners"));
        fs::write(&path, &content)?;
        println!(
            "Generated {} ({} bytes, {} rules, {} sections)",
            path.display(),
            content.len(),
            config.num_rules,
            config.num_sections
        );
    }

    let paths = generate_paths(PATH_COUNT, PATH_SEED);
    let path = output_dir.join("paths.txt");
    fs::write(&path, paths.join("\n") + "\n")?;
    println!("Generated {} ({} paths)", path.display(), paths.len());

    Ok(())
}
