//! Random CODEOWNERS file generation for benchmarking and testing.
//!
//! Files are built from [`Rule`] values and serialized in canonical form, so
//! the output always parses. Matching repository paths can be generated from
//! the same vocabulary.

use crate::parse::{CodeownersFile, Owner, Rule};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Configuration for generating CODEOWNERS files.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of rules to generate.
    pub num_rules: usize,
    /// Number of section headers to spread across the rules.
    pub num_sections: usize,
    /// Maximum owners per rule (1-4 typical).
    pub max_owners_per_rule: usize,
    /// Percentage of rules generated without owners.
    pub unowned_percent: u32,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_rules: 100,
            num_sections: 0,
            max_owners_per_rule: 4,
            unowned_percent: 2,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given number of rules.
    pub fn new(num_rules: usize) -> Self {
        Self {
            num_rules,
            ..Default::default()
        }
    }

    /// Small fixture (~10 rules).
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Medium fixture (~100 rules).
    pub fn medium() -> Self {
        Self::new(100)
    }

    /// Large fixture (~1000 rules).
    pub fn large() -> Self {
        Self::new(1_000)
    }

    /// Extra large fixture (~10k rules).
    pub fn xlarge() -> Self {
        Self::new(10_000)
    }

    /// Generate a file targeting approximately the given byte size.
    ///
    /// Note: Actual size varies based on pattern/owner complexity.
    pub fn target_bytes(bytes: usize) -> Self {
        // Average line is ~40 bytes
        Self::new(bytes.saturating_div(40).max(1))
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of section headers.
    pub fn with_sections(mut self, num_sections: usize) -> Self {
        self.num_sections = num_sections;
        self
    }

    /// Set the maximum owners per rule.
    pub fn with_max_owners(mut self, max: usize) -> Self {
        self.max_owners_per_rule = max.max(1); // At least 1 owner
        self
    }

    /// Set the percentage of rules without owners.
    pub fn with_unowned_percent(mut self, percent: u32) -> Self {
        self.unowned_percent = percent.min(100);
        self
    }
}

/// Vocabulary for generating realistic patterns, paths and owners.
mod vocabulary {
    pub const PATTERN_TEMPLATES: &[&str] = &[
        "*",
        "*.{ext}",
        "**/*.{ext}",
        "/{dir}/",
        "/{dir}/**",
        "/{dir}/*.{ext}",
        "{dir}/",
        "/src/{dir}/",
        "/src/**/*.{ext}",
        "/{dir}/**/test_*.{ext}",
        "/{dir}/*/mod.{ext}",
        "docs/**/*.md",
        "/{dir}/file.{ext}",
    ];

    pub const EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "md", "yaml", "json", "toml"];
    pub const DIRECTORIES: &[&str] = &[
        "src", "lib", "tests", "docs", "config", "scripts", "api", "core",
    ];
    pub const FILE_STEMS: &[&str] = &["file", "mod", "test_example", "nested", "README"];
    pub const USERNAMES: &[&str] = &["alice", "bob", "charlie", "dev", "maintainer", "reviewer"];
    pub const ORGS: &[&str] = &["acme", "github", "myorg"];
    pub const TEAMS: &[&str] = &["core", "platform", "frontend", "backend", "infra", "docs"];
    pub const SECTION_NAMES: &[&str] = &["Frontend", "Backend", "Infrastructure", "Documentation"];
}

/// Owner type distribution weights (must sum to 100).
const WEIGHT_USER: u32 = 50;
const WEIGHT_TEAM: u32 = 30;
// Remaining weight (20) goes to email

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// Generates a random CODEOWNERS file based on configuration.
pub fn generate_file(config: &GeneratorConfig) -> CodeownersFile {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rules = Vec::with_capacity(config.num_rules);
    let rules_per_section = config.num_rules / (config.num_sections + 1);
    let mut section = String::new();

    for index in 0..config.num_rules {
        if config.num_sections > 0 && rules_per_section > 0 && index > 0 {
            let section_index = index / rules_per_section;
            if section_index > 0 && section_index <= config.num_sections {
                let base = SECTION_NAMES[(section_index - 1) % SECTION_NAMES.len()];
                section = format!("{} {}", base, section_index).to_lowercase();
            }
        }

        let pattern = pick(&mut rng, PATTERN_TEMPLATES)
            .replace("{ext}", pick(&mut rng, EXTENSIONS))
            .replace("{dir}", pick(&mut rng, DIRECTORIES));

        let owners: Vec<Owner> = if rng.random_ratio(config.unowned_percent, 100) {
            Vec::new()
        } else {
            let num_owners = rng.random_range(1..=config.max_owners_per_rule);
            (0..num_owners).map(|_| generate_owner(&mut rng)).collect()
        };

        // Placeholder line numbers; parse the canonical output for real ones.
        rules.push(Rule::new(pattern, owners, section.clone(), index + 1));
    }

    CodeownersFile::new(rules)
}

/// Generate a random owner based on weighted distribution.
fn generate_owner(rng: &mut StdRng) -> Owner {
    use vocabulary::*;

    let roll = rng.random_range(0..100);

    if roll < WEIGHT_USER {
        Owner::handle(pick(rng, USERNAMES))
    } else if roll < WEIGHT_USER + WEIGHT_TEAM {
        Owner::handle(format!("{}/{}", pick(rng, ORGS), pick(rng, TEAMS)))
    } else {
        Owner::email(format!("{}@example.com", pick(rng, USERNAMES)))
    }
}

/// Generates a CODEOWNERS file as a string.
pub fn generate(config: &GeneratorConfig) -> String {
    generate_file(config).to_string()
}

/// Generates `count` repository paths drawn from the same vocabulary as the
/// patterns, so that a realistic share of them is matched.
pub fn generate_paths(count: usize, seed: u64) -> Vec<String> {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let depth = rng.random_range(0..4);
            let mut path = String::new();
            for _ in 0..depth {
                path.push('/');
                path.push_str(pick(&mut rng, DIRECTORIES));
            }
            let stem = pick(&mut rng, FILE_STEMS);
            let ext = pick(&mut rng, EXTENSIONS);
            path.push_str(&format!("/{}.{}", stem, ext));
            path
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_codeowners;
    use crate::ruleset::{Ruleset, RulesetSource};

    #[test]
    fn round_trip_small() {
        let content = generate(&GeneratorConfig::small());
        let parsed = parse_codeowners(&content).unwrap();
        assert_eq!(parsed.len(), 10);
    }

    #[test]
    fn round_trip_preserves_rules() {
        let config = GeneratorConfig::medium().with_sections(3);
        let generated = generate_file(&config);
        let parsed = parse_codeowners(generate(&config)).unwrap();
        assert_eq!(parsed.len(), generated.len());
        for (left, right) in parsed.iter().zip(generated.iter()) {
            assert_eq!(left.pattern, right.pattern);
            assert_eq!(left.owners, right.owners);
            assert_eq!(left.section_name, right.section_name);
        }
    }

    #[test]
    fn sections_are_generated() {
        let file = generate_file(&GeneratorConfig::new(40).with_sections(3));
        assert_eq!(file.sections().len(), 4);
        assert_eq!(file.sections()[0], "");
    }

    #[test]
    fn deterministic_generation() {
        let config = GeneratorConfig::medium();
        let content1 = generate(&config);
        let content2 = generate(&config);
        assert_eq!(content1, content2, "Same seed should produce same output");
    }

    #[test]
    fn different_seeds_differ() {
        let content1 = generate(&GeneratorConfig::medium().with_seed(1));
        let content2 = generate(&GeneratorConfig::medium().with_seed(2));
        assert_ne!(content1, content2);
    }

    #[test]
    fn zero_rules_produces_empty_file() {
        let content = generate(&GeneratorConfig::new(0));
        assert!(content.is_empty());
    }

    #[test]
    fn with_max_owners_minimum() {
        let config = GeneratorConfig::default().with_max_owners(0);
        assert_eq!(config.max_owners_per_rule, 1); // Should be at least 1
    }

    #[test]
    fn generated_paths_are_rooted() {
        let paths = generate_paths(50, 7);
        assert_eq!(paths.len(), 50);
        assert!(paths.iter().all(|p| p.starts_with('/')));
        assert_eq!(paths, generate_paths(50, 7));
    }

    #[test]
    fn trie_agrees_with_reverse_scan_on_generated_corpus() {
        let config = GeneratorConfig::large().with_sections(2).with_seed(11);
        let file = parse_codeowners(generate(&config)).unwrap();
        let ruleset = Ruleset::new(RulesetSource::Ingested { id: 0 }, file);
        let paths = generate_paths(500, 3);

        let bulk = ruleset.match_paths(&paths);
        for (path, bulk_rule) in paths.iter().zip(bulk) {
            let expected = ruleset.match_path(path).map(|r| r.line_number);
            assert_eq!(bulk_rule.map(|r| r.line_number), expected, "path {}", path);
        }
    }
}
