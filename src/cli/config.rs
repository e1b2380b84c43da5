// config.rs - Configuration file support

use crate::core::NetworkParams;
use crate::error::{HeredityError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional replacement tables for the network; missing keys keep the defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NetworkSection {
    /// `[P(0), P(1), P(2)]`
    pub gene_prior: Option<[f64; 3]>,
    /// `[[P(true|0), P(false|0)], [..|1], [..|2]]`
    pub trait_given_gene: Option<[[f64; 2]; 3]>,
    pub mutation: Option<f64>,
}

impl NetworkSection {
    /// Overlay these values on `base` and validate the result
    pub fn apply(&self, base: &NetworkParams) -> Result<NetworkParams> {
        NetworkParams::new(
            self.gene_prior.unwrap_or(base.gene_prior),
            self.trait_given_gene.unwrap_or(base.trait_given_gene),
            self.mutation.unwrap_or(base.mutation),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub family: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub precision: Option<usize>,

    // Performance
    pub threads: Option<usize>,
    pub max_persons: Option<usize>,
    pub progress: Option<bool>,

    // Report filtering
    pub include_persons: Option<String>,
    pub exclude_persons: Option<String>,

    // Flags
    pub dry_run: Option<bool>,

    // Network tables
    pub network: Option<NetworkSection>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HeredityError::io(format!("Failed to read config file '{}'", path.display()), e)
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            HeredityError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        eprintln!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| HeredityError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            HeredityError::io(format!("Failed to write config file '{}'", path.display()), e)
        })?;

        eprintln!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# heredity.toml - Configuration file for heredity
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Family record file (header: name,mother,father,trait)
family = "family0.csv"

# Write the report to a file instead of standard output
# output = "posteriors.tsv"

# Output format: text, tsv, csv, json
format = "text"

# Decimal places shown in text/tsv/csv reports
precision = 4

# =============================================================================
# PERFORMANCE
# =============================================================================

# Worker threads (more than one enables parallel enumeration)
threads = 1

# Refuse families larger than this (work grows as 2^n * 3^n)
max_persons = 12

# Show a progress bar during enumeration
progress = false

# =============================================================================
# REPORT FILTERING (does not affect inference)
# =============================================================================

# include_persons = "^Harry$"
# exclude_persons = "^Grand"

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without running inference (dry run)
dry_run = false

# =============================================================================
# NETWORK TABLES (omitted keys keep the built-in values)
# =============================================================================

[network]
# Unconditional gene prior: [P(0 copies), P(1 copy), P(2 copies)]
gene_prior = [0.96, 0.03, 0.01]

# P(trait | copies) rows: [P(true), P(false)] for 0, 1 and 2 copies
trait_given_gene = [[0.01, 0.99], [0.56, 0.44], [0.65, 0.35]]

# Probability that a transmitted allele flips its carrier state
mutation = 0.01
"#
        .to_string()
    }
}
