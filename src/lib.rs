// lib.rs - heredity library root

//! # heredity - Exact inference of gene copy counts and trait presence in a family
//!
//! This library computes, for every person in a pedigree, the exact posterior
//! distribution over how many copies of a gene they carry (0, 1 or 2) and
//! whether they exhibit the associated trait, given whatever traits have been
//! observed in the family.
//!
//! ## Features
//!
//! - **Exact inference**: every world consistent with the evidence is enumerated and scored
//! - **Configurable tables**: gene prior, trait likelihoods and mutation rate via TOML
//! - **Parallel enumeration**: optional rayon-based scoring with deterministic reduction
//! - **Multiple formats**: text, TSV, CSV and JSON reports
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use heredity::prelude::*;
//!
//! let family = Family::from_file(std::path::Path::new("family0.csv"))?;
//! let engine = InferenceEngine::default();
//! let posteriors = engine.infer(&family)?;
//!
//! for entry in posteriors.iter() {
//!     println!("{}: P(trait) = {:.4}", entry.name, entry.distribution.trait_probability(true));
//! }
//! # Ok::<(), heredity::HeredityError>(())
//! ```
//!
//! Work grows as 2^n * 3^n for n persons, so families are limited to a
//! dozen or so members (see [`crate::core::DEFAULT_MAX_PERSONS`]).

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{hypothesis_space_size, InferenceEngine, InferenceOptions, InferenceStats};
    pub use crate::core::{Distribution, GeneCount, NetworkParams, Posteriors};
    pub use crate::data::{Family, Person};
    pub use crate::error::HeredityError;
    pub use crate::output::{write_report, ReportFormat, ReportOptions};
}

// Re-export main types at the root level for convenience
pub use crate::core::{InferenceEngine, NetworkParams, Posteriors};
pub use crate::data::{Family, Person};
pub use crate::error::HeredityError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "heredity v{} - Exact Bayesian inference over family pedigrees",
        VERSION
    )
}
