// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::cli::config::NetworkSection;
use crate::core::{InferenceOptions, NetworkParams, DEFAULT_MAX_PERSONS, MAX_SET_SIZE};
use crate::error::{HeredityError, Result};
use crate::output::{ReportFormat, ReportOptions, DEFAULT_PRECISION};
use regex::Regex;
use std::path::PathBuf;
use std::str::FromStr;

/// Largest display precision accepted for reports
pub const MAX_PRECISION: usize = 15;

pub struct ValidationResult {
    pub family_path: PathBuf,
    pub format: ReportFormat,
    pub network: NetworkParams,
    pub inference: InferenceOptions,
    pub report: ReportOptions,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args, network: Option<&NetworkSection>) -> Result<ValidationResult> {
    let family_path = args
        .family
        .as_ref()
        .map(PathBuf::from)
        .ok_or_else(|| HeredityError::Input("Usage: heredity <family.csv> [options]".to_string()))?;

    let format = match args.format.as_deref() {
        Some(name) => ReportFormat::from_str(name)?,
        None => ReportFormat::Text,
    };

    let precision = args.precision.unwrap_or(DEFAULT_PRECISION);
    if precision > MAX_PRECISION {
        return Err(HeredityError::Config(format!(
            "Precision must be at most {}, got {}",
            MAX_PRECISION, precision
        )));
    }

    if args.threads == Some(0) {
        return Err(HeredityError::Config("Threads must be at least 1".to_string()));
    }

    let max_persons = args.max_persons.unwrap_or(DEFAULT_MAX_PERSONS);
    if max_persons == 0 || max_persons > MAX_SET_SIZE {
        return Err(HeredityError::Config(format!(
            "max-persons must be between 1 and {}",
            MAX_SET_SIZE
        )));
    }

    // Network tables: defaults, then config file, then --mutation
    let mut params = match network {
        Some(section) => section.apply(&NetworkParams::default())?,
        None => NetworkParams::default(),
    };
    if let Some(mutation) = args.mutation {
        params = params.with_mutation(mutation)?;
    }

    // Compile regex patterns
    let include = compile_pattern(args.include_persons.as_deref(), "include_persons")?;
    let exclude = compile_pattern(args.exclude_persons.as_deref(), "exclude_persons")?;

    Ok(ValidationResult {
        family_path,
        format,
        network: params,
        inference: InferenceOptions {
            max_persons,
            parallel: args.threads.map_or(false, |n| n > 1),
            show_progress: args.progress,
        },
        report: ReportOptions {
            precision,
            include,
            exclude,
        },
    })
}

fn compile_pattern(pattern: Option<&str>, name: &str) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| HeredityError::Config(format!("Invalid {} regex: {}", name, e)))
        })
        .transpose()
}
