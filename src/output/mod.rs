// mod.rs - Output formatters module

use crate::core::{GeneCount, PersonPosterior, Posteriors};
use crate::error::{HeredityError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Display order of gene counts in every report
const GENE_ORDER: [GeneCount; 3] = [GeneCount::Two, GeneCount::One, GeneCount::Zero];

/// Decimal places shown in text and delimited reports
pub const DEFAULT_PRECISION: usize = 4;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Tsv,
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = HeredityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "tsv" => Ok(ReportFormat::Tsv),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(HeredityError::Config(format!(
                "Unsupported output format: {}. Use: text, tsv, csv, json",
                s
            ))),
        }
    }
}

/// Rendering options. Rounding applies to display only; JSON keeps full precision.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub precision: usize,
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            include: None,
            exclude: None,
        }
    }
}

impl ReportOptions {
    fn keeps(&self, name: &str) -> bool {
        if let Some(regex) = &self.include {
            if !regex.is_match(name) {
                return false;
            }
        }
        if let Some(regex) = &self.exclude {
            if regex.is_match(name) {
                return false;
            }
        }
        true
    }
}

fn selected<'a>(
    posteriors: &'a Posteriors,
    options: &'a ReportOptions,
) -> impl Iterator<Item = &'a PersonPosterior> {
    posteriors.iter().filter(move |p| options.keeps(&p.name))
}

/// Console layout: person, then indented gene and trait blocks
pub fn render_text(posteriors: &Posteriors, options: &ReportOptions) -> String {
    let precision = options.precision;
    let mut out = String::new();
    for entry in selected(posteriors, options) {
        let d = &entry.distribution;
        let _ = writeln!(out, "{}", entry.name);
        let _ = writeln!(out, "\tGene");
        for gene in GENE_ORDER {
            let _ = writeln!(out, "\t\t{}: {:.*}", gene, precision, d.gene(gene));
        }
        let _ = writeln!(out, "\tTrait");
        let _ = writeln!(out, "\t\tTrue: {:.*}", precision, d.trait_probability(true));
        let _ = writeln!(out, "\t\tFalse: {:.*}", precision, d.trait_probability(false));
        let _ = writeln!(out);
    }
    out
}

/// One row per person: `person,gene_2,gene_1,gene_0,trait_true,trait_false`.
/// Names holding the delimiter or quotes are quoted by the csv writer.
pub fn render_delimited(
    posteriors: &Posteriors,
    options: &ReportOptions,
    delimiter: u8,
    command_line: &str,
) -> Result<String> {
    let precision = options.precision;
    let mut out = String::new();

    let _ = writeln!(out, "# Command: {}", command_line);
    let _ = writeln!(out, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "# heredity v{}", env!("CARGO_PKG_VERSION"));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    let row_error = |e: csv::Error| HeredityError::Output(format!("Failed to write report row: {}", e));

    writer
        .write_record(["person", "gene_2", "gene_1", "gene_0", "trait_true", "trait_false"])
        .map_err(row_error)?;

    for entry in selected(posteriors, options) {
        let d = &entry.distribution;
        let mut row = Vec::with_capacity(6);
        row.push(entry.name.clone());
        for gene in GENE_ORDER {
            row.push(format!("{:.*}", precision, d.gene(gene)));
        }
        row.push(format!("{:.*}", precision, d.trait_probability(true)));
        row.push(format!("{:.*}", precision, d.trait_probability(false)));
        writer.write_record(&row).map_err(row_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HeredityError::Output(format!("Failed to flush report: {}", e)))?;
    let rows = String::from_utf8(bytes)
        .map_err(|e| HeredityError::Output(format!("Report is not valid UTF-8: {}", e)))?;
    out.push_str(&rows);
    Ok(out)
}

#[derive(Serialize)]
struct GeneJson {
    #[serde(rename = "2")]
    two: f64,
    #[serde(rename = "1")]
    one: f64,
    #[serde(rename = "0")]
    zero: f64,
}

#[derive(Serialize)]
struct TraitJson {
    #[serde(rename = "true")]
    present: f64,
    #[serde(rename = "false")]
    absent: f64,
}

#[derive(Serialize)]
struct PersonJson<'a> {
    person: &'a str,
    gene: GeneJson,
    #[serde(rename = "trait")]
    trait_dist: TraitJson,
}

/// JSON array of persons with full-precision distributions
pub fn render_json(posteriors: &Posteriors, options: &ReportOptions) -> Result<String> {
    let rows: Vec<PersonJson> = selected(posteriors, options)
        .map(|entry| {
            let d = &entry.distribution;
            PersonJson {
                person: &entry.name,
                gene: GeneJson {
                    two: d.gene(GeneCount::Two),
                    one: d.gene(GeneCount::One),
                    zero: d.gene(GeneCount::Zero),
                },
                trait_dist: TraitJson {
                    present: d.trait_probability(true),
                    absent: d.trait_probability(false),
                },
            }
        })
        .collect();

    serde_json::to_string_pretty(&rows)
        .map_err(|e| HeredityError::Output(format!("Failed to serialize report: {}", e)))
}

/// Render a report in the specified format
pub fn render_report(
    format: ReportFormat,
    posteriors: &Posteriors,
    options: &ReportOptions,
    command_line: &str,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(posteriors, options)),
        ReportFormat::Tsv => render_delimited(posteriors, options, b'\t', command_line),
        ReportFormat::Csv => render_delimited(posteriors, options, b',', command_line),
        ReportFormat::Json => render_json(posteriors, options),
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            HeredityError::io(
                format!("Failed to create parent directory '{}'", parent.display()),
                e,
            )
        })?;
    }
    Ok(())
}

/// Write a report to `file_path` in the specified format
pub fn write_report(
    file_path: &str,
    format: ReportFormat,
    posteriors: &Posteriors,
    options: &ReportOptions,
    command_line: &str,
) -> Result<()> {
    let content = render_report(format, posteriors, options, command_line)?;

    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        HeredityError::io(format!("Failed to create output file '{}'", file_path), e)
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|e| HeredityError::io("Write error", e))?;
    writer.flush().map_err(|e| HeredityError::io("Flush error", e))?;

    eprintln!("✅ Posterior report written to: {}", file_path);
    Ok(())
}
