// main.rs - CLI entry point

use heredity::cli::Config;
use heredity::output::{render_report, write_report};
use heredity::prelude::*;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        eprintln!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    let mut network_section = None;
    if let Some(config_path) = args.config.clone() {
        let (merged, network) = args.with_config_file(&config_path).map_err(|e| e.to_string())?;
        args = merged;
        network_section = network;
    }

    let validated = validate_args(&args, network_section.as_ref()).map_err(|e| e.to_string())?;

    eprintln!("🧬 heredity v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        eprintln!("🧵 Threads: {}", n);
    }

    let total_start = Instant::now();

    let family = Family::from_file(&validated.family_path).map_err(|e| e.to_string())?;

    let space = hypothesis_space_size(&family)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "overflow".to_string());
    eprintln!(
        "🔍 Hypothesis space: {} worlds across {} persons (mutation = {})",
        space,
        family.len(),
        validated.network.mutation
    );

    let engine = InferenceEngine::new(validated.network.clone(), validated.inference.clone())
        .map_err(|e| e.to_string())?;
    engine.check_family(&family).map_err(|e| e.to_string())?;

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        return Ok(());
    }

    let posteriors = engine.infer(&family).map_err(|e| e.to_string())?;

    // Nothing is printed until the whole report has rendered
    match &args.output {
        Some(path) => write_report(
            path,
            validated.format,
            &posteriors,
            &validated.report,
            &command_line,
        )
        .map_err(|e| e.to_string())?,
        None => {
            let report = render_report(
                validated.format,
                &posteriors,
                &validated.report,
                &command_line,
            )
            .map_err(|e| e.to_string())?;
            print!("{}", report);
            if validated.format == ReportFormat::Json {
                println!();
            }
        }
    }

    eprintln!(
        "🎉 Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}
