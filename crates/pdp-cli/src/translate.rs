//! # Translate Subcommand
//!
//! Loads a DegreeWorks audit export, translates it against the plan
//! descriptor given on the command line, and writes the validated degree
//! plan as JSON (stdout by default).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pdp_audit::Translator;
use pdp_engine::PlanDescriptor;

/// Arguments for the `pdp translate` subcommand.
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Path to the DegreeWorks audit JSON export.
    #[arg(value_name = "AUDIT")]
    pub audit: PathBuf,

    /// Program code of the target plan (e.g. EU_BSE).
    #[arg(long)]
    pub program: String,

    /// Degree code of the target plan (e.g. BSE).
    #[arg(long)]
    pub degree: String,

    /// Major code of the target plan (e.g. CSCI).
    #[arg(long)]
    pub major: String,

    /// Concentration code, if the major has one.
    #[arg(long)]
    pub concentration: Option<String>,

    /// Catalog year of the target plan.
    #[arg(long)]
    pub year: u16,

    /// Write the translated plan here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the translate subcommand.
///
/// Returns exit code 0 on success; translation failures surface as errors
/// with context.
pub fn run_translate(args: &TranslateArgs) -> Result<u8> {
    let document = pdp_audit::load_audit(&args.audit)
        .with_context(|| format!("failed to load audit {}", args.audit.display()))?;

    let descriptor = PlanDescriptor {
        program: args.program.clone(),
        degree: args.degree.clone(),
        major: args.major.clone(),
        concentration: args.concentration.clone(),
        year: args.year,
    };
    tracing::info!(descriptor = %descriptor, "translating audit");

    let plan = Translator::new(descriptor)
        .translate(&document)
        .context("audit translation failed")?;

    let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Translated {} rules into {}",
                plan.rule_count(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(0)
}
