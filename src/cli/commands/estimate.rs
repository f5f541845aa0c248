//! `mto estimate` command - quantities and cost for a set of drawings

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_config;
use crate::cli::report;
use crate::cli::GlobalOpts;
use crate::core::{loader, Estimator};

#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    /// Extracted text files, or folders containing .txt files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Insulation thickness in mm (overrides config)
    #[arg(long, short = 't')]
    pub thickness: Option<u32>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Only show the summary
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run(args: EstimateArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, args.thickness)?;
    let estimator = Estimator::new(config)?;
    let documents = loader::load_documents(&args.inputs)?;

    if !global.quiet {
        eprintln!(
            "{} Estimating {} document(s) at {} mm insulation",
            style("→").cyan(),
            documents.len(),
            estimator.config().thickness_mm
        );
    }

    let takeoff = estimator.estimate(&documents);
    if takeoff.groups.is_empty() {
        tracing::warn!("no components recognised in any document");
    }

    let content = report::render(&takeoff, global.format, args.summary_only)?;
    report::write_output(&content, args.output.as_deref(), global.quiet)
}
