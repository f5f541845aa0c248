//! `mto classify` command - show recognised components per document
//!
//! Useful for checking how a drawing's text is read before trusting the
//! quantities: every descriptor is listed, and `--skipped` adds the cue lines
//! that were dropped and why.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, truncate_str};
use crate::cli::report::{self, Section};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{loader, Classification, Estimator};

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Extracted text files, or folders containing .txt files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Also list cue lines that produced no component
    #[arg(long)]
    pub skipped: bool,
}

#[derive(Serialize)]
struct DocumentClassification<'a> {
    document: &'a str,
    #[serde(flatten)]
    classification: &'a Classification,
}

pub fn run(args: ClassifyArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, None)?;
    let estimator = Estimator::new(config)?;
    let documents = loader::load_documents(&args.inputs)?;

    let results: Vec<(String, Classification)> = documents
        .iter()
        .map(|doc| (doc.name.clone(), estimator.classify(doc)))
        .collect();

    let output = match global.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let view: Vec<DocumentClassification<'_>> = results
                .iter()
                .map(|(document, classification)| DocumentClassification {
                    document,
                    classification,
                })
                .collect();
            if global.format == OutputFormat::Json {
                format!("{}\n", serde_json::to_string_pretty(&view).into_diagnostic()?)
            } else {
                serde_yml::to_string(&view).into_diagnostic()?
            }
        }
        format => {
            let mut output = report::render_section(&components_section(&results), format)?;
            if args.skipped {
                output.push('\n');
                output.push_str(&report::render_section(&skipped_section(&results), format)?);
            }
            output
        }
    };

    print!("{}", output);
    Ok(())
}

fn components_section(results: &[(String, Classification)]) -> Section {
    let mut rows = Vec::new();
    for (document, classification) in results {
        for (i, component) in classification.components.iter().enumerate() {
            rows.push(vec![
                truncate_str(document, 32),
                (i + 1).to_string(),
                component.kind().to_string(),
                component.to_string(),
            ]);
        }
    }
    Section {
        title: format!("Components ({})", rows.len()),
        header: vec!["Document", "#", "Kind", "Component"],
        rows,
    }
}

fn skipped_section(results: &[(String, Classification)]) -> Section {
    let mut rows = Vec::new();
    for (document, classification) in results {
        for line in &classification.skipped {
            rows.push(vec![
                truncate_str(document, 32),
                line.line.to_string(),
                line.cue.to_string(),
                line.reason.to_string(),
                truncate_str(&line.text, 48),
            ]);
        }
    }
    Section {
        title: format!("Skipped lines ({})", rows.len()),
        header: vec!["Document", "Line", "Cue", "Reason", "Text"],
        rows,
    }
}
