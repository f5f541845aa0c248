//! Takeoff report rendering
//!
//! Consumes the engine's record groups and summary and renders them as
//! tables, Markdown, CSV/TSV, JSON or YAML. No quantities are computed here.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_money, format_qty, truncate_str};
use crate::cli::OutputFormat;
use crate::core::Takeoff;
use crate::entities::{ComponentKind, QuantityRecord, Summary};

/// A titled block of rows
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    fn table(&self, style: TableStyle) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.header.iter().copied());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }
        let mut table = builder.build();
        match style {
            TableStyle::Terminal => table.with(Style::rounded()),
            TableStyle::Markdown => table.with(Style::markdown()),
        };
        table.to_string()
    }
}

#[derive(Debug, Clone, Copy)]
enum TableStyle {
    Terminal,
    Markdown,
}

const DOC_WIDTH: usize = 32;

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Column headings for a record group
pub fn group_header(kind: ComponentKind) -> Vec<&'static str> {
    match kind {
        ComponentKind::Straight => vec![
            "Document", "DN", "Length (m)", "Circ (m)", "Area (m²)", "Bead (m)", "Bond (m)", "Cost",
        ],
        ComponentKind::Elbow => vec!["Document", "DN", "Angle", "Circ (m)", "Bead (m)", "Bond (m)"],
        ComponentKind::Tee => vec![
            "Document", "Header DN", "Branch DN", "Type", "Bead (m)", "Bond (m)",
        ],
        ComponentKind::Reducer => {
            vec!["Document", "Large DN", "Small DN", "Bead (m)", "Bond (m)"]
        }
        ComponentKind::EndCap | ComponentKind::Collar => {
            vec!["Document", "DN", "Circ (m)", "Bead (m)", "Bond (m)"]
        }
        ComponentKind::ClampCover => vec!["Document", "DN", "Cost"],
    }
}

/// One table row for a record, matching [`group_header`]
pub fn group_row(record: &QuantityRecord) -> Vec<String> {
    let doc = truncate_str(&record.document, DOC_WIDTH);
    match record.kind {
        ComponentKind::Straight => vec![
            doc,
            record.dn.to_string(),
            opt(record.length_m),
            format_qty(record.circumference_m),
            opt(record.cladding_area_m2.map(format_qty)),
            format_qty(record.bead_m),
            format_qty(record.bond_m),
            opt(record.cost.map(format_money)),
        ],
        ComponentKind::Elbow => vec![
            doc,
            record.dn.to_string(),
            opt(record.angle_deg.map(|a| format!("{}°", a))),
            format_qty(record.circumference_m),
            format_qty(record.bead_m),
            format_qty(record.bond_m),
        ],
        ComponentKind::Tee => vec![
            doc,
            record.dn.to_string(),
            opt(record.branch_dn),
            if record.equal.unwrap_or(false) {
                "equal".to_string()
            } else {
                "unequal".to_string()
            },
            format_qty(record.bead_m),
            format_qty(record.bond_m),
        ],
        ComponentKind::Reducer => vec![
            doc,
            record.dn.to_string(),
            opt(record.branch_dn),
            format_qty(record.bead_m),
            format_qty(record.bond_m),
        ],
        ComponentKind::EndCap | ComponentKind::Collar => vec![
            doc,
            record.dn.to_string(),
            format_qty(record.circumference_m),
            format_qty(record.bead_m),
            format_qty(record.bond_m),
        ],
        ComponentKind::ClampCover => vec![
            doc,
            record.dn.to_string(),
            opt(record.cost.map(format_money)),
        ],
    }
}

/// Label/value rows of the summary
pub fn summary_rows(summary: &Summary) -> Vec<(&'static str, String)> {
    vec![
        ("Documents", summary.documents.to_string()),
        ("Components", summary.components.to_string()),
        ("Cladding area (m²)", format!("{:.2}", summary.cladding_area_m2)),
        ("Bead length (m)", format!("{:.2}", summary.bead_m)),
        ("Bond length (m)", format!("{:.2}", summary.bond_m)),
        ("Bonding area (m²)", format!("{:.2}", summary.bonding_area_m2)),
        ("Sealant tubes", summary.sealant_tubes.to_string()),
        ("Bonding tins", summary.bonding_tins.to_string()),
        ("Clamp covers", summary.clamp_covers.to_string()),
        ("Cladding cost", format_money(summary.cladding_cost)),
        ("Sealant cost", format_money(summary.sealant_cost)),
        ("Bonding cost", format_money(summary.bonding_cost)),
        ("Clamp cost", format_money(summary.clamp_cost)),
        ("Total cost", format_money(summary.total_cost)),
    ]
}

/// Record groups and summary as sections, in report order
pub fn sections(takeoff: &Takeoff, summary_only: bool) -> Vec<Section> {
    let mut sections = Vec::new();
    if !summary_only {
        for (kind, records) in takeoff.groups.iter() {
            sections.push(Section {
                title: format!("{} ({})", kind.heading(), records.len()),
                header: group_header(kind),
                rows: records.iter().map(group_row).collect(),
            });
        }
    }
    sections.push(Section {
        title: "Summary".to_string(),
        header: vec!["Item", "Value"],
        rows: summary_rows(&takeoff.summary)
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value])
            .collect(),
    });
    sections
}

/// Render a takeoff in the requested format
pub fn render(takeoff: &Takeoff, format: OutputFormat, summary_only: bool) -> Result<String> {
    match format {
        OutputFormat::Auto => {
            let mut output = String::new();
            for section in sections(takeoff, summary_only) {
                output.push_str(&format!("{}\n", style(&section.title).bold()));
                output.push_str(&section.table(TableStyle::Terminal));
                output.push_str("\n\n");
            }
            Ok(output)
        }
        OutputFormat::Md => {
            let mut output = String::from("# Insulation Cladding Takeoff\n\n");
            for section in sections(takeoff, summary_only) {
                output.push_str(&format!("## {}\n\n", section.title));
                output.push_str(&section.table(TableStyle::Markdown));
                output.push_str("\n\n");
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let json = if summary_only {
                serde_json::to_string_pretty(&takeoff.summary)
            } else {
                serde_json::to_string_pretty(takeoff)
            };
            Ok(format!("{}\n", json.into_diagnostic()?))
        }
        OutputFormat::Yaml => {
            if summary_only {
                serde_yml::to_string(&takeoff.summary).into_diagnostic()
            } else {
                serde_yml::to_string(takeoff).into_diagnostic()
            }
        }
        OutputFormat::Csv => delimited(takeoff, summary_only, b','),
        OutputFormat::Tsv => delimited(takeoff, summary_only, b'\t'),
    }
}

/// Render one plain section in a tabular format
///
/// JSON and YAML carry typed data, so callers serialize their own structs for
/// those formats; here they fall back to the terminal table.
pub fn render_section(section: &Section, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(Vec::new());
            writer.write_record(&section.header).into_diagnostic()?;
            for row in &section.rows {
                writer.write_record(row).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Md => Ok(format!(
            "## {}\n\n{}\n",
            section.title,
            section.table(TableStyle::Markdown)
        )),
        OutputFormat::Auto | OutputFormat::Json | OutputFormat::Yaml => Ok(format!(
            "{}\n{}\n",
            style(&section.title).bold(),
            section.table(TableStyle::Terminal)
        )),
    }
}

/// Flat record table (or summary key/value rows) as CSV/TSV
fn delimited(takeoff: &Takeoff, summary_only: bool, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    if summary_only {
        writer.write_record(["item", "value"]).into_diagnostic()?;
        for (label, value) in summary_rows(&takeoff.summary) {
            writer.write_record([label, value.as_str()]).into_diagnostic()?;
        }
    } else {
        writer
            .write_record([
                "document",
                "kind",
                "dn",
                "branch_dn",
                "angle_deg",
                "length_m",
                "circumference_m",
                "cladding_area_m2",
                "bead_m",
                "bond_m",
                "cost",
            ])
            .into_diagnostic()?;
        for r in takeoff.groups.records() {
            let fields = [
                r.document.clone(),
                r.kind.to_string(),
                r.dn.to_string(),
                r.branch_dn.map(|v| v.to_string()).unwrap_or_default(),
                r.angle_deg.map(|v| v.to_string()).unwrap_or_default(),
                r.length_m.map(|v| v.to_string()).unwrap_or_default(),
                r.circumference_m.to_string(),
                r.cladding_area_m2.map(|v| v.to_string()).unwrap_or_default(),
                r.bead_m.to_string(),
                r.bond_m.to_string(),
                r.cost.map(|v| format!("{:.2}", v)).unwrap_or_default(),
            ];
            writer.write_record(&fields).into_diagnostic()?;
        }
    }

    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}

/// Write report content to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                eprintln!(
                    "{} Report written to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Config, Estimator, SourceDocument};

    fn takeoff() -> Takeoff {
        let estimator = Estimator::new(Config::default()).unwrap();
        let doc = SourceDocument::new(
            "ISO-001.txt",
            "<1> 3250 100\nTEE 100 50\nWN FLANGE 100\nCLAMP COVER 100\n",
        );
        estimator.estimate([&doc])
    }

    #[test]
    fn test_header_and_row_widths_match() {
        let takeoff = takeoff();
        for (kind, records) in takeoff.groups.iter() {
            let header = group_header(kind);
            for record in records {
                assert_eq!(group_row(record).len(), header.len(), "{kind}");
            }
        }
    }

    #[test]
    fn test_sections_order() {
        let takeoff = takeoff();
        let titles: Vec<String> = sections(&takeoff, false)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Straights (1)",
                "Tees (1)",
                "End Caps (1)",
                "Clamp Covers (1)",
                "Summary"
            ]
        );
        assert_eq!(sections(&takeoff, true).len(), 1);
    }

    #[test]
    fn test_markdown_output() {
        let output = render(&takeoff(), OutputFormat::Md, false).unwrap();
        assert!(output.contains("## Straights (1)"));
        assert!(output.contains("| Total cost"));
    }

    #[test]
    fn test_csv_output() {
        let output = render(&takeoff(), OutputFormat::Csv, false).unwrap();
        let mut lines = output.lines();
        assert!(lines.next().unwrap().starts_with("document,kind,dn"));
        assert!(output.contains("ISO-001.txt,straight,100,,,4,0.485,2.139,4.969,4.485,78.59"));
        assert!(output.contains("ISO-001.txt,tee,100,50,"));
    }

    #[test]
    fn test_tsv_summary() {
        let output = render(&takeoff(), OutputFormat::Tsv, true).unwrap();
        assert!(output.starts_with("item\tvalue\n"));
        assert!(output.contains("Clamp covers\t1"));
    }

    #[test]
    fn test_json_round_trip() {
        let takeoff = takeoff();
        let output = render(&takeoff, OutputFormat::Json, false).unwrap();
        let parsed: Takeoff = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.summary, takeoff.summary);
    }
}
