//! `mto dims` command - dimension table with insulated sizes

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{format_qty, load_config};
use crate::cli::report::{self, Section};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Geometry;
use crate::entities::Dn;

#[derive(clap::Args, Debug)]
pub struct DimsArgs {
    /// Insulation thickness in mm (overrides config)
    #[arg(long, short = 't')]
    pub thickness: Option<u32>,
}

#[derive(Debug, Serialize)]
struct DimensionRow {
    dn: Dn,
    od_mm: f64,
    insulated_od_mm: f64,
    circumference_m: f64,
}

pub fn run(args: DimsArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global, args.thickness)?;
    let table = config.dimension_table();
    let geometry = Geometry::new(&table, f64::from(config.thickness_mm), config.lap_m);

    let rows: Vec<DimensionRow> = table
        .iter()
        .map(|(dn, od_mm)| DimensionRow {
            dn,
            od_mm,
            insulated_od_mm: geometry.insulated_od_mm(dn),
            circumference_m: geometry.circumference_m(dn),
        })
        .collect();

    let output = match global.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&rows).into_diagnostic()?),
        OutputFormat::Yaml => serde_yml::to_string(&rows).into_diagnostic()?,
        format => {
            let section = Section {
                title: format!("Dimensions at {} mm insulation", config.thickness_mm),
                header: vec!["DN", "OD (mm)", "Insulated OD (mm)", "Circ (m)"],
                rows: rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.dn.to_string(),
                            format!("{:.1}", r.od_mm),
                            format!("{:.1}", r.insulated_od_mm),
                            format_qty(r.circumference_m),
                        ]
                    })
                    .collect(),
            };
            report::render_section(&section, format)?
        }
    };

    print!("{}", output);
    Ok(())
}
