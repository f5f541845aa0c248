//! Quantity calculator - one record and one contribution per component

use crate::core::config::Config;
use crate::core::dimensions::DimensionTable;
use crate::core::geometry::Geometry;
use crate::entities::{ComponentDescriptor, ComponentKind, Contribution, QuantityRecord, RunTotals};

/// Round to a fixed number of decimal places for display
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Turns component descriptors into quantity records
pub struct QuantityCalculator<'a> {
    config: &'a Config,
    geometry: Geometry<'a>,
}

impl<'a> QuantityCalculator<'a> {
    pub fn new(config: &'a Config, table: &'a DimensionTable) -> Self {
        Self {
            config,
            geometry: Geometry::new(table, f64::from(config.thickness_mm), config.lap_m),
        }
    }

    pub fn geometry(&self) -> &Geometry<'a> {
        &self.geometry
    }

    /// Quantities for one component
    ///
    /// The record carries display-rounded values; the contribution carries
    /// the exact values that feed the run totals.
    pub fn calculate(
        &self,
        document: &str,
        descriptor: &ComponentDescriptor,
    ) -> (QuantityRecord, Contribution) {
        let kind = descriptor.kind();
        let measure = self.geometry.measure(descriptor);

        let bond_m = if self.config.bond_policy.includes(kind) {
            measure.bond_m
        } else {
            0.0
        };

        let cost = match kind {
            ComponentKind::Straight => measure
                .cladding_area_m2
                .map(|area| area * self.config.rates.shield),
            ComponentKind::ClampCover => Some(self.config.rates.clamp),
            _ => None,
        };

        let angle_deg = match descriptor {
            ComponentDescriptor::Elbow { angle, .. } => Some(angle.degrees()),
            _ => None,
        };
        let equal = match descriptor {
            ComponentDescriptor::Tee { .. } => Some(descriptor.is_equal_tee()),
            _ => None,
        };

        let record = QuantityRecord {
            document: document.to_string(),
            kind,
            dn: descriptor.primary_dn(),
            branch_dn: descriptor.secondary_dn(),
            angle_deg,
            equal,
            length_m: measure.length_m,
            circumference_m: round_to(measure.circumference_m, 3),
            cladding_area_m2: measure.cladding_area_m2.map(|a| round_to(a, 3)),
            bead_m: round_to(measure.bead_m, 3),
            bond_m: round_to(bond_m, 3),
            cost: cost.map(|c| round_to(c, 2)),
        };

        let contribution = Contribution {
            cladding_area_m2: measure.cladding_area_m2.unwrap_or(0.0),
            bead_m: measure.bead_m,
            bond_m,
            clamp_covers: u32::from(kind == ComponentKind::ClampCover),
        };

        (record, contribution)
    }

    /// Process a document's components in scan order, accumulating into `totals`
    pub fn process(
        &self,
        document: &str,
        components: &[ComponentDescriptor],
        totals: &mut RunTotals,
    ) -> Vec<QuantityRecord> {
        components
            .iter()
            .map(|descriptor| {
                let (record, contribution) = self.calculate(document, descriptor);
                totals.add(&contribution);
                record
            })
            .collect()
    }
}
