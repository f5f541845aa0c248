//! Aggregator - purchasable units and costs from run totals
//!
//! Partial units are always bought whole: every count is a ceiling of the
//! unrounded total, so `units × per_unit >= quantity` holds.

use crate::core::calculator::round_to;
use crate::core::config::Config;
use crate::entities::{RunTotals, Summary};

/// Whole units needed to cover `quantity` when one unit covers `per_unit`
///
/// `per_unit` must be positive; [`Config::validate`] guarantees this for
/// every divisor taken from configuration.
pub fn ceil_units(quantity: f64, per_unit: f64) -> u32 {
    if quantity <= 0.0 {
        return 0;
    }
    (quantity / per_unit).ceil() as u32
}

/// Sealant tubes for a total bead length
pub fn sealant_tubes(bead_m: f64, config: &Config) -> u32 {
    ceil_units(bead_m, config.tube_cover_m)
}

/// Bonding strip area for a total bond length
pub fn bonding_area_m2(bond_m: f64, config: &Config) -> f64 {
    bond_m * config.bond_strip_width_m
}

/// Bonding agent tins for a total bond length
pub fn bonding_tins(bond_m: f64, config: &Config) -> u32 {
    ceil_units(bonding_area_m2(bond_m, config), config.tins_divisor)
}

/// Final summary for a finished run
pub fn summarize(totals: &RunTotals, documents: usize, config: &Config) -> Summary {
    let rates = &config.rates;

    let sealant_tubes = sealant_tubes(totals.bead_m, config);
    let bonding_area = bonding_area_m2(totals.bond_m, config);
    let bonding_tins = bonding_tins(totals.bond_m, config);

    let cladding_cost = totals.cladding_area_m2 * rates.shield;
    let sealant_cost = f64::from(sealant_tubes) * rates.seal;
    let bonding_cost = f64::from(bonding_tins) * rates.bond;
    let clamp_cost = f64::from(totals.clamp_covers) * rates.clamp;
    let total_cost = cladding_cost + sealant_cost + bonding_cost + clamp_cost;

    tracing::debug!(
        bead_m = totals.bead_m,
        bond_m = totals.bond_m,
        sealant_tubes,
        bonding_tins,
        "aggregated run totals"
    );

    Summary {
        documents,
        components: totals.components,
        cladding_area_m2: round_to(totals.cladding_area_m2, 2),
        bead_m: round_to(totals.bead_m, 2),
        bond_m: round_to(totals.bond_m, 2),
        bonding_area_m2: round_to(bonding_area, 2),
        sealant_tubes,
        bonding_tins,
        clamp_covers: totals.clamp_covers,
        cladding_cost: round_to(cladding_cost, 2),
        sealant_cost: round_to(sealant_cost, 2),
        bonding_cost: round_to(bonding_cost, 2),
        clamp_cost: round_to(clamp_cost, 2),
        total_cost: round_to(total_cost, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_units() {
        assert_eq!(ceil_units(37.4, 6.0), 7);
        assert_eq!(ceil_units(36.0, 6.0), 6);
        assert_eq!(ceil_units(36.0001, 6.0), 7);
        assert_eq!(ceil_units(0.0, 6.0), 0);
        assert_eq!(ceil_units(0.01, 6.0), 1);
    }

    #[test]
    fn test_sealant_tubes_scenario() {
        let config = Config::default();
        assert_eq!(sealant_tubes(37.4, &config), 7);
    }

    #[test]
    fn test_bonding_tins_divisor() {
        // 45 m bond × 0.1 m strip = 4.5 m²
        let config = Config::default();
        assert!((bonding_area_m2(45.0, &config) - 4.5).abs() < 1e-12);
        assert_eq!(bonding_tins(45.0, &config), 3);

        let config = Config {
            tins_divisor: 1.0,
            ..Default::default()
        };
        assert_eq!(bonding_tins(45.0, &config), 5);
    }

    #[test]
    fn test_summary_costs() {
        let config = Config::default();
        let totals = RunTotals {
            cladding_area_m2: 10.0,
            bead_m: 37.4,
            bond_m: 45.0,
            clamp_covers: 2,
            components: 9,
        };
        let summary = summarize(&totals, 3, &config);

        assert_eq!(summary.documents, 3);
        assert_eq!(summary.components, 9);
        assert_eq!(summary.sealant_tubes, 7);
        assert_eq!(summary.bonding_tins, 3);
        assert_eq!(summary.bonding_area_m2, 4.5);
        assert_eq!(summary.cladding_cost, 367.4);
        assert_eq!(summary.sealant_cost, 87.5);
        assert_eq!(summary.bonding_cost, 28.5);
        assert_eq!(summary.clamp_cost, 48.0);
        assert_eq!(summary.total_cost, 531.4);
    }

    #[test]
    fn test_empty_run() {
        let summary = summarize(&RunTotals::default(), 0, &Config::default());
        assert_eq!(summary.sealant_tubes, 0);
        assert_eq!(summary.bonding_tins, 0);
        assert_eq!(summary.total_cost, 0.0);
    }
}
