//! Run totals and the purchasable-unit summary

use serde::{Deserialize, Serialize};

/// Quantities one component adds to the run totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub cladding_area_m2: f64,
    pub bead_m: f64,
    pub bond_m: f64,
    pub clamp_covers: u32,
}

/// Running totals across the documents of a run
///
/// Contributions are never negative, so every accumulator only grows.
/// Merging partial totals is a plain sum and does not depend on order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Total cladding area (m²)
    pub cladding_area_m2: f64,

    /// Total sealant bead length (m)
    pub bead_m: f64,

    /// Total bond length (m)
    pub bond_m: f64,

    /// Number of clamp covers
    pub clamp_covers: u32,

    /// Number of components processed
    pub components: usize,
}

impl RunTotals {
    /// Add one component's contribution
    pub fn add(&mut self, contribution: &Contribution) {
        self.cladding_area_m2 += contribution.cladding_area_m2.max(0.0);
        self.bead_m += contribution.bead_m.max(0.0);
        self.bond_m += contribution.bond_m.max(0.0);
        self.clamp_covers += contribution.clamp_covers;
        self.components += 1;
    }

    /// Fold another partial total (e.g. one document's) into this one
    pub fn merge(&mut self, other: &RunTotals) {
        self.cladding_area_m2 += other.cladding_area_m2;
        self.bead_m += other.bead_m;
        self.bond_m += other.bond_m;
        self.clamp_covers += other.clamp_covers;
        self.components += other.components;
    }
}

/// Purchasable units and costs derived from the final run totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of documents processed
    pub documents: usize,

    /// Number of components recognised
    pub components: usize,

    /// Total cladding area (m²)
    pub cladding_area_m2: f64,

    /// Total sealant bead length (m)
    pub bead_m: f64,

    /// Total bond length (m)
    pub bond_m: f64,

    /// Bonding strip area (m²)
    pub bonding_area_m2: f64,

    /// Sealant tubes required
    pub sealant_tubes: u32,

    /// Bonding agent tins required
    pub bonding_tins: u32,

    /// Clamp covers required
    pub clamp_covers: u32,

    pub cladding_cost: f64,
    pub sealant_cost: f64,
    pub bonding_cost: f64,
    pub clamp_cost: f64,

    /// Sum of all cost lines
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut totals = RunTotals::default();
        totals.add(&Contribution {
            cladding_area_m2: 2.0,
            bead_m: 4.0,
            bond_m: 3.0,
            clamp_covers: 0,
        });
        totals.add(&Contribution {
            clamp_covers: 1,
            ..Default::default()
        });

        assert_eq!(totals.cladding_area_m2, 2.0);
        assert_eq!(totals.bead_m, 4.0);
        assert_eq!(totals.bond_m, 3.0);
        assert_eq!(totals.clamp_covers, 1);
        assert_eq!(totals.components, 2);
    }

    #[test]
    fn test_add_never_decreases() {
        let mut totals = RunTotals::default();
        totals.add(&Contribution {
            bead_m: 1.5,
            ..Default::default()
        });
        totals.add(&Contribution {
            bead_m: -3.0,
            bond_m: -1.0,
            ..Default::default()
        });
        assert_eq!(totals.bead_m, 1.5);
        assert_eq!(totals.bond_m, 0.0);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = RunTotals {
            cladding_area_m2: 1.25,
            bead_m: 3.5,
            bond_m: 2.0,
            clamp_covers: 2,
            components: 4,
        };
        let b = RunTotals {
            cladding_area_m2: 0.75,
            bead_m: 1.5,
            bond_m: 1.0,
            clamp_covers: 1,
            components: 3,
        };

        let mut ab = RunTotals::default();
        ab.merge(&a);
        ab.merge(&b);
        let mut ba = RunTotals::default();
        ba.merge(&b);
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.components, 7);
        assert_eq!(ab.clamp_covers, 3);
    }
}
