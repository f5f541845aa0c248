//! Cladding geometry
//!
//! Pure functions of DN and insulation thickness. All diameters are in
//! millimetres; circumferences, lengths and areas are in metres and m².

use std::f64::consts::PI;

use crate::core::dimensions::DimensionTable;
use crate::entities::{ComponentDescriptor, Dn, ElbowAngle};

/// Straight-run length rounded up to whole metres
///
/// Applied exactly once, before any straight-run formula.
pub fn rounded_length_m(length_mm: u32) -> u32 {
    length_mm.div_ceil(1000)
}

/// Circumference (m) of a circle with the given diameter (mm)
pub fn circumference_from_od(od_mm: f64) -> f64 {
    PI * od_mm / 1000.0
}

/// Raw quantities of one component, before bond policy and costs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    /// Circumference over insulation at the main size
    pub circumference_m: f64,
    /// Rounded length (straights)
    pub length_m: Option<u32>,
    /// Cladding area including lap (straights)
    pub cladding_area_m2: Option<f64>,
    pub bead_m: f64,
    /// Bond length the component adds when its kind is bonded
    pub bond_m: f64,
}

/// Geometry calculator bound to one dimension table and thickness
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    table: &'a DimensionTable,
    thickness_mm: f64,
    lap_m: f64,
}

impl<'a> Geometry<'a> {
    pub fn new(table: &'a DimensionTable, thickness_mm: f64, lap_m: f64) -> Self {
        Self {
            table,
            thickness_mm,
            lap_m,
        }
    }

    /// Outer diameter over insulation (mm)
    pub fn insulated_od_mm(&self, dn: Dn) -> f64 {
        self.table.outer_diameter(dn) + 2.0 * self.thickness_mm
    }

    /// Circumference over insulation (m)
    pub fn circumference_m(&self, dn: Dn) -> f64 {
        circumference_from_od(self.insulated_od_mm(dn))
    }

    /// Cladding area of a straight run, lap added once per run
    pub fn cladding_area_m2(&self, dn: Dn, length_m: u32) -> f64 {
        (self.circumference_m(dn) + self.lap_m) * f64::from(length_m)
    }

    /// One seam arc along an elbow (heel or throat)
    pub fn elbow_arc_m(&self, dn: Dn, angle: ElbowAngle) -> f64 {
        f64::from(angle.degrees()) / 360.0 * self.circumference_m(dn)
    }

    /// Quantities for one component
    pub fn measure(&self, descriptor: &ComponentDescriptor) -> Measure {
        match *descriptor {
            ComponentDescriptor::StraightRun { length_mm, dn } => {
                let length_m = rounded_length_m(length_mm);
                let length = f64::from(length_m);
                let circ = self.circumference_m(dn);
                Measure {
                    circumference_m: circ,
                    length_m: Some(length_m),
                    cladding_area_m2: Some(self.cladding_area_m2(dn, length_m)),
                    // circumferential joints at start and end
                    bead_m: length + 2.0 * circ,
                    bond_m: length + circ,
                }
            }
            ComponentDescriptor::Elbow { angle, dn } => {
                // heel and throat seams; the bond strip runs twice the full arc
                let arc = self.elbow_arc_m(dn, angle);
                Measure {
                    circumference_m: self.circumference_m(dn),
                    length_m: None,
                    cladding_area_m2: None,
                    bead_m: 2.0 * arc,
                    bond_m: 4.0 * arc,
                }
            }
            ComponentDescriptor::Tee {
                header_dn,
                branch_dn,
            } => {
                let header = self.circumference_m(header_dn);
                let bead = 2.0 * header + self.circumference_m(branch_dn);
                fitting(header, bead)
            }
            ComponentDescriptor::Reducer { big_dn, small_dn } => {
                let big = self.circumference_m(big_dn);
                fitting(big, big + self.circumference_m(small_dn))
            }
            ComponentDescriptor::EndCap { dn } | ComponentDescriptor::Collar { dn } => {
                let circ = self.circumference_m(dn);
                fitting(circ, circ)
            }
            ComponentDescriptor::ClampCover { dn } => {
                let circ = self.circumference_m(dn);
                Measure {
                    circumference_m: circ,
                    length_m: None,
                    cladding_area_m2: None,
                    bead_m: 0.0,
                    bond_m: circ,
                }
            }
        }
    }
}

/// Fittings bond along their full bead
fn fitting(circumference_m: f64, bead_m: f64) -> Measure {
    Measure {
        circumference_m,
        length_m: None,
        cladding_area_m2: None,
        bead_m,
        bond_m: bead_m,
    }
}
