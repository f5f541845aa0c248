//! Quantity records - per-component takeoff lines

use serde::{Deserialize, Serialize};

use crate::entities::component::{ComponentKind, Dn};

/// Derived quantities for one component of one document
///
/// Lengths and areas are rounded to 3 decimal places and costs to 2 for
/// display. Run totals are accumulated from the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityRecord {
    /// Source document identifier
    pub document: String,

    /// Component kind
    pub kind: ComponentKind,

    /// Main size (header for tees, large end for reducers)
    pub dn: Dn,

    /// Branch size (tees) or small end (reducers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_dn: Option<Dn>,

    /// Elbow angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<u32>,

    /// Equal tee flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<bool>,

    /// Straight length rounded up to whole metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<u32>,

    /// Circumference over insulation at the main size (m)
    pub circumference_m: f64,

    /// Cladding area including lap (m², straights only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cladding_area_m2: Option<f64>,

    /// Sealant bead length (m)
    pub bead_m: f64,

    /// Bond length contribution (m)
    pub bond_m: f64,

    /// Direct cost of the line (cladding for straights, cover rate for clamps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Quantity records grouped by component kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordGroups {
    #[serde(default)]
    pub straights: Vec<QuantityRecord>,
    #[serde(default)]
    pub elbows: Vec<QuantityRecord>,
    #[serde(default)]
    pub tees: Vec<QuantityRecord>,
    #[serde(default)]
    pub reducers: Vec<QuantityRecord>,
    #[serde(default)]
    pub end_caps: Vec<QuantityRecord>,
    #[serde(default)]
    pub collars: Vec<QuantityRecord>,
    #[serde(default)]
    pub clamp_covers: Vec<QuantityRecord>,
}

impl RecordGroups {
    /// Append a record to the group matching its kind
    pub fn push(&mut self, record: QuantityRecord) {
        self.group_mut(record.kind).push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = QuantityRecord>) {
        for record in records {
            self.push(record);
        }
    }

    pub fn group(&self, kind: ComponentKind) -> &[QuantityRecord] {
        match kind {
            ComponentKind::Straight => &self.straights,
            ComponentKind::Elbow => &self.elbows,
            ComponentKind::Tee => &self.tees,
            ComponentKind::Reducer => &self.reducers,
            ComponentKind::EndCap => &self.end_caps,
            ComponentKind::Collar => &self.collars,
            ComponentKind::ClampCover => &self.clamp_covers,
        }
    }

    fn group_mut(&mut self, kind: ComponentKind) -> &mut Vec<QuantityRecord> {
        match kind {
            ComponentKind::Straight => &mut self.straights,
            ComponentKind::Elbow => &mut self.elbows,
            ComponentKind::Tee => &mut self.tees,
            ComponentKind::Reducer => &mut self.reducers,
            ComponentKind::EndCap => &mut self.end_caps,
            ComponentKind::Collar => &mut self.collars,
            ComponentKind::ClampCover => &mut self.clamp_covers,
        }
    }

    /// Iterate over non-empty groups in report order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, &[QuantityRecord])> {
        ComponentKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.group(kind)))
            .filter(|(_, records)| !records.is_empty())
    }

    /// All records in report order
    pub fn records(&self) -> impl Iterator<Item = &QuantityRecord> {
        self.iter().flat_map(|(_, records)| records.iter())
    }

    pub fn len(&self) -> usize {
        ComponentKind::ALL
            .iter()
            .map(|kind| self.group(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort every group by DN ascending, then branch DN; stable within equal sizes
    pub fn sort_by_dn(&mut self) {
        for kind in ComponentKind::ALL {
            self.group_mut(kind)
                .sort_by_key(|r| (r.dn, r.branch_dn.unwrap_or(0)));
        }
    }
}
