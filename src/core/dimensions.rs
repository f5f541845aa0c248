//! DN → outer diameter lookup

use std::collections::BTreeMap;

use crate::entities::Dn;

/// Standard pipe outer diameters (mm) by nominal size
pub const STANDARD_OD_MM: &[(Dn, f64)] = &[
    (15, 21.3),
    (20, 26.9),
    (25, 33.7),
    (32, 42.4),
    (40, 48.3),
    (50, 60.3),
    (65, 76.1),
    (80, 88.9),
    (90, 101.6),
    (100, 114.3),
    (125, 141.3),
    (150, 168.3),
    (200, 219.1),
    (250, 273.0),
    (300, 323.9),
    (350, 355.6),
    (400, 406.4),
    (450, 457.0),
    (500, 508.0),
    (600, 610.0),
];

/// Immutable DN → OD table
///
/// Unlisted sizes are never rejected: [`DimensionTable::outer_diameter`]
/// falls back to treating the DN itself as the outer diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTable {
    entries: BTreeMap<Dn, f64>,
}

impl Default for DimensionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DimensionTable {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_OD_MM.iter().copied().collect(),
        }
    }

    /// Add or replace entries
    pub fn with_overrides(mut self, overrides: &BTreeMap<Dn, f64>) -> Self {
        self.entries
            .extend(overrides.iter().map(|(dn, od)| (*dn, *od)));
        self
    }

    /// Tabulated OD, if the DN is listed
    pub fn lookup(&self, dn: Dn) -> Option<f64> {
        self.entries.get(&dn).copied()
    }

    /// Outer diameter in mm, using the DN itself when it is not listed
    pub fn outer_diameter(&self, dn: Dn) -> f64 {
        match self.lookup(dn) {
            Some(od) => od,
            None => {
                tracing::debug!(dn, "DN not in dimension table, using DN as outer diameter");
                f64::from(dn)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dn, f64)> + '_ {
        self.entries.iter().map(|(dn, od)| (*dn, *od))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_dn() {
        let table = DimensionTable::standard();
        assert_eq!(table.outer_diameter(100), 114.3);
        assert_eq!(table.outer_diameter(50), 60.3);
        assert_eq!(table.len(), STANDARD_OD_MM.len());
    }

    #[test]
    fn test_unknown_dn_falls_back_to_dn() {
        let table = DimensionTable::standard();
        assert_eq!(table.lookup(175), None);
        assert_eq!(table.outer_diameter(175), 175.0);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert(700, 711.0);
        overrides.insert(100, 114.0);
        let table = DimensionTable::standard().with_overrides(&overrides);

        assert_eq!(table.outer_diameter(700), 711.0);
        assert_eq!(table.outer_diameter(100), 114.0);
        assert_eq!(table.outer_diameter(50), 60.3);
    }

    #[test]
    fn test_iter_is_sorted() {
        let table = DimensionTable::standard();
        let dns: Vec<Dn> = table.iter().map(|(dn, _)| dn).collect();
        let mut sorted = dns.clone();
        sorted.sort_unstable();
        assert_eq!(dns, sorted);
    }
}
