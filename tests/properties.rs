//! Property-based tests for the estimation engine
//!
//! Exercise invariants that must hold for any thickness, any set of
//! components and any document order.

use mto::core::aggregator::{ceil_units, sealant_tubes};
use mto::core::geometry::circumference_from_od;
use mto::core::{Config, DimensionTable, Estimator, Geometry, QuantityCalculator, SourceDocument};
use mto::entities::{ComponentDescriptor, Dn, ElbowAngle, RunTotals};
use proptest::prelude::*;

fn table_dn() -> impl Strategy<Value = Dn> {
    let dns: Vec<Dn> = DimensionTable::standard().iter().map(|(dn, _)| dn).collect();
    proptest::sample::select(dns)
}

fn descriptor() -> impl Strategy<Value = ComponentDescriptor> {
    prop_oneof![
        (1u32..20_000, table_dn())
            .prop_map(|(length_mm, dn)| ComponentDescriptor::StraightRun { length_mm, dn }),
        (any::<bool>(), table_dn()).prop_map(|(right, dn)| ComponentDescriptor::Elbow {
            angle: if right { ElbowAngle::Deg90 } else { ElbowAngle::Deg45 },
            dn,
        }),
        (table_dn(), table_dn())
            .prop_map(|(header_dn, branch_dn)| ComponentDescriptor::Tee { header_dn, branch_dn }),
        (table_dn(), table_dn())
            .prop_map(|(big_dn, small_dn)| ComponentDescriptor::Reducer { big_dn, small_dn }),
        table_dn().prop_map(|dn| ComponentDescriptor::EndCap { dn }),
        table_dn().prop_map(|dn| ComponentDescriptor::Collar { dn }),
        table_dn().prop_map(|dn| ComponentDescriptor::ClampCover { dn }),
    ]
}

fn totals_for(components: &[ComponentDescriptor]) -> RunTotals {
    let config = Config::default();
    let table = config.dimension_table();
    let mut totals = RunTotals::default();
    QuantityCalculator::new(&config, &table).process("doc", components, &mut totals);
    totals
}

fn assert_totals_close(a: &RunTotals, b: &RunTotals) -> Result<(), TestCaseError> {
    prop_assert!((a.cladding_area_m2 - b.cladding_area_m2).abs() < 1e-6);
    prop_assert!((a.bead_m - b.bead_m).abs() < 1e-6);
    prop_assert!((a.bond_m - b.bond_m).abs() < 1e-6);
    prop_assert_eq!(a.clamp_covers, b.clamp_covers);
    prop_assert_eq!(a.components, b.components);
    Ok(())
}

// ============================================================================
// Geometry
// ============================================================================

/// Property: with no insulation the circumference is that of the bare pipe
#[test]
fn proptest_zero_thickness_is_bare_pipe() {
    proptest!(|(dn in table_dn())| {
        let table = DimensionTable::standard();
        let geometry = Geometry::new(&table, 0.0, 0.05);
        let expected = circumference_from_od(table.outer_diameter(dn));
        prop_assert!((geometry.circumference_m(dn) - expected).abs() < 1e-9);
    });
}

/// Property: circumference grows strictly with thickness
#[test]
fn proptest_circumference_monotonic_in_thickness() {
    proptest!(|(dn in table_dn(), t1 in 5u32..300, step in 1u32..100)| {
        let t2 = (t1 + step).min(300);
        prop_assume!(t1 < t2);
        let table = DimensionTable::standard();
        let thin = Geometry::new(&table, f64::from(t1), 0.05).circumference_m(dn);
        let thick = Geometry::new(&table, f64::from(t2), 0.05).circumference_m(dn);
        prop_assert!(thin < thick);
    });
}

/// Property: every record is non-negative
#[test]
fn proptest_quantities_non_negative() {
    proptest!(|(d in descriptor(), thickness in 5u32..=300)| {
        let config = Config { thickness_mm: thickness, ..Default::default() };
        let table = config.dimension_table();
        let (record, contribution) = QuantityCalculator::new(&config, &table).calculate("doc", &d);
        prop_assert!(record.circumference_m > 0.0);
        prop_assert!(record.bead_m >= 0.0);
        prop_assert!(record.bond_m >= 0.0);
        prop_assert!(contribution.cladding_area_m2 >= 0.0);
    });
}

// ============================================================================
// Aggregation
// ============================================================================

/// Property: tubes cover the bead, and one fewer would not
#[test]
fn proptest_sealant_tubes_ceiling_bounds() {
    proptest!(|(bead in 0.0f64..10_000.0)| {
        let config = Config::default();
        let tubes = sealant_tubes(bead, &config);
        prop_assert!(f64::from(tubes) * config.tube_cover_m >= bead);
        if tubes > 0 {
            prop_assert!(f64::from(tubes - 1) * config.tube_cover_m < bead);
        }
    });
}

/// Property: whole units never fall short for any positive unit size
#[test]
fn proptest_ceil_units_covers_quantity() {
    proptest!(|(quantity in 0.0f64..1_000.0, per_unit in 0.1f64..50.0)| {
        let units = ceil_units(quantity, per_unit);
        prop_assert!(f64::from(units) * per_unit >= quantity);
    });
}

// ============================================================================
// Order independence
// ============================================================================

/// Property: reordering components within a document leaves totals unchanged
#[test]
fn proptest_component_order_irrelevant() {
    proptest!(|(components in proptest::collection::vec(descriptor(), 0..30))| {
        let mut reversed = components.clone();
        reversed.reverse();
        assert_totals_close(&totals_for(&components), &totals_for(&reversed))?;
    });
}

/// Property: reordering documents leaves the run totals unchanged
#[test]
fn proptest_document_order_irrelevant() {
    let line = prop_oneof![
        (100u32..9_000, table_dn()).prop_map(|(l, dn)| format!("<1> {} {}", l, dn)),
        table_dn().prop_map(|dn| format!("ELBOW 90 LR {}", dn)),
        table_dn().prop_map(|dn| format!("{} WELDOLET", dn)),
        table_dn().prop_map(|dn| format!("PIPE CLAMP {}", dn)),
        Just("GENERAL NOTES".to_string()),
    ];
    let document = proptest::collection::vec(line, 0..10).prop_map(|lines| lines.join("\n"));

    proptest!(|(texts in proptest::collection::vec(document, 1..6))| {
        let estimator = Estimator::new(Config::default()).unwrap();
        let docs: Vec<SourceDocument> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| SourceDocument::new(format!("ISO-{:03}.txt", i), text.clone()))
            .collect();

        let forward = estimator.estimate(&docs);
        let backward = estimator.estimate(docs.iter().rev());
        assert_totals_close(&forward.totals, &backward.totals)?;
        prop_assert_eq!(forward.groups.len(), backward.groups.len());
    });
}
