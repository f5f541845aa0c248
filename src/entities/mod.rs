//! Takeoff data model
//!
//! - [`ComponentDescriptor`] - a piping component recognised in document text
//! - [`QuantityRecord`] - derived quantities for one component
//! - [`RunTotals`] - running totals across a run
//! - [`Summary`] - purchasable units and costs

pub mod component;
pub mod record;
pub mod totals;

pub use component::{ComponentDescriptor, ComponentKind, Dn, ElbowAngle};
pub use record::{QuantityRecord, RecordGroups};
pub use totals::{Contribution, RunTotals, Summary};
