//! Core module - the estimation engine
//!
//! Data flows dimensions → geometry → classifier → calculator → aggregator;
//! [`Estimator`] ties the stages together for a run.

pub mod aggregator;
pub mod calculator;
pub mod classifier;
pub mod config;
pub mod dimensions;
pub mod estimator;
pub mod geometry;
pub mod loader;

pub use calculator::QuantityCalculator;
pub use classifier::{Classification, Classifier, SkipReason, SkippedLine};
pub use config::{BondPolicy, Config, ConfigError, Rates};
pub use dimensions::DimensionTable;
pub use estimator::{DocumentTakeoff, Estimator, SourceDocument, Takeoff};
pub use geometry::Geometry;
pub use loader::LoadError;
