//! Estimator - runs documents through classification, quantities and aggregation
//!
//! Each document is processed on its own into a [`DocumentTakeoff`] with
//! partial totals; the run totals are the sum of those partials. Callers may
//! therefore process documents in any order, or in parallel, and merge.

use serde::{Deserialize, Serialize};

use crate::core::aggregator;
use crate::core::calculator::QuantityCalculator;
use crate::core::classifier::{Classification, Classifier};
use crate::core::config::{Config, ConfigError};
use crate::core::dimensions::DimensionTable;
use crate::entities::{QuantityRecord, RecordGroups, RunTotals, Summary};

/// Extracted text of one drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Display name / identifier
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Records and partial totals for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTakeoff {
    pub document: String,
    pub records: Vec<QuantityRecord>,
    pub totals: RunTotals,
    /// Cue lines that produced no component
    pub skipped_lines: usize,
}

/// Output of a complete run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Takeoff {
    /// Records grouped by kind, each group sorted by DN ascending
    pub groups: RecordGroups,
    pub totals: RunTotals,
    pub summary: Summary,
}

/// The estimation engine
///
/// Construction validates the configuration; an estimator never runs with an
/// out-of-range thickness.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: Config,
    table: DimensionTable,
    classifier: Classifier,
}

impl Estimator {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = config.dimension_table();
        let classifier = Classifier::new(config.collar_max_dn);
        Ok(Self {
            config,
            table,
            classifier,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calculator(&self) -> QuantityCalculator<'_> {
        QuantityCalculator::new(&self.config, &self.table)
    }

    /// Classify a document without computing quantities
    pub fn classify(&self, document: &SourceDocument) -> Classification {
        self.classifier.classify(&document.text)
    }

    /// Records and partial totals for one document
    pub fn process_document(&self, document: &SourceDocument) -> DocumentTakeoff {
        let classification = self.classify(document);
        let mut totals = RunTotals::default();
        let records = self
            .calculator()
            .process(&document.name, &classification.components, &mut totals);

        tracing::info!(
            document = %document.name,
            components = records.len(),
            skipped = classification.skipped.len(),
            "processed document"
        );

        DocumentTakeoff {
            document: document.name.clone(),
            records,
            totals,
            skipped_lines: classification.skipped.len(),
        }
    }

    /// Combine per-document takeoffs into a finished run
    pub fn finish(&self, documents: impl IntoIterator<Item = DocumentTakeoff>) -> Takeoff {
        let mut groups = RecordGroups::default();
        let mut totals = RunTotals::default();
        let mut count = 0;

        for doc in documents {
            totals.merge(&doc.totals);
            groups.extend(doc.records);
            count += 1;
        }
        groups.sort_by_dn();

        let summary = aggregator::summarize(&totals, count, &self.config);
        Takeoff {
            groups,
            totals,
            summary,
        }
    }

    /// Estimate a whole run
    pub fn estimate<'a>(&self, documents: impl IntoIterator<Item = &'a SourceDocument>) -> Takeoff {
        let partials: Vec<DocumentTakeoff> = documents
            .into_iter()
            .map(|doc| self.process_document(doc))
            .collect();
        self.finish(partials)
    }
}
