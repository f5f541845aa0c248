//! Component classifier - turns document text into component descriptors
//!
//! Two independent scans run over each document:
//!
//! 1. **Cut list**: every `<index> length_mm DN` entry becomes a straight run.
//! 2. **Fittings**: each line is lower-cased and tested against an ordered
//!    list of cue rules. The first rule whose cue matches decides the line;
//!    if it cannot extract the sizes it needs, the line is skipped.
//!
//! Skipped lines are reported back, never raised as errors.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::entities::{ComponentDescriptor, Dn, ElbowAngle};

static CUT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\d+>\s+(\d{2,5})\s+(\d{2,3})").expect("valid cut-list regex")
});

static SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2,3}").expect("valid size regex"));

static TEE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btees?\b").expect("valid tee regex"));

/// Why a line with a recognised cue produced no descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No 2–3 digit size on the line
    MissingSize,
    /// The cue needs two sizes and fewer were found
    NeedsTwoSizes,
    /// Branch too large for a collar
    CollarTooLarge(Dn),
    /// Cut-list entry with zero length
    ZeroLength,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingSize => write!(f, "no size found"),
            SkipReason::NeedsTwoSizes => write!(f, "two sizes required"),
            SkipReason::CollarTooLarge(dn) => write!(f, "DN{} too large for a collar", dn),
            SkipReason::ZeroLength => write!(f, "zero length"),
        }
    }
}

/// A cue line that yielded no descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number (0 for cut-list matches spanning lines)
    pub line: usize,
    /// Name of the rule whose cue matched
    pub cue: &'static str,
    pub reason: SkipReason,
    pub text: String,
}

/// Result of classifying one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    /// Straight runs in cut-list order, followed by fittings in line order
    pub components: Vec<ComponentDescriptor>,
    pub skipped: Vec<SkippedLine>,
}

/// A fitting line, lower-cased, with its sizes already extracted
struct Cue<'a> {
    lower: &'a str,
    sizes: Vec<Dn>,
}

enum Outcome {
    Emit(ComponentDescriptor),
    Skip(SkipReason),
}

struct FittingRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    extract: fn(&Cue<'_>, &Classifier) -> Outcome,
}

/// Fitting rules in precedence order; first match wins
const FITTING_RULES: &[FittingRule] = &[
    FittingRule {
        name: "elbow",
        matches: |l| l.contains("elbow") && (l.contains("45") || l.contains("90")),
        extract: extract_elbow,
    },
    FittingRule {
        name: "tee",
        matches: |l| TEE_WORD.is_match(l),
        extract: extract_tee,
    },
    FittingRule {
        name: "reducer",
        matches: |l| l.contains("reducer"),
        extract: extract_reducer,
    },
    FittingRule {
        name: "end_cap",
        matches: |l| l.contains("flange") || l.contains("valve"),
        extract: |cue, _| first_size(cue, |dn| ComponentDescriptor::EndCap { dn }),
    },
    FittingRule {
        name: "collar",
        matches: |l| l.contains("weldolet") || l.contains("threadolet"),
        extract: extract_collar,
    },
    FittingRule {
        name: "clamp_cover",
        matches: |l| l.contains("clamp"),
        extract: |cue, _| first_size(cue, |dn| ComponentDescriptor::ClampCover { dn }),
    },
];

fn first_size(cue: &Cue<'_>, build: fn(Dn) -> ComponentDescriptor) -> Outcome {
    match cue.sizes.first() {
        Some(&dn) => Outcome::Emit(build(dn)),
        None => Outcome::Skip(SkipReason::MissingSize),
    }
}

fn extract_elbow(cue: &Cue<'_>, _: &Classifier) -> Outcome {
    let angle = if cue.lower.contains("90") {
        ElbowAngle::Deg90
    } else {
        ElbowAngle::Deg45
    };
    match cue.sizes.first() {
        Some(&dn) => Outcome::Emit(ComponentDescriptor::Elbow { angle, dn }),
        None => Outcome::Skip(SkipReason::MissingSize),
    }
}

fn extract_tee(cue: &Cue<'_>, _: &Classifier) -> Outcome {
    match cue.sizes.as_slice() {
        [] => Outcome::Skip(SkipReason::MissingSize),
        [dn] => Outcome::Emit(ComponentDescriptor::Tee {
            header_dn: *dn,
            branch_dn: *dn,
        }),
        [header, branch, ..] => Outcome::Emit(ComponentDescriptor::Tee {
            header_dn: *header,
            branch_dn: *branch,
        }),
    }
}

fn extract_reducer(cue: &Cue<'_>, _: &Classifier) -> Outcome {
    match cue.sizes.as_slice() {
        [big, small, ..] => Outcome::Emit(ComponentDescriptor::Reducer {
            big_dn: *big,
            small_dn: *small,
        }),
        [] => Outcome::Skip(SkipReason::MissingSize),
        [_] => Outcome::Skip(SkipReason::NeedsTwoSizes),
    }
}

fn extract_collar(cue: &Cue<'_>, classifier: &Classifier) -> Outcome {
    match cue.sizes.first() {
        Some(&dn) if dn < classifier.collar_max_dn => {
            Outcome::Emit(ComponentDescriptor::Collar { dn })
        }
        Some(&dn) => Outcome::Skip(SkipReason::CollarTooLarge(dn)),
        None => Outcome::Skip(SkipReason::MissingSize),
    }
}

/// 2–3 digit sizes on a line, leftmost first
fn sizes(line: &str) -> Vec<Dn> {
    SIZE.find_iter(line)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Stateless line classifier
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    collar_max_dn: Dn,
}

impl Default for Classifier {
    fn default() -> Self {
        Self { collar_max_dn: 250 }
    }
}

impl Classifier {
    /// Create a classifier; collars are only fitted below `collar_max_dn`
    pub fn new(collar_max_dn: Dn) -> Self {
        Self { collar_max_dn }
    }

    /// Classify one document's text
    pub fn classify(&self, text: &str) -> Classification {
        let mut result = Classification::default();
        self.scan_cut_list(text, &mut result);
        self.scan_fittings(text, &mut result);
        result
    }

    /// Straight runs from `<index> length_mm DN` entries
    pub fn cut_list(&self, text: &str) -> Vec<ComponentDescriptor> {
        let mut result = Classification::default();
        self.scan_cut_list(text, &mut result);
        result.components
    }

    fn scan_cut_list(&self, text: &str, result: &mut Classification) {
        for caps in CUT_LIST.captures_iter(text) {
            let length_mm: Option<u32> = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let dn: Option<Dn> = caps.get(2).and_then(|m| m.as_str().parse().ok());
            let entry = caps.get(0).map(|m| m.as_str()).unwrap_or_default();

            match (length_mm, dn) {
                (Some(length_mm), Some(dn)) if length_mm > 0 => {
                    let run = ComponentDescriptor::StraightRun { length_mm, dn };
                    tracing::trace!(%run, "cut list entry");
                    result.components.push(run);
                }
                _ => {
                    tracing::debug!(entry, "skipping cut list entry");
                    result.skipped.push(SkippedLine {
                        line: line_of(text, entry),
                        cue: "cut_list",
                        reason: SkipReason::ZeroLength,
                        text: entry.to_string(),
                    });
                }
            }
        }
    }

    fn scan_fittings(&self, text: &str, result: &mut Classification) {
        for (idx, line) in text.lines().enumerate() {
            let lower = line.to_lowercase();
            let Some(rule) = FITTING_RULES.iter().find(|r| (r.matches)(&lower)) else {
                continue;
            };

            let cue = Cue {
                lower: &lower,
                sizes: sizes(line),
            };
            match (rule.extract)(&cue, self) {
                Outcome::Emit(component) => {
                    tracing::trace!(line = idx + 1, %component, "fitting");
                    result.components.push(component);
                }
                Outcome::Skip(reason) => {
                    tracing::debug!(line = idx + 1, cue = rule.name, %reason, "skipping line");
                    result.skipped.push(SkippedLine {
                        line: idx + 1,
                        cue: rule.name,
                        reason,
                        text: line.trim().to_string(),
                    });
                }
            }
        }
    }
}

/// 1-based line number of the first occurrence of `needle`, 0 if it spans lines
fn line_of(text: &str, needle: &str) -> usize {
    if needle.contains('\n') {
        return 0;
    }
    text.lines()
        .position(|l| l.contains(needle))
        .map_or(0, |i| i + 1)
}
