//! Estimator configuration with layered hierarchy
//!
//! Layers are applied in priority order:
//! 1. Built-in defaults
//! 2. Global user config (`~/.config/mto/config.yaml`)
//! 3. Project config (`./mto.yaml`)
//! 4. Explicit `--config` file
//! 5. Environment (`MTO_THICKNESS`)
//!
//! The CLI applies `--thickness` on top and then calls [`Config::validate`].

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::dimensions::DimensionTable;
use crate::entities::{ComponentKind, Dn};

pub const DEFAULT_THICKNESS_MM: u32 = 20;
pub const MIN_THICKNESS_MM: u32 = 5;
pub const MAX_THICKNESS_MM: u32 = 300;

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "mto.yaml";

/// Environment variable overriding the insulation thickness
pub const THICKNESS_ENV: &str = "MTO_THICKNESS";

/// Unit rates (currency per unit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    /// Cladding, per m²
    pub shield: f64,
    /// Sealant, per tube
    pub seal: f64,
    /// Bonding agent, per tin
    pub bond: f64,
    /// Clamp cover, each
    pub clamp: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            shield: 36.74,
            seal: 12.50,
            bond: 9.50,
            clamp: 24.00,
        }
    }
}

/// Which component kinds contribute to bond length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondPolicy {
    pub straight: bool,
    pub elbow: bool,
    pub tee: bool,
    pub reducer: bool,
    pub end_cap: bool,
    pub collar: bool,
    /// When enabled a clamp cover bonds one circumference
    pub clamp_cover: bool,
}

impl Default for BondPolicy {
    fn default() -> Self {
        Self {
            straight: true,
            elbow: true,
            tee: true,
            reducer: true,
            end_cap: true,
            collar: true,
            clamp_cover: false,
        }
    }
}

impl BondPolicy {
    pub fn includes(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Straight => self.straight,
            ComponentKind::Elbow => self.elbow,
            ComponentKind::Tee => self.tee,
            ComponentKind::Reducer => self.reducer,
            ComponentKind::EndCap => self.end_cap,
            ComponentKind::Collar => self.collar,
            ComponentKind::ClampCover => self.clamp_cover,
        }
    }
}

/// Estimator configuration
///
/// Loaded once per run and injected into the engine; nothing in the engine
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Insulation thickness (mm)
    pub thickness_mm: u32,

    /// Lowest accepted insulation thickness (mm)
    pub min_thickness_mm: u32,

    /// Highest accepted insulation thickness (mm)
    pub max_thickness_mm: u32,

    /// Longitudinal lap allowance per straight run (m)
    pub lap_m: f64,

    /// Bead length one sealant tube covers (m)
    pub tube_cover_m: f64,

    /// Width of the bonding agent strip (m)
    pub bond_strip_width_m: f64,

    /// Bonding area per tin (m²)
    pub tins_divisor: f64,

    /// Weldolet/threadolet sizes at or above this DN get no collar
    pub collar_max_dn: Dn,

    /// Unit rates
    pub rates: Rates,

    /// Bond length contribution per component kind
    pub bond_policy: BondPolicy,

    /// Extra or overriding DN → OD (mm) entries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<Dn, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thickness_mm: DEFAULT_THICKNESS_MM,
            min_thickness_mm: MIN_THICKNESS_MM,
            max_thickness_mm: MAX_THICKNESS_MM,
            lap_m: 0.05,
            tube_cover_m: 6.0,
            bond_strip_width_m: 0.10,
            tins_divisor: 2.0,
            collar_max_dn: 250,
            rates: Rates::default(),
            bond_policy: BondPolicy::default(),
            dimensions: BTreeMap::new(),
        }
    }
}

/// A partial configuration as found in one config file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub thickness_mm: Option<u32>,
    pub min_thickness_mm: Option<u32>,
    pub max_thickness_mm: Option<u32>,
    pub lap_m: Option<f64>,
    pub tube_cover_m: Option<f64>,
    pub bond_strip_width_m: Option<f64>,
    pub tins_divisor: Option<f64>,
    pub collar_max_dn: Option<Dn>,
    pub rates: Option<RatesLayer>,
    pub bond_policy: Option<BondPolicyLayer>,
    pub dimensions: BTreeMap<Dn, f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RatesLayer {
    pub shield: Option<f64>,
    pub seal: Option<f64>,
    pub bond: Option<f64>,
    pub clamp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BondPolicyLayer {
    pub straight: Option<bool>,
    pub elbow: Option<bool>,
    pub tee: Option<bool>,
    pub reducer: Option<bool>,
    pub end_cap: Option<bool>,
    pub collar: Option<bool>,
    pub clamp_cover: Option<bool>,
}

impl ConfigLayer {
    /// Parse a config layer from YAML text
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }
}

/// Valid configuration keys
pub const VALID_KEYS: &[(&str, &str)] = &[
    ("thickness_mm", "Insulation thickness in mm"),
    ("min_thickness_mm", "Lowest accepted thickness in mm (not below 5)"),
    ("max_thickness_mm", "Highest accepted thickness in mm (not above 300)"),
    ("lap_m", "Longitudinal lap allowance per straight run (m)"),
    ("tube_cover_m", "Bead length covered by one sealant tube (m)"),
    ("bond_strip_width_m", "Bonding agent strip width (m)"),
    ("tins_divisor", "Bonding area per tin (m²)"),
    ("collar_max_dn", "Branch DN at or above which no collar is fitted"),
    ("rates.shield", "Cladding rate per m²"),
    ("rates.seal", "Sealant rate per tube"),
    ("rates.bond", "Bonding agent rate per tin"),
    ("rates.clamp", "Rate per clamp cover"),
    ("bond_policy.<kind>", "Whether a component kind adds to bond length"),
    ("dimensions.<dn>", "Outer diameter override in mm for a DN"),
];

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// Global and project files are optional and skipped with a warning when
    /// they cannot be read. An explicit file must exist and parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            config.apply_optional(&global_path);
        }

        config.apply_optional(&Self::project_config_path());

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            config.apply(ConfigLayer::read(path)?);
        }

        if let Ok(value) = std::env::var(THICKNESS_ENV) {
            config.thickness_mm = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: THICKNESS_ENV,
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mto")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Path to the project config file in the working directory
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    fn apply_optional(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match ConfigLayer::read(path) {
            Ok(layer) => {
                tracing::debug!(path = %path.display(), "applied config layer");
                self.apply(layer);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config file"),
        }
    }

    /// Merge a layer into this config (layer values take precedence)
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(v) = layer.thickness_mm {
            self.thickness_mm = v;
        }
        if let Some(v) = layer.min_thickness_mm {
            self.min_thickness_mm = v;
        }
        if let Some(v) = layer.max_thickness_mm {
            self.max_thickness_mm = v;
        }
        if let Some(v) = layer.lap_m {
            self.lap_m = v;
        }
        if let Some(v) = layer.tube_cover_m {
            self.tube_cover_m = v;
        }
        if let Some(v) = layer.bond_strip_width_m {
            self.bond_strip_width_m = v;
        }
        if let Some(v) = layer.tins_divisor {
            self.tins_divisor = v;
        }
        if let Some(v) = layer.collar_max_dn {
            self.collar_max_dn = v;
        }
        if let Some(rates) = layer.rates {
            if let Some(v) = rates.shield {
                self.rates.shield = v;
            }
            if let Some(v) = rates.seal {
                self.rates.seal = v;
            }
            if let Some(v) = rates.bond {
                self.rates.bond = v;
            }
            if let Some(v) = rates.clamp {
                self.rates.clamp = v;
            }
        }
        if let Some(policy) = layer.bond_policy {
            let p = &mut self.bond_policy;
            p.straight = policy.straight.unwrap_or(p.straight);
            p.elbow = policy.elbow.unwrap_or(p.elbow);
            p.tee = policy.tee.unwrap_or(p.tee);
            p.reducer = policy.reducer.unwrap_or(p.reducer);
            p.end_cap = policy.end_cap.unwrap_or(p.end_cap);
            p.collar = policy.collar.unwrap_or(p.collar);
            p.clamp_cover = policy.clamp_cover.unwrap_or(p.clamp_cover);
        }
        self.dimensions.extend(layer.dimensions);
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        // configurable bounds may only narrow the accepted range
        if self.min_thickness_mm < MIN_THICKNESS_MM {
            return Err(ConfigError::InvalidValue {
                key: "min_thickness_mm",
                reason: format!(
                    "{} is below the lowest supported thickness {}",
                    self.min_thickness_mm, MIN_THICKNESS_MM
                ),
            });
        }
        if self.max_thickness_mm > MAX_THICKNESS_MM {
            return Err(ConfigError::InvalidValue {
                key: "max_thickness_mm",
                reason: format!(
                    "{} is above the highest supported thickness {}",
                    self.max_thickness_mm, MAX_THICKNESS_MM
                ),
            });
        }
        if self.min_thickness_mm > self.max_thickness_mm {
            return Err(ConfigError::InvalidValue {
                key: "min_thickness_mm",
                reason: format!(
                    "{} is greater than max_thickness_mm {}",
                    self.min_thickness_mm, self.max_thickness_mm
                ),
            });
        }
        if self.thickness_mm < self.min_thickness_mm || self.thickness_mm > self.max_thickness_mm {
            return Err(ConfigError::ThicknessOutOfRange {
                value: self.thickness_mm,
                min: self.min_thickness_mm,
                max: self.max_thickness_mm,
            });
        }

        positive("tube_cover_m", self.tube_cover_m)?;
        positive("tins_divisor", self.tins_divisor)?;
        non_negative("lap_m", self.lap_m)?;
        non_negative("bond_strip_width_m", self.bond_strip_width_m)?;
        non_negative("rates.shield", self.rates.shield)?;
        non_negative("rates.seal", self.rates.seal)?;
        non_negative("rates.bond", self.rates.bond)?;
        non_negative("rates.clamp", self.rates.clamp)?;

        if let Some((dn, od)) = self.dimensions.iter().find(|(_, od)| !(**od > 0.0)) {
            return Err(ConfigError::InvalidValue {
                key: "dimensions",
                reason: format!("outer diameter for DN{} must be positive, got {}", dn, od),
            });
        }

        Ok(())
    }

    /// Standard dimension table with this config's overrides applied
    pub fn dimension_table(&self) -> DimensionTable {
        DimensionTable::standard().with_overrides(&self.dimensions)
    }

    /// Look up a single value by dotted key (e.g. `rates.seal`)
    pub fn get_value(&self, key: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        match value.pointer(&pointer)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("must be greater than zero, got {}", value),
        })
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("must not be negative, got {}", value),
        })
    }
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("insulation thickness {value} mm is outside the valid range {min}-{max} mm")]
    #[diagnostic(
        code(mto::config::thickness),
        help("pass --thickness with a value inside the range, or set thickness_mm in mto.yaml")
    )]
    ThicknessOutOfRange { value: u32, min: u32, max: u32 },

    #[error("invalid value for `{key}`: {reason}")]
    #[diagnostic(code(mto::config::invalid_value))]
    InvalidValue { key: &'static str, reason: String },

    #[error("{var} must be a whole number of millimetres, got {value:?}")]
    #[diagnostic(code(mto::config::env))]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to read config file {path:?}")]
    #[diagnostic(code(mto::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {message}")]
    #[diagnostic(code(mto::config::parse), help("config files are YAML; see `mto config keys`"))]
    Parse { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.thickness_mm, 20);
        assert_eq!(config.tube_cover_m, 6.0);
        assert_eq!(config.collar_max_dn, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_thickness_bounds() {
        let mut config = Config::default();
        config.thickness_mm = 5;
        assert!(config.validate().is_ok());
        config.thickness_mm = 300;
        assert!(config.validate().is_ok());

        config.thickness_mm = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThicknessOutOfRange { value: 4, min: 5, max: 300 })
        ));
        config.thickness_mm = 301;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThicknessOutOfRange { value: 301, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let config = Config {
            tins_divisor: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "tins_divisor", .. }));
    }

    #[test]
    fn test_rejects_nan_cover() {
        let config = Config {
            tube_cover_m: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bounds_cannot_widen_supported_range() {
        let config = Config {
            thickness_mm: 500,
            max_thickness_mm: 1000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key: "max_thickness_mm", .. })
        ));

        let config = Config {
            thickness_mm: 2,
            min_thickness_mm: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key: "min_thickness_mm", .. })
        ));

        let config = Config {
            thickness_mm: 50,
            min_thickness_mm: 25,
            max_thickness_mm: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = Config {
            min_thickness_mm: 50,
            max_thickness_mm: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key: "min_thickness_mm", .. })
        ));
    }

    #[test]
    fn test_layer_overrides_only_present_keys() {
        let yaml = r#"
thickness_mm: 40
tins_divisor: 1.0
rates:
  seal: 15.0
bond_policy:
  reducer: false
dimensions:
  700: 711.0
"#;
        let layer = ConfigLayer::parse(yaml, Path::new("mto.yaml")).unwrap();
        let mut config = Config::default();
        config.apply(layer);

        assert_eq!(config.thickness_mm, 40);
        assert_eq!(config.tins_divisor, 1.0);
        assert_eq!(config.rates.seal, 15.0);
        assert_eq!(config.rates.shield, 36.74);
        assert!(!config.bond_policy.reducer);
        assert!(config.bond_policy.tee);
        assert_eq!(config.dimensions.get(&700), Some(&711.0));
        assert_eq!(config.lap_m, 0.05);
    }

    #[test]
    fn test_empty_layer_is_noop() {
        let layer = ConfigLayer::parse("  \n", Path::new("mto.yaml")).unwrap();
        let mut config = Config::default();
        config.apply(layer);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = ConfigLayer::parse("thickness_mm: [oops", Path::new("bad.yaml")).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, PathBuf::from("bad.yaml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = ConfigLayer::read(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "collar_max_dn: 200\n").unwrap();
        let layer = ConfigLayer::read(&path).unwrap();
        assert_eq!(layer.collar_max_dn, Some(200));
    }

    #[test]
    fn test_get_value() {
        let config = Config::default();
        assert_eq!(config.get_value("thickness_mm").as_deref(), Some("20"));
        assert_eq!(config.get_value("rates.seal").as_deref(), Some("12.5"));
        assert_eq!(config.get_value("bond_policy.clamp_cover").as_deref(), Some("false"));
        assert!(config.get_value("nope").is_none());
    }

    #[test]
    fn test_bond_policy_includes() {
        let policy = BondPolicy::default();
        assert!(policy.includes(ComponentKind::Reducer));
        assert!(!policy.includes(ComponentKind::ClampCover));
    }
}
