//! Component descriptors - typed piping components recognised in drawing text

use serde::{Deserialize, Serialize};

/// Nominal pipe diameter (DN), a standardized size class in millimetres
pub type Dn = u32;

/// Component kind, used to group quantity records for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Straight,
    Elbow,
    Tee,
    Reducer,
    EndCap,
    Collar,
    ClampCover,
}

impl ComponentKind {
    /// All kinds in report order
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Straight,
        ComponentKind::Elbow,
        ComponentKind::Tee,
        ComponentKind::Reducer,
        ComponentKind::EndCap,
        ComponentKind::Collar,
        ComponentKind::ClampCover,
    ];

    /// Human readable group heading (plural)
    pub fn heading(&self) -> &'static str {
        match self {
            ComponentKind::Straight => "Straights",
            ComponentKind::Elbow => "Elbows",
            ComponentKind::Tee => "Tees",
            ComponentKind::Reducer => "Reducers",
            ComponentKind::EndCap => "End Caps",
            ComponentKind::Collar => "Collars",
            ComponentKind::ClampCover => "Clamp Covers",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Straight => write!(f, "straight"),
            ComponentKind::Elbow => write!(f, "elbow"),
            ComponentKind::Tee => write!(f, "tee"),
            ComponentKind::Reducer => write!(f, "reducer"),
            ComponentKind::EndCap => write!(f, "end_cap"),
            ComponentKind::Collar => write!(f, "collar"),
            ComponentKind::ClampCover => write!(f, "clamp_cover"),
        }
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "straight" => Ok(ComponentKind::Straight),
            "elbow" => Ok(ComponentKind::Elbow),
            "tee" => Ok(ComponentKind::Tee),
            "reducer" => Ok(ComponentKind::Reducer),
            "end_cap" => Ok(ComponentKind::EndCap),
            "collar" => Ok(ComponentKind::Collar),
            "clamp_cover" => Ok(ComponentKind::ClampCover),
            _ => Err(format!(
                "Invalid component kind: {}. Use straight, elbow, tee, reducer, end_cap, collar or clamp_cover",
                s
            )),
        }
    }
}

/// Elbow bend angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElbowAngle {
    #[serde(rename = "45")]
    Deg45,
    #[serde(rename = "90")]
    Deg90,
}

impl ElbowAngle {
    pub fn degrees(&self) -> u32 {
        match self {
            ElbowAngle::Deg45 => 45,
            ElbowAngle::Deg90 => 90,
        }
    }
}

impl std::fmt::Display for ElbowAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A piping component recognised in a document's text
///
/// Descriptors carry only the dimensions read from the text; all derived
/// geometry is computed later by the quantity calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentDescriptor {
    /// Cut-list pipe run
    StraightRun { length_mm: u32, dn: Dn },

    /// 45° or 90° elbow
    Elbow { angle: ElbowAngle, dn: Dn },

    /// Tee; equal when both sizes match
    Tee { header_dn: Dn, branch_dn: Dn },

    /// Concentric or eccentric reducer
    Reducer { big_dn: Dn, small_dn: Dn },

    /// Insulation end cap at a flange or valve
    EndCap { dn: Dn },

    /// Collar around a small branch connection (weldolet/threadolet)
    Collar { dn: Dn },

    /// Removable cover over a pipe clamp
    ClampCover { dn: Dn },
}

impl ComponentDescriptor {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentDescriptor::StraightRun { .. } => ComponentKind::Straight,
            ComponentDescriptor::Elbow { .. } => ComponentKind::Elbow,
            ComponentDescriptor::Tee { .. } => ComponentKind::Tee,
            ComponentDescriptor::Reducer { .. } => ComponentKind::Reducer,
            ComponentDescriptor::EndCap { .. } => ComponentKind::EndCap,
            ComponentDescriptor::Collar { .. } => ComponentKind::Collar,
            ComponentDescriptor::ClampCover { .. } => ComponentKind::ClampCover,
        }
    }

    /// The main size of the component (header for tees, large end for reducers)
    pub fn primary_dn(&self) -> Dn {
        match *self {
            ComponentDescriptor::StraightRun { dn, .. }
            | ComponentDescriptor::Elbow { dn, .. }
            | ComponentDescriptor::EndCap { dn }
            | ComponentDescriptor::Collar { dn }
            | ComponentDescriptor::ClampCover { dn } => dn,
            ComponentDescriptor::Tee { header_dn, .. } => header_dn,
            ComponentDescriptor::Reducer { big_dn, .. } => big_dn,
        }
    }

    /// The second size, for tees (branch) and reducers (small end)
    pub fn secondary_dn(&self) -> Option<Dn> {
        match *self {
            ComponentDescriptor::Tee { branch_dn, .. } => Some(branch_dn),
            ComponentDescriptor::Reducer { small_dn, .. } => Some(small_dn),
            _ => None,
        }
    }

    /// True for a tee whose header and branch sizes match
    pub fn is_equal_tee(&self) -> bool {
        matches!(self, ComponentDescriptor::Tee { header_dn, branch_dn } if header_dn == branch_dn)
    }
}

impl std::fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentDescriptor::StraightRun { length_mm, dn } => {
                write!(f, "straight DN{} {} mm", dn, length_mm)
            }
            ComponentDescriptor::Elbow { angle, dn } => write!(f, "elbow {} DN{}", angle, dn),
            ComponentDescriptor::Tee {
                header_dn,
                branch_dn,
            } => {
                if header_dn == branch_dn {
                    write!(f, "equal tee DN{}", header_dn)
                } else {
                    write!(f, "unequal tee DN{}x{}", header_dn, branch_dn)
                }
            }
            ComponentDescriptor::Reducer { big_dn, small_dn } => {
                write!(f, "reducer DN{}x{}", big_dn, small_dn)
            }
            ComponentDescriptor::EndCap { dn } => write!(f, "end cap DN{}", dn),
            ComponentDescriptor::Collar { dn } => write!(f, "collar DN{}", dn),
            ComponentDescriptor::ClampCover { dn } => write!(f, "clamp cover DN{}", dn),
        }
    }
}
