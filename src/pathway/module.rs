//! Epigenetic control modules.
//!
//! A module pairs a dose-response shape (activator, repressor, binary switch
//! or no-op) with its Hill parameters. Modules are read once from the module
//! table and never change afterwards.

use serde::Serialize;

/// Response shape of a control module, with the parameters only that shape uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModuleKind {
    /// Raises expression towards `a_max` (CRISPRa, VPR)
    Activator { a_max: f64 },
    /// Lowers expression towards `min_fold` (CRISPRi, KRAB)
    Repressor { min_fold: f64 },
    /// ON above half level, OFF below (methylation lock)
    Binary,
    /// No effect on expression
    Neutral,
}

impl ModuleKind {
    /// Default activator ceiling when the table leaves `A_max` blank
    pub const DEFAULT_A_MAX: f64 = 3.0;
    /// Default repressor floor when the table leaves `min_fold` blank
    pub const DEFAULT_MIN_FOLD: f64 = 0.2;

    /// Build a kind from the module table's `type` column.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognised types become `Neutral` rather than failing.
    pub fn from_type(type_name: &str, a_max: Option<f64>, min_fold: Option<f64>) -> Self {
        match type_name.trim().to_ascii_lowercase().as_str() {
            "activator" => ModuleKind::Activator {
                a_max: a_max.unwrap_or(Self::DEFAULT_A_MAX),
            },
            "repressor" => ModuleKind::Repressor {
                min_fold: min_fold.unwrap_or(Self::DEFAULT_MIN_FOLD),
            },
            "binary" => ModuleKind::Binary,
            "neutral" | "other" | "" => ModuleKind::Neutral,
            other => {
                log::warn!("Unknown module type {:?}, treating as neutral", other);
                ModuleKind::Neutral
            }
        }
    }

    /// Short lowercase name, as written in the module table
    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Activator { .. } => "activator",
            ModuleKind::Repressor { .. } => "repressor",
            ModuleKind::Binary => "binary",
            ModuleKind::Neutral => "neutral",
        }
    }
}

/// An epigenetic control module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    /// Module identifier (e.g. "CRISPRa_Ec")
    pub id: String,
    /// Response shape and shape-specific parameters
    pub kind: ModuleKind,
    /// Half-maximal level; must be positive
    pub ec50: f64,
    /// Hill coefficient
    pub hill_n: f64,
    /// Additive basal expression for repressor and binary modules
    pub leak: f64,
}

impl Module {
    /// Create a module
    pub fn new(id: impl Into<String>, kind: ModuleKind, ec50: f64, hill_n: f64, leak: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            ec50,
            hill_n,
            leak,
        }
    }

    /// Activator with no leak
    pub fn activator(id: impl Into<String>, ec50: f64, hill_n: f64, a_max: f64) -> Self {
        Self::new(id, ModuleKind::Activator { a_max }, ec50, hill_n, 0.0)
    }

    /// Repressor with the given residual floor and leak
    pub fn repressor(id: impl Into<String>, ec50: f64, hill_n: f64, min_fold: f64, leak: f64) -> Self {
        Self::new(id, ModuleKind::Repressor { min_fold }, ec50, hill_n, leak)
    }

    /// Binary switch with the given leak
    pub fn binary(id: impl Into<String>, leak: f64) -> Self {
        Self::new(id, ModuleKind::Binary, 0.5, 1.0, leak)
    }

    /// Module with no effect
    pub fn neutral(id: impl Into<String>) -> Self {
        Self::new(id, ModuleKind::Neutral, 0.5, 1.0, 0.0)
    }
}
