//! Tabular loaders for the pathway and module tables.
//!
//! Pathway table (tab-separated): `gene, step_order, baseline_k, burden_w`.
//! Module table (comma-separated): `module, type, EC50, h, leak` plus the
//! optional `A_max` and `min_fold` columns.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{Gene, Module, ModuleKind};
use crate::error::{Error, Result};

/// File name of the pathway table inside a data directory
pub const PATHWAY_FILE: &str = "violacein_pathway.tsv";
/// File name of the module table inside a data directory
pub const MODULES_FILE: &str = "epigenetic_modules.csv";

const PATHWAY_COLUMNS: [&str; 4] = ["gene", "step_order", "baseline_k", "burden_w"];
const MODULE_COLUMNS: [&str; 5] = ["module", "type", "EC50", "h", "leak"];

const DEFAULT_EC50: f64 = 0.5;
const DEFAULT_HILL_N: f64 = 2.0;
const DEFAULT_LEAK: f64 = 0.0;

#[derive(Debug, Deserialize)]
struct PathwayRow {
    gene: String,
    step_order: f64,
    baseline_k: f64,
    burden_w: f64,
}

#[derive(Debug, Deserialize)]
struct ModuleRow {
    module: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "EC50", deserialize_with = "csv::invalid_option")]
    ec50: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    h: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    leak: Option<f64>,
    #[serde(rename = "A_max", default, deserialize_with = "csv::invalid_option")]
    a_max: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    min_fold: Option<f64>,
}

/// Load the pathway table, ordered by `step_order`
pub fn load_pathway<P: AsRef<Path>>(path: P) -> Result<Vec<Gene>> {
    let path = path.as_ref();
    let genes = read_pathway(open(path)?, path)?;
    log::info!("Loaded {} genes from {:?}", genes.len(), path);
    Ok(genes)
}

/// Load the module table, in file order
pub fn load_modules<P: AsRef<Path>>(path: P) -> Result<Vec<Module>> {
    let path = path.as_ref();
    let modules = read_modules(open(path)?, path)?;
    log::info!("Loaded {} modules from {:?}", modules.len(), path);
    Ok(modules)
}

/// Parse a tab-separated pathway table; `origin` is used in error messages
pub fn read_pathway<R: Read>(input: R, origin: &Path) -> Result<Vec<Gene>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_reader(input);
    check_columns(&mut reader, origin, &PATHWAY_COLUMNS)?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: PathwayRow = record?;
        if !(row.baseline_k.is_finite() && row.baseline_k > 0.0) {
            return Err(invalid(origin, format!("baseline_k for {} must be positive", row.gene)));
        }
        if !(row.burden_w.is_finite() && row.burden_w >= 0.0) {
            return Err(invalid(origin, format!("burden_w for {} must be non-negative", row.gene)));
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(invalid(origin, "pathway table has no genes".to_string()));
    }

    // Stable: equal step orders keep file order
    rows.sort_by(|a, b| a.step_order.total_cmp(&b.step_order));

    let mut seen = HashSet::new();
    let mut genes = Vec::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.gene.clone()) {
            return Err(invalid(origin, format!("duplicate gene {}", row.gene)));
        }
        genes.push(Gene::new(row.gene, row.baseline_k, row.burden_w));
    }
    Ok(genes)
}

/// Parse a comma-separated module table; `origin` is used in error messages
///
/// Blank or non-numeric parameter cells fall back to defaults
/// (EC50 0.5, h 2.0, leak 0.0, A_max 3.0, min_fold 0.2). A Hill coefficient
/// of zero or below also takes the default h; explicit zeros elsewhere are
/// kept. EC50 of zero or below is rejected.
pub fn read_modules<R: Read>(input: R, origin: &Path) -> Result<Vec<Module>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    check_columns(&mut reader, origin, &MODULE_COLUMNS)?;

    let mut seen = HashSet::new();
    let mut modules = Vec::new();
    for record in reader.deserialize() {
        let row: ModuleRow = record?;
        if !seen.insert(row.module.clone()) {
            return Err(invalid(origin, format!("duplicate module {}", row.module)));
        }

        let ec50 = finite(row.ec50).unwrap_or(DEFAULT_EC50);
        if ec50 <= 0.0 {
            return Err(invalid(origin, format!("EC50 for {} must be positive", row.module)));
        }
        let kind = ModuleKind::from_type(&row.kind, finite(row.a_max), finite(row.min_fold));
        modules.push(Module::new(
            row.module,
            kind,
            ec50,
            finite(row.h).filter(|&h| h > 0.0).unwrap_or(DEFAULT_HILL_N),
            finite(row.leak).unwrap_or(DEFAULT_LEAK),
        ));
    }
    if modules.is_empty() {
        return Err(invalid(origin, "module table has no modules".to_string()));
    }
    Ok(modules)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_columns<R: Read>(reader: &mut csv::Reader<R>, origin: &Path, required: &[&str]) -> Result<()> {
    let headers = reader.headers()?;
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns {
            path: origin.to_path_buf(),
            columns: missing,
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn invalid(origin: &Path, message: String) -> Error {
    Error::InvalidData {
        path: origin.to_path_buf(),
        message,
    }
}
