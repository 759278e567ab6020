//! Exhaustive search over discretized control levels.
//!
//! Every gene gets the same module and one of a few representative levels
//! (OFF/MED/ON by default). All `L^N` combinations are evaluated in parallel
//! with rayon, collected in enumeration order, and stably ranked by yield so
//! ties keep their enumeration order.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{GridParameters, SimulationParameters};
use crate::error::{Error, Result};
use crate::pathway::{Module, PathwayModel};

use super::dose_response::fold_change;
use super::evaluator::YieldEvaluator;

/// One evaluated combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridEntry {
    /// Level per gene, pathway order
    pub levels: Vec<f64>,
    /// Resulting yield
    #[serde(rename = "yield")]
    pub yield_value: f64,
    /// Hard-minimum gene
    pub bottleneck_gene: String,
    /// Compact description, e.g. "VioA:0.05 VioB:0.50 ..."
    pub label: String,
}

/// Ranked grid search output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSearchResult {
    /// Module applied to every gene
    pub module_id: String,
    /// Gene order of each entry's `levels`
    pub gene_ids: Vec<String>,
    /// Best combinations, yield descending
    pub results: Vec<GridEntry>,
    /// Number of combinations evaluated
    pub total_combinations: usize,
}

/// Grid search over a model with one module for every gene
pub struct GridSearch<'a> {
    evaluator: YieldEvaluator<'a>,
    module: &'a Module,
    levels: &'a [f64],
}

impl<'a> GridSearch<'a> {
    /// Set up a search, picking the grid module.
    ///
    /// Uses `grid.module_id` when it names a loaded module, otherwise the
    /// first module in the table.
    pub fn new(
        model: &'a PathwayModel,
        simulation: &'a SimulationParameters,
        grid: &'a GridParameters,
    ) -> Result<Self> {
        if grid.levels.is_empty() {
            return Err(Error::InvalidParameter("grid levels must not be empty".into()));
        }
        let module = match grid.module_id.as_deref().map(|id| model.module(id)) {
            Some(Ok(module)) => module,
            Some(Err(_)) | None => {
                let fallback = &model.modules()[0];
                if let Some(id) = &grid.module_id {
                    log::warn!("Grid module {} not loaded, using {}", id, fallback.id);
                }
                fallback
            }
        };
        Ok(Self {
            evaluator: YieldEvaluator::new(model, simulation),
            module,
            levels: &grid.levels,
        })
    }

    /// Module applied to every gene
    pub fn module(&self) -> &'a Module {
        self.module
    }

    /// Number of combinations, `L^N`
    pub fn total_combinations(&self) -> Result<usize> {
        let n_genes = self.evaluator.model().gene_count();
        u32::try_from(n_genes)
            .ok()
            .and_then(|n| self.levels.len().checked_pow(n))
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "{} levels over {} genes overflows the grid",
                    self.levels.len(),
                    n_genes
                ))
            })
    }

    /// Evaluate every combination and return all of them ranked
    pub fn run_all(&self) -> Result<Vec<GridEntry>> {
        let total = self.total_combinations()?;
        let model = self.evaluator.model();
        let gene_ids: Vec<&str> = model.gene_ids().collect();
        let baseline: Vec<f64> = model.genes().iter().map(|g| g.baseline_k).collect();
        // Same module everywhere, so each level has one fold-change
        let folds: Vec<f64> = self.levels.iter().map(|&l| fold_change(self.module, l)).collect();

        let mut entries: Vec<GridEntry> = (0..total)
            .into_par_iter()
            .map(|index| {
                let digits = combination_digits(index, self.levels.len(), baseline.len());
                let activities: Vec<f64> = digits
                    .iter()
                    .zip(&baseline)
                    .map(|(&d, k)| k * folds[d])
                    .collect();
                let levels: Vec<f64> = digits.iter().map(|&d| self.levels[d]).collect();
                let eval = self.evaluator.evaluate(&activities);

                GridEntry {
                    label: label(&gene_ids, &levels),
                    levels,
                    yield_value: eval.yield_value,
                    bottleneck_gene: gene_ids[eval.bottleneck].to_string(),
                }
            })
            .collect();

        rank(&mut entries);
        Ok(entries)
    }

    /// Evaluate every combination and keep the best `top_k`
    pub fn run(&self, top_k: usize) -> Result<GridSearchResult> {
        let mut results = self.run_all()?;
        let total_combinations = results.len();
        results.truncate(top_k);

        log::info!(
            "Grid search with {}: {} combinations, best yield {:.4}",
            self.module.id,
            total_combinations,
            results.first().map_or(0.0, |e| e.yield_value)
        );

        Ok(GridSearchResult {
            module_id: self.module.id.clone(),
            gene_ids: self.evaluator.model().gene_ids().map(str::to_string).collect(),
            results,
            total_combinations,
        })
    }
}

/// Level index per gene for combination `index`
///
/// The first gene varies slowest, matching nested loops with gene 0 outermost.
pub fn combination_digits(mut index: usize, n_levels: usize, n_genes: usize) -> Vec<usize> {
    let mut digits = vec![0; n_genes];
    for digit in digits.iter_mut().rev() {
        *digit = index % n_levels;
        index /= n_levels;
    }
    digits
}

/// Stable sort by yield, descending
pub fn rank(entries: &mut [GridEntry]) {
    entries.sort_by(|a, b| b.yield_value.total_cmp(&a.yield_value));
}

fn label(gene_ids: &[&str], levels: &[f64]) -> String {
    gene_ids
        .iter()
        .zip(levels)
        .map(|(g, l)| format!("{}:{:.2}", g, l))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combination_digits_order() {
        assert_eq!(combination_digits(0, 3, 3), vec![0, 0, 0]);
        assert_eq!(combination_digits(1, 3, 3), vec![0, 0, 1]);
        assert_eq!(combination_digits(3, 3, 3), vec![0, 1, 0]);
        assert_eq!(combination_digits(26, 3, 3), vec![2, 2, 2]);
    }

    #[test]
    fn test_rank_is_stable() {
        let entry = |y: f64, label: &str| GridEntry {
            levels: Vec::new(),
            yield_value: y,
            bottleneck_gene: String::new(),
            label: label.to_string(),
        };
        let mut entries = vec![entry(0.5, "a"), entry(0.9, "b"), entry(0.5, "c"), entry(0.9, "d")];
        rank(&mut entries);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_label() {
        assert_eq!(label(&["VioA", "VioB"], &[0.05, 1.0]), "VioA:0.05 VioB:1.00");
    }
}
