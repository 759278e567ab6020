//! CSV export of grid-search rankings.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::simulation::{GridEntry, GridSearchResult};

use super::finite_or_none;

/// Write the grid ranking to `path`
///
/// Columns: `rank`, one level column per gene, `yield`, `bottleneck`, `config`.
pub fn write_grid_csv<P: AsRef<Path>>(
    gene_ids: &[String],
    entries: &[GridEntry],
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_grid_csv_to(gene_ids, entries, file)?;
    log::info!("Grid CSV exported: {}", path.display());
    Ok(())
}

/// Write the grid ranking to any writer
pub fn write_grid_csv_to<W: Write>(gene_ids: &[String], entries: &[GridEntry], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["rank".to_string()];
    header.extend(gene_ids.iter().cloned());
    header.extend(["yield", "bottleneck", "config"].map(String::from));
    writer.write_record(&header)?;

    for (i, entry) in entries.iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push((i + 1).to_string());
        record.extend(entry.levels.iter().map(|l| l.to_string()));
        record.push(
            finite_or_none(entry.yield_value)
                .map(|y| y.to_string())
                .unwrap_or_default(),
        );
        record.push(entry.bottleneck_gene.clone());
        record.push(entry.label.clone());
        writer.write_record(&record)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

impl GridSearchResult {
    /// Write the returned rows of this result as CSV
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_grid_csv(&self.gene_ids, &self.results, path)
    }
}
