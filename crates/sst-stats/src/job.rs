//! Batch run over a directory of L4 files.

use std::path::PathBuf;

use netcdf_io::SeriesTable;
use tracing::{debug, info, warn};

use crate::error::SstResult;
use crate::process::SstProcessor;
use crate::walk::{already_processed, find_input_files};

/// Inputs of a `calc-globsst` run.
#[derive(Debug, Clone)]
pub struct SstJob {
    /// Directory searched recursively for `*.nc` files.
    pub root: PathBuf,
    pub output: PathBuf,
    /// Append to `output`, skipping files whose time it already holds.
    pub update: bool,
    /// Directory holding `ESACCI_LSM_<id>.nc` files.
    pub lsm_dir: PathBuf,
}

impl SstJob {
    /// Process the files and write the output table.
    ///
    /// Returns the number of files processed. Nothing is written when that
    /// number is zero.
    pub fn run(&self) -> SstResult<usize> {
        let existing = if self.update {
            self.load_existing()?
        } else {
            None
        };

        let mut processor = SstProcessor::new(&self.lsm_dir);
        let mut combined: Option<SeriesTable> = None;
        let mut processed = 0;

        for path in find_input_files(&self.root)? {
            if let Some(existing) = &existing {
                if already_processed(&path, existing) {
                    debug!(path = %path.display(), "Already in output, skipping");
                    continue;
                }
            }
            info!("{}", path.display());
            let table = processor.process_file(&path)?;
            match combined.as_mut() {
                Some(all) => all.append(table),
                None => combined = Some(table),
            }
            processed += 1;
        }

        let Some(new_rows) = combined else {
            info!("No files found");
            return Ok(0);
        };

        let output = match existing {
            Some(mut existing) => {
                existing.append(new_rows);
                existing
            }
            None => new_rows,
        };
        output.write(&self.output)?;
        info!(output = %self.output.display(), files = processed, steps = output.len(), "Wrote mean SST");
        Ok(processed)
    }

    fn load_existing(&self) -> SstResult<Option<SeriesTable>> {
        if !self.output.exists() {
            warn!(output = %self.output.display(), "Update requested but output does not exist; starting fresh");
            return Ok(None);
        }
        Ok(Some(SeriesTable::read(&self.output)?))
    }
}
