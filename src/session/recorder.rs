use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Append-only per-run step log
///
/// One CSV file per run at `<storage_root>/raw_data/<run_name>.csv`, holding
/// a header, an initial `0,0` line, and one `<step_n>,<points>` line per
/// apple. A run with the same name overwrites any prior file. The file is
/// never reused across runs.
pub struct RunRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl RunRecorder {
    /// Create the log for a new run, truncating any prior file of the same
    /// name, and write the header and the initial `0,0` record
    pub fn create(storage_root: &Path, run_name: &str) -> Result<Self> {
        let dir = storage_root.join("raw_data");
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {:?}", dir))?;

        let path = dir.join(format!("{run_name}.csv"));
        let file =
            File::create(&path).with_context(|| format!("Failed to create log file {:?}", path))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "step_n,points")
            .with_context(|| format!("Failed to write log header to {:?}", path))?;
        writeln!(writer, "0,0")
            .with_context(|| format!("Failed to write initial record to {:?}", path))?;

        Ok(Self { writer, path })
    }

    /// Append one `(step_n, points)` record
    pub fn record(&mut self, step_n: u32, points: u32) -> Result<()> {
        writeln!(self.writer, "{step_n},{points}")
            .with_context(|| format!("Failed to append record to {:?}", self.path))
    }

    /// Flush and close the log at the end of the run
    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush log file {:?}", self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
