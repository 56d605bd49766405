use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use csv::WriterBuilder;
use radsweep_core::{ErrorInfo, ExportArtifact, FlatRow, RadError};
use tempfile::NamedTempFile;
use tracing::info;

// Process-wide export sequence; the counter alone guarantees two exports
// never collide even within one clock tick.
static EXPORT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Writes flattened sweep rows to uniquely named CSV artifacts.
///
/// Artifacts are written to a temporary file in the export directory and
/// atomically persisted, so a failed export leaves nothing at the target
/// path. Artifacts are retained indefinitely; there is no cleanup.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter rooted at the given directory.
    ///
    /// The directory is created on first export if absent.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Serializes the rows to a new CSV artifact and returns its identity.
    ///
    /// The header line is always written, so an empty row set still
    /// produces a valid artifact.
    pub fn export(&self, rows: &[FlatRow]) -> Result<ExportArtifact, RadError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            RadError::Export(
                ErrorInfo::new("export-dir", "failed to create export directory")
                    .with_context("path", self.dir.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        let target = self.dir.join(next_artifact_name());
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|err| {
            RadError::Export(
                ErrorInfo::new("export-tmp", "failed to open temporary export file")
                    .with_context("dir", self.dir.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(tmp.as_file_mut()));
            writer
                .write_record(["wavelength", "radiance", "sweep_value"])
                .map_err(|err| wrap_csv("export-header", err))?;
            for row in rows {
                writer
                    .write_record([
                        row.wavelength.to_string(),
                        row.radiance.to_string(),
                        row.sweep_value.to_string(),
                    ])
                    .map_err(|err| wrap_csv("export-row", err))?;
            }
            writer
                .flush()
                .map_err(|err| wrap_csv("export-flush", err.into()))?;
        }
        tmp.persist(&target).map_err(|err| {
            RadError::Export(
                ErrorInfo::new("export-persist", "failed to finalize export artifact")
                    .with_context("path", target.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        info!(path = %target.display(), rows = rows.len(), "export written");
        Ok(ExportArtifact {
            path: target,
            row_count: rows.len(),
        })
    }
}

fn next_artifact_name() -> String {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f");
    let seq = EXPORT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("sweep_{stamp}_{seq:06}.csv")
}

fn wrap_csv(code: &str, err: csv::Error) -> RadError {
    RadError::Export(ErrorInfo::new(code, "CSV export failure").with_hint(err.to_string()))
}
