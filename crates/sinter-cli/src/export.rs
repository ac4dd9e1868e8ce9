//! CSV study reports.
//!
//! A report is two files: the sample table at the requested path and a
//! `<stem>_info.csv` parameter/value table next to it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sinter_engine::GridEvaluation;

use crate::error::CliError;

/// Path of the info table written alongside `samples_path`.
#[must_use]
pub fn info_path(samples_path: &Path) -> PathBuf {
    let stem = samples_path
        .file_stem()
        .map_or_else(|| "report".into(), |s| s.to_string_lossy().into_owned());
    samples_path.with_file_name(format!("{stem}_info.csv"))
}

/// Write the sample table and the info table for one study.
///
/// Returns the path of the info table.
///
/// # Errors
///
/// Returns `CliError::Export` if either file cannot be written.
pub fn write_report(
    samples_path: &Path,
    material_name: &str,
    evaluation: &GridEvaluation,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, CliError> {
    write_samples(samples_path, evaluation)?;
    let info = info_path(samples_path);
    write_info(&info, material_name, evaluation, generated_at)?;
    tracing::info!(
        samples = %samples_path.display(),
        info = %info.display(),
        points = evaluation.samples.len(),
        "Wrote study report"
    );
    Ok(info)
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> CliError {
    CliError::Export {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn write_samples(path: &Path, evaluation: &GridEvaluation) -> Result<(), CliError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;
    for sample in &evaluation.samples {
        wtr.serialize(sample).map_err(|e| export_error(path, e))?;
    }
    wtr.flush().map_err(|e| export_error(path, e))
}

fn write_info(
    path: &Path,
    material_name: &str,
    evaluation: &GridEvaluation,
    generated_at: DateTime<Utc>,
) -> Result<(), CliError> {
    let summary = &evaluation.summary;
    let rows = [
        ("material", material_name.to_string()),
        ("generated_at", generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ("num_points", summary.num_points.to_string()),
        ("operations_count", evaluation.operations_count.to_string()),
        ("exec_time_sec", format!("{:.6}", evaluation.elapsed_seconds())),
        ("min_density", format!("{:.4}", summary.min_density)),
        ("max_density", format!("{:.4}", summary.max_density)),
        ("mean_density", format!("{:.4}", summary.mean_density)),
        ("std_density", format!("{:.4}", summary.std_density)),
    ];

    let mut wtr = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;
    wtr.write_record(["parameter", "value"])
        .map_err(|e| export_error(path, e))?;
    for (name, value) in rows {
        wtr.write_record([name, value.as_str()])
            .map_err(|e| export_error(path, e))?;
    }
    wtr.flush().map_err(|e| export_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinter_core::{AxisRange, Coefficients, SweepSpec};
    use sinter_engine::evaluate_grid;
    use tempfile::TempDir;

    fn evaluation() -> GridEvaluation {
        let sweep = SweepSpec::new(
            AxisRange::new(0.0, 1.0, 1.0),
            AxisRange::new(10.0, 20.0, 10.0),
        );
        evaluate_grid(&Coefficients::from_array([1.0, 1.0, 0.0, 0.0, 0.0, 0.0]), &sweep).unwrap()
    }

    #[test]
    fn info_path_sits_next_to_samples() {
        assert_eq!(
            info_path(Path::new("/tmp/run/study.csv")),
            PathBuf::from("/tmp/run/study_info.csv")
        );
        assert_eq!(info_path(Path::new("out")), PathBuf::from("out_info.csv"));
    }

    #[test]
    fn writes_samples_and_info() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("study.csv");

        let info = write_report(&path, "WC-Ni", &evaluation(), Utc::now()).unwrap();

        let samples = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = samples.lines().collect();
        assert_eq!(lines[0], "pg,t,rho");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "0.0,10.0,1.0");
        assert_eq!(lines[4], "1.0,20.0,2.0");

        let info = std::fs::read_to_string(info).unwrap();
        assert!(info.starts_with("parameter,value\n"));
        assert!(info.contains("material,WC-Ni"));
        assert!(info.contains("num_points,4"));
        assert!(info.contains("operations_count,52"));
        assert!(info.contains("mean_density,1.5000"));
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("study.csv");
        let err = write_report(&path, "WC-Ni", &evaluation(), Utc::now()).unwrap_err();
        assert!(matches!(err, CliError::Export { .. }));
    }
}
