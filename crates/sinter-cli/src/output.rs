//! Plain-text and JSON rendering of command results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use sinter_core::{Coefficients, DensitySummary, SweepSpec};
use sinter_engine::{
    CalculationSession, CoefficientSet, DensityCurve, MaterialSummary, Principal, StudyOutcome,
};

/// How study results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and curves.
    #[default]
    Table,
    /// One JSON document with every sample.
    Json,
}

/// JSON shape of a completed study.
#[derive(Debug, Serialize)]
struct StudyReport<'a> {
    session_id: u64,
    material_id: u64,
    sweep: &'a SweepSpec,
    operations_count: u64,
    exec_time_sec: f64,
    summary: &'a DensitySummary,
    samples: &'a [sinter_core::GridSample],
}

pub fn principal(out: &mut impl Write, principal: &Principal) -> io::Result<()> {
    writeln!(
        out,
        "{} (user {}, role {})",
        principal.login, principal.user_id, principal.role
    )
}

pub fn materials(out: &mut impl Write, materials: &[MaterialSummary]) -> io::Result<()> {
    writeln!(out, "{:>6}  NAME", "ID")?;
    for material in materials {
        writeln!(out, "{:>6}  {}", material.material_id, material.name)?;
    }
    Ok(())
}

fn coefficients_row(coefficients: &Coefficients) -> String {
    coefficients
        .to_array()
        .iter()
        .enumerate()
        .map(|(i, a)| format!("a{i}={a:e}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn coefficient_set(out: &mut impl Write, set: &CoefficientSet) -> io::Result<()> {
    writeln!(
        out,
        "set {} for material {} (valid from {})",
        set.coefficient_id, set.material_id, set.valid_from
    )?;
    writeln!(out, "  {}", coefficients_row(&set.coefficients))?;
    if let Some(comment) = &set.comment {
        writeln!(out, "  comment: {comment}")?;
    }
    Ok(())
}

pub fn coefficient_history(out: &mut impl Write, history: &[CoefficientSet]) -> io::Result<()> {
    for set in history {
        writeln!(
            out,
            "{:>6}  {}  {}  {}",
            set.coefficient_id,
            set.created_at.format("%Y-%m-%d %H:%M:%S"),
            coefficients_row(&set.coefficients),
            set.comment.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

pub fn summary(out: &mut impl Write, summary: &DensitySummary) -> io::Result<()> {
    writeln!(out, "points:       {}", summary.num_points)?;
    writeln!(out, "min density:  {:.4}", summary.min_density)?;
    writeln!(out, "max density:  {:.4}", summary.max_density)?;
    writeln!(out, "mean density: {:.4}", summary.mean_density)?;
    writeln!(out, "std density:  {:.4}", summary.std_density)
}

fn curve(out: &mut impl Write, curve: &DensityCurve, fixed: &str) -> io::Result<()> {
    let points = curve
        .points
        .iter()
        .map(|(x, rho)| format!("{x}:{rho:.4}"))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "  {fixed}={}  {points}", curve.fixed_value)
}

pub fn study(out: &mut impl Write, outcome: &StudyOutcome, format: OutputFormat) -> io::Result<()> {
    let evaluation = &outcome.evaluation;
    match format {
        OutputFormat::Json => {
            let report = StudyReport {
                session_id: outcome.session.session_id.get(),
                material_id: outcome.session.material_id.get(),
                sweep: &evaluation.sweep,
                operations_count: evaluation.operations_count,
                exec_time_sec: evaluation.elapsed_seconds(),
                summary: &evaluation.summary,
                samples: &evaluation.samples,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "session {} ({} x {} grid)",
                outcome.session.session_id,
                evaluation.pressure_points,
                evaluation.temperature_points
            )?;
            writeln!(out, "operations:   {}", evaluation.operations_count)?;
            writeln!(out, "time:         {:.6} s", evaluation.elapsed_seconds())?;
            summary(out, &evaluation.summary)?;
            writeln!(out, "density vs pressure:")?;
            for c in evaluation.pressure_curves() {
                curve(out, &c, "T")?;
            }
            writeln!(out, "density vs temperature:")?;
            for c in evaluation.temperature_curves() {
                curve(out, &c, "Pg")?;
            }
            Ok(())
        }
    }
}

pub fn sessions(out: &mut impl Write, sessions: &[CalculationSession]) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:>8}  {:>6}  {:>7}  {:>10}  {:>10}  CREATED",
        "ID", "MATERIAL", "USER", "POINTS", "MEAN", "TIME (s)"
    )?;
    for session in sessions {
        writeln!(
            out,
            "{:>6}  {:>8}  {:>6}  {:>7}  {:>10.4}  {:>10.6}  {}",
            session.session_id,
            session.material_id,
            session.user_id,
            session.num_points,
            session.summary.mean_density,
            session.exec_time_sec,
            session.created_at.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}
