//! Subcommands and their dispatch onto the study service.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Subcommand};
use sinter_core::{AxisRange, Coefficients, MaterialId, SweepSpec};
use sinter_engine::{Laboratory, NewMaterial, Principal};

use crate::export;
use crate::output::{self, OutputFormat};

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in account.
    Whoami,

    /// Browse or create materials.
    #[command(subcommand)]
    Materials(MaterialsCommand),

    /// Inspect or edit model coefficients.
    #[command(subcommand)]
    Coefficients(CoefficientsCommand),

    /// Evaluate the density grid for a material and record the session.
    Study(StudyArgs),

    /// List recorded calculation sessions.
    Sessions {
        /// Only sessions for this material.
        #[arg(long)]
        material: Option<MaterialId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum MaterialsCommand {
    /// List materials by name.
    List,

    /// Create a material with its initial coefficients (admin only).
    Add {
        /// Unique material name.
        #[arg(long)]
        name: String,

        /// Material class, e.g. "hard alloy".
        #[arg(long = "type", default_value = "")]
        material_type: String,

        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,

        #[command(flatten)]
        coefficients: CoefficientArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum CoefficientsCommand {
    /// Show the current coefficient set.
    Show {
        /// Material id.
        material: MaterialId,
    },

    /// Show every coefficient set, oldest first.
    History {
        /// Material id.
        material: MaterialId,
    },

    /// Append a new coefficient set (admin only).
    Set {
        /// Material id.
        material: MaterialId,

        #[command(flatten)]
        coefficients: CoefficientArgs,

        /// Note stored with the set.
        #[arg(long)]
        comment: Option<String>,
    },
}

/// The six model coefficients as `a0,a1,a2,a3,a4,a5`.
#[derive(Debug, Args)]
pub struct CoefficientArgs {
    /// Comma-separated a0..a5.
    #[arg(
        long = "coefficients",
        required = true,
        num_args = 6,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    values: Vec<f64>,
}

impl CoefficientArgs {
    fn to_coefficients(&self) -> anyhow::Result<Coefficients> {
        let values: [f64; 6] = self
            .values
            .as_slice()
            .try_into()
            .with_context(|| format!("expected 6 coefficients, got {}", self.values.len()))?;
        Ok(Coefficients::from_array(values))
    }
}

/// Grid bounds and output options for `study`.
#[derive(Debug, Args)]
pub struct StudyArgs {
    /// Material id.
    pub material: MaterialId,

    /// Lowest gas pressure, atm.
    #[arg(long, allow_negative_numbers = true)]
    pub pg_min: Option<f64>,
    /// Highest gas pressure, atm.
    #[arg(long, allow_negative_numbers = true)]
    pub pg_max: Option<f64>,
    /// Pressure step, atm.
    #[arg(long, allow_negative_numbers = true)]
    pub pg_step: Option<f64>,
    /// Lowest temperature, °C.
    #[arg(long, allow_negative_numbers = true)]
    pub t_min: Option<f64>,
    /// Highest temperature, °C.
    #[arg(long, allow_negative_numbers = true)]
    pub t_max: Option<f64>,
    /// Temperature step, °C.
    #[arg(long, allow_negative_numbers = true)]
    pub t_step: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the samples to this CSV file, with a summary table beside it.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl StudyArgs {
    /// The requested sweep, with unspecified bounds taken from `defaults`.
    #[must_use]
    pub fn sweep(&self, defaults: &SweepSpec) -> SweepSpec {
        let p = defaults.pressure;
        let t = defaults.temperature;
        SweepSpec::new(
            AxisRange::new(
                self.pg_min.unwrap_or(p.min),
                self.pg_max.unwrap_or(p.max),
                self.pg_step.unwrap_or(p.step),
            ),
            AxisRange::new(
                self.t_min.unwrap_or(t.min),
                self.t_max.unwrap_or(t.max),
                self.t_step.unwrap_or(t.step),
            ),
        )
    }
}

/// Run one subcommand for a signed-in user, writing its output to `out`.
pub fn execute(
    lab: &dyn Laboratory,
    default_sweep: &SweepSpec,
    principal: &Principal,
    command: &Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Whoami => output::principal(out, principal)?,

        Command::Materials(MaterialsCommand::List) => {
            output::materials(out, &lab.list_materials()?)?;
        }
        Command::Materials(MaterialsCommand::Add {
            name,
            material_type,
            description,
            coefficients,
        }) => {
            let request = NewMaterial {
                name: name.clone(),
                material_type: material_type.clone(),
                description: description.clone(),
                coefficients: coefficients.to_coefficients()?,
            };
            let id = lab.add_material(principal, request)?;
            writeln!(out, "created material {id}")?;
        }

        Command::Coefficients(CoefficientsCommand::Show { material }) => {
            output::coefficient_set(out, &lab.current_coefficients(*material)?)?;
        }
        Command::Coefficients(CoefficientsCommand::History { material }) => {
            output::coefficient_history(out, &lab.coefficient_history(*material)?)?;
        }
        Command::Coefficients(CoefficientsCommand::Set {
            material,
            coefficients,
            comment,
        }) => {
            let set = lab.update_coefficients(
                principal,
                *material,
                coefficients.to_coefficients()?,
                comment.as_deref(),
            )?;
            output::coefficient_set(out, &set)?;
        }

        Command::Study(args) => {
            let sweep = args.sweep(default_sweep);
            let outcome = lab.run_study(principal, args.material, &sweep)?;
            output::study(out, &outcome, args.format)?;
            if let Some(path) = &args.csv {
                let material = lab.material(args.material)?;
                let info = export::write_report(path, &material.name, &outcome.evaluation, Utc::now())?;
                if args.format == OutputFormat::Table {
                    writeln!(out, "report: {} and {}", path.display(), info.display())?;
                }
            }
        }

        Command::Sessions { material } => {
            output::sessions(out, &lab.list_sessions(*material)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use clap::Parser;
    use sinter_engine::{LabError, LaboratoryService};
    use sinter_store::{RocksStore, StoreConfig};
    use tempfile::TempDir;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        TestCli::try_parse_from(std::iter::once("sinter").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    fn setup() -> (LaboratoryService<RocksStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open_with(dir.path().join("db"), &StoreConfig::for_tests()).unwrap();
        (LaboratoryService::with_defaults(Arc::new(store)), dir)
    }

    fn run(
        lab: &LaboratoryService<RocksStore>,
        login: &str,
        password: &str,
        args: &[&str],
    ) -> anyhow::Result<String> {
        let principal = lab.sign_in(login, password)?.unwrap();
        let mut out = Vec::new();
        execute(lab, &SweepSpec::default(), &principal, &parse(args), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn study_flags_override_defaults() {
        let Command::Study(args) = parse(&["study", "1", "--pg-min", "50", "--t-step", "20"]) else {
            panic!("expected study command");
        };
        let sweep = args.sweep(&SweepSpec::default());
        assert_eq!(sweep.pressure.min, 50.0);
        assert_eq!(sweep.pressure.max, 80.0);
        assert_eq!(sweep.temperature.step, 20.0);
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn negative_coefficients_parse() {
        let Command::Coefficients(CoefficientsCommand::Set { coefficients, .. }) = parse(&[
            "coefficients",
            "set",
            "1",
            "--coefficients",
            "-17.46,-0.00622,0.04293,1.5e-5,-1.4e-5,-5e-9",
        ]) else {
            panic!("expected coefficients set command");
        };
        let parsed = coefficients.to_coefficients().unwrap();
        assert_eq!(parsed.a0, -17.46);
        assert_eq!(parsed.a5, -5e-9);
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let result = TestCli::try_parse_from([
            "sinter",
            "materials",
            "add",
            "--name",
            "TiC",
            "--coefficients",
            "1,2,3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn whoami_and_listing() {
        let (lab, _dir) = setup();
        let text = run(&lab, "admin", "admin123", &["whoami"]).unwrap();
        assert!(text.starts_with("admin (user "));
        assert!(text.contains("role admin"));

        let text = run(&lab, "admin", "admin123", &["materials", "list"]).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn researcher_cannot_add_material() {
        let (lab, _dir) = setup();
        let err = run(
            &lab,
            "researcher",
            "pass123",
            &["materials", "add", "--name", "TiC", "--coefficients", "1,0,0,0,0,0"],
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LabError>(),
            Some(LabError::NotPermitted { .. })
        ));
    }

    #[test]
    fn study_json_and_csv() {
        let (lab, dir) = setup();
        let csv = dir.path().join("study.csv");
        let csv_arg = csv.to_str().unwrap();

        let text = run(
            &lab,
            "researcher",
            "pass123",
            &["study", "1", "--format", "json", "--csv", csv_arg],
        )
        .unwrap();
        let report: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(report["operations_count"], 5733);
        assert_eq!(report["samples"].as_array().unwrap().len(), 441);
        assert_eq!(report["summary"]["num_points"], 441);

        assert!(csv.exists());
        assert!(export::info_path(&csv).exists());

        let text = run(&lab, "researcher", "pass123", &["sessions", "--material", "1"]).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn admin_sets_coefficients() {
        let (lab, _dir) = setup();
        run(
            &lab,
            "admin",
            "admin123",
            &["coefficients", "set", "1", "--coefficients", "2,0,0,0,0,0", "--comment", "refit"],
        )
        .unwrap();

        let text = run(&lab, "researcher", "pass123", &["coefficients", "history", "1"]).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("refit"));

        let text = run(&lab, "researcher", "pass123", &["coefficients", "show", "1"]).unwrap();
        assert!(text.contains("a0=2e0"));
    }
}
