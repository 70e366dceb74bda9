//! Compute command handler
//!
//! Runs one calculator session non-interactively: select, enter every
//! `--grade`, then print or write the resulting report.

use super::selection::{render_view, resolve_semester, resolve_specialty, write_report};
use crate::args::GradeArg;
use moyenne::catalog::Catalog;
use moyenne::config::Config;
use moyenne::report::formats::ReportFormat;
use moyenne::session::Session;
use moyenne::{error, info, verbose};
use std::path::{Path, PathBuf};

/// What the compute command was asked to do
pub struct ComputeRequest<'a> {
    /// Specialty as typed
    pub specialty: &'a str,
    /// Semester as typed
    pub semester: &'a str,
    /// Scores to enter, in order
    pub grades: &'a [GradeArg],
    /// Output format name
    pub format: &'a str,
    /// Explicit output file
    pub output: Option<&'a Path>,
    /// Save into the reports directory
    pub save: bool,
}

/// Run the compute command.
pub fn run(request: &ComputeRequest, catalog: &Catalog, config: &Config) {
    match compute(request, catalog, config) {
        Ok(Some(path)) => println!("✓ Report written: {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            error!("Compute failed: {err}");
            eprintln!("✗ {err}");
            std::process::exit(1);
        }
    }
}

/// Build the session and emit the report; returns the written path, if any
fn compute(
    request: &ComputeRequest,
    catalog: &Catalog,
    config: &Config,
) -> Result<Option<PathBuf>, String> {
    let format: ReportFormat = request.format.parse()?;
    let session = build_session(request, catalog, config)?;

    if request.output.is_some() || request.save {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        let path = write_report(&session, format, request.output, &reports_dir)
            .map_err(|e| e.to_string())?;
        info!("Report written to {}", path.display());
        return Ok(Some(path));
    }

    let rendered = render_view(&session, format).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(None)
}

/// Select the specialty and semester, then enter every grade in order
fn build_session<'c>(
    request: &ComputeRequest,
    catalog: &'c Catalog,
    config: &Config,
) -> Result<Session<'c>, String> {
    let mut session = Session::new(catalog);
    session.set_theme(config.theme());
    session.set_specialty(Some(resolve_specialty(catalog, request.specialty)));
    session.set_semester(Some(resolve_semester(catalog, request.semester)))?;

    verbose!(
        "Selected {} / {} ({} module(s))",
        session.specialty().unwrap_or_default(),
        session.semester().unwrap_or_default(),
        session.modules().len()
    );

    for grade in request.grades {
        session.update_field(grade.module - 1, grade.field, grade.value.as_str())?;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::parse_grade;
    use moyenne::engine::round2;
    use moyenne::session::SessionView;

    fn request<'a>(grades: &'a [GradeArg]) -> ComputeRequest<'a> {
        ComputeRequest {
            specialty: "RSI",
            semester: "1",
            grades,
            format: "text",
            output: None,
            save: false,
        }
    }

    #[test]
    fn test_build_session_applies_grades() {
        let catalog = Catalog::builtin();
        let grades = ["1.exam=14", "1.td=10", "1.tp=16"]
            .iter()
            .map(|g| parse_grade(g).unwrap())
            .collect::<Vec<_>>();

        let session = build_session(&request(&grades), &catalog, &Config::default()).unwrap();
        let SessionView::Ready(result) = session.view() else {
            panic!("expected results");
        };
        assert!((round2(result.modules[0].average) - 13.67).abs() < 1e-9);
    }

    #[test]
    fn test_build_session_rejects_unknown_module_number() {
        let catalog = Catalog::builtin();
        let grades = vec![parse_grade("42.exam=12").unwrap()];
        let err = build_session(&request(&grades), &catalog, &Config::default()).unwrap_err();
        assert!(err.contains("No module at position 42"));
    }

    #[test]
    fn test_compute_writes_output_file() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.html");
        let grades = vec![parse_grade("2.exam=12").unwrap()];
        let req = ComputeRequest {
            format: "html",
            output: Some(output.as_path()),
            ..request(&grades)
        };

        let written = compute(&req, &catalog, &Config::default()).unwrap();
        assert_eq!(written.as_deref(), Some(output.as_path()));
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_compute_rejects_unknown_format() {
        let catalog = Catalog::builtin();
        let req = ComputeRequest {
            format: "pdf",
            ..request(&[])
        };
        assert!(compute(&req, &catalog, &Config::default()).is_err());
    }
}
