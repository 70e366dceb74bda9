//! Helpers shared by the calculator commands
//!
//! Resolves what the user typed for a specialty or semester into catalog
//! display names, and renders or saves the current session view.

use moyenne::catalog::{semester_number, specialty_code, Catalog};
use moyenne::report::formats::ReportFormat;
use moyenne::report::ReportContext;
use moyenne::session::{Session, SessionView};
use moyenne::warn;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Resolve a specialty from its 1-based list number, bracketed code or full name.
///
/// Input matching nothing is returned as typed so the session shows the
/// "no modules" state for it.
pub fn resolve_specialty(catalog: &Catalog, input: &str) -> String {
    let input = input.trim();
    let specialties = catalog.specialties();

    if let Some(name) = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| specialties.get(i))
    {
        return name.clone();
    }

    specialties
        .iter()
        .find(|name| {
            name.eq_ignore_ascii_case(input)
                || (!input.is_empty() && specialty_code(name).eq_ignore_ascii_case(input))
        })
        .cloned()
        .unwrap_or_else(|| {
            warn!("'{input}' is not a known specialty");
            input.to_string()
        })
}

/// Resolve a semester from its number (e.g., `2`) or full name.
///
/// Input matching nothing is returned as typed.
pub fn resolve_semester(catalog: &Catalog, input: &str) -> String {
    let input = input.trim();
    catalog
        .semesters()
        .iter()
        .find(|name| name.eq_ignore_ascii_case(input) || semester_number(name) == input)
        .cloned()
        .unwrap_or_else(|| {
            warn!("'{input}' is not a known semester");
            input.to_string()
        })
}

/// Render what the session currently shows.
///
/// Empty states render as their message; a ready view renders as a report.
///
/// # Errors
/// Returns an error if the report renderer fails.
pub fn render_view(session: &Session, format: ReportFormat) -> Result<String, Box<dyn Error>> {
    match session.view() {
        SessionView::Ready(result) => {
            let ctx = ReportContext::new(
                session.specialty().unwrap_or_default(),
                session.semester().unwrap_or_default(),
                &result,
                session.theme(),
            );
            format.reporter().render(&ctx)
        }
        empty => Ok(empty.empty_state_message().unwrap_or_default().to_string()),
    }
}

/// Write the current report to `path`, or to `<reports_dir>/<KEY>.<ext>` when no path is given.
///
/// # Errors
/// Returns an error if nothing is ready to report or the file cannot be written.
pub fn write_report(
    session: &Session,
    format: ReportFormat,
    path: Option<&Path>,
    reports_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let view = session.view();
    let SessionView::Ready(result) = &view else {
        let reason = view.empty_state_message().unwrap_or_default();
        return Err(format!("Nothing to export. {reason}").into());
    };

    let ctx = ReportContext::new(
        session.specialty().unwrap_or_default(),
        session.semester().unwrap_or_default(),
        result,
        session.theme(),
    );

    let output_path = if let Some(path) = path {
        path.to_path_buf()
    } else {
        std::fs::create_dir_all(reports_dir).map_err(|e| {
            format!(
                "Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;
        reports_dir.join(format!("{}.{}", ctx.key(), format.extension()))
    };

    format.reporter().generate(&ctx, &output_path)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moyenne::models::ScoreField;

    const SI: &str = "Systèmes Informatiques (SI)";

    #[test]
    fn test_resolve_specialty() {
        let catalog = Catalog::builtin();
        assert_eq!(resolve_specialty(&catalog, "2"), SI);
        assert_eq!(resolve_specialty(&catalog, "si"), SI);
        assert_eq!(resolve_specialty(&catalog, SI), SI);
        assert_eq!(resolve_specialty(&catalog, "  Systèmes Informatiques (SI) "), SI);
        assert_eq!(resolve_specialty(&catalog, "9"), "9");
        assert_eq!(resolve_specialty(&catalog, "Chimie"), "Chimie");
    }

    #[test]
    fn test_resolve_semester() {
        let catalog = Catalog::builtin();
        assert_eq!(resolve_semester(&catalog, "1"), "Semestre 1");
        assert_eq!(resolve_semester(&catalog, "semestre 2"), "Semestre 2");
        assert_eq!(resolve_semester(&catalog, "5"), "5");
    }

    #[test]
    fn test_render_view_empty_states() {
        let catalog = Catalog::builtin();
        let mut session = Session::new(&catalog);
        assert_eq!(
            render_view(&session, ReportFormat::Text).unwrap(),
            "Select a specialty to get started."
        );

        session.set_specialty(Some(resolve_specialty(&catalog, "RSI")));
        session
            .set_semester(Some(resolve_semester(&catalog, "2")))
            .unwrap();
        assert_eq!(
            render_view(&session, ReportFormat::Text).unwrap(),
            "No modules are available for this combination."
        );
    }

    #[test]
    fn test_write_report_into_reports_dir() {
        let catalog = Catalog::builtin();
        let mut session = Session::new(&catalog);
        session.set_specialty(Some(SI.to_string()));
        session.set_semester(Some("Semestre 2".to_string())).unwrap();
        session.update_field(0, ScoreField::Exam, "12").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let reports_dir = dir.path().join("reports");
        let path = write_report(&session, ReportFormat::Markdown, None, &reports_dir).unwrap();

        assert_eq!(path, reports_dir.join("SI-S2.md"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Systèmes Informatiques (SI)"));
    }

    #[test]
    fn test_write_report_requires_results() {
        let catalog = Catalog::builtin();
        let session = Session::new(&catalog);
        let dir = tempfile::tempdir().unwrap();
        let err = write_report(&session, ReportFormat::Html, None, dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Nothing to export."));
    }
}
