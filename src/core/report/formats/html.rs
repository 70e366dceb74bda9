//! HTML report generator
//!
//! Generates a self-contained HTML page (embedded CSS, no scripts) from the
//! `report.html` askama template. The page follows the session theme.

use crate::core::engine::{ModuleResult, PASS_MARK};
use crate::core::models::ScoreField;
use crate::core::report::{format_weight, out_of_twenty, ReportContext, ReportGenerator, Theme};
use askama::Template;
use std::error::Error;

/// One row of the module table
struct ModuleRow {
    number: usize,
    name: String,
    ects: String,
    coef: String,
    exam: String,
    td: String,
    tp: String,
    average: String,
    css_class: &'static str,
}

impl ModuleRow {
    fn from_result(module: &ModuleResult) -> Self {
        let cell = |field: ScoreField, assessed: bool| {
            if assessed {
                module.entry.raw(field).unwrap_or_default().to_string()
            } else {
                "-".to_string()
            }
        };
        Self {
            number: module.index + 1,
            name: module.name.clone(),
            ects: format_weight(module.ects),
            coef: format_weight(module.coef),
            exam: cell(ScoreField::Exam, true),
            td: cell(ScoreField::Td, module.has_td),
            tp: cell(ScoreField::Tp, module.has_tp),
            average: out_of_twenty(module.average),
            css_class: average_class(module.average),
        }
    }
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage<'a> {
    specialty: &'a str,
    semester: &'a str,
    dark: bool,
    show_td: bool,
    show_tp: bool,
    rows: Vec<ModuleRow>,
    total_ects: String,
    module_count: usize,
    passed: usize,
    failed: usize,
    general_average: String,
    general_class: &'static str,
    badge: &'static str,
}

/// Colour class of an average: green from the pass mark up, red below it
fn average_class(average: f64) -> &'static str {
    if average >= PASS_MARK {
        "pass"
    } else {
        "fail"
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let summary = &ctx.result.summary;
        let page = ReportPage {
            specialty: ctx.specialty,
            semester: ctx.semester,
            dark: ctx.theme == Theme::Dark,
            show_td: ctx.any_td(),
            show_tp: ctx.any_tp(),
            rows: ctx.result.modules.iter().map(ModuleRow::from_result).collect(),
            total_ects: format_weight(ctx.total_ects()),
            module_count: summary.module_count,
            passed: summary.passed,
            failed: summary.failed,
            general_average: out_of_twenty(summary.general_average),
            general_class: average_class(summary.general_average),
            badge: summary.standing.semester_badge().unwrap_or_default(),
        };
        Ok(page.render()?)
    }
}
