//! Plain-text report for the terminal

use crate::core::engine::ModuleResult;
use crate::core::models::ScoreField;
use crate::core::report::{format_weight, out_of_twenty, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Placeholder for a component the module does not have
const NOT_ASSESSED: &str = "-";

/// Placeholder for an entry not typed yet
const NOT_ENTERED: &str = "__";

/// Plain-text reporter with aligned columns
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn cell(module: &ModuleResult, field: ScoreField) -> String {
        let assessed = match field {
            ScoreField::Exam => true,
            ScoreField::Td => module.has_td,
            ScoreField::Tp => module.has_tp,
        };
        if !assessed {
            return NOT_ASSESSED.to_string();
        }
        module
            .entry
            .raw(field)
            .filter(|raw| !raw.trim().is_empty())
            .map_or_else(|| NOT_ENTERED.to_string(), str::to_string)
    }

    fn render_table(ctx: &ReportContext) -> String {
        let mut out = String::new();
        let name_width = ctx
            .result
            .modules
            .iter()
            .map(|m| m.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Module".len());

        let _ = writeln!(
            out,
            "{:>3}  {:<name_width$}  {:>4}  {:>6}  {:>6}  {:>6}  {:>10}  Status",
            "#", "Module", "Coef", "Exam", "TD", "TP", "Average"
        );
        let _ = writeln!(out, "{}", "-".repeat(name_width + 60));

        for module in &ctx.result.modules {
            let _ = writeln!(
                out,
                "{:>3}  {:<name_width$}  {:>4}  {:>6}  {:>6}  {:>6}  {:>10}  {}",
                module.index + 1,
                module.name,
                format_weight(module.coef),
                Self::cell(module, ScoreField::Exam),
                Self::cell(module, ScoreField::Td),
                Self::cell(module, ScoreField::Tp),
                out_of_twenty(module.average),
                module.standing
            );
        }
        out
    }

    fn render_summary(ctx: &ReportContext) -> String {
        let summary = &ctx.result.summary;
        let mut out = String::new();

        let _ = write!(
            out,
            "General average: {}",
            out_of_twenty(summary.general_average)
        );
        if let Some(badge) = summary.standing.semester_badge() {
            let _ = write!(out, "  [{badge}]");
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "Modules: {}   Passed: {}   Failed: {}",
            summary.module_count, summary.passed, summary.failed
        );
        out
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();
        let _ = writeln!(out, "{} - {}\n", ctx.specialty, ctx.semester);
        out.push_str(&Self::render_table(ctx));
        out.push('\n');
        out.push_str(&Self::render_summary(ctx));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::evaluate;
    use crate::core::models::{ModuleDefinition, ScoreBook, ScoreEntry};
    use crate::core::report::Theme;

    #[test]
    fn test_render_lists_modules_and_summary() {
        let modules = vec![
            ModuleDefinition::new("Systèmes distribués", 3.0, 3.0, true, true),
            ModuleDefinition::new("Big Data", 2.0, 2.0, false, true),
        ];
        let mut scores = ScoreBook::new();
        let mut entry = ScoreEntry::default();
        entry.set(ScoreField::Exam, "14".to_string());
        entry.set(ScoreField::Td, "10".to_string());
        entry.set(ScoreField::Tp, "16".to_string());
        scores.insert(0, entry);

        let result = evaluate(&modules, &scores);
        let ctx = ReportContext::new(
            "Systèmes Informatiques (SI)",
            "Semestre 2",
            &result,
            Theme::Light,
        );
        let text = TextReporter::new().render(&ctx).unwrap();

        assert!(text.starts_with("Systèmes Informatiques (SI) - Semestre 2"));
        assert!(text.contains("13.67 / 20"));
        assert!(text.contains("Big Data"));
        // (41/3*3 + 0*2) / 5 = 8.2
        assert!(text.contains("General average: 8.20 / 20  [Semester not validated]"));
        assert!(text.contains("Modules: 2   Passed: 1   Failed: 0"));
    }

    #[test]
    fn test_missing_components_are_marked() {
        let module = ModuleDefinition::new("Anglais scientifique 1", 1.0, 1.0, false, false);
        let result = evaluate(std::slice::from_ref(&module), &ScoreBook::new());
        let row = &result.modules[0];

        assert_eq!(TextReporter::cell(row, ScoreField::Exam), NOT_ENTERED);
        assert_eq!(TextReporter::cell(row, ScoreField::Td), NOT_ASSESSED);
        assert_eq!(TextReporter::cell(row, ScoreField::Tp), NOT_ASSESSED);
    }
}
