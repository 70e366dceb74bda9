//! Markdown report generator
//!
//! Generates semester reports as Markdown tables. These render well in
//! GitHub, GitLab, and VS Code.

use crate::core::engine::{ModuleResult, Standing};
use crate::core::models::ScoreField;
use crate::core::report::{format_weight, out_of_twenty, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = &ctx.result.summary;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{specialty}}", &escape_cell(ctx.specialty));
        output = output.replace("{{semester}}", &escape_cell(ctx.semester));
        output = output.replace("{{module_count}}", &summary.module_count.to_string());
        output = output.replace("{{total_ects}}", &format_weight(ctx.total_ects()));
        output = output.replace("{{total_coef}}", &format_weight(ctx.total_coef()));
        output = output.replace("{{passed}}", &summary.passed.to_string());
        output = output.replace("{{failed}}", &summary.failed.to_string());
        output = output.replace(
            "{{general_average}}",
            &out_of_twenty(summary.general_average),
        );

        let badge = match summary.standing {
            Standing::Passed => "✅ Semester validated",
            Standing::Failed => "❌ Semester not validated",
            Standing::Untouched => "",
        };
        output = output.replace("{{badge}}", badge);

        let module_table = Self::generate_module_table(ctx);
        output = output.replace("{{module_table}}", &module_table);

        output
    }

    /// Generate the module table; TD/TP columns appear only when some module has them
    fn generate_module_table(ctx: &ReportContext) -> String {
        let mut table = String::new();
        let (any_td, any_tp) = (ctx.any_td(), ctx.any_tp());

        table.push_str("| # | Module | ECTS | Coef | Exam |");
        if any_td {
            table.push_str(" TD |");
        }
        if any_tp {
            table.push_str(" TP |");
        }
        table.push_str(" Average | Status |\n");

        let columns = 7 + usize::from(any_td) + usize::from(any_tp);
        table.push('|');
        table.push_str(&"---|".repeat(columns));
        table.push('\n');

        for module in &ctx.result.modules {
            let _ = write!(
                table,
                "| {} | {} | {} | {} | {} |",
                module.index + 1,
                escape_cell(&module.name),
                format_weight(module.ects),
                format_weight(module.coef),
                cell(module, ScoreField::Exam)
            );
            if any_td {
                let _ = write!(table, " {} |", cell(module, ScoreField::Td));
            }
            if any_tp {
                let _ = write!(table, " {} |", cell(module, ScoreField::Tp));
            }
            let status = match module.standing {
                Standing::Passed => "✅",
                Standing::Failed => "❌",
                Standing::Untouched => "",
            };
            let _ = writeln!(table, " {} | {status} |", out_of_twenty(module.average));
        }

        table
    }
}

/// Table cell for one score field of a module
fn cell(module: &ModuleResult, field: ScoreField) -> String {
    let assessed = match field {
        ScoreField::Exam => true,
        ScoreField::Td => module.has_td,
        ScoreField::Tp => module.has_tp,
    };
    if !assessed {
        return "-".to_string();
    }
    module
        .entry
        .raw(field)
        .filter(|raw| !raw.trim().is_empty())
        .map_or_else(String::new, escape_cell)
}

/// Escape characters that would break a Markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
