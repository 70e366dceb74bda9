//! Report generation for semester results
//!
//! Renders the derived result of a selection as plain text for the terminal,
//! as Markdown, or as a self-contained HTML page.

pub mod formats;

use crate::core::catalog::catalog_key;
use crate::core::engine::{round2, SemesterResult};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Light or dark presentation; has no effect on any computed value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: '{s}' (expected light or dark)")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Specialty display name
    pub specialty: &'a str,
    /// Semester display name
    pub semester: &'a str,
    /// Derived semester result
    pub result: &'a SemesterResult,
    /// Presentation theme
    pub theme: Theme,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        specialty: &'a str,
        semester: &'a str,
        result: &'a SemesterResult,
        theme: Theme,
    ) -> Self {
        Self {
            specialty,
            semester,
            result,
            theme,
        }
    }

    /// Catalog key of the selection (e.g., "RSI-S1")
    #[must_use]
    pub fn key(&self) -> String {
        catalog_key(self.specialty, self.semester).unwrap_or_else(|| "semester".to_string())
    }

    /// Total credits of the listed modules
    #[must_use]
    pub fn total_ects(&self) -> f64 {
        self.result.modules.iter().map(|m| m.ects).sum()
    }

    /// Total coefficient of the listed modules
    #[must_use]
    pub fn total_coef(&self) -> f64 {
        self.result.modules.iter().map(|m| m.coef).sum()
    }

    /// Whether any listed module has a TD component
    #[must_use]
    pub fn any_td(&self) -> bool {
        self.result.modules.iter().any(|m| m.has_td)
    }

    /// Whether any listed module has a TP component
    #[must_use]
    pub fn any_tp(&self) -> bool {
        self.result.modules.iter().any(|m| m.has_tp)
    }
}

/// Format a score or average as shown to the user (e.g., "13.67 / 20")
#[must_use]
pub fn out_of_twenty(value: f64) -> String {
    format!("{:.2} / 20", round2(value))
}

/// Format a coefficient or credit value without a trailing ".0"
#[must_use]
pub fn format_weight(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
