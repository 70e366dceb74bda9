//! Module and semester average computation
//!
//! Every function here is total: missing or malformed scores read as 0, an
//! empty module list averages to 0, and no result is clamped to the 0–20 scale.

use crate::core::models::{ModuleDefinition, ScoreBook, ScoreEntry, ScoreField};
use std::fmt;

/// Average at or above which a module or semester is passed
pub const PASS_MARK: f64 = 10.0;

/// Classification of an average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// Average at or above the pass mark
    Passed,
    /// Average above zero but below the pass mark
    Failed,
    /// Average of zero (nothing entered) or below; counted as neither
    Untouched,
}

impl Standing {
    /// Classify an average
    #[must_use]
    pub fn of(average: f64) -> Self {
        if average >= PASS_MARK {
            Self::Passed
        } else if average > 0.0 {
            Self::Failed
        } else {
            Self::Untouched
        }
    }

    /// Badge shown for a semester with this standing, if any
    #[must_use]
    pub const fn semester_badge(self) -> Option<&'static str> {
        match self {
            Self::Passed => Some("Semester validated"),
            Self::Failed => Some("Semester not validated"),
            Self::Untouched => None,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Untouched => write!(f, "-"),
        }
    }
}

/// Below this magnitude a count of cents is exact in an `f64`
const EXACT_CENTS_LIMIT: f64 = 9_007_199_254_740_992.0 / 100.0;

/// Round to two decimals, halves away from zero.
///
/// The exact decimal expansion of the stored binary value is rounded, so
/// `1.115` (stored as 1.11499999...) gives 1.11 while an exact half such as
/// `0.125` gives 0.13. Scaling by 100 first would round the product and
/// turn the former into a tie.
#[must_use]
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value.abs() >= EXACT_CENTS_LIMIT {
        return (value * 100.0).round() / 100.0;
    }

    // 60 places always separate a double from the nearest half-cent
    let exact = format!("{:.60}", value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };
    let digits = |s: &str| {
        s.bytes()
            .fold(0_u64, |acc, d| acc * 10 + u64::from(d - b'0'))
    };

    let mut cents = digits(whole) * 100 + digits(&fraction[..2]);
    if fraction.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        cents += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let rounded = cents as f64 / 100.0;
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Compute one module's average from its raw entries.
///
/// The exam weighs twice the continuous assessment. When a module has both TD
/// and TP, the continuous assessment is their plain mean; exam-only modules
/// average to the exam score.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn module_average(module: &ModuleDefinition, scores: Option<&ScoreEntry>) -> f64 {
    let value = |field: ScoreField| scores.map_or(0.0, |entry| entry.value(field));
    let exam = value(ScoreField::Exam);

    let continuous = match (module.has_td, module.has_tp) {
        (false, false) => return exam,
        (true, true) => (value(ScoreField::Td) + value(ScoreField::Tp)) / 2.0,
        (true, false) => value(ScoreField::Td),
        (false, true) => value(ScoreField::Tp),
    };

    (exam * 2.0 + continuous) / 3.0
}

/// Coefficient-weighted mean of all module averages, rounded to two decimals
///
/// Returns 0 for an empty module list.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn general_average(modules: &[ModuleDefinition], scores: &ScoreBook) -> f64 {
    let (weighted, total_coef) = modules.iter().enumerate().fold(
        (0.0, 0.0),
        |(weighted, total_coef), (index, module)| {
            let average = module_average(module, scores.get(&index));
            (weighted + average * module.coef, total_coef + module.coef)
        },
    );

    if total_coef > 0.0 {
        round2(weighted / total_coef)
    } else {
        0.0
    }
}

/// Derived result for one module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleResult {
    /// Position in the current module list
    pub index: usize,
    /// Module display label
    pub name: String,
    /// Weight in the general average
    pub coef: f64,
    /// Credit value
    pub ects: f64,
    /// Whether a TD entry is expected
    pub has_td: bool,
    /// Whether a TP entry is expected
    pub has_tp: bool,
    /// Raw entry as typed, for display
    pub entry: ScoreEntry,
    /// Unrounded module average
    pub average: f64,
    /// Pass/fail classification of `average`
    pub standing: Standing,
}

/// Summary counts and the general average of a semester
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSummary {
    /// Number of modules in the selection
    pub module_count: usize,
    /// Modules with an average of at least 10
    pub passed: usize,
    /// Modules with an average strictly between 0 and 10
    pub failed: usize,
    /// Rounded general average
    pub general_average: f64,
    /// Validation status derived from the rounded general average
    pub standing: Standing,
}

/// Everything shown for a selection, derived from scratch
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterResult {
    /// Per-module results in catalog order
    pub modules: Vec<ModuleResult>,
    /// Semester summary
    pub summary: SemesterSummary,
}

/// Evaluate a module list against the entered scores
#[must_use]
pub fn evaluate(modules: &[ModuleDefinition], scores: &ScoreBook) -> SemesterResult {
    let results: Vec<ModuleResult> = modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let entry = scores.get(&index);
            let average = module_average(module, entry);
            ModuleResult {
                index,
                name: module.name.clone(),
                coef: module.coef,
                ects: module.ects,
                has_td: module.has_td,
                has_tp: module.has_tp,
                entry: entry.cloned().unwrap_or_default(),
                average,
                standing: Standing::of(average),
            }
        })
        .collect();

    let passed = results
        .iter()
        .filter(|r| r.standing == Standing::Passed)
        .count();
    let failed = results
        .iter()
        .filter(|r| r.standing == Standing::Failed)
        .count();
    let general = general_average(modules, scores);

    SemesterResult {
        summary: SemesterSummary {
            module_count: results.len(),
            passed,
            failed,
            general_average: general,
            standing: Standing::of(general),
        },
        modules: results,
    }
}
