//! Score entries typed in by the user

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lowest score shown as valid input
pub const SCORE_MIN: f64 = 0.0;

/// Highest score shown as valid input
pub const SCORE_MAX: f64 = 20.0;

/// Input granularity shown as a hint
pub const SCORE_STEP: f64 = 0.01;

/// Assessment component of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreField {
    /// Final exam, present on every module
    Exam,
    /// Directed-study component
    Td,
    /// Practical component
    Tp,
}

impl ScoreField {
    /// All fields in display order
    pub const ALL: [Self; 3] = [Self::Exam, Self::Td, Self::Tp];
}

impl FromStr for ScoreField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exam" | "examen" => Ok(Self::Exam),
            "td" => Ok(Self::Td),
            "tp" => Ok(Self::Tp),
            _ => Err(format!("Unknown score field: '{s}' (expected exam, td or tp)")),
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exam => write!(f, "exam"),
            Self::Td => write!(f, "td"),
            Self::Tp => write!(f, "tp"),
        }
    }
}

/// Raw entries for one module, kept exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreEntry {
    /// Exam entry
    pub exam: Option<String>,
    /// TD entry
    pub td: Option<String>,
    /// TP entry
    pub tp: Option<String>,
}

impl ScoreEntry {
    /// Get the raw text of a field
    #[must_use]
    pub fn raw(&self, field: ScoreField) -> Option<&str> {
        match field {
            ScoreField::Exam => self.exam.as_deref(),
            ScoreField::Td => self.td.as_deref(),
            ScoreField::Tp => self.tp.as_deref(),
        }
    }

    /// Overwrite one field, leaving the others untouched
    pub fn set(&mut self, field: ScoreField, value: String) {
        let slot = match field {
            ScoreField::Exam => &mut self.exam,
            ScoreField::Td => &mut self.td,
            ScoreField::Tp => &mut self.tp,
        };
        *slot = Some(value);
    }

    /// Numeric value of a field; missing or non-numeric entries read as 0
    #[must_use]
    pub fn value(&self, field: ScoreField) -> f64 {
        coerce_score(self.raw(field))
    }
}

/// Score entries keyed by module index in the current module list
pub type ScoreBook = HashMap<usize, ScoreEntry>;

/// Convert a raw entry to a number.
///
/// Uses the longest leading decimal prefix of the trimmed text, so `"12abc"`
/// reads as 12 and `"12,5"` as 12. Anything without such a prefix reads as 0.
///
/// Non-finite results also read as 0: `"Infinity"` has no decimal prefix and
/// `"1e400"` overflows, so neither can carry an infinite score into the
/// averages. A browser `parseFloat` would keep both as infinity.
#[must_use]
pub fn coerce_score(raw: Option<&str>) -> f64 {
    raw.map(str::trim_start)
        .map(numeric_prefix)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Whether a value lies outside the hinted input range
#[must_use]
pub fn is_out_of_range(value: f64) -> bool {
    !(SCORE_MIN..=SCORE_MAX).contains(&value)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][(e|E)[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
