//! Module catalog keyed by specialty and semester
//!
//! The catalog maps a `<CODE>-S<N>` key to the ordered module list of that
//! semester. `CODE` is the bracketed abbreviation found in a specialty's
//! display name and `N` the number at the end of a semester's display name.
//! Unknown combinations resolve to an empty list rather than an error.

use crate::core::config::Config;
use crate::core::models::ModuleDefinition;
use crate::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Catalog compiled into the binary
const BUILTIN_CATALOG: &str = include_str!("assets/catalog.toml");

/// Static lookup table of specialties, semesters and their modules
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    /// Specialty display names, in selector order
    specialties: Vec<String>,
    /// Semester display names, in selector order
    semesters: Vec<String>,
    /// Module groups keyed by `<CODE>-S<N>`
    #[serde(default)]
    modules: BTreeMap<String, Vec<ModuleDefinition>>,
}

impl Catalog {
    /// Load the catalog bundled with the binary
    ///
    /// # Panics
    /// Panics if the embedded catalog is invalid. It is compiled in and covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_CATALOG).expect("Failed to parse compiled-in module catalog")
    }

    /// Parse and validate a catalog from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or if a module has a
    /// non-positive coefficient or ECTS value, or a duplicate name within its group.
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let catalog: Self = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;
        let catalog = Self::from_toml(&content)?;
        info!(
            "Catalog loaded from {} ({} module groups)",
            path.display(),
            catalog.modules.len()
        );
        Ok(catalog)
    }

    /// Load the catalog configured in `paths.catalog`, or the built-in one when unset
    ///
    /// # Errors
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn load(config: &Config) -> Result<Self, Box<dyn Error>> {
        if config.paths.catalog.is_empty() {
            debug!("Using built-in module catalog");
            Ok(Self::builtin())
        } else {
            Self::from_file(&config.paths.catalog)
        }
    }

    fn validate(&self) -> Result<(), String> {
        for (key, modules) in &self.modules {
            let mut seen = HashSet::new();
            for module in modules {
                if module.coef <= 0.0 || !module.coef.is_finite() {
                    return Err(format!(
                        "Module '{}' in {key} has a non-positive coefficient ({})",
                        module.name, module.coef
                    ));
                }
                if module.ects <= 0.0 || !module.ects.is_finite() {
                    return Err(format!(
                        "Module '{}' in {key} has a non-positive ECTS value ({})",
                        module.name, module.ects
                    ));
                }
                if !seen.insert(module.name.as_str()) {
                    return Err(format!("Duplicate module '{}' in {key}", module.name));
                }
            }
        }
        Ok(())
    }

    /// Specialty display names
    #[must_use]
    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Semester display names
    #[must_use]
    pub fn semesters(&self) -> &[String] {
        &self.semesters
    }

    /// Registered catalog keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Modules registered under a catalog key
    #[must_use]
    pub fn modules_for_key(&self, key: &str) -> &[ModuleDefinition] {
        self.modules
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ordered modules for a specialty and semester given by display name
    ///
    /// Returns an empty slice when either selection is empty or when the
    /// combination is not registered.
    #[must_use]
    pub fn lookup_modules(&self, specialty: &str, semester: &str) -> &[ModuleDefinition] {
        catalog_key(specialty, semester)
            .map(|key| self.modules_for_key(&key))
            .unwrap_or_default()
    }
}

/// Extract the bracketed abbreviation from a specialty display name
///
/// `"Systèmes Informatiques (SI)"` yields `"SI"`. Returns an empty string when
/// the name has no non-empty bracket group.
#[must_use]
pub fn specialty_code(display: &str) -> &str {
    let mut rest = display;
    let mut offset = 0;
    while let Some(open) = rest.find('(') {
        let start = offset + open + 1;
        let tail = &display[start..];
        match tail.find(')') {
            Some(0) => {}
            Some(close) => return &display[start..start + close],
            None => return "",
        }
        offset = start;
        rest = tail;
    }
    ""
}

/// Extract the trailing number from a semester display name
///
/// `"Semestre 2"` yields `"2"`. Returns an empty string when the name does
/// not end in digits.
#[must_use]
pub fn semester_number(display: &str) -> &str {
    let trimmed = display.trim_end();
    let digits = trimmed
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count();
    &trimmed[trimmed.len() - digits..]
}

/// Build the `<CODE>-S<N>` catalog key for a selection
///
/// Returns `None` when either selection is empty.
#[must_use]
pub fn catalog_key(specialty: &str, semester: &str) -> Option<String> {
    if specialty.is_empty() || semester.is_empty() {
        return None;
    }
    Some(format!(
        "{}-S{}",
        specialty_code(specialty),
        semester_number(semester)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSI: &str = "Réseaux et Systèmes Informatiques (RSI)";

    #[test]
    fn test_specialty_code() {
        assert_eq!(specialty_code(RSI), "RSI");
        assert_eq!(specialty_code("Systèmes et Multimédia (SYM)"), "SYM");
        assert_eq!(specialty_code("No code here"), "");
        assert_eq!(specialty_code("Empty () then (X)"), "X");
        assert_eq!(specialty_code("Unclosed (ABC"), "");
    }

    #[test]
    fn test_semester_number() {
        assert_eq!(semester_number("Semestre 1"), "1");
        assert_eq!(semester_number("Semester 2"), "2");
        assert_eq!(semester_number("S10 "), "10");
        assert_eq!(semester_number("Semestre"), "");
    }

    #[test]
    fn test_catalog_key() {
        assert_eq!(catalog_key(RSI, "Semestre 1"), Some("RSI-S1".to_string()));
        assert_eq!(catalog_key("", "Semestre 1"), None);
        assert_eq!(catalog_key(RSI, ""), None);
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.specialties().len(), 3);
        assert_eq!(catalog.semesters(), ["Semestre 1", "Semestre 2"]);

        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, ["RSI-S1", "SI-S1", "SI-S2", "SYM-S1", "SYM-S2"]);

        assert_eq!(catalog.lookup_modules(RSI, "Semestre 1").len(), 9);
        assert_eq!(
            catalog
                .lookup_modules("Systèmes Informatiques (SI)", "Semestre 2")
                .len(),
            3
        );
    }

    #[test]
    fn test_lookup_preserves_order() {
        let catalog = Catalog::builtin();
        let modules = catalog.lookup_modules(RSI, "Semestre 1");

        assert_eq!(modules[0].name, "Architecture des réseaux informatiques");
        assert!(modules[0].has_td && modules[0].has_tp);
        assert_eq!(modules[7].name, "Anglais scientifique 1");
        assert!(modules[7].is_exam_only());
        assert!((modules[7].coef - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_combination_is_empty() {
        let catalog = Catalog::builtin();

        assert!(catalog.lookup_modules(RSI, "Semestre 2").is_empty());
        assert!(catalog.lookup_modules("Unknown (XYZ)", "Semestre 1").is_empty());
        assert!(catalog.lookup_modules("", "").is_empty());
    }

    #[test]
    fn test_rejects_non_positive_coefficient() {
        let toml_str = r#"
specialties = ["A (A)"]
semesters = ["Semestre 1"]

[[modules.A-S1]]
name = "Broken"
ects = 2
coef = 0
"#;
        let err = Catalog::from_toml(toml_str).expect_err("coef 0 must be rejected");
        assert!(err.to_string().contains("coefficient"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let toml_str = r#"
specialties = ["A (A)"]
semesters = ["Semestre 1"]

[[modules.A-S1]]
name = "Twice"
ects = 2
coef = 2

[[modules.A-S1]]
name = "Twice"
ects = 1
coef = 1
"#;
        let err = Catalog::from_toml(toml_str).expect_err("duplicates must be rejected");
        assert!(err.to_string().contains("Duplicate"));
    }
}
