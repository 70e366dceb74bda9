//! Module definition model

use serde::{Deserialize, Serialize};

/// A module of a semester programme as registered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Display label (e.g., "Architecture des réseaux informatiques")
    pub name: String,

    /// Credit value; informational only
    pub ects: f64,

    /// Weight of this module's average in the general average
    pub coef: f64,

    /// Whether the module has a directed-study (TD) component
    #[serde(default)]
    pub has_td: bool,

    /// Whether the module has a practical (TP) component
    #[serde(default)]
    pub has_tp: bool,
}

impl ModuleDefinition {
    /// Create a new module definition
    ///
    /// # Arguments
    /// * `name` - Display label
    /// * `ects` - Credit value
    /// * `coef` - Weight used in the general average
    /// * `has_td` - Whether a TD component exists
    /// * `has_tp` - Whether a TP component exists
    #[must_use]
    pub fn new(name: impl Into<String>, ects: f64, coef: f64, has_td: bool, has_tp: bool) -> Self {
        Self {
            name: name.into(),
            ects,
            coef,
            has_td,
            has_tp,
        }
    }

    /// Whether the module is assessed by its exam alone
    #[must_use]
    pub const fn is_exam_only(&self) -> bool {
        !self.has_td && !self.has_tp
    }

    /// Short label of the assessed components (e.g., "Exam + TD + TP")
    #[must_use]
    pub fn components_label(&self) -> String {
        let mut label = String::from("Exam");
        if self.has_td {
            label.push_str(" + TD");
        }
        if self.has_tp {
            label.push_str(" + TP");
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_creation() {
        let module = ModuleDefinition::new("Big Data", 2.0, 2.0, false, true);

        assert_eq!(module.name, "Big Data");
        assert!((module.ects - 2.0).abs() < f64::EPSILON);
        assert!((module.coef - 2.0).abs() < f64::EPSILON);
        assert!(!module.has_td);
        assert!(module.has_tp);
        assert!(!module.is_exam_only());
    }

    #[test]
    fn test_components_label() {
        let both = ModuleDefinition::new("Systèmes distribués", 3.0, 3.0, true, true);
        let td_only = ModuleDefinition::new("Aide", 2.0, 2.0, true, false);
        let exam_only = ModuleDefinition::new("Anglais scientifique 1", 1.0, 1.0, false, false);

        assert_eq!(both.components_label(), "Exam + TD + TP");
        assert_eq!(td_only.components_label(), "Exam + TD");
        assert_eq!(exam_only.components_label(), "Exam");
        assert!(exam_only.is_exam_only());
    }

    #[test]
    fn test_components_default_to_absent() {
        let module: ModuleDefinition =
            toml::from_str("name = \"Ethics and deontology\"\nects = 2\ncoef = 2\n")
                .expect("valid module");
        assert!(module.is_exam_only());
    }
}
