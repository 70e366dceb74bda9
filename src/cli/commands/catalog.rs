//! Catalog command handler

use super::selection::{resolve_semester, resolve_specialty};
use moyenne::catalog::{catalog_key, specialty_code, Catalog};
use moyenne::report::format_weight;
use std::fmt::Write;

/// Run the catalog command.
pub fn run(catalog: &Catalog, specialty: Option<&str>, semester: Option<&str>) {
    match specialty {
        None => print!("{}", describe_catalog(catalog)),
        Some(input) => {
            let specialty = resolve_specialty(catalog, input);
            let semesters = semester.map_or_else(
                || catalog.semesters().to_vec(),
                |s| vec![resolve_semester(catalog, s)],
            );
            for semester in &semesters {
                print!("{}", describe_modules(catalog, &specialty, semester));
            }
        }
    }
}

/// Overview of specialties, semesters and registered module lists
fn describe_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("\n=== Specialties ===\n\n");
    for (i, name) in catalog.specialties().iter().enumerate() {
        let _ = writeln!(out, "  {}. {name}", i + 1);
    }

    out.push_str("\n=== Semesters ===\n\n");
    for (i, name) in catalog.semesters().iter().enumerate() {
        let _ = writeln!(out, "  {}. {name}", i + 1);
    }

    out.push_str("\n=== Module lists ===\n\n");
    for key in catalog.keys() {
        let modules = catalog.modules_for_key(key);
        let ects: f64 = modules.iter().map(|m| m.ects).sum();
        let _ = writeln!(
            out,
            "  {key:<8} {} module(s), {} ECTS",
            modules.len(),
            format_weight(ects)
        );
    }
    out
}

/// Module table of one specialty and semester
fn describe_modules(catalog: &Catalog, specialty: &str, semester: &str) -> String {
    let code = specialty_code(specialty);
    let title = if code.is_empty() { specialty } else { code };
    let mut out = format!("\n=== {title} - {semester} ===\n\n");

    let modules = catalog.lookup_modules(specialty, semester);
    if modules.is_empty() {
        let key = catalog_key(specialty, semester).unwrap_or_default();
        let _ = writeln!(out, "  No modules registered for {key}.");
        return out;
    }

    let width = modules
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "  {:>2}  {:<width$}  ECTS  Coef  Assessed by", "#", "Module");
    for (i, module) in modules.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}  {:<width$}  {:>4}  {:>4}  {}",
            i + 1,
            module.name,
            format_weight(module.ects),
            format_weight(module.coef),
            module.components_label()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_catalog_lists_everything() {
        let out = describe_catalog(&Catalog::builtin());
        assert!(out.contains("  1. Réseaux et Systèmes Informatiques (RSI)"));
        assert!(out.contains("  2. Semestre 2"));
        assert!(out.contains("RSI-S1   9 module(s), 18 ECTS"));
        assert!(!out.contains("RSI-S2"));
    }

    #[test]
    fn test_describe_modules() {
        let catalog = Catalog::builtin();
        let out = describe_modules(&catalog, "Systèmes Informatiques (SI)", "Semestre 2");
        assert!(out.starts_with("\n=== SI - Semestre 2 ===\n"));
        assert!(out.contains("Systèmes distribués"));
        assert!(out.contains("Exam + TD"));
    }

    #[test]
    fn test_describe_modules_unregistered() {
        let catalog = Catalog::builtin();
        let out = describe_modules(
            &catalog,
            "Réseaux et Systèmes Informatiques (RSI)",
            "Semestre 2",
        );
        assert!(out.contains("No modules registered for RSI-S2."));
    }
}
