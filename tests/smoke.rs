//! Integration smoke tests for `moyenne`

use moyenne::catalog::Catalog;
use moyenne::get_version;

#[test]
fn version_is_not_empty() {
    assert!(!get_version().trim().is_empty());
}

#[test]
fn builtin_catalog_has_every_specialty() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.specialties().len(), 3);
    assert_eq!(catalog.semesters().len(), 2);
    assert_eq!(catalog.keys().count(), 5);
}
