//! Unit tests for collaborator assignment.

use crate::order::domain::{CollaboratorResolver, CreationPath, UNASSIGNED};
use rstest::rstest;

#[rstest]
#[case("Kitchen cabinetry in white MDF", "Edison")]
#[case("Stainless steel balcony railing", "Hélio")]
#[case("Lacquer finish application", "Pintura")]
fn detailed_table_serves_structured_imports(
    #[case] item: &str,
    #[case] expected: &str,
) {
    let resolver = CollaboratorResolver::workshop_defaults();
    assert_eq!(
        resolver.resolve(item, CreationPath::StructuredImport),
        expected
    );
}

#[rstest]
#[case("Cabinetry", "Edison")]
#[case("Metalwork", "Hélio")]
#[case("Glazing", "Eudes")]
fn simplified_table_serves_manual_entry(#[case] item: &str, #[case] expected: &str) {
    let resolver = CollaboratorResolver::workshop_defaults();
    assert_eq!(resolver.resolve(item, CreationPath::ManualEntry), expected);
}

#[test]
fn the_tables_are_disjoint() {
    let resolver = CollaboratorResolver::workshop_defaults();
    // A fully-qualified name means nothing on the manual path and vice
    // versa.
    assert_eq!(
        resolver.resolve("Kitchen cabinetry in white MDF", CreationPath::ManualEntry),
        UNASSIGNED
    );
    assert_eq!(
        resolver.resolve("Cabinetry", CreationPath::StructuredImport),
        UNASSIGNED
    );
}

#[test]
fn lookup_is_case_sensitive() {
    let resolver = CollaboratorResolver::workshop_defaults();
    assert_eq!(
        resolver.resolve("cabinetry", CreationPath::ManualEntry),
        UNASSIGNED
    );
}

#[test]
fn unknown_items_resolve_to_the_sentinel() {
    let resolver = CollaboratorResolver::workshop_defaults();
    assert_eq!(
        resolver.resolve("Submarine hull", CreationPath::StructuredImport),
        UNASSIGNED
    );
    assert_eq!(resolver.resolve("", CreationPath::ManualEntry), UNASSIGNED);
}

#[test]
fn custom_tables_can_be_injected() {
    let resolver = CollaboratorResolver::new(
        [("Spiral staircase".to_owned(), "Rivka".to_owned())],
        [("Stairs".to_owned(), "Rivka".to_owned())],
    );
    assert_eq!(
        resolver.resolve("Spiral staircase", CreationPath::StructuredImport),
        "Rivka"
    );
    assert_eq!(resolver.resolve("Stairs", CreationPath::ManualEntry), "Rivka");
    assert_eq!(
        resolver.resolve("Cabinetry", CreationPath::ManualEntry),
        UNASSIGNED
    );
}
