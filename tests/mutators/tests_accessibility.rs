//! Extension accessibility inference.

use deadwood::{Accessibility, Configuration, Kind};

use crate::helpers::fixtures::Project;

#[test]
fn test_extension_inherits_extended_type_accessibility() {
    let mut project = Project::new();
    let public_type = project
        .definition(Kind::Class, "c:A", "A", 1)
        .with_accessibility(Accessibility::Public, true);
    project
        .push(public_type)
        .def(Kind::ExtensionClass, "c:A.ext", "A", 5)
        .relate(Kind::Class, "c:A", "A", 5, "c:A.ext")
        .member(Kind::FunctionMethodInstance, "c:A.ext.m", "m", 6, "c:A.ext");

    let graph = project.graph(&Configuration::new().with_retain_public(true));
    let extension = graph.declaration_by_usr("c:A.ext").unwrap();
    let member = graph.declaration_by_usr("c:A.ext.m").unwrap();

    // Inferred extension accessibility follows the extended type; the
    // member is capped at the extension's level.
    assert_eq!(
        graph.get_declaration(extension).unwrap().accessibility.value,
        Accessibility::Public
    );
    assert_eq!(
        graph.get_declaration(member).unwrap().accessibility.value,
        Accessibility::Public
    );
    // With retain_public on, the now-public extension member is seeded.
    assert!(graph.is_retained(member));
}

#[test]
fn test_explicit_extension_accessibility_wins() {
    let mut project = Project::new();
    let public_type = project
        .definition(Kind::Class, "c:A", "A", 1)
        .with_accessibility(Accessibility::Public, true);
    let private_extension = project
        .definition(Kind::ExtensionClass, "c:A.ext", "A", 5)
        .with_accessibility(Accessibility::FilePrivate, true);
    project
        .push(public_type)
        .push(private_extension)
        .relate(Kind::Class, "c:A", "A", 5, "c:A.ext")
        .member(Kind::FunctionMethodInstance, "c:A.ext.m", "m", 6, "c:A.ext");

    let graph = project.graph(&Configuration::new());
    let member = graph.declaration_by_usr("c:A.ext.m").unwrap();
    assert_eq!(
        graph.get_declaration(member).unwrap().accessibility.value,
        Accessibility::FilePrivate
    );
}

#[test]
fn test_explicit_member_accessibility_is_untouched() {
    let mut project = Project::new();
    let extension = project
        .definition(Kind::ExtensionClass, "c:A.ext", "A", 5)
        .with_accessibility(Accessibility::Internal, true);
    let member = project
        .definition(Kind::FunctionMethodInstance, "c:A.ext.m", "m", 6)
        .with_container("c:A.ext")
        .with_accessibility(Accessibility::Private, true);
    project
        .def(Kind::Class, "c:A", "A", 1)
        .push(extension)
        .relate(Kind::Class, "c:A", "A", 5, "c:A.ext")
        .push(member);

    let graph = project.graph(&Configuration::new());
    let member = graph.declaration_by_usr("c:A.ext.m").unwrap();
    assert_eq!(
        graph.get_declaration(member).unwrap().accessibility.value,
        Accessibility::Private
    );
}
