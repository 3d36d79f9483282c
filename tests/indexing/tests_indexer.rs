//! Indexer behavior: materialization, containers, rewiring, resolution.

use deadwood::{Configuration, Error, Kind, Parent};

use crate::helpers::fixtures::Project;

#[test]
fn test_duplicate_definitions_are_deduplicated() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .def(Kind::Class, "c:A", "A", 1);

    let graph = project.indexed().unwrap();
    assert_eq!(graph.declaration_count(), 1);
}

#[test]
fn test_conflicting_kinds_for_one_usr_fail() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .def(Kind::Struct, "c:A", "A", 5);

    let error = project.indexed().unwrap_err();
    assert!(matches!(error, Error::IndexInconsistency(_)));
}

#[test]
fn test_dangling_container_fails() {
    let mut project = Project::new();
    project.member(Kind::FunctionMethodInstance, "c:A.m", "m", 1, "c:Missing");

    let error = project.indexed().unwrap_err();
    assert!(matches!(error, Error::IndexInconsistency(_)));
}

#[test]
fn test_dangling_reference_container_fails() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .refer_from(Kind::Class, "c:A", 2, "c:Missing");

    let error = project.indexed().unwrap_err();
    assert!(matches!(error, Error::IndexInconsistency(_)));
}

#[test]
fn test_top_level_references_get_a_module_container() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .refer_top(Kind::Class, "c:A", 9);

    let graph = project.indexed().unwrap();
    let module = graph.declaration_by_usr("module:Main").unwrap();
    assert_eq!(graph.get_declaration(module).unwrap().kind, Kind::Module);

    let incoming = graph.references_to("c:A");
    assert_eq!(incoming.len(), 1);
    let reference = graph.get_reference(incoming[0]).unwrap();
    assert_eq!(reference.parent, Some(Parent::Declaration(module)));
}

#[test]
fn test_container_defined_in_a_later_unit_resolves() {
    let mut project = Project::new();
    project.in_file("/Main/member.swift");
    project.member(Kind::FunctionMethodInstance, "c:A.m", "m", 1, "c:A");
    project.in_file("/Main/type.swift");
    project.def(Kind::Class, "c:A", "A", 1);

    let graph = project.indexed().unwrap();
    let class = graph.declaration_by_usr("c:A").unwrap();
    let method = graph.declaration_by_usr("c:A.m").unwrap();
    assert_eq!(graph.parent_declaration(method), Some(class));
}

#[test]
fn test_accessors_are_reparented_under_their_property() {
    // The provider reports the accessor under the type; the graph wants it
    // under the property it accesses.
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:C", "C", 1)
        .member(Kind::VarInstance, "c:C.x", "x", 2, "c:C")
        .member(Kind::FunctionAccessorGetter, "c:C.x.get", "x", 2, "c:C");

    let graph = project.indexed().unwrap();
    let property = graph.declaration_by_usr("c:C.x").unwrap();
    let accessor = graph.declaration_by_usr("c:C.x.get").unwrap();
    assert_eq!(graph.parent_declaration(accessor), Some(property));
}

#[test]
fn test_enum_elements_are_reparented_under_the_preceding_enum() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:Scope", "Scope", 1)
        .member(Kind::Enum, "c:Scope.E", "E", 2, "c:Scope")
        .member(Kind::EnumElement, "c:Scope.E.a", "a", 3, "c:Scope");

    let graph = project.indexed().unwrap();
    let enum_id = graph.declaration_by_usr("c:Scope.E").unwrap();
    let case = graph.declaration_by_usr("c:Scope.E.a").unwrap();
    assert_eq!(graph.parent_declaration(case), Some(enum_id));
}

#[test]
fn test_conformance_index_is_populated() {
    let mut project = Project::new();
    project
        .def(Kind::Protocol, "c:P", "P", 1)
        .def(Kind::Class, "c:C", "C", 5)
        .relate(Kind::Protocol, "c:P", "P", 5, "c:C");

    let graph = project.indexed().unwrap();
    let class = graph.declaration_by_usr("c:C").unwrap();
    assert_eq!(graph.conforming_declarations("c:P"), &[class]);
}

#[test]
fn test_extension_index_is_populated() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .def(Kind::ExtensionClass, "c:A.ext", "A", 5)
        .relate(Kind::Class, "c:A", "A", 5, "c:A.ext");

    let graph = project.indexed().unwrap();
    let extension = graph.declaration_by_usr("c:A.ext").unwrap();
    assert_eq!(graph.extensions_of("c:A"), &[extension]);
}

#[test]
fn test_unresolved_references_survive_as_externals() {
    let mut project = Project::new();
    project
        .def(Kind::FunctionFree, "c:f", "f", 1)
        .refer_from(Kind::FunctionFree, "c:Foreign.print", 2, "c:f");

    let graph = project.indexed().unwrap();
    assert_eq!(graph.references_to("c:Foreign.print").len(), 1);
    assert!(graph.declaration_by_usr("c:Foreign.print").is_none());

    // Externals never fail the run.
    let result = project.scan(&Configuration::new());
    assert_eq!(result.unreferenced.len(), 1);
}

#[test]
fn test_two_runs_build_identical_reports() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:A", "A", 1)
        .member(Kind::FunctionMethodInstance, "c:A.m", "m", 2, "c:A")
        .def(Kind::Class, "c:B", "B", 5)
        .refer_from(Kind::Class, "c:B", 3, "c:A.m");

    let configuration = Configuration::new();
    assert_eq!(project.scan(&configuration), project.scan(&configuration));
}
