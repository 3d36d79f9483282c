//! Implicit member synthesis.

use deadwood::{Configuration, Kind};

use crate::helpers::fixtures::Project;

fn implicit_members(project: &Project, type_usr: &str) -> Vec<String> {
    let graph = project.graph(&Configuration::new());
    let type_id = graph.declaration_by_usr(type_usr).unwrap();
    graph
        .get_declaration(type_id)
        .unwrap()
        .declarations
        .iter()
        .filter_map(|c| {
            let child = graph.get_declaration(*c)?;
            child
                .is_implicit
                .then(|| child.name.as_deref().unwrap_or("").to_owned())
        })
        .collect()
}

#[test]
fn test_struct_gets_memberwise_initializer() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .member(Kind::VarInstance, "c:S.x", "x", 2, "c:S");

    assert!(implicit_members(&project, "c:S").contains(&"init".to_owned()));
}

#[test]
fn test_user_initializer_suppresses_memberwise_synthesis() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .member(Kind::VarInstance, "c:S.x", "x", 2, "c:S")
        .member(Kind::FunctionConstructor, "c:S.init", "init", 3, "c:S");

    assert!(!implicit_members(&project, "c:S").contains(&"init".to_owned()));
}

#[test]
fn test_private_stored_property_suppresses_memberwise_synthesis() {
    let mut project = Project::new();
    let hidden = project
        .definition(Kind::VarInstance, "c:S.x", "x", 2)
        .with_container("c:S")
        .with_accessibility(deadwood::Accessibility::Private, true);
    project.def(Kind::Struct, "c:S", "S", 1).push(hidden);

    assert!(!implicit_members(&project, "c:S").contains(&"init".to_owned()));
}

#[test]
fn test_codable_conformance_synthesizes_coding_members() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .relate(Kind::Protocol, "s:Codable", "Codable", 1, "c:S")
        .member(Kind::VarInstance, "c:S.x", "x", 2, "c:S");

    let members = implicit_members(&project, "c:S");
    assert!(members.contains(&"init(from:)".to_owned()));
    assert!(members.contains(&"encode(to:)".to_owned()));
}

#[test]
fn test_equatable_conformance_synthesizes_operator() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .relate(Kind::Protocol, "s:Equatable", "Equatable", 1, "c:S");

    assert!(implicit_members(&project, "c:S").contains(&"==".to_owned()));
}

#[test]
fn test_user_written_equality_suppresses_synthesis() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .relate(Kind::Protocol, "s:Equatable", "Equatable", 1, "c:S")
        .member(Kind::FunctionOperatorInfix, "c:S.eq", "==", 2, "c:S");

    let graph = project.graph(&Configuration::new());
    let type_id = graph.declaration_by_usr("c:S").unwrap();
    let implicit_eq = graph
        .get_declaration(type_id)
        .unwrap()
        .declarations
        .iter()
        .filter(|c| {
            let child = graph.get_declaration(**c).unwrap();
            child.name.as_deref() == Some("==") && child.is_implicit
        })
        .count();
    assert_eq!(implicit_eq, 0);
}

#[test]
fn test_implicit_members_are_never_reported() {
    let mut project = Project::new();
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .member(Kind::VarInstance, "c:S.x", "x", 2, "c:S");

    let result = project.scan(&Configuration::new());
    assert!(
        !result
            .unreferenced
            .iter()
            .any(|i| i.name.as_deref() == Some("init")),
        "synthesized members are not user-removable and must not be reported"
    );
}
