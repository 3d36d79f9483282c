//! Pipeline idempotence: running the mutators twice is running them once.

use deadwood::{analyze::Analyzer, mutate, report, Configuration, Kind};

use crate::helpers::fixtures::Project;

fn busy_project() -> Project {
    let mut project = Project::new();
    let annotated = project
        .definition(Kind::Class, "c:Legacy", "Legacy", 20)
        .with_comment("// periphery:ignore");
    project
        .def(Kind::Struct, "c:S", "S", 1)
        .relate(Kind::Protocol, "s:Codable", "Codable", 1, "c:S")
        .member(Kind::VarInstance, "c:S.x", "x", 2, "c:S")
        .def(Kind::Class, "c:B", "B", 5)
        .member(Kind::FunctionMethodInstance, "c:B.m", "m", 6, "c:B")
        .def(Kind::Class, "c:Sub", "Sub", 9)
        .relate(Kind::Class, "c:B", "B", 9, "c:Sub")
        .def(Kind::ExtensionClass, "c:B.ext", "B", 13)
        .relate(Kind::Class, "c:B", "B", 13, "c:B.ext")
        .member(Kind::FunctionMethodInstance, "c:B.ext.helper", "helper", 14, "c:B.ext")
        .push(annotated);
    let overriding = project
        .definition(Kind::FunctionMethodInstance, "c:Sub.m", "m", 10)
        .with_container("c:Sub")
        .with_modifiers(["override"]);
    project.push(overriding);
    project.in_module("Client").refer_top(Kind::FunctionMethodInstance, "c:Sub.m", 1);
    project
}

#[test]
fn test_running_mutators_twice_changes_nothing() {
    let configuration = Configuration::new();
    let project = busy_project();

    let mut once = project.indexed().unwrap();
    mutate::run_all(&mut once, &configuration).unwrap();
    Analyzer::new(&configuration).analyze(&mut once);

    let mut twice = project.indexed().unwrap();
    mutate::run_all(&mut twice, &configuration).unwrap();
    mutate::run_all(&mut twice, &configuration).unwrap();
    Analyzer::new(&configuration).analyze(&mut twice);

    assert_eq!(report::build(&once), report::build(&twice));
    assert_eq!(once.declaration_count(), twice.declaration_count());
}

#[test]
fn test_analyzer_is_a_fixpoint() {
    let configuration = Configuration::new();
    let project = busy_project();
    let mut graph = project.indexed().unwrap();
    mutate::run_all(&mut graph, &configuration).unwrap();

    Analyzer::new(&configuration).analyze(&mut graph);
    let first: Vec<bool> = graph.declarations().map(|(_, d)| d.is_retained).collect();

    Analyzer::new(&configuration).analyze(&mut graph);
    let second: Vec<bool> = graph.declarations().map(|(_, d)| d.is_retained).collect();

    assert_eq!(first, second);
}
