//! Seed rules: declarations retained without an incoming reference.

use deadwood::{Accessibility, Configuration, Kind};

use crate::helpers::assertions::*;
use crate::helpers::fixtures::Project;

fn public_class(project: &mut Project, usr: &str, name: &str, line: u32) {
    let occurrence = project
        .definition(Kind::Class, usr, name, line)
        .with_accessibility(Accessibility::Public, true);
    project.push(occurrence);
}

#[test]
fn test_retain_public_retains_exported_declarations_only() {
    let mut project = Project::new();
    public_class(&mut project, "c:Pub", "Pub", 1);
    project.def(Kind::Class, "c:Int", "Internal", 5);

    let graph = project.graph(&Configuration::new().with_retain_public(true));
    assert_retained(&graph, "c:Pub");
    assert_not_retained(&graph, "c:Int");
}

#[test]
fn test_retain_public_off_reports_public_declarations() {
    let mut project = Project::new();
    public_class(&mut project, "c:Pub", "Pub", 1);

    let result = project.scan(&Configuration::new());
    assert_unused(&result, "Pub");
}

#[test]
fn test_main_attribute_is_an_entry_point() {
    let mut project = Project::new();
    let annotated = project
        .definition(Kind::Struct, "c:App", "App", 1)
        .with_attributes(["main"]);
    project.push(annotated);

    let graph = project.graph(&Configuration::new());
    assert_retained(&graph, "c:App");
}

#[test]
fn test_objc_annotation_retains_declaration_but_not_members() {
    let mut project = Project::new();
    let annotated = project
        .definition(Kind::Class, "c:A", "A", 1)
        .with_attributes(["objc"]);
    project
        .push(annotated)
        .member(Kind::FunctionMethodInstance, "c:A.m", "m", 2, "c:A");

    let graph = project.graph(&Configuration::new().with_retain_objc_annotated(true));
    assert_retained(&graph, "c:A");
    assert_not_retained(&graph, "c:A.m");
}

#[test]
fn test_objc_members_annotation_extends_to_members() {
    let mut project = Project::new();
    let annotated = project
        .definition(Kind::Class, "c:A", "A", 1)
        .with_attributes(["objcMembers"]);
    project
        .push(annotated)
        .member(Kind::FunctionMethodInstance, "c:A.m", "m", 2, "c:A");

    let graph = project.graph(&Configuration::new().with_retain_objc_annotated(true));
    assert_retained(&graph, "c:A");
    assert_retained(&graph, "c:A.m");
}

#[test]
fn test_objc_annotations_require_the_flag() {
    let mut project = Project::new();
    let annotated = project
        .definition(Kind::Class, "c:A", "A", 1)
        .with_attributes(["objcMembers"]);
    project.push(annotated);

    let graph = project.graph(&Configuration::new());
    assert_not_retained(&graph, "c:A");
}

#[test]
fn test_test_harness_subclass_and_test_methods_are_retained() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:CoreTests", "CoreTests", 1)
        .relate(Kind::Class, "c:XCTestCase", "XCTestCase", 1, "c:CoreTests")
        .member(Kind::FunctionMethodInstance, "c:t.testParse", "testParse", 2, "c:CoreTests")
        .member(Kind::FunctionMethodInstance, "c:t.setUp", "setUp", 3, "c:CoreTests")
        .member(Kind::FunctionMethodInstance, "c:t.helper", "helper", 4, "c:CoreTests");

    let configuration =
        Configuration::new().with_external_test_base_class_usrs(["c:XCTestCase"]);
    let graph = project.graph(&configuration);
    assert_retained(&graph, "c:CoreTests");
    assert_retained(&graph, "c:t.testParse");
    assert_retained(&graph, "c:t.setUp");
    assert_not_retained(&graph, "c:t.helper");
}

#[test]
fn test_test_harness_base_reached_through_intermediate_class() {
    let mut project = Project::new();
    project
        .def(Kind::Class, "c:BaseTests", "BaseTests", 1)
        .relate(Kind::Class, "c:XCTestCase", "XCTestCase", 1, "c:BaseTests")
        .def(Kind::Class, "c:ParserTests", "ParserTests", 5)
        .relate(Kind::Class, "c:BaseTests", "BaseTests", 5, "c:ParserTests")
        .member(Kind::FunctionMethodInstance, "c:p.testX", "testX", 6, "c:ParserTests");

    let configuration =
        Configuration::new().with_external_test_base_class_usrs(["c:XCTestCase"]);
    let graph = project.graph(&configuration);
    assert_retained(&graph, "c:ParserTests");
    assert_retained(&graph, "c:p.testX");
}

#[test]
fn test_property_wrapper_interface_members_are_retained() {
    let mut project = Project::new();
    let wrapper = project
        .definition(Kind::Struct, "c:Clamped", "Clamped", 1)
        .with_attributes(["propertyWrapper"]);
    project
        .push(wrapper)
        .member(Kind::VarInstance, "c:Clamped.wrappedValue", "wrappedValue", 2, "c:Clamped")
        .member(Kind::VarInstance, "c:Clamped.projectedValue", "projectedValue", 3, "c:Clamped")
        .member(Kind::VarInstance, "c:Clamped.bound", "bound", 4, "c:Clamped");
    // Keep the wrapper type itself alive so member verdicts are observable.
    project.in_module("Client").refer_top(Kind::Struct, "c:Clamped", 1);

    let graph = project.graph(&Configuration::new());
    assert_retained(&graph, "c:Clamped.wrappedValue");
    assert_retained(&graph, "c:Clamped.projectedValue");
    assert_not_retained(&graph, "c:Clamped.bound");
}

#[test]
fn test_entry_point_file_retains_top_levels_only() {
    let mut project = Project::new();
    project.in_file("/Main/main.swift");
    project
        .def(Kind::FunctionFree, "c:run", "run", 1)
        .member(Kind::VarLocal, "c:run.tmp", "tmp", 2, "c:run");
    project.in_file("/Main/other.swift");
    project.def(Kind::Class, "c:Other", "Other", 1);

    let configuration = Configuration::new().with_entry_point_filenames(["main.swift"]);
    let graph = project.graph(&configuration);
    assert_retained(&graph, "c:run");
    assert_not_retained(&graph, "c:run.tmp");
    assert_not_retained(&graph, "c:Other");
}

#[test]
fn test_unknown_entry_point_file_is_a_configuration_error() {
    let mut project = Project::new();
    project.def(Kind::Class, "c:A", "A", 1);

    let configuration = Configuration::new().with_entry_point_filenames(["missing.swift"]);
    let error = project.try_scan(&configuration).unwrap_err();
    assert!(matches!(error, deadwood::Error::Configuration(_)));
}
