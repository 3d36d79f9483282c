//! Assign-only property detection.

use deadwood::{Accessibility, Configuration, Kind};

use crate::helpers::assertions::*;
use crate::helpers::fixtures::Project;

/// A retained class with one stored property and an initializer that
/// assigns to it. Returns with the property's outgoing references left to
/// the caller.
fn class_with_written_property(project: &mut Project) {
    let public = project
        .definition(Kind::Class, "c:C", "C", 1)
        .with_accessibility(Accessibility::Public, true);
    project
        .push(public)
        .member(Kind::VarInstance, "c:C.x", "x", 2, "c:C")
        .member(Kind::FunctionConstructor, "c:C.init", "init", 3, "c:C");
    let write = project
        .reference(Kind::VarInstance, "c:C.x", 4)
        .with_container("c:C.init")
        .write();
    project.push(write);
    project.in_module("Client").refer_top(Kind::FunctionConstructor, "c:C.init", 1);
    project.in_module("Main");
}

fn config() -> Configuration {
    Configuration::new().with_retain_public(true)
}

#[test]
fn test_write_only_property_with_literal_initializer() {
    let mut project = Project::new();
    class_with_written_property(&mut project);

    let result = project.scan(&config());
    assert_assign_only(&result, "x");
}

#[test]
fn test_flag_suppresses_the_rule() {
    let mut project = Project::new();
    class_with_written_property(&mut project);

    let configuration = config().with_retain_assign_only_properties(true);
    let result = project.scan(&configuration);
    assert!(result.assign_only.is_empty());
}

#[test]
fn test_read_reference_disqualifies() {
    let mut project = Project::new();
    class_with_written_property(&mut project);
    // A read of the property from a live function.
    project
        .member(Kind::FunctionMethodInstance, "c:C.read", "read", 5, "c:C")
        .refer_from(Kind::VarInstance, "c:C.x", 6, "c:C.read");
    project.in_module("Client").refer_top(Kind::FunctionMethodInstance, "c:C.read", 2);

    let result = project.scan(&config());
    assert!(result.assign_only.is_empty());
}

#[test]
fn test_complex_initializer_keeps_the_property() {
    let mut project = Project::new();
    class_with_written_property(&mut project);
    // The initializer expression calls a free function; removing the
    // property could drop that call's effects.
    project
        .def(Kind::FunctionFree, "c:makeDefault", "makeDefault", 9)
        .refer_from(Kind::FunctionFree, "c:makeDefault", 2, "c:C.x");

    let result = project.scan(&config());
    assert!(result.assign_only.is_empty());
}

#[test]
fn test_simple_constructor_initializer_is_trivial() {
    let mut project = Project::new();
    class_with_written_property(&mut project);
    // `var x = Box()`: the initializer references only a type and its
    // initializer.
    project
        .def(Kind::Class, "c:Box", "Box", 9)
        .member(Kind::FunctionConstructor, "c:Box.init", "init", 10, "c:Box")
        .refer_from(Kind::Class, "c:Box", 2, "c:C.x")
        .refer_from(Kind::FunctionConstructor, "c:Box.init", 2, "c:C.x");

    let result = project.scan(&config());
    assert_assign_only(&result, "x");
}

#[test]
fn test_computed_property_is_never_assign_only() {
    let mut project = Project::new();
    class_with_written_property(&mut project);
    project.member(Kind::FunctionAccessorGetter, "c:C.x.get", "x", 2, "c:C.x");

    let result = project.scan(&config());
    assert!(result.assign_only.is_empty());
}

#[test]
fn test_lazy_property_is_conservative_by_default() {
    let mut project = Project::new();
    let public = project
        .definition(Kind::Class, "c:C", "C", 1)
        .with_accessibility(Accessibility::Public, true);
    let lazy = project
        .definition(Kind::VarInstance, "c:C.x", "x", 2)
        .with_container("c:C")
        .with_modifiers(["lazy"]);
    project
        .push(public)
        .push(lazy)
        .member(Kind::FunctionConstructor, "c:C.init", "init", 3, "c:C");
    let write = project
        .reference(Kind::VarInstance, "c:C.x", 4)
        .with_container("c:C.init")
        .write();
    project.push(write);
    project.in_module("Client").refer_top(Kind::FunctionConstructor, "c:C.init", 1);

    let conservative = project.scan(&config());
    assert!(conservative.assign_only.is_empty());

    let aggressive = project.scan(&config().with_aggressive(true));
    assert_assign_only(&aggressive, "x");
}
