//! Seed rules: declarations retained without an incoming reference.

use smol_str::SmolStr;

use crate::base::Kind;
use crate::config::Configuration;
use crate::graph::{DeclarationId, Parent, ReferenceId, SourceGraph};

const OBJC: &str = "objc";
const OBJC_MEMBERS: &str = "objcMembers";
const MAIN: &str = "main";
const PROPERTY_WRAPPER: &str = "propertyWrapper";

/// Collect the initial worklist for the retention fixpoint.
pub fn collect(graph: &SourceGraph, configuration: &Configuration) -> Vec<DeclarationId> {
    let mut seeds = Vec::new();

    for (id, declaration) in graph.declarations() {
        // Marked ahead of the analyzer: entry-point files, external
        // conformance witnesses, codable key enums.
        if declaration.is_retained {
            seeds.push(id);
            continue;
        }

        if declaration.has_attribute(MAIN) {
            seeds.push(id);
            continue;
        }

        if configuration.retain_public && declaration.accessibility.value.is_exported() {
            seeds.push(id);
            continue;
        }

        if configuration.retain_objc_annotated && is_objc_annotated(graph, id) {
            seeds.push(id);
            continue;
        }

        if is_test_harness_seed(graph, configuration, id) {
            seeds.push(id);
            continue;
        }

        if is_property_wrapper_member(graph, id) {
            seeds.push(id);
            continue;
        }

        if is_cross_module_referenced(graph, id) {
            seeds.push(id);
        }
    }

    seeds
}

/// A declaration referenced from a different analyzed module is in use
/// from that module's point of view, whatever happens to the referencing
/// code. Same-module references only count through reachability.
fn is_cross_module_referenced(graph: &SourceGraph, id: DeclarationId) -> bool {
    let declaration = &graph[id];
    graph.references_to(&declaration.usr).iter().any(|r| {
        let Some(reference) = graph.get_reference(*r) else {
            return false;
        };
        if reference.kind != declaration.kind {
            return false;
        }
        referencing_module(graph, *r).is_some_and(|module| module != declaration.module)
    })
}

fn referencing_module(graph: &SourceGraph, reference: ReferenceId) -> Option<SmolStr> {
    let mut parent = graph.get_reference(reference)?.parent;
    loop {
        match parent? {
            Parent::Declaration(decl) => return Some(graph[decl].module.clone()),
            Parent::Reference(outer) => parent = graph.get_reference(outer)?.parent,
        }
    }
}

/// `@objc` or `@objcMembers` on the declaration itself, or membership in an
/// `@objcMembers` type. A bare `@objc` on the enclosing type does not
/// extend to its members.
fn is_objc_annotated(graph: &SourceGraph, id: DeclarationId) -> bool {
    let declaration = &graph[id];
    if declaration.has_attribute(OBJC) || declaration.has_attribute(OBJC_MEMBERS) {
        return true;
    }
    graph
        .parent_declaration(id)
        .is_some_and(|parent| graph[parent].has_attribute(OBJC_MEMBERS))
}

/// Subclasses of configured foreign test-harness base classes, plus their
/// `test*`/`setUp`/`tearDown` methods.
fn is_test_harness_seed(
    graph: &SourceGraph,
    configuration: &Configuration,
    id: DeclarationId,
) -> bool {
    if configuration.external_test_base_class_usrs.is_empty() {
        return false;
    }
    let declaration = &graph[id];
    if declaration.kind == Kind::Class {
        return inherits_test_base(graph, configuration, id);
    }
    if matches!(
        declaration.kind,
        Kind::FunctionMethodInstance | Kind::FunctionMethodStatic | Kind::FunctionMethodClass
    ) {
        let is_test_method = declaration.name.as_deref().is_some_and(|name| {
            name.starts_with("test") || name == "setUp" || name == "tearDown"
        });
        if !is_test_method {
            return false;
        }
        return graph.parent_declaration(id).is_some_and(|parent| {
            graph[parent].kind == Kind::Class && inherits_test_base(graph, configuration, parent)
        });
    }
    false
}

fn inherits_test_base(
    graph: &SourceGraph,
    configuration: &Configuration,
    class: DeclarationId,
) -> bool {
    graph.inherited_type_references(class).iter().any(|r| {
        graph.get_reference(*r).is_some_and(|reference| {
            reference.kind == Kind::Class
                && configuration
                    .external_test_base_class_usrs
                    .contains(&reference.usr)
        })
    })
}

/// `wrappedValue`, `projectedValue`, and `init(wrappedValue:)` members of a
/// `@propertyWrapper` type are reached by the compiler's desugaring.
fn is_property_wrapper_member(graph: &SourceGraph, id: DeclarationId) -> bool {
    let declaration = &graph[id];
    let is_wrapper_member = declaration.name.as_deref().is_some_and(|name| {
        name == "wrappedValue" || name == "projectedValue" || name == "init(wrappedValue:)"
    });
    if !is_wrapper_member {
        return false;
    }
    graph
        .parent_declaration(id)
        .is_some_and(|parent| graph[parent].has_attribute(PROPERTY_WRAPPER))
}
