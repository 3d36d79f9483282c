//! Assign-only property detection.
//!
//! A stored property that is only ever written can be removed along with
//! its assignments, but only when its initializer is trivial: dropping a
//! non-trivial initializer could drop a side effect. Triviality is judged
//! from the declaration's outgoing reference shape: literals and `nil`
//! produce no references, and a simple construction references only the
//! type and its initializer.

use crate::base::Kind;
use crate::config::Configuration;
use crate::graph::{DeclarationId, SourceGraph};

const LAZY: &str = "lazy";

pub fn run(graph: &mut SourceGraph, configuration: &Configuration) {
    if configuration.retain_assign_only_properties {
        return;
    }

    let candidates: Vec<DeclarationId> = graph
        .declarations()
        .filter(|(id, d)| {
            d.kind == Kind::VarInstance && !d.is_implicit && !graph.is_ignored(*id)
        })
        .map(|(id, _)| id)
        .collect();

    for property in candidates {
        if !configuration.aggressive && graph[property].has_modifier(LAZY) {
            continue;
        }
        if is_computed(graph, property) {
            continue;
        }

        let incoming = graph.references_to(&graph[property].usr);
        if incoming.is_empty() {
            // Plain unused; the retention pass already handles it.
            continue;
        }
        let all_writes = incoming
            .iter()
            .all(|r| graph.get_reference(*r).is_some_and(|r| r.is_write));
        if !all_writes {
            continue;
        }

        if has_trivial_initializer(graph, property) {
            graph.mark_assign_only(property);
        }
    }
}

/// A property with an explicit accessor is computed and never assign-only.
fn is_computed(graph: &SourceGraph, property: DeclarationId) -> bool {
    graph[property].declarations.iter().any(|c| {
        let child = &graph[*c];
        child.kind.is_accessor() && !child.is_implicit
    })
}

/// Outgoing references are empty (literal or `nil` initializer) or name
/// only types and constructors (simple construction). Anything else -
/// function calls, member chains - may carry side effects.
fn has_trivial_initializer(graph: &SourceGraph, property: DeclarationId) -> bool {
    graph[property].references.iter().all(|r| {
        graph.get_reference(*r).is_some_and(|reference| {
            matches!(
                reference.kind,
                Kind::Class | Kind::Struct | Kind::Enum | Kind::Typealias | Kind::FunctionConstructor
            )
        })
    })
}
