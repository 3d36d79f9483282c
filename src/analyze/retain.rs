//! The worklist retention fixpoint.
//!
//! Starting from the seed set, retaining a declaration enqueues every
//! declaration the rules force alive with it. The lattice (retained or not,
//! per declaration) is finite and the step function monotone, so the loop
//! terminates and its result does not depend on worklist order.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::Kind;
use crate::config::Configuration;
use crate::graph::{DeclarationId, SourceGraph};

const RAW_REPRESENTABLE_BASES: &[&str] =
    &["String", "Int", "Character", "Float", "Double", "RawRepresentable"];

/// Run the fixpoint over the seeded graph.
pub fn run(graph: &mut SourceGraph, configuration: &Configuration, seeds: Vec<DeclarationId>) {
    let mut worklist: VecDeque<DeclarationId> = seeds.into();
    let mut visited: FxHashSet<DeclarationId> = FxHashSet::default();

    while let Some(id) = worklist.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        graph.mark_retained(id);
        trace!(usr = %graph[id].usr, "retained");

        for neighbor in retained_neighbors(graph, configuration, id) {
            if !visited.contains(&neighbor) {
                worklist.push_back(neighbor);
            }
        }
    }
}

/// Everything that must be retained once `id` is.
fn retained_neighbors(
    graph: &SourceGraph,
    configuration: &Configuration,
    id: DeclarationId,
) -> Vec<DeclarationId> {
    let mut out = Vec::new();
    let declaration = &graph[id];

    // Ancestors: a live member keeps its enclosing scopes alive.
    out.extend(graph.ancestors(id));

    // Ordinary uses resolve to their in-graph targets.
    for r in &declaration.references {
        if let Some(target) = graph.get_reference(*r).and_then(|r| graph.resolved_target(r)) {
            out.push(target);
        }
    }

    // A live typealias keeps the aliased declaration alive.
    if declaration.kind == Kind::Typealias {
        for r in &declaration.related {
            if let Some(target) = graph.get_reference(*r).and_then(|r| graph.resolved_target(r)) {
                out.push(target);
            }
        }
    }

    // A live override keeps the declaration it overrides alive: removing
    // the base would change what the dispatcher can reach. The reverse
    // direction deliberately does not hold.
    if let Some(base) = graph.override_base(id) {
        out.push(base);
    }

    match declaration.kind {
        Kind::Protocol => protocol_neighbors(graph, configuration, id, &mut out),
        Kind::Class => {
            // Destructors and the implicit no-argument initializer run
            // whenever the class is instantiated.
            for child in &declaration.declarations {
                let member = &graph[*child];
                if member.kind == Kind::FunctionDestructor
                    || (member.kind == Kind::FunctionConstructor && member.is_implicit)
                {
                    out.push(*child);
                }
            }
        }
        Kind::Enum => {
            // Raw-value decoding can construct any case at runtime; bare
            // enums retain only the cases actually referenced.
            if is_raw_representable(graph, id) {
                for child in &declaration.declarations {
                    if graph[*child].kind == Kind::EnumElement {
                        out.push(*child);
                    }
                }
            }
        }
        _ => {}
    }

    // A requirement with default implementations keeps them alive even if
    // every conformer shadows them: removing a default changes dispatch.
    if let Some(parent) = graph.parent_declaration(id) {
        if graph[parent].kind == Kind::Protocol {
            let protocol_usr = graph[parent].usr.clone();
            default_implementations(graph, &protocol_usr, id, &mut out);
        }
    }

    // Generic type parameters and associated types live with the scope
    // that names them.
    for child in &declaration.declarations {
        let member = &graph[*child];
        if matches!(member.kind, Kind::GenericTypeParam | Kind::AssociatedType)
            && !graph.references_to(&member.usr).is_empty()
        {
            out.push(*child);
        }
    }

    out
}

/// Rules triggered by retaining a protocol: witnesses in every direct
/// conformer, and extension members that are themselves referenced. The
/// conservative gate additionally keeps default implementations of
/// property requirements.
fn protocol_neighbors(
    graph: &SourceGraph,
    configuration: &Configuration,
    protocol: DeclarationId,
    out: &mut Vec<DeclarationId>,
) {
    let protocol_usr = graph[protocol].usr.clone();
    let requirements: Vec<DeclarationId> = graph[protocol]
        .declarations
        .iter()
        .copied()
        .filter(|r| {
            let member = &graph[*r];
            member.name.is_some() && !member.kind.is_accessor()
        })
        .collect();

    for conformer in graph.conforming_declarations(&protocol_usr) {
        for requirement in &requirements {
            let selector = (graph[*requirement].kind, graph[*requirement].name.clone());
            for scope in witness_search_scope(graph, *conformer) {
                if let Some(witness) = graph[scope]
                    .declarations
                    .iter()
                    .copied()
                    .find(|m| witnesses_selector(&graph[*m], selector.0, selector.1.as_ref()))
                {
                    out.push(witness);
                }
            }
        }
    }

    for extension in graph.extensions_of(&protocol_usr) {
        for member in &graph[*extension].declarations {
            if !graph.references_to(&graph[*member].usr).is_empty() {
                out.push(*member);
            }
        }
    }

    if !configuration.aggressive {
        for requirement in &requirements {
            if graph[*requirement].kind.is_variable() {
                default_implementations(graph, &protocol_usr, *requirement, out);
            }
        }
    }
}

/// Members of the protocol's extensions matching a requirement's selector.
fn default_implementations(
    graph: &SourceGraph,
    protocol_usr: &SmolStr,
    requirement: DeclarationId,
    out: &mut Vec<DeclarationId>,
) {
    let selector = (graph[requirement].kind, graph[requirement].name.clone());
    for extension in graph.extensions_of(protocol_usr) {
        for member in &graph[*extension].declarations {
            let candidate = &graph[*member];
            if candidate.kind == selector.0 && candidate.name == selector.1 {
                out.push(*member);
            }
        }
    }
}

/// Whether a member satisfies a requirement's selector. Kinds must match,
/// except that an associated type requirement is witnessed by a typealias.
fn witnesses_selector(
    member: &crate::graph::Declaration,
    kind: Kind,
    name: Option<&SmolStr>,
) -> bool {
    if member.name.as_ref() != name {
        return false;
    }
    member.kind == kind || (kind == Kind::AssociatedType && member.kind == Kind::Typealias)
}

/// Where witnesses of a conformance may live: the conforming declaration
/// itself, the extended type when the conformance is declared on an
/// extension, and the type's other extensions.
fn witness_search_scope(graph: &SourceGraph, conformer: DeclarationId) -> Vec<DeclarationId> {
    let mut scopes = vec![conformer];
    let declaration = &graph[conformer];
    if declaration.kind.is_extension() {
        let extended = declaration.related.iter().find_map(|r| {
            let reference = graph.get_reference(*r)?;
            matches!(reference.kind, Kind::Class | Kind::Struct | Kind::Enum)
                .then(|| graph.resolved_target(reference))
                .flatten()
        });
        if let Some(extended) = extended {
            scopes.push(extended);
            scopes.extend(graph.extensions_of(&graph[extended].usr).iter().copied());
        }
    } else {
        scopes.extend(graph.extensions_of(&declaration.usr).iter().copied());
    }
    scopes.sort_unstable();
    scopes.dedup();
    scopes
}

/// An enum whose inheritance clause names a raw-value base.
pub(crate) fn is_raw_representable(graph: &SourceGraph, declaration: DeclarationId) -> bool {
    graph[declaration].related.iter().any(|r| {
        graph.get_reference(*r).is_some_and(|reference| {
            reference
                .name
                .as_deref()
                .is_some_and(|name| RAW_REPRESENTABLE_BASES.contains(&name))
        })
    })
}
