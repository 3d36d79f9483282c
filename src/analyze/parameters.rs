//! Unused-parameter analysis.
//!
//! A parameter's usage is shared along dispatch groups: the positions of an
//! override chain use their parameters together, as do a protocol
//! requirement, its witnesses, and its default implementations. Parameters
//! of dead functions are not reported; the function itself is.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::Kind;
use crate::config::Configuration;
use crate::graph::{DeclarationId, SourceGraph};

pub fn run(graph: &mut SourceGraph, configuration: &Configuration) {
    let functions: Vec<DeclarationId> = graph
        .declarations()
        .filter(|(_, d)| d.kind.is_function() && !d.kind.is_accessor())
        .map(|(id, _)| id)
        .collect();

    let mut parameters: FxHashMap<DeclarationId, Vec<DeclarationId>> = FxHashMap::default();
    let mut used: FxHashMap<DeclarationId, Vec<bool>> = FxHashMap::default();

    for function in &functions {
        let mut list: Vec<DeclarationId> = graph[*function]
            .declarations
            .iter()
            .copied()
            .filter(|c| graph[*c].kind == Kind::VarParameter)
            .collect();
        list.sort_by(|a, b| graph[*a].location.cmp(&graph[*b].location));

        let usage: Vec<bool> = list
            .iter()
            .map(|p| !graph.references_to(&graph[*p].usr).is_empty())
            .collect();
        parameters.insert(*function, list);
        used.insert(*function, usage);
    }

    propagate_override_groups(graph, &functions, &mut used);
    propagate_protocol_groups(graph, configuration, &mut used);

    for function in &functions {
        if graph.is_foreign_witness(*function) {
            if let Some(usage) = used.get_mut(function) {
                usage.iter_mut().for_each(|u| *u = true);
            }
        }
    }

    // Emission: only live, non-suppressed functions report parameters.
    for function in &functions {
        let unused: Vec<DeclarationId> = if !graph.is_retained(*function)
            || graph.parameters_ignored(*function)
        {
            Vec::new()
        } else {
            let list = &parameters[function];
            let usage = &used[function];
            list.iter()
                .zip(usage)
                .filter(|(p, is_used)| !**is_used && reportable(graph, **p))
                .map(|(p, _)| *p)
                .collect()
        };
        graph.declaration_mut(*function).unused_parameters = unused;
    }
}

/// Anonymous (`_`) parameters are explicitly discarded in source; ignored
/// and implicit parameters are never reported either.
fn reportable(graph: &SourceGraph, parameter: DeclarationId) -> bool {
    let declaration = &graph[parameter];
    match declaration.name.as_deref() {
        None | Some("_") => false,
        Some(_) => !declaration.is_implicit && !graph.is_ignored(parameter),
    }
}

/// Union parameter usage position-wise across each override chain, in both
/// directions: a base parameter stays alive if any override uses it, and an
/// override's parameter stays alive if the base uses it.
fn propagate_override_groups(
    graph: &SourceGraph,
    functions: &[DeclarationId],
    used: &mut FxHashMap<DeclarationId, Vec<bool>>,
) {
    let mut grouped: FxHashSet<DeclarationId> = FxHashSet::default();

    for function in functions {
        if grouped.contains(function) {
            continue;
        }
        let mut root = *function;
        let mut hops = 0usize;
        while let Some(base) = graph.override_base(root) {
            root = base;
            hops += 1;
            if hops > functions.len() {
                break;
            }
        }

        let mut group = vec![root];
        let mut stack = vec![root];
        while let Some(next) = stack.pop() {
            for sub in graph.overriding_declarations(next) {
                if !group.contains(sub) {
                    group.push(*sub);
                    stack.push(*sub);
                }
            }
        }
        grouped.extend(group.iter().copied());

        if group.len() > 1 {
            union_positions(&group, used);
        }
    }
}

/// Union parameter usage across a protocol requirement, its witnesses in
/// every conformer, and its default implementations. With
/// `retain_unused_protocol_func_params` the whole group is kept as-is.
fn propagate_protocol_groups(
    graph: &SourceGraph,
    configuration: &Configuration,
    used: &mut FxHashMap<DeclarationId, Vec<bool>>,
) {
    let protocols: Vec<DeclarationId> = graph
        .declarations()
        .filter(|(_, d)| d.kind == Kind::Protocol)
        .map(|(id, _)| id)
        .collect();

    for protocol in protocols {
        let requirements: Vec<DeclarationId> = graph[protocol]
            .declarations
            .iter()
            .copied()
            .filter(|r| graph[*r].kind.is_function() && !graph[*r].kind.is_accessor())
            .collect();
        let protocol_usr = graph[protocol].usr.clone();

        for requirement in requirements {
            let selector = (graph[requirement].kind, graph[requirement].name.clone());
            let mut group = vec![requirement];

            for conformer in graph.conforming_declarations(&protocol_usr) {
                if let Some(witness) = graph[*conformer].declarations.iter().copied().find(|m| {
                    let member = &graph[*m];
                    member.kind == selector.0 && member.name == selector.1
                }) {
                    group.push(witness);
                }
            }
            for extension in graph.extensions_of(&protocol_usr) {
                if let Some(default) =
                    graph[*extension].declarations.iter().copied().find(|m| {
                        let member = &graph[*m];
                        member.kind == selector.0 && member.name == selector.1
                    })
                {
                    group.push(default);
                }
            }

            if configuration.retain_unused_protocol_func_params {
                for member in &group {
                    if let Some(usage) = used.get_mut(member) {
                        usage.iter_mut().for_each(|u| *u = true);
                    }
                }
            } else if group.len() > 1 {
                union_positions(&group, used);
            }
        }
    }

    // `retain_unused_protocol_func_params` also covers protocol-extension
    // members with no matching requirement.
    if configuration.retain_unused_protocol_func_params {
        let extension_members: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| d.kind == Kind::ExtensionProtocol)
            .flat_map(|(_, d)| d.declarations.iter().copied())
            .collect();
        for member in extension_members {
            if let Some(usage) = used.get_mut(&member) {
                usage.iter_mut().for_each(|u| *u = true);
            }
        }
    }
}

fn union_positions(group: &[DeclarationId], used: &mut FxHashMap<DeclarationId, Vec<bool>>) {
    let width = group
        .iter()
        .filter_map(|f| used.get(f).map(Vec::len))
        .max()
        .unwrap_or(0);
    for position in 0..width {
        let any_used = group
            .iter()
            .any(|f| used.get(f).and_then(|u| u.get(position)).copied() == Some(true));
        if !any_used {
            continue;
        }
        for function in group {
            if let Some(usage) = used.get_mut(function) {
                if let Some(slot) = usage.get_mut(position) {
                    *slot = true;
                }
            }
        }
    }
}
