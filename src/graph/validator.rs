//! Debug-only structural validation.
//!
//! Graph invariants are not checked on every mutation; this validator runs
//! between passes in debug builds and reports the first violation found.

use super::entity::Parent;
use super::graph::SourceGraph;

/// Check the structural invariants of a populated graph:
///
/// 1. Every USR in the lookup index maps to a live declaration of one kind.
/// 2. Every resolved reference agrees with its target's kind.
/// 3. Every parent chain terminates at a top-level declaration or module.
/// 4. Every accessor's parent is a variable declaration.
/// 5. Extension members are no more accessible than their extension.
pub fn validate(graph: &SourceGraph) -> Result<(), String> {
    for (id, decl) in graph.declarations() {
        if graph.declaration_by_usr(&decl.usr).is_none() {
            return Err(format!("declaration {} missing from usr index", decl.usr));
        }

        let mut hops = 0usize;
        let mut current = Some(id);
        while let Some(node) = current {
            hops += 1;
            if hops > graph.declaration_count() + 1 {
                return Err(format!("parent cycle through {}", decl.usr));
            }
            current = graph.parent_declaration(node);
        }

        if decl.kind.is_accessor() {
            match graph.parent_declaration(id) {
                Some(parent) if graph[parent].kind.is_variable() => {}
                Some(parent) => {
                    return Err(format!(
                        "accessor {} parented by non-variable {}",
                        decl.usr, graph[parent].usr
                    ));
                }
                None => return Err(format!("accessor {} has no parent", decl.usr)),
            }
        }

        if decl.kind.is_extension() {
            for child in &decl.declarations {
                let member = &graph[*child];
                if member.accessibility.is_explicit {
                    continue;
                }
                if member.accessibility.value > decl.accessibility.value {
                    return Err(format!(
                        "extension member {} more accessible than extension {}",
                        member.usr, decl.usr
                    ));
                }
            }
        }
    }

    for (id, reference) in graph.references() {
        if let Some(target) = graph.resolved_target(reference) {
            if graph[target].kind != reference.kind {
                return Err(format!(
                    "resolved reference to {} disagrees with target kind",
                    reference.usr
                ));
            }
        }
        match reference.parent {
            Some(Parent::Declaration(parent)) => match graph.get_declaration(parent) {
                Some(decl) => {
                    let listed = if reference.is_related {
                        decl.related.contains(&id)
                    } else {
                        decl.references.contains(&id)
                    };
                    if !listed {
                        return Err(format!(
                            "reference to {} not listed by its parent {}",
                            reference.usr, decl.usr
                        ));
                    }
                }
                None => {
                    return Err(format!("reference to {} has dangling parent", reference.usr));
                }
            },
            Some(Parent::Reference(parent)) => {
                if graph.get_reference(parent).is_none() {
                    return Err(format!("reference to {} has dangling parent", reference.usr));
                }
            }
            None => {}
        }
    }

    Ok(())
}
