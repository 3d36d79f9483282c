//! Extension accessibility inference.

use crate::base::{Accessibility, DeclaredAccessibility};
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::{DeclarationId, SourceGraph};

use super::GraphMutator;

/// Infers access levels through extensions.
///
/// An extension without an explicit modifier takes the access level of the
/// type it extends. A member without an explicit modifier is capped at the
/// extension's level.
pub struct InferExtensionAccessibility;

impl GraphMutator for InferExtensionAccessibility {
    fn name(&self) -> &'static str {
        "extension-accessibility"
    }

    fn mutate(&self, graph: &mut SourceGraph, _configuration: &Configuration) -> Result<()> {
        let extensions: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| d.kind.is_extension())
            .map(|(id, _)| id)
            .collect();

        for extension in &extensions {
            if graph[*extension].accessibility.is_explicit {
                continue;
            }
            let expected = graph[*extension].kind.extended_type_kind();
            let extended = graph[*extension].related.iter().find_map(|r| {
                let reference = graph.get_reference(*r)?;
                if expected.is_some_and(|kind| reference.kind != kind) {
                    return None;
                }
                graph.resolved_target(reference)
            });
            if let Some(extended) = extended {
                let value = graph[extended].accessibility.value;
                graph[*extension].accessibility = DeclaredAccessibility::inferred(value);
            }
        }

        for extension in &extensions {
            let cap = graph[*extension].accessibility.value;
            let members = graph[*extension].declarations.clone();
            for member in members {
                if graph[member].accessibility.is_explicit {
                    continue;
                }
                let effective = cap.min(Accessibility::Public);
                graph[member].accessibility = DeclaredAccessibility::inferred(effective);
            }
        }
        Ok(())
    }
}
