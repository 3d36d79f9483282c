//! Linking overrides to the declarations they override.

use crate::base::Kind;
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::{DeclarationId, SourceGraph};

use super::GraphMutator;

/// For every member marked `override`, finds the nearest ancestor class
/// member with the same selector and records the link. The analyzer uses
/// the chains for retention (a live override keeps its base alive) and for
/// parameter-usage propagation.
pub struct BuildOverrideChains;

impl GraphMutator for BuildOverrideChains {
    fn name(&self) -> &'static str {
        "override-chains"
    }

    fn mutate(&self, graph: &mut SourceGraph, _configuration: &Configuration) -> Result<()> {
        let overrides: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| d.is_override() && (d.kind.is_function() || d.kind.is_variable()))
            .map(|(id, _)| id)
            .collect();

        for overriding in overrides {
            let Some(class) = graph.parent_declaration(overriding) else {
                continue;
            };
            if graph[class].kind != Kind::Class {
                continue;
            }
            let selector = (graph[overriding].kind, graph[overriding].name.clone());
            let base = graph.superclass_chain(class).into_iter().find_map(|ancestor| {
                graph[ancestor].declarations.iter().copied().find(|m| {
                    let member = &graph[*m];
                    member.kind == selector.0 && member.name == selector.1
                })
            });
            if let Some(base) = base {
                graph.set_override(overriding, base);
            }
        }
        Ok(())
    }
}
