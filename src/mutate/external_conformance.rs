//! Retention of witnesses for externally-declared protocols.

use crate::base::Kind;
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::{DeclarationId, SourceGraph};

use super::GraphMutator;

/// When a type conforms to a protocol declared outside the analyzed
/// modules, the protocol's requirements cannot be enumerated. Every member
/// that could occupy a witness slot must be assumed required and retained.
pub struct MarkExternalConformanceWitnesses;

impl GraphMutator for MarkExternalConformanceWitnesses {
    fn name(&self) -> &'static str {
        "external-conformance"
    }

    fn mutate(&self, graph: &mut SourceGraph, _configuration: &Configuration) -> Result<()> {
        let conformers: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| d.kind.is_member_container())
            .map(|(id, _)| id)
            .collect();

        for conformer in conformers {
            let externally_conforming = graph.conformance_references(conformer).iter().any(|r| {
                graph
                    .get_reference(*r)
                    .is_some_and(|reference| graph.resolved_target(reference).is_none())
            });
            if !externally_conforming {
                continue;
            }

            let witnesses: Vec<DeclarationId> = graph[conformer]
                .declarations
                .iter()
                .copied()
                .filter(|m| Self::occupies_witness_slot(graph, *m))
                .collect();
            for witness in witnesses {
                graph.mark_retained(witness);
                graph.mark_foreign_witness(witness);
            }
        }
        Ok(())
    }
}

impl MarkExternalConformanceWitnesses {
    /// Whether a member could satisfy a requirement by name: named
    /// functions, properties, subscripts, and type members qualify;
    /// accessors, operators, and destructors cannot witness by name alone.
    fn occupies_witness_slot(graph: &SourceGraph, member: DeclarationId) -> bool {
        let declaration = &graph[member];
        if declaration.name.is_none() {
            return false;
        }
        match declaration.kind {
            Kind::Typealias | Kind::AssociatedType => true,
            k if k.is_variable() => k != Kind::VarParameter && k != Kind::VarLocal,
            k if k.is_function() => {
                !k.is_accessor() && !k.is_operator() && k != Kind::FunctionDestructor
            }
            _ => false,
        }
    }
}
