//! Materializing provider records into the source graph.
//!
//! Two passes over the occurrence stream: definitions first, then edges.
//! Unit batches are fetched in parallel; everything that touches the graph
//! runs serially in unit order, so two runs over the same provider output
//! build identical graphs.

use rayon::prelude::*;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use crate::base::{CommentCommand, DeclaredAccessibility, Kind};
use crate::error::{Error, Result};
use crate::graph::{Declaration, DeclarationId, Parent, Reference, SourceGraph};

use super::provider::{IndexProvider, Occurrence, OccurrenceRole};

/// Builds a [`SourceGraph`] from an [`IndexProvider`].
pub struct Indexer;

impl Indexer {
    /// Consume every translation unit and emit a populated graph.
    pub fn index<P: IndexProvider>(provider: &P) -> Result<SourceGraph> {
        let names = provider.unit_names()?;
        let batches: Vec<(SmolStr, Vec<Occurrence>)> = names
            .par_iter()
            .map(|name| provider.occurrences(name).map(|occs| (name.clone(), occs)))
            .collect::<Result<_>>()?;

        let mut graph = SourceGraph::new();

        let pending = Self::ingest_definitions(&mut graph, &batches)?;
        Self::wire_declaration_parents(&mut graph, pending)?;
        Self::ingest_edges(&mut graph, &batches)?;
        Self::rewire_special_parents(&mut graph);
        Self::resolve(&mut graph);

        info!(
            declarations = graph.declaration_count(),
            references = graph.reference_count(),
            units = batches.len(),
            "index materialized"
        );
        Ok(graph)
    }

    /// First pass: one declaration per definition occurrence.
    fn ingest_definitions(
        graph: &mut SourceGraph,
        batches: &[(SmolStr, Vec<Occurrence>)],
    ) -> Result<Vec<(DeclarationId, Option<SmolStr>, SmolStr)>> {
        let mut pending = Vec::new();
        for (_, occurrences) in batches {
            for occ in occurrences {
                if occ.role != OccurrenceRole::Definition {
                    continue;
                }
                let mut declaration = Declaration::new(
                    occ.kind,
                    occ.usr.clone(),
                    occ.module.clone(),
                    occ.location.clone(),
                );
                declaration.name = occ.name.clone();
                declaration.attributes = occ.attributes.iter().cloned().collect();
                declaration.modifiers = occ.modifiers.iter().cloned().collect();
                if let Some(value) = occ.accessibility {
                    declaration.accessibility = DeclaredAccessibility {
                        value,
                        is_explicit: occ.is_explicit_accessibility,
                    };
                }
                declaration.is_implicit = occ.is_implicit;
                if let Some(comment) = &occ.comment {
                    declaration.comment_commands = CommentCommand::parse_block(comment);
                }

                let id = graph.add_declaration(declaration)?;
                pending.push((id, occ.container_usr.clone(), occ.module.clone()));
            }
        }
        Ok(pending)
    }

    /// Attach every declaration to its container. Containers can be
    /// defined in a later unit than their members, so this runs after the
    /// whole definition pass.
    fn wire_declaration_parents(
        graph: &mut SourceGraph,
        pending: Vec<(DeclarationId, Option<SmolStr>, SmolStr)>,
    ) -> Result<()> {
        for (id, container_usr, _module) in pending {
            match container_usr {
                Some(usr) => match graph.declaration_by_usr(&usr) {
                    Some(parent) => graph.add_child(parent, id),
                    None => {
                        return Err(Error::inconsistency(format!(
                            "definition {} names unknown container {} ({})",
                            graph[id].usr, usr, graph[id].location
                        )));
                    }
                },
                None => graph.add_root(id),
            }
        }
        Ok(())
    }

    /// Second pass: one reference per use/related occurrence.
    fn ingest_edges(
        graph: &mut SourceGraph,
        batches: &[(SmolStr, Vec<Occurrence>)],
    ) -> Result<()> {
        for (_, occurrences) in batches {
            for occ in occurrences {
                let related = match occ.role {
                    OccurrenceRole::Definition => continue,
                    OccurrenceRole::Reference => false,
                    OccurrenceRole::Related => true,
                };
                let container = match &occ.container_usr {
                    Some(usr) => graph.declaration_by_usr(usr).ok_or_else(|| {
                        Error::inconsistency(format!(
                            "reference to {} names unknown container {} ({})",
                            occ.usr, usr, occ.location
                        ))
                    })?,
                    None => graph.module_container(&occ.module)?,
                };

                let mut reference =
                    Reference::new(occ.kind, occ.usr.clone(), occ.location.clone());
                reference.name = occ.name.clone();
                reference.is_related = related;
                reference.is_write = occ.is_write;
                let id = graph.add_reference(reference);
                graph.attach_reference(Parent::Declaration(container), id);
            }
        }
        Ok(())
    }

    /// Providers attach accessors, enum elements, and parameters to the
    /// nearest lexical container they know about; the graph wants them
    /// under their semantic owner.
    fn rewire_special_parents(graph: &mut SourceGraph) {
        let mut moves: Vec<(DeclarationId, DeclarationId)> = Vec::new();

        for (id, decl) in graph.declarations() {
            let Some(parent) = graph.parent_declaration(id) else {
                continue;
            };
            let parent_kind = graph[parent].kind;

            if decl.kind.is_accessor() && !parent_kind.is_variable() {
                if let Some(name) = &decl.name {
                    let owner = graph[parent].declarations.iter().copied().find(|c| {
                        let sibling = &graph[*c];
                        sibling.kind.is_variable() && sibling.name.as_ref() == Some(name)
                    });
                    if let Some(owner) = owner {
                        moves.push((id, owner));
                    }
                }
            } else if decl.kind == Kind::EnumElement && parent_kind != Kind::Enum {
                if let Some(owner) =
                    Self::nearest_preceding_sibling(graph, parent, id, |k| k == Kind::Enum)
                {
                    moves.push((id, owner));
                }
            } else if decl.kind == Kind::VarParameter && !parent_kind.is_function() {
                if let Some(owner) =
                    Self::nearest_preceding_sibling(graph, parent, id, |k| k.is_function())
                {
                    moves.push((id, owner));
                }
            }
        }

        let count = moves.len();
        for (child, owner) in moves {
            graph.add_child(owner, child);
        }
        if count > 0 {
            debug!(rewired = count, "reparented accessor/element/parameter declarations");
        }
    }

    fn nearest_preceding_sibling(
        graph: &SourceGraph,
        parent: DeclarationId,
        child: DeclarationId,
        kind_matches: impl Fn(Kind) -> bool,
    ) -> Option<DeclarationId> {
        let child_location = &graph[child].location;
        graph[parent]
            .declarations
            .iter()
            .copied()
            .filter(|c| *c != child && kind_matches(graph[*c].kind))
            .filter(|c| {
                let location = &graph[*c].location;
                location.same_file(child_location) && location <= child_location
            })
            .max_by(|a, b| graph[*a].location.cmp(&graph[*b].location))
    }

    /// Resolve edges against definitions and build the structural indices
    /// (conformances, extensions). Unresolved edges remain in the graph and
    /// represent external symbols.
    fn resolve(graph: &mut SourceGraph) {
        let mut conformances: Vec<(SmolStr, DeclarationId)> = Vec::new();
        let mut unresolved = 0usize;

        for (_, reference) in graph.references() {
            match graph.declaration_by_usr(&reference.usr) {
                Some(target) if graph[target].kind == reference.kind => {}
                Some(target) => {
                    unresolved += 1;
                    warn!(
                        usr = %reference.usr,
                        reference_kind = %reference.kind,
                        declaration_kind = %graph[target].kind,
                        "reference kind disagrees with definition; treating as external"
                    );
                }
                None => {
                    unresolved += 1;
                    if !Self::plausibly_external(reference.kind) {
                        warn!(
                            usr = %reference.usr,
                            kind = %reference.kind,
                            "unresolved reference of a local-only kind"
                        );
                    }
                }
            }

            if reference.is_related && reference.kind == Kind::Protocol {
                if let Some(Parent::Declaration(parent)) = reference.parent {
                    if graph[parent].kind.is_member_container() {
                        conformances.push((reference.usr.clone(), parent));
                    }
                }
            }
        }

        for (usr, conforming) in conformances {
            graph.index_conformance(&usr, conforming);
        }

        let extensions: Vec<(SmolStr, DeclarationId)> = graph
            .declarations()
            .filter(|(_, d)| d.kind.is_extension())
            .filter_map(|(id, d)| {
                // An extension's related edges carry both the extended type
                // and any conformances it declares; the extension kind
                // disambiguates which edge names the extended type.
                let expected = d.kind.extended_type_kind();
                d.related.iter().find_map(|r| {
                    let reference = graph.get_reference(*r)?;
                    let is_extended_type = match expected {
                        Some(kind) => reference.kind == kind,
                        None => matches!(
                            reference.kind,
                            Kind::Class | Kind::Struct | Kind::Enum | Kind::Protocol
                        ),
                    };
                    is_extended_type.then(|| (reference.usr.clone(), id))
                })
            })
            .collect();
        for (usr, extension) in extensions {
            graph.index_extension(&usr, extension);
        }

        debug!(unresolved, "reference resolution finished");
    }

    /// Kinds that legitimately resolve outside the analyzed modules.
    /// Parameters, locals, accessors, and generic type parameters never do.
    fn plausibly_external(kind: Kind) -> bool {
        !matches!(
            kind,
            Kind::VarParameter | Kind::VarLocal | Kind::GenericTypeParam
        ) && !kind.is_accessor()
    }
}
