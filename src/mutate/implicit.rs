//! Synthesis of compiler-provided members.

use smol_str::SmolStr;

use crate::base::{Accessibility, Kind};
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::{Declaration, DeclarationId, SourceGraph};

use super::GraphMutator;

const EQUATABLE: &str = "Equatable";
const HASHABLE: &str = "Hashable";
const CODABLE: &str = "Codable";
const ENCODABLE: &str = "Encodable";
const DECODABLE: &str = "Decodable";
const CODING_KEYS: &str = "CodingKeys";

/// Materializes members the compiler synthesizes so the analyzer can reason
/// about them:
///
/// - memberwise initializers for structs whose stored properties are all
///   visible and which declare no initializer of their own
/// - `==`, `hash(into:)`, `init(from:)`, `encode(to:)` for declared but
///   unwritten `Equatable`/`Hashable`/`Codable` conformances
/// - `CodingKeys` retention when the enclosing type is codable
pub struct SynthesizeImplicitMembers;

impl GraphMutator for SynthesizeImplicitMembers {
    fn name(&self) -> &'static str {
        "implicit-members"
    }

    fn mutate(&self, graph: &mut SourceGraph, configuration: &Configuration) -> Result<()> {
        let types: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| matches!(d.kind, Kind::Class | Kind::Struct | Kind::Enum))
            .map(|(id, _)| id)
            .collect();

        for type_id in types {
            if graph[type_id].kind == Kind::Struct {
                Self::synthesize_memberwise_initializer(graph, type_id)?;
            }
            Self::synthesize_conformance_members(graph, type_id, configuration)?;
            Self::retain_coding_keys(graph, type_id, configuration);
        }
        Ok(())
    }
}

impl SynthesizeImplicitMembers {
    fn synthesize_memberwise_initializer(
        graph: &mut SourceGraph,
        type_id: DeclarationId,
    ) -> Result<()> {
        let has_user_initializer = graph[type_id].declarations.iter().any(|c| {
            let child = &graph[*c];
            child.kind == Kind::FunctionConstructor && !child.is_implicit
        });
        if has_user_initializer {
            return Ok(());
        }

        let stored: Vec<DeclarationId> = Self::stored_properties(graph, type_id);
        let all_visible = stored
            .iter()
            .all(|p| graph[*p].accessibility.value >= Accessibility::Internal);
        if !all_visible {
            return Ok(());
        }

        Self::add_implicit_member(graph, type_id, Kind::FunctionConstructor, "init", "memberwise")
    }

    fn synthesize_conformance_members(
        graph: &mut SourceGraph,
        type_id: DeclarationId,
        configuration: &Configuration,
    ) -> Result<()> {
        let conformances = Self::conformance_names(graph, type_id);
        let equatable = conformances
            .iter()
            .any(|n| n.as_str() == EQUATABLE || n.as_str() == HASHABLE);
        let hashable = conformances.iter().any(|n| n.as_str() == HASHABLE);
        let decodable = Self::is_codable(graph, type_id, configuration, [CODABLE, DECODABLE]);
        let encodable = Self::is_codable(graph, type_id, configuration, [CODABLE, ENCODABLE]);

        if equatable && !Self::has_member(graph, type_id, Kind::FunctionOperatorInfix, "==") {
            Self::add_implicit_member(graph, type_id, Kind::FunctionOperatorInfix, "==", "eq")?;
        }
        if hashable && !Self::has_member(graph, type_id, Kind::FunctionMethodInstance, "hash(into:)")
        {
            Self::add_implicit_member(
                graph,
                type_id,
                Kind::FunctionMethodInstance,
                "hash(into:)",
                "hash",
            )?;
        }
        if decodable && !Self::has_member(graph, type_id, Kind::FunctionConstructor, "init(from:)")
        {
            Self::add_implicit_member(
                graph,
                type_id,
                Kind::FunctionConstructor,
                "init(from:)",
                "decode",
            )?;
        }
        if encodable
            && !Self::has_member(graph, type_id, Kind::FunctionMethodInstance, "encode(to:)")
        {
            Self::add_implicit_member(
                graph,
                type_id,
                Kind::FunctionMethodInstance,
                "encode(to:)",
                "encode",
            )?;
        }
        Ok(())
    }

    fn retain_coding_keys(
        graph: &mut SourceGraph,
        type_id: DeclarationId,
        configuration: &Configuration,
    ) {
        let codable =
            Self::is_codable(graph, type_id, configuration, [CODABLE, ENCODABLE, DECODABLE]);
        let coding_keys = graph[type_id].declarations.iter().copied().find(|c| {
            let child = &graph[*c];
            child.kind == Kind::Enum && child.name.as_deref() == Some(CODING_KEYS)
        });
        let Some(coding_keys) = coding_keys else {
            return;
        };
        if codable {
            graph.mark_retained(coding_keys);
            for descendant in graph.descendants(coding_keys) {
                graph.mark_retained(descendant);
            }
        }
    }

    /// Whether the type's conformance clause names one of `names`, either
    /// by in-source name or through a configured external codable USR.
    fn is_codable<const N: usize>(
        graph: &SourceGraph,
        type_id: DeclarationId,
        configuration: &Configuration,
        names: [&str; N],
    ) -> bool {
        graph.conformance_references(type_id).iter().any(|r| {
            let Some(reference) = graph.get_reference(*r) else {
                return false;
            };
            let named = reference
                .name
                .as_ref()
                .is_some_and(|n| names.iter().any(|c| n.as_str() == *c));
            named || configuration.external_codable_usrs.contains(&reference.usr)
        })
    }

    fn conformance_names(graph: &SourceGraph, type_id: DeclarationId) -> Vec<SmolStr> {
        graph
            .conformance_references(type_id)
            .iter()
            .filter_map(|r| graph.get_reference(*r)?.name.clone())
            .collect()
    }

    fn stored_properties(graph: &SourceGraph, type_id: DeclarationId) -> Vec<DeclarationId> {
        graph[type_id]
            .declarations
            .iter()
            .copied()
            .filter(|c| {
                let child = &graph[*c];
                child.kind == Kind::VarInstance
                    && !graph.descendants(*c).iter().any(|a| {
                        let accessor = &graph[*a];
                        accessor.kind.is_accessor() && !accessor.is_implicit
                    })
            })
            .collect()
    }

    fn has_member(graph: &SourceGraph, type_id: DeclarationId, kind: Kind, name: &str) -> bool {
        graph[type_id].declarations.iter().any(|c| {
            let child = &graph[*c];
            child.kind == kind && child.name.as_deref() == Some(name) && !child.is_implicit
        })
    }

    fn add_implicit_member(
        graph: &mut SourceGraph,
        type_id: DeclarationId,
        kind: Kind,
        name: &str,
        tag: &str,
    ) -> Result<()> {
        let usr = SmolStr::new(format!("{}${tag}", graph[type_id].usr));
        let module = graph[type_id].module.clone();
        let location = graph[type_id].location.clone();
        let mut member = Declaration::new(kind, usr, module, location).with_name(name);
        member.is_implicit = true;
        let id = graph.add_declaration(member)?;
        graph.add_child(type_id, id);
        Ok(())
    }
}
