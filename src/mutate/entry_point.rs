//! Entry-point file retention.

use std::path::Path;

use crate::base::Kind;
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::graph::{DeclarationId, SourceGraph};

use super::GraphMutator;

/// Retains every top-level declaration in the configured entry-point files.
/// An entry-point filename that matches no indexed file is a configuration
/// error.
pub struct MarkEntryPoints;

impl GraphMutator for MarkEntryPoints {
    fn name(&self) -> &'static str {
        "entry-points"
    }

    fn mutate(&self, graph: &mut SourceGraph, configuration: &Configuration) -> Result<()> {
        for filename in &configuration.entry_point_filenames {
            if !graph.has_file_named(filename) {
                return Err(Error::configuration(format!(
                    "entry point file {filename} is not part of the indexed project"
                )));
            }
        }
        if configuration.entry_point_filenames.is_empty() {
            return Ok(());
        }

        let entry_points: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(id, d)| {
                !d.is_implicit
                    && Self::in_entry_file(configuration, d.location.path())
                    && Self::is_top_level(graph, *id)
            })
            .map(|(id, _)| id)
            .collect();
        for declaration in entry_points {
            graph.mark_retained(declaration);
        }
        Ok(())
    }
}

impl MarkEntryPoints {
    fn in_entry_file(configuration: &Configuration, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            configuration
                .entry_point_filenames
                .iter()
                .any(|f| name == Path::new(f.as_str()).as_os_str())
        })
    }

    fn is_top_level(graph: &SourceGraph, id: DeclarationId) -> bool {
        match graph.parent_declaration(id) {
            None => true,
            Some(parent) => graph[parent].kind == Kind::Module,
        }
    }
}
