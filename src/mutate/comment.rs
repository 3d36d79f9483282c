//! Applying comment suppression directives.

use crate::base::CommentCommand;
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::{DeclarationId, SourceGraph};

use super::GraphMutator;

/// Applies the directives parsed by the indexer:
///
/// - `ignore` suppresses the declaration and its whole subtree
/// - `ignore:parameters` suppresses unused-parameter reporting for a function
/// - `ignore:all` suppresses everything from the declaration to end of file
pub struct ApplyCommentCommands;

impl GraphMutator for ApplyCommentCommands {
    fn name(&self) -> &'static str {
        "comment-commands"
    }

    fn mutate(&self, graph: &mut SourceGraph, _configuration: &Configuration) -> Result<()> {
        let annotated: Vec<(DeclarationId, Vec<CommentCommand>)> = graph
            .declarations()
            .filter(|(_, d)| !d.comment_commands.is_empty())
            .map(|(id, d)| (id, d.comment_commands.clone()))
            .collect();

        for (id, commands) in annotated {
            for command in commands {
                match command {
                    CommentCommand::Ignore => Self::ignore_subtree(graph, id),
                    CommentCommand::IgnoreParameters => graph.ignore_parameters(id),
                    CommentCommand::IgnoreAll => Self::ignore_rest_of_file(graph, id),
                }
            }
        }
        Ok(())
    }
}

impl ApplyCommentCommands {
    fn ignore_subtree(graph: &mut SourceGraph, id: DeclarationId) {
        graph.ignore(id);
        for descendant in graph.descendants(id) {
            graph.ignore(descendant);
        }
    }

    fn ignore_rest_of_file(graph: &mut SourceGraph, id: DeclarationId) {
        let start = graph[id].location.clone();
        let in_file: Vec<DeclarationId> = graph
            .declarations()
            .filter(|(_, d)| d.location.same_file(&start) && d.location >= start)
            .map(|(i, _)| i)
            .collect();
        for declaration in in_file {
            graph.ignore(declaration);
        }
    }
}
