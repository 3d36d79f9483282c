//! Retention analysis.
//!
//! Marks every declaration reachable from the entry points under the
//! domain rules, then derives unused parameters and assign-only
//! properties. Retention is a monotone fixpoint over a finite lattice:
//! running the analyzer twice never changes a value.

mod assign_only;
mod parameters;
mod retain;
mod seeds;

use tracing::debug;

use crate::config::Configuration;
use crate::graph::SourceGraph;

/// The retention analysis pass.
pub struct Analyzer<'a> {
    configuration: &'a Configuration,
}

impl<'a> Analyzer<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    /// Run the full analysis: seed, propagate, then derive the
    /// parameter and property verdicts.
    pub fn analyze(&self, graph: &mut SourceGraph) {
        let seeds = seeds::collect(graph, self.configuration);
        debug!(seeds = seeds.len(), "seeding retention");
        retain::run(graph, self.configuration, seeds);
        parameters::run(graph, self.configuration);
        assign_only::run(graph, self.configuration);

        debug!(
            retained = graph.declarations().filter(|(_, d)| d.is_retained).count(),
            total = graph.declaration_count(),
            "retention analysis finished"
        );
    }
}
