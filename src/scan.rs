//! The one-shot analysis driver.

use std::time::Instant;

use tracing::{debug, info};

use crate::analyze::Analyzer;
use crate::config::Configuration;
use crate::error::Result;
use crate::graph::SourceGraph;
use crate::index::{IndexProvider, Indexer};
use crate::mutate;
use crate::report::{self, ScanResult};

/// Drives the full pipeline: index, mutate, analyze, report.
///
/// A `Scan` borrows its configuration and can be reused across providers;
/// each call builds a fresh graph.
pub struct Scan<'a> {
    configuration: &'a Configuration,
}

impl<'a> Scan<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    /// Run the pipeline and return the report.
    pub fn perform<P: IndexProvider>(&self, provider: &P) -> Result<ScanResult> {
        let graph = self.materialize(provider)?;
        let result = report::build(&graph);
        info!(
            unreferenced = result.unreferenced.len(),
            assign_only = result.assign_only.len(),
            unused_parameters = result.unused_parameters.len(),
            "scan finished"
        );
        Ok(result)
    }

    /// Run the pipeline up to and including analysis, returning the
    /// analyzed graph for callers that build richer reporting on top.
    pub fn materialize<P: IndexProvider>(&self, provider: &P) -> Result<SourceGraph> {
        let started = Instant::now();
        let mut graph = Indexer::index(provider)?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "indexing finished");

        let started = Instant::now();
        mutate::run_all(&mut graph, self.configuration)?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "mutators finished");

        let started = Instant::now();
        Analyzer::new(self.configuration).analyze(&mut graph);
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "analysis finished");
        Ok(graph)
    }
}
