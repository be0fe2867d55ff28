//! Reuse a pipeline run until an input file changes.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DatasetPaths;
use crate::error::Result;
use crate::input::{content_hash, read_file};
use crate::pipeline::{Pipeline, PipelineOutput};
use crate::reshape::Metric;

/// Memoizes [`PipelineOutput`] keyed by the content hash of each input.
pub struct PipelineCache {
    pipeline: Pipeline,
    paths: DatasetPaths,
    entry: Option<Arc<PipelineOutput>>,
    runs: usize,
}

impl PipelineCache {
    pub fn new(pipeline: Pipeline, paths: DatasetPaths) -> Self {
        Self {
            pipeline,
            paths,
            entry: None,
            runs: 0,
        }
    }

    /// The input paths being watched.
    pub fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    /// How many times the pipeline has actually run.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Current output, rebuilding when any input's content has changed.
    ///
    /// Errors leave the previous entry in place.
    pub fn get(&mut self) -> Result<Arc<PipelineOutput>> {
        if let Some(entry) = self.fresh()? {
            debug!("Pipeline cache hit");
            return Ok(entry);
        }
        if self.entry.is_some() {
            info!("Input changed, rebuilding");
        }
        self.rebuild()
    }

    /// Cached output if it still matches the files on disk.
    ///
    /// Needs only a shared borrow.
    pub fn fresh(&self) -> Result<Option<Arc<PipelineOutput>>> {
        match self.peek() {
            Some(entry) if self.is_fresh(&entry)? => Ok(Some(entry)),
            _ => Ok(None),
        }
    }

    /// Run the pipeline again regardless of the inputs. The previous entry is
    /// only replaced when the run succeeds.
    pub fn refresh(&mut self) -> Result<Arc<PipelineOutput>> {
        self.rebuild()
    }

    /// Forget the cached output.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Cached output without checking the inputs.
    pub fn peek(&self) -> Option<Arc<PipelineOutput>> {
        self.entry.clone()
    }

    fn rebuild(&mut self) -> Result<Arc<PipelineOutput>> {
        let output = Arc::new(self.pipeline.run(&self.paths)?);
        self.runs += 1;
        self.entry = Some(Arc::clone(&output));
        Ok(output)
    }

    fn is_fresh(&self, entry: &PipelineOutput) -> Result<bool> {
        let cached = entry.source_hashes();
        for (metric, cached) in Metric::ALL.into_iter().zip(cached) {
            let current = content_hash(&read_file(self.paths.get(metric))?);
            if cached != Some(current.as_str()) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
