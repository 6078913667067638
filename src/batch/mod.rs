//! Batch orchestrator.
//!
//! Drives the fact extractor over every input path in order, accumulates
//! per-file records and running totals, then runs the aggregate components
//! (which need totals known only after the whole batch) and assembles the
//! consolidated [`BatchResult`].
//!
//! The run is a single logical thread of control. Between files the
//! orchestrator yields through the progress callback and checks the
//! cancellation flag; it never suspends or cancels mid-file. The optional
//! per-file timeout moves one extraction onto a replaceable worker thread,
//! which is an implementation detail of that call, not parallel analysis.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyzers::patterns::{ArchitectureSummary, PatternCensus};
use crate::analyzers::xref::XrefGraph;
use crate::analyzers::{complexity, issues, layout};
use crate::config::{Config, ExtractOptions};
use crate::core::{FactExtractor, Result, StructuralRecord};
use crate::report::{BatchResult, BatchStatus, BatchSummary, Insights};

/// Batch orchestration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Include the directory/naming block in the report.
    pub include_directory_stats: bool,
    /// Per-file extraction timeout in milliseconds; zero disables the guard.
    pub file_timeout_ms: u64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            include_directory_stats: true,
            file_timeout_ms: 0,
        }
    }
}

/// Hooks threaded through one batch run.
#[derive(Default)]
pub struct BatchContext<'a> {
    cancel: Option<&'a AtomicBool>,
    on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync + 'a>>,
}

impl<'a> BatchContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the cancellation flag at every per-file suspension point.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Add a progress callback, invoked between files as `(processed, total)`.
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'a,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    fn report_progress(&self, current: usize, total: usize) {
        if let Some(ref f) = self.on_progress {
            f(current, total);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

/// The two-phase batch runner.
pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a batch with default hooks.
    pub fn run(
        &self,
        paths: &[PathBuf],
        extractor: Arc<dyn FactExtractor>,
    ) -> Result<BatchResult> {
        self.run_with(paths, extractor, &BatchContext::new())
    }

    /// Run a batch with explicit progress/cancellation hooks.
    pub fn run_with(
        &self,
        paths: &[PathBuf],
        extractor: Arc<dyn FactExtractor>,
        ctx: &BatchContext<'_>,
    ) -> Result<BatchResult> {
        if paths.is_empty() {
            info!("no scripts found");
            return Ok(BatchResult {
                generated_at: Utc::now().to_rfc3339(),
                summary: BatchSummary {
                    status: BatchStatus::NoInput,
                    ..Default::default()
                },
                insights: Insights::default(),
                cross_references: XrefGraph::new(),
                directory_stats: None,
                records: Vec::new(),
            });
        }

        // Collection phase: strictly sequential in input order. Insertion
        // order feeds ranking tie-breaks and graph discovery order.
        let total = paths.len();
        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };
        let mut records: Vec<StructuralRecord> = Vec::with_capacity(total);
        let mut graph = XrefGraph::new();
        let timeout = match self.config.batch.file_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        let mut station = ExtractionStation::new(extractor, self.config.extract, timeout);

        for (index, path) in paths.iter().enumerate() {
            // Per-file suspension point: let the caller refresh state, then
            // honor cancellation. Never mid-file.
            ctx.report_progress(index, total);
            if ctx.is_cancelled() {
                summary.status = BatchStatus::Partial;
                warn!("batch cancelled after {} of {} files", index, total);
                break;
            }

            debug!(path = %path.display(), "extracting");
            let record = station.extract(path);
            if record.is_ok() {
                summary.successful += 1;
                summary.total_methods += record.methods.len();
                summary.total_properties += record.properties.len();
                summary.total_signals += record.signals.len();
                summary.total_constants += record.constants.len();
                summary.total_cross_file_calls += record.cross_file_calls.len();
                graph.add_record(&record);
            } else {
                warn!(
                    path = %path.display(),
                    error = record.error.as_deref().unwrap_or_default(),
                    "extraction failed"
                );
                summary.failed += 1;
            }
            records.push(record);
        }
        ctx.report_progress(records.len(), total);

        // Aggregation phase: everything here depends on totals that exist
        // only now that the whole batch has been collected.
        let successes: Vec<&StructuralRecord> =
            records.iter().filter(|r| r.is_ok()).collect();

        let weights = &self.config.complexity;
        let most_complex = complexity::rank_max(&successes, |r| complexity::score(r, weights))
            .map(|i| successes[i].path.clone());
        let most_dependencies =
            complexity::rank_max(&successes, |r| r.cross_file_calls.len() as f64)
                .map(|i| successes[i].path.clone());

        let mut census = PatternCensus::new();
        let mut architecture = ArchitectureSummary::default();
        for record in &successes {
            census.observe(record);
            architecture.observe(record);
        }
        // The census denominator is the collected batch size, failures
        // included, matching the per-run totals above.
        let pattern_census = census.finish(records.len());

        let issue_list = issues::identify(&records, &self.config.issues);
        let dependency_cycles = graph.cycles();
        let directory_stats = self
            .config
            .batch
            .include_directory_stats
            .then(|| layout::analyze(paths));

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "batch aggregation complete"
        );

        Ok(BatchResult {
            generated_at: Utc::now().to_rfc3339(),
            summary,
            insights: Insights {
                most_complex,
                most_dependencies,
                pattern_census,
                architecture,
                issues: issue_list,
                dependency_cycles,
            },
            cross_references: graph,
            directory_stats,
            records,
        })
    }
}

/// Runs extraction inline, or on a replaceable worker thread when a per-file
/// timeout is configured. A worker stuck on a pathological file is abandoned
/// (its eventual result is dropped with the channel) and replaced for the
/// next file.
struct ExtractionStation {
    extractor: Arc<dyn FactExtractor>,
    options: ExtractOptions,
    timeout: Option<Duration>,
    worker: Option<Worker>,
}

impl ExtractionStation {
    fn new(
        extractor: Arc<dyn FactExtractor>,
        options: ExtractOptions,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            extractor,
            options,
            timeout,
            worker: None,
        }
    }

    fn extract(&mut self, path: &Path) -> StructuralRecord {
        match self.timeout {
            None => self.extractor.extract(path, &self.options),
            Some(limit) => self.extract_with_deadline(path, limit),
        }
    }

    fn extract_with_deadline(&mut self, path: &Path, limit: Duration) -> StructuralRecord {
        // Two attempts: a worker that died on a previous file shows up as a
        // closed channel and gets replaced once.
        for _ in 0..2 {
            let worker = self
                .worker
                .get_or_insert_with(|| Worker::spawn(Arc::clone(&self.extractor), self.options));
            if worker.requests.send(path.to_path_buf()).is_err() {
                self.worker = None;
                continue;
            }
            let outcome = worker.results.recv_timeout(limit);
            match outcome {
                Ok(record) => return record,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    warn!(path = %path.display(), "extraction timed out, abandoning worker");
                    self.worker = None;
                    return StructuralRecord::failed(
                        path.to_string_lossy(),
                        format!("extraction timed out after {} ms", limit.as_millis()),
                    );
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.worker = None;
                    continue;
                }
            }
        }
        StructuralRecord::failed(path.to_string_lossy(), "extraction worker unavailable")
    }
}

struct Worker {
    requests: mpsc::Sender<PathBuf>,
    results: mpsc::Receiver<StructuralRecord>,
}

impl Worker {
    fn spawn(extractor: Arc<dyn FactExtractor>, options: ExtractOptions) -> Self {
        let (requests, request_rx) = mpsc::channel::<PathBuf>();
        let (result_tx, results) = mpsc::channel();
        thread::spawn(move || {
            while let Ok(path) = request_rx.recv() {
                let record = extractor.extract(&path, &options);
                if result_tx.send(record).is_err() {
                    // The orchestrator abandoned this worker after a timeout.
                    break;
                }
            }
        });
        Self { requests, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MethodInfo;

    struct CountingExtractor;

    impl FactExtractor for CountingExtractor {
        fn extract(&self, path: &Path, _options: &ExtractOptions) -> StructuralRecord {
            let mut record = StructuralRecord::new(path.to_string_lossy());
            record.methods.push(MethodInfo {
                name: "_ready".to_string(),
                ..Default::default()
            });
            record
        }
    }

    struct SleepyExtractor(Duration);

    impl FactExtractor for SleepyExtractor {
        fn extract(&self, path: &Path, _options: &ExtractOptions) -> StructuralRecord {
            thread::sleep(self.0);
            StructuralRecord::new(path.to_string_lossy())
        }
    }

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("s{i}.gd"))).collect()
    }

    #[test]
    fn test_empty_input_is_no_input_status() {
        let runner = BatchRunner::new(Config::default());
        let result = runner.run(&[], Arc::new(CountingExtractor)).unwrap();
        assert_eq!(result.summary.status, BatchStatus::NoInput);
        assert_eq!(result.summary.total, 0);
        assert_eq!(result.summary.successful, 0);
        assert_eq!(result.summary.failed, 0);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_totals_accumulate() {
        let runner = BatchRunner::new(Config::default());
        let result = runner.run(&paths(4), Arc::new(CountingExtractor)).unwrap();
        assert_eq!(result.summary.status, BatchStatus::Complete);
        assert_eq!(result.summary.total, 4);
        assert_eq!(result.summary.successful, 4);
        assert_eq!(result.summary.total_methods, 4);
    }

    #[test]
    fn test_progress_reported_between_files() {
        use std::sync::Mutex;

        let seen: Mutex<Vec<(usize, usize)>> = Mutex::new(Vec::new());
        let runner = BatchRunner::new(Config::default());
        let ctx = BatchContext::new().with_progress(|current, total| {
            seen.lock().unwrap().push((current, total));
        });
        runner
            .run_with(&paths(2), Arc::new(CountingExtractor), &ctx)
            .unwrap();

        drop(ctx);
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, vec![(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_cancellation_marks_partial_and_keeps_records() {
        let cancel = AtomicBool::new(false);
        let runner = BatchRunner::new(Config::default());
        let ctx = BatchContext::new()
            .with_cancel_flag(&cancel)
            .with_progress(|current, _total| {
                if current == 2 {
                    cancel.store(true, Ordering::Relaxed);
                }
            });
        let result = runner
            .run_with(&paths(5), Arc::new(CountingExtractor), &ctx)
            .unwrap();

        assert_eq!(result.summary.status, BatchStatus::Partial);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.summary.successful, 2);
        // Aggregates still cover what was collected.
        assert_eq!(result.summary.total_methods, 2);
    }

    #[test]
    fn test_timeout_produces_failed_record_and_batch_continues() {
        let mut config = Config::default();
        config.batch.file_timeout_ms = 25;
        let runner = BatchRunner::new(config);
        let result = runner
            .run(&paths(2), Arc::new(SleepyExtractor(Duration::from_millis(250))))
            .unwrap();

        assert_eq!(result.summary.failed, 2);
        assert!(result.records[0]
            .error
            .as_deref()
            .unwrap()
            .contains("timed out"));
    }

    #[test]
    fn test_timeout_disabled_by_default() {
        let runner = BatchRunner::new(Config::default());
        let result = runner
            .run(&paths(1), Arc::new(SleepyExtractor(Duration::from_millis(5))))
            .unwrap();
        assert_eq!(result.summary.successful, 1);
    }
}
