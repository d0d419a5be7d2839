//! Parallel conversion of a directory of drawings

use crate::error::{DxfError, Result};
use crate::io::JsonWriter;
use crate::vectorize::{vectorize_file, ConversionOptions};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Default concurrency bound
pub const DEFAULT_JOBS: usize = 64;

/// Name of the output directory created under the data directory
pub const DEFAULT_OUTPUT_DIR: &str = "jsons";

/// One input file and the directory its record goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl ConversionTask {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }

    /// `<output_dir>/<input stem>.json`
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.input.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
        name.push(".json");
        self.output_dir.join(name)
    }
}

/// A file that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of a batch, in task order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Written output files
    pub converted: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs conversion tasks on a dedicated thread pool
#[derive(Debug, Clone)]
pub struct BatchRunner {
    jobs: usize,
    options: ConversionOptions,
    progress_every: usize,
    writer: JsonWriter,
}

impl BatchRunner {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            jobs: DEFAULT_JOBS,
            options,
            progress_every: 0,
            writer: JsonWriter::new(),
        }
    }

    /// Concurrency bound; values below one are raised to one
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Log progress after every `n` completed files; 0 disables
    pub fn with_progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Convert a single file
    pub fn convert(&self, task: &ConversionTask) -> Result<PathBuf> {
        let record = vectorize_file(&task.input, &self.options)?;
        let output = task.output_path();
        self.writer.write(&record, &output)?;
        Ok(output)
    }

    /// Convert every task. Individual failures end up in the report;
    /// only a pool that cannot be built is an error.
    pub fn run(&self, tasks: &[ConversionTask]) -> Result<BatchReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("dxf2json-{i}"))
            .build()
            .map_err(|err| DxfError::Custom(format!("cannot start worker pool: {err}")))?;

        let started = Instant::now();
        let done = AtomicUsize::new(0);
        let total = tasks.len();

        let outcomes: Vec<(PathBuf, Result<PathBuf>)> = pool.install(|| {
            tasks
                .par_iter()
                .map(|task| {
                    let outcome = self.convert(task);
                    if let Err(err) = &outcome {
                        tracing::warn!(input = %task.input.display(), error = %err, "conversion failed");
                    }
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if self.progress_every > 0 && finished % self.progress_every == 0 {
                        tracing::info!(finished, total, "progress");
                    }
                    (task.input.clone(), outcome)
                })
                .collect()
        });

        let mut report = BatchReport::default();
        for (input, outcome) in outcomes {
            match outcome {
                Ok(output) => report.converted.push(output),
                Err(err) => report.failures.push(BatchFailure {
                    input,
                    error: err.to_string(),
                }),
            }
        }

        tracing::info!(
            converted = report.converted.len(),
            failed = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch finished"
        );
        Ok(report)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

/// DXF files in `<data_dir>/<split>`, sorted by path
pub fn discover_inputs(data_dir: &Path, split: &str) -> Result<Vec<PathBuf>> {
    let dir = data_dir.join(split);
    let mut inputs = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        let is_dxf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"));
        if is_dxf && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    tracing::debug!(dir = %dir.display(), files = inputs.len(), "inputs discovered");
    Ok(inputs)
}

/// Output directory for a run, created if missing
pub fn prepare_output_dir(data_dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => data_dir.join(DEFAULT_OUTPUT_DIR),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        let task = ConversionTask::new("/data/dxf/plan.v2.DXF", "/data/jsons");
        assert_eq!(task.output_path(), PathBuf::from("/data/jsons/plan.v2.json"));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let split = dir.path().join("dxf");
        fs::create_dir(&split).unwrap();
        for name in ["b.dxf", "a.DXF", "notes.txt", "c.dwg"] {
            fs::write(split.join(name), b"").unwrap();
        }
        fs::create_dir(split.join("nested.dxf")).unwrap();

        let found = discover_inputs(dir.path(), "dxf").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.DXF", "b.dxf"]);
    }

    #[test]
    fn test_discover_missing_split_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_inputs(dir.path(), "dxf").is_err());
    }

    #[test]
    fn test_prepare_output_dir_defaults_to_jsons() {
        let dir = tempfile::tempdir().unwrap();
        let out = prepare_output_dir(dir.path(), None).unwrap();
        assert_eq!(out, dir.path().join("jsons"));
        assert!(out.is_dir());

        let custom = dir.path().join("a").join("b");
        assert_eq!(prepare_output_dir(dir.path(), Some(&custom)).unwrap(), custom);
        assert!(custom.is_dir());
    }

    #[test]
    fn test_jobs_floor() {
        assert_eq!(BatchRunner::default().with_jobs(0).jobs(), 1);
        assert_eq!(BatchRunner::default().jobs(), DEFAULT_JOBS);
    }

    #[test]
    fn test_failed_file_is_reported_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.dxf");
        fs::write(&input, "0\nSECTION\n2\nENTITIES\n0\nLINE\n10\nnot-a-number\n").unwrap();

        let task = ConversionTask::new(&input, dir.path());
        let report = BatchRunner::default().with_jobs(2).run(&[task.clone()]).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.failures[0].input, input);
        assert!(!task.output_path().exists());
    }
}
