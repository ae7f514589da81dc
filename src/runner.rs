// Test runner: drives a solution binary and a checker over a test directory.
//
// A test directory holds pairs of files:
//
//   001.t     input fed to the solution on stdin
//   001.t.a   expected answer handed to the checker
//
// For each test the solution's stdout and stderr, and the checker's stderr,
// are kept in the output directory as `<name>.out`, `<name>.stderr` and
// `<name>.cmp.stderr`. The run stops at the first failing test.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

#[cfg(feature = "file-io")]
use sha2::Digest;

use thiserror::Error;

#[cfg(feature = "file-io")]
const BUF_SIZE: usize = 64 * 1024;
const POLL_INTERVAL: Duration = Duration::from_millis(5);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a run stops. Each variant maps to the exit code of `judge-run`.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Solution binary not found at {}", .0.display())]
    SolutionNotFound(PathBuf),
    #[error("Checker binary not found at {}", .0.display())]
    CheckerNotFound(PathBuf),
    #[error("Tests directory not found at {}", .0.display())]
    TestsDirNotFound(PathBuf),
    #[error("Missing answer file for {test} (expected {})", .expected.display())]
    MissingAnswer { test: String, expected: PathBuf },
    #[error("Runtime error on test {test}")]
    RuntimeError {
        test: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Time limit exceeded on test {test} ({}s)", .limit.as_secs_f64())]
    TimeLimitExceeded { test: String, limit: Duration },
    #[error("Test {test} failed. Checker output:")]
    CheckFailed {
        test: String,
        code: Option<i32>,
        output: String,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Exit code `judge-run` reports for this failure.
    ///
    /// A failing child's own exit code is passed through; a child killed by
    /// a signal counts as 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SolutionNotFound(_) | Self::CheckerNotFound(_) | Self::TestsDirNotFound(_) => 2,
            Self::RuntimeError { code, .. } | Self::CheckFailed { code, .. } => {
                code.filter(|&c| c != 0).unwrap_or(1)
            }
            Self::MissingAnswer { .. } | Self::TimeLimitExceeded { .. } | Self::Io { .. } => 1,
        }
    }

    /// Captured child output to show after the error line, if any.
    pub fn details(&self) -> Option<&str> {
        let text = match self {
            Self::RuntimeError { stderr, .. } => stderr,
            Self::CheckFailed { output, .. } => output,
            _ => return None,
        };
        (!text.trim().is_empty()).then_some(text.as_str())
    }

    /// Short machine-readable status for reports.
    pub fn status(&self) -> &'static str {
        match self {
            Self::SolutionNotFound(_) | Self::CheckerNotFound(_) | Self::TestsDirNotFound(_) => {
                "setup_error"
            }
            Self::MissingAnswer { .. } => "missing_answer",
            Self::RuntimeError { .. } => "runtime_error",
            Self::TimeLimitExceeded { .. } => "time_limit_exceeded",
            Self::CheckFailed { .. } => "wrong_answer",
            Self::Io { .. } => "io_error",
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration and test discovery
// ---------------------------------------------------------------------------

/// Paths and limits for a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub solution: PathBuf,
    pub checker: PathBuf,
    pub tests_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Wall-clock limit per solution run.
    pub timeout: Option<Duration>,
}

/// One test input and the answer file expected next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// File name of the input, e.g. `001.t`.
    pub name: String,
    pub input: PathBuf,
    /// `<input>.a`; may not exist.
    pub answer: PathBuf,
}

/// List the `*.t` files in `dir`, sorted by name.
pub fn discover_tests(dir: &Path) -> Result<Vec<TestCase>, RunError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| RunError::io(format!("reading {}", dir.display()), e))?;

    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| RunError::io(format!("reading {}", dir.display()), e))?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "t") || !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let mut answer = path.clone().into_os_string();
        answer.push(".a");
        cases.push(TestCase {
            name,
            input: path,
            answer: PathBuf::from(answer),
        });
    }
    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Outcome of a passing test.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    /// Where the solution's stdout was saved.
    pub output: PathBuf,
    /// Wall-clock time of the solution run.
    pub elapsed: Duration,
    /// SHA-256 of the solution's stdout (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

/// The test a run stopped at.
#[derive(Debug)]
pub struct TestFailure {
    pub name: String,
    pub error: RunError,
}

/// Result of a whole run: the passing tests, in order, and the first
/// failure if there was one.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<CaseReport>,
    /// Number of tests discovered, including ones never reached.
    pub total: usize,
    pub failure: Option<TestFailure>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.reports.len()
    }

    /// 0 when every test passed, otherwise the failure's exit code.
    pub fn exit_code(&self) -> i32 {
        self.failure.as_ref().map_or(0, |f| f.error.exit_code())
    }
}

/// Runs test cases one at a time against a validated configuration.
#[derive(Debug)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// Check that the binaries and test directory exist and create the
    /// output directory.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        if !config.solution.is_file() {
            return Err(RunError::SolutionNotFound(config.solution));
        }
        if !config.checker.is_file() {
            return Err(RunError::CheckerNotFound(config.checker));
        }
        if !config.tests_dir.is_dir() {
            return Err(RunError::TestsDirNotFound(config.tests_dir));
        }
        fs::create_dir_all(&config.out_dir).map_err(|e| {
            RunError::io(format!("creating {}", config.out_dir.display()), e)
        })?;
        Ok(Self { config })
    }

    /// Test cases in the configured directory, in run order.
    pub fn tests(&self) -> Result<Vec<TestCase>, RunError> {
        discover_tests(&self.config.tests_dir)
    }

    /// Run every test in order, stopping at the first failure.
    ///
    /// Setup and discovery errors are returned as `Err`; a failing test is
    /// recorded in [`RunSummary::failure`].
    pub fn run(&self) -> Result<RunSummary, RunError> {
        self.run_with(|_| {})
    }

    /// Like [`Runner::run`], calling `on_pass` after each passing test.
    pub fn run_with<F>(&self, mut on_pass: F) -> Result<RunSummary, RunError>
    where
        F: FnMut(&CaseReport),
    {
        let cases = self.tests()?;
        let mut summary = RunSummary {
            reports: Vec::with_capacity(cases.len()),
            total: cases.len(),
            failure: None,
        };
        log::info!("running {} tests", summary.total);

        for case in &cases {
            match self.run_case(case) {
                Ok(report) => {
                    on_pass(&report);
                    summary.reports.push(report);
                }
                Err(e) => {
                    log::debug!("{}: {}", case.name, e.status());
                    summary.failure = Some(TestFailure {
                        name: case.name.clone(),
                        error: e,
                    });
                    break;
                }
            }
        }
        Ok(summary)
    }

    /// Run the solution on one test and check its output.
    pub fn run_case(&self, case: &TestCase) -> Result<CaseReport, RunError> {
        if !case.answer.is_file() {
            return Err(RunError::MissingAnswer {
                test: case.name.clone(),
                expected: case.answer.clone(),
            });
        }

        let out_dir = &self.config.out_dir;
        let output = out_dir.join(format!("{}.out", case.name));
        let stderr = out_dir.join(format!("{}.stderr", case.name));
        let cmp_stderr = out_dir.join(format!("{}.cmp.stderr", case.name));

        log::debug!("{}: running {}", case.name, self.config.solution.display());
        let started = Instant::now();
        let mut child = Command::new(&self.config.solution)
            .stdin(open_file(&case.input)?)
            .stdout(create_file(&output)?)
            .stderr(create_file(&stderr)?)
            .spawn()
            .map_err(|e| {
                RunError::io(format!("spawning {}", self.config.solution.display()), e)
            })?;

        let status = match self.config.timeout {
            Some(limit) => match wait_with_timeout(&mut child, limit)? {
                Some(status) => status,
                None => {
                    return Err(RunError::TimeLimitExceeded {
                        test: case.name.clone(),
                        limit,
                    });
                }
            },
            None => child
                .wait()
                .map_err(|e| RunError::io("waiting for solution", e))?,
        };
        let elapsed = started.elapsed();
        log::info!("{}: solution finished in {elapsed:?} ({status})", case.name);

        if !status.success() {
            return Err(RunError::RuntimeError {
                test: case.name.clone(),
                code: status.code(),
                stderr: read_lossy(&stderr),
            });
        }

        let status = Command::new(&self.config.checker)
            .arg(&case.input)
            .arg(&output)
            .arg(&case.answer)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(create_file(&cmp_stderr)?)
            .status()
            .map_err(|e| RunError::io(format!("running {}", self.config.checker.display()), e))?;

        if !status.success() {
            return Err(RunError::CheckFailed {
                test: case.name.clone(),
                code: status.code(),
                output: read_lossy(&cmp_stderr),
            });
        }

        Ok(CaseReport {
            name: case.name.clone(),
            output_sha256: output_digest(&output)?,
            output,
            elapsed,
        })
    }
}

/// Wait for `child` up to `limit`; kill it and return `None` on expiry.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>, RunError> {
    let deadline = Instant::now() + limit;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) if Instant::now() >= deadline => {
                log::warn!("solution exceeded {limit:?}, killing pid {}", child.id());
                // The child may exit between try_wait and kill.
                let _ = child.kill();
                child
                    .wait()
                    .map_err(|e| RunError::io("reaping solution", e))?;
                return Ok(None);
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(RunError::io("waiting for solution", e)),
        }
    }
}

fn open_file(path: &Path) -> Result<File, RunError> {
    File::open(path).map_err(|e| RunError::io(format!("opening {}", path.display()), e))
}

fn create_file(path: &Path) -> Result<File, RunError> {
    File::create(path).map_err(|e| RunError::io(format!("creating {}", path.display()), e))
}

fn read_lossy(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(feature = "file-io")]
fn output_digest(path: &Path) -> Result<Option<[u8; 32]>, RunError> {
    use std::io::Read;

    let mut file = open_file(path)?;
    let mut hasher = sha2::Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| RunError::io(format!("reading {}", path.display()), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Some(hasher.finalize().into()))
}

#[cfg(not(feature = "file-io"))]
fn output_digest(_path: &Path) -> Result<Option<[u8; 32]>, RunError> {
    Ok(None)
}

/// Lower-case hex rendering of a digest.
pub fn hex_digest(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
