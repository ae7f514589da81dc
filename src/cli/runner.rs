// `judge-run`: run a solution against a test directory using a checker.
//
// Failures are printed as GitHub Actions `::error::` annotations on stdout
// so CI logs highlight them.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, ValueHint};

use super::{LogArgs, init_logging};
use crate::runner::{CaseReport, RunConfig, RunError, RunSummary, Runner, hex_digest};

const GHA_ERROR: &str = "::error::";

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid timeout '{s}': {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{s}': {e}"))
}

/// Run solution against tests using the cmp-file checker.
#[derive(Parser, Debug)]
#[command(name = "judge-run", version, about = "Run a solution against checker tests")]
struct Cli {
    /// Path to solution binary.
    #[arg(long, value_hint = ValueHint::ExecutablePath)]
    solution: PathBuf,

    /// Path to cmp-file checker binary.
    #[arg(long, value_hint = ValueHint::ExecutablePath)]
    checker: PathBuf,

    /// Path to tests directory (with .t and .t.a files).
    #[arg(long, value_hint = ValueHint::DirPath)]
    tests: PathBuf,

    /// Output directory for logs and outputs.
    #[arg(long, value_hint = ValueHint::DirPath)]
    out: PathBuf,

    /// Optional per-test timeout in seconds.
    #[arg(long, value_parser = parse_seconds)]
    timeout: Option<Duration>,

    /// Print a JSON summary to stderr.
    #[arg(long = "json")]
    json_output: bool,

    #[command(flatten)]
    log: LogArgs,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            solution: self.solution.clone(),
            checker: self.checker.clone(),
            tests_dir: self.tests.clone(),
            out_dir: self.out.clone(),
            timeout: self.timeout,
        }
    }
}

fn report_error(err: &RunError) {
    println!("{GHA_ERROR}{err}");
    if let Some(details) = err.details() {
        println!("{details}");
    }
}

fn passed_json(report: &CaseReport) -> serde_json::Value {
    let mut entry = serde_json::json!({
        "name": report.name,
        "status": "passed",
        "elapsed_ms": u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
    });
    if let Some(digest) = &report.output_sha256 {
        entry["output_sha256"] = serde_json::Value::String(hex_digest(digest));
    }
    entry
}

fn summary_json(summary: &RunSummary) -> serde_json::Value {
    let mut tests: Vec<_> = summary.reports.iter().map(passed_json).collect();
    if let Some(failure) = &summary.failure {
        tests.push(serde_json::json!({
            "name": failure.name,
            "status": failure.error.status(),
        }));
    }
    serde_json::json!({
        "tests": tests,
        "passed": summary.passed(),
        "total": summary.total,
    })
}

fn emit_summary(enabled: bool, summary: serde_json::Value) {
    if !enabled {
        return;
    }
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => eprintln!("{text}"),
        Err(e) => log::error!("cannot render summary: {e}"),
    }
}

fn execute(cli: &Cli) -> i32 {
    let summary = match Runner::new(cli.run_config())
        .and_then(|runner| runner.run_with(|report| println!("Passed: {}", report.name)))
    {
        Ok(s) => s,
        Err(e) => {
            report_error(&e);
            return e.exit_code();
        }
    };

    match &summary.failure {
        Some(failure) => report_error(&failure.error),
        None if summary.total == 0 => println!("No tests found; passing by default."),
        None => println!("All tests passed."),
    }
    emit_summary(cli.json_output, summary_json(&summary));
    summary.exit_code()
}

/// Entry point of the `judge-run` binary.
pub fn run() -> ! {
    let cli = Cli::parse();
    init_logging(cli.log);
    process::exit(execute(&cli));
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("judge-run".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = cli.run_config();
    }
}
