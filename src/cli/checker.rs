// `cmp-file`: testlib-compatible checker that compares files byte for byte.
//
// Invocation: cmp-file <input> <output> <answer> [report]
//
// Exit codes: 0 ok, 1 wrong answer, 2 wrong output format, 3 checker failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueHint};

use super::{LogArgs, init_logging};
use crate::compare::{EXIT_FAIL, Verdict, compare_files};

/// Compare a contestant output with the answer file, byte for byte.
#[derive(Parser, Debug)]
#[command(name = "cmp-file", version, about = "Byte-wise output checker")]
struct Cli {
    /// Test input (accepted for harness compatibility, not read).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Contestant output.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Expected answer.
    #[arg(value_hint = ValueHint::FilePath)]
    answer: PathBuf,

    /// Also write the verdict line to this file.
    #[arg(value_hint = ValueHint::FilePath)]
    report: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

/// Verdict line in testlib's wording, e.g. `wrong answer files differ at byte 3`.
fn verdict_line(verdict: Verdict) -> String {
    format!("{} {verdict}", verdict.keyword())
}

fn check(output: &Path, answer: &Path) -> (i32, String) {
    match compare_files(answer, output) {
        Ok(verdict) => (verdict.exit_code(), verdict_line(verdict)),
        Err(e) => (EXIT_FAIL, format!("FAIL {e}")),
    }
}

/// Entry point of the `cmp-file` binary.
pub fn run() -> ! {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_FAIL,
            };
            let _ = e.print();
            process::exit(code);
        }
    };
    init_logging(cli.log);
    log::debug!("checking {} against {}", cli.output.display(), cli.answer.display());

    let (code, line) = check(&cli.output, &cli.answer);
    eprintln!("{line}");

    if let Some(report) = &cli.report
        && let Err(e) = fs::write(report, format!("{line}\n"))
    {
        eprintln!("FAIL cannot write report {}: {e}", report.display());
        process::exit(EXIT_FAIL);
    }

    process::exit(code);
}
