// Runner behavior against shell-script solutions.
//
// Kept in a single test so no other thread forks while a freshly written
// script is still open for writing (which makes exec fail with ETXTBSY).

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use medjudge::runner::{RunConfig, RunError, Runner};

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn runner(dir: &Path, solution: PathBuf, timeout: Option<Duration>) -> Runner {
    Runner::new(RunConfig {
        solution,
        checker: PathBuf::from(env!("CARGO_BIN_EXE_cmp-file")),
        tests_dir: dir.join("tests"),
        out_dir: dir.join("out"),
        timeout,
    })
    .unwrap()
}

fn judge_run(dir: &Path, solution: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_judge-run"))
        .arg("--solution")
        .arg(solution)
        .arg("--checker")
        .arg(env!("CARGO_BIN_EXE_cmp-file"))
        .arg("--tests")
        .arg(dir.join("tests"))
        .arg("--out")
        .arg(dir.join("cli-out"))
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn script_solutions() {
    let dir = tempfile::tempdir().unwrap();
    let tests = dir.path().join("tests");
    std::fs::create_dir(&tests).unwrap();
    std::fs::write(tests.join("001.t"), "1\nA 4\n").unwrap();
    std::fs::write(tests.join("001.t.a"), "4\n").unwrap();

    let echo = script(dir.path(), "echo.sh", "cat > /dev/null\necho 4");
    let crash = script(dir.path(), "crash.sh", "echo oops >&2\nexit 7");
    let hang = script(dir.path(), "hang.sh", "exec sleep 30");

    // Passing solution, with the output kept and hashed.
    let r = runner(dir.path(), echo, None);
    let cases = r.tests().unwrap();
    assert_eq!(cases.len(), 1);
    let report = r.run_case(&cases[0]).unwrap();
    assert_eq!(std::fs::read(&report.output).unwrap(), b"4\n");
    #[cfg(feature = "file-io")]
    assert!(report.output_sha256.is_some());

    // Non-zero exit code is passed through with the captured stderr.
    let r = runner(dir.path(), crash, None);
    let err = r.run_case(&cases[0]).unwrap_err();
    assert!(matches!(err, RunError::RuntimeError { .. }));
    assert_eq!(err.exit_code(), 7);
    assert_eq!(err.details(), Some("oops\n"));

    // A hanging solution is killed at the deadline.
    let r = runner(dir.path(), hang, Some(Duration::from_millis(200)));
    let started = Instant::now();
    let err = r.run_case(&cases[0]).unwrap_err();
    assert!(matches!(err, RunError::TimeLimitExceeded { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(started.elapsed() < Duration::from_secs(10));

    // The CLI reports the time limit as an annotation and exits 1.
    std::fs::write(tests.join("002.t"), "1\nB 6\n").unwrap();
    std::fs::write(tests.join("002.t.a"), "6\n").unwrap();
    let hang = dir.path().join("hang.sh");

    let res = judge_run(dir.path(), &hang, &["--timeout", "0.2"]);
    assert_eq!(res.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&res.stdout);
    assert!(
        stdout.contains("::error::Time limit exceeded on test 001.t (0.2s)"),
        "stdout: {stdout}"
    );
    assert!(!stdout.contains("002.t"));

    let res = judge_run(dir.path(), &hang, &["--timeout", "0.2", "--json", "--quiet"]);
    assert_eq!(res.status.code(), Some(1));
    let summary: serde_json::Value = serde_json::from_slice(&res.stderr).unwrap();
    assert_eq!(summary["passed"], 0);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["tests"][0]["name"], "001.t");
    assert_eq!(summary["tests"][0]["status"], "time_limit_exceeded");
}
