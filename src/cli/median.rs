// `medjudge`: print the upper median of the records on stdin.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueHint};

use super::{LogArgs, init_logging};
use crate::median::MedianError;
use crate::records::median_of_input;

const BUF_SIZE: usize = 64 * 1024;

/// Print the median of the trailing numbers of N records.
///
/// Input: a line holding N, then N lines such as `Alice 52000`.
/// For even N the larger of the two middle values is printed.
#[derive(Parser, Debug)]
#[command(name = "medjudge", version, about = "Median of trailing record values")]
struct Cli {
    /// Read records from a file instead of stdin.
    #[arg(long, short = 'i', value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn median_from(input: Option<&PathBuf>) -> Result<u64, MedianError> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                MedianError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display())))
            })?;
            median_of_input(BufReader::with_capacity(BUF_SIZE, file))
        }
        None => median_of_input(io::stdin().lock()),
    }
}

fn write_median<W: Write>(mut out: W, median: u64) -> io::Result<()> {
    writeln!(out, "{median}")?;
    out.flush()
}

/// Entry point of the `medjudge` binary.
pub fn run() -> ! {
    let cli = Cli::parse();
    init_logging(cli.log);

    let median = match median_from(cli.input.as_ref()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("medjudge: {e}");
            process::exit(1);
        }
    };
    log::info!("median: {median}");

    if let Err(e) = write_median(BufWriter::new(io::stdout().lock()), median) {
        eprintln!("medjudge: write error: {e}");
        process::exit(1);
    }
    process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("medjudge").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("cli parse failed")
    }

    #[test]
    fn stdin_by_default() {
        assert!(parse(&[]).input.is_none());
    }

    #[test]
    fn input_file_flag() {
        let cli = parse(&["--input", "salaries.txt", "-vv"]);
        assert_eq!(cli.input, Some(PathBuf::from("salaries.txt")));
        assert_eq!(cli.log.default_filter(), "debug");
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["medjudge", "-q", "-v"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn median_line_ends_with_newline() {
        let mut out = Vec::new();
        write_median(&mut out, 30).unwrap();
        assert_eq!(out, b"30\n");
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "3\nA 9\nB 1\nC 5\n").unwrap();
        assert_eq!(median_from(Some(&path)).unwrap(), 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/medjudge-input.txt");
        assert!(matches!(median_from(Some(&path)), Err(MedianError::Io(_))));
    }
}
