// Byte-wise comparison of a contestant output against the expected answer.
//
// Verdicts and exit codes follow the testlib checker convention so the
// `cmp-file` binary can be dropped into any harness that expects it.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Result of comparing an output stream with an answer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Both streams hold exactly the same bytes.
    Accepted,
    /// The output differs from the answer at `offset`, or ends before it.
    WrongAnswer { offset: u64 },
    /// The output matches the whole answer but continues past its end.
    PresentationError { offset: u64 },
}

impl Verdict {
    /// Process exit code used by judging harnesses for this verdict.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Accepted => 0,
            Self::WrongAnswer { .. } => 1,
            Self::PresentationError { .. } => 2,
        }
    }

    /// Short status keyword (`ok`, `wrong answer`, `wrong output format`).
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Accepted => "ok",
            Self::WrongAnswer { .. } => "wrong answer",
            Self::PresentationError { .. } => "wrong output format",
        }
    }

    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "files are identical"),
            Self::WrongAnswer { offset } => write!(f, "files differ at byte {offset}"),
            Self::PresentationError { offset } => {
                write!(f, "extra information in the output file at byte {offset}")
            }
        }
    }
}

/// Exit code reported when the checker itself cannot do its job.
pub const EXIT_FAIL: i32 = 3;

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Compare `output` against `answer` byte for byte.
///
/// Every byte of the answer must appear at the same offset in the output,
/// and the output must end where the answer ends.
pub fn compare_streams<A: Read, O: Read>(answer: A, output: O) -> io::Result<Verdict> {
    let mut answer = ByteReader::new(answer);
    let mut output = ByteReader::new(output);
    let mut offset: u64 = 0;

    while let Some(expected) = answer.next_byte()? {
        if output.next_byte()? != Some(expected) {
            log::debug!("mismatch at byte {offset}");
            return Ok(Verdict::WrongAnswer { offset });
        }
        offset += 1;
    }

    if output.next_byte()?.is_some() {
        return Ok(Verdict::PresentationError { offset });
    }
    Ok(Verdict::Accepted)
}

/// Open both files and compare them with [`compare_streams`].
pub fn compare_files(answer: &Path, output: &Path) -> io::Result<Verdict> {
    let answer = open(answer)?;
    let output = open(output)?;
    compare_streams(answer, output)
}

fn open(path: &Path) -> io::Result<File> {
    File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))
}

/// Single-byte view over a buffered reader.
struct ByteReader<R: Read> {
    inner: BufReader<R>,
}

impl<R: Read> ByteReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner: BufReader::with_capacity(BUF_SIZE, inner),
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }
}
