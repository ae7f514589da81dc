// Record input: a count line followed by that many free-form records.
//
// Input layout:
//
//   N
//   <record 1>
//   ...
//   <record N>
//
// Every record contributes exactly one value, so the value list always has
// length N. Input that ends early is padded with zero-valued records, up to
// MAX_PADDING of them; a count further beyond the input is rejected.

use std::borrow::Cow;
use std::io::BufRead;

use crate::extract::extract_trailing_value;
use crate::median::{MedianError, upper_median};

/// Upper bound on the capacity reserved from the declared count.
const MAX_PREALLOC: usize = 1 << 16;

/// Most zero-valued records that may stand in for missing input.
pub const MAX_PADDING: usize = 1 << 20;

/// Read the record count and the values of the records that follow it.
///
/// Lines after the N-th record are left unread.
pub fn read_values<R: BufRead>(mut reader: R) -> Result<Vec<u64>, MedianError> {
    let mut buf = Vec::new();

    let count = match read_line(&mut reader, &mut buf)? {
        Some(line) => parse_count(&line)?,
        None => return Err(MedianError::InvalidCount(String::new())),
    };
    log::debug!("reading {count} records");

    let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
    while values.len() < count {
        match read_line(&mut reader, &mut buf)? {
            Some(line) => values.push(extract_trailing_value(&line)),
            None => break,
        }
    }

    let missing = count - values.len();
    if missing > MAX_PADDING {
        log::warn!("count {count} exceeds the {} records in the input", values.len());
        return Err(MedianError::InvalidCount(count.to_string()));
    }
    if missing > 0 {
        log::warn!("input ended early: {missing} of {count} records missing, counted as 0");
        values.resize(count, 0);
    }
    Ok(values)
}

/// Read all records from `reader` and return their upper median.
pub fn median_of_input<R: BufRead>(reader: R) -> Result<u64, MedianError> {
    let mut values = read_values(reader)?;
    upper_median(&mut values)
}

fn parse_count(line: &str) -> Result<usize, MedianError> {
    let text = line.trim();
    text.parse::<usize>()
        .map_err(|_| MedianError::InvalidCount(text.to_string()))
}

/// Read one line into `buf`, returning `None` at end of input.
fn read_line<'a, R: BufRead>(
    reader: &mut R,
    buf: &'a mut Vec<u8>,
) -> Result<Option<Cow<'a, str>>, MedianError> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf)))
}
