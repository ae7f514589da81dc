// Trailing-value extraction for salary-style records.
//
// A record is a free-form line whose last whitespace-separated field ends in
// a decimal number, e.g. `Alice Smith 52000`. Extraction is lenient: a line
// without trailing digits yields 0 rather than an error.

/// Extract the base-10 integer that ends `line`, ignoring trailing whitespace.
///
/// The digit run is the maximal sequence of ASCII digits immediately before
/// the trailing whitespace. Anything in front of it (including a `-` sign or
/// letters glued to the digits) is ignored. Returns 0 when there is no such
/// run. Values too large for `u64` saturate at `u64::MAX`.
///
/// ```
/// use medjudge::extract::extract_trailing_value;
///
/// assert_eq!(extract_trailing_value("Alice 52000"), 52000);
/// assert_eq!(extract_trailing_value("Bob   7  \r"), 7);
/// assert_eq!(extract_trailing_value("NoDigits"), 0);
/// ```
pub fn extract_trailing_value(line: &str) -> u64 {
    let digits = trailing_digits(line.as_bytes());
    accumulate(digits)
}

/// Return the run of ASCII digits that precedes any trailing whitespace.
fn trailing_digits(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |p| p + 1);
    let body = &bytes[..end];
    let start = body
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |p| p + 1);
    &body[start..]
}

fn accumulate(digits: &[u8]) -> u64 {
    let mut total: u64 = 0;
    for &d in digits {
        let digit = u64::from(d - b'0');
        total = match total.checked_mul(10).and_then(|t| t.checked_add(digit)) {
            Some(t) => t,
            None => {
                log::debug!("trailing value overflows u64, saturating");
                return u64::MAX;
            }
        };
    }
    total
}
