#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let value = medjudge::extract::extract_trailing_value(&line);
    // Appending whitespace never changes the extracted value.
    let padded = format!("{line} \t");
    assert_eq!(medjudge::extract::extract_trailing_value(&padded), value);
});
