#![no_main]
use libfuzzer_sys::fuzz_target;
use medjudge::median::MedianError;

fuzz_target!(|data: &[u8]| {
    match medjudge::records::read_values(data) {
        Ok(values) => {
            let n = values.len();
            let mut v = values;
            match medjudge::median::upper_median(&mut v) {
                Ok(m) => assert!(v.contains(&m)),
                Err(e) => assert!(n == 0 && matches!(e, MedianError::EmptyInput)),
            }
        }
        Err(MedianError::InvalidCount(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
