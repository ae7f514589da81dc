#![no_main]
use libfuzzer_sys::fuzz_target;
use medjudge::compare::{Verdict, compare_streams};

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (answer, output) = input;
    let verdict = compare_streams(&answer[..], &output[..]).unwrap();
    assert_eq!(verdict.is_accepted(), answer == output);
    if let Verdict::PresentationError { offset } = verdict {
        assert_eq!(offset as usize, answer.len());
        assert!(output.starts_with(&answer));
    }
});
