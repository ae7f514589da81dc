//! Medjudge: median of trailing record values, plus judging-harness tools.
//!
//! The crate provides:
//! - Trailing-value extraction from free-form records (`extract`)
//! - Upper-median selection (`median`)
//! - Count-prefixed record input (`records`)
//! - A byte-wise output checker with testlib verdicts (`compare`)
//! - A test runner that drives a solution and a checker (`runner`)
//! - Optional CLIs (`cli` feature): `medjudge`, `cmp-file`, `judge-run`
//!
//! # Quick Start
//!
//! ```
//! use medjudge::records::median_of_input;
//!
//! let input = "4\nAlice 52000\nBob 7\nCarol 61000\nDan 30000\n";
//! assert_eq!(median_of_input(input.as_bytes()).unwrap(), 52000);
//! ```

pub mod compare;
pub mod extract;
pub mod median;
pub mod records;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;
