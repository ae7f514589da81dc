// Command-line front-ends for the three binaries.
//
// Each submodule owns one binary's clap definition and exit-code mapping.
// Logging is shared: `env_logger` on stderr, `RUST_LOG` taking precedence
// over the `--verbose`/`--quiet` flags.

pub mod checker;
pub mod median;
pub mod runner;

use clap::{ArgAction, Args};

/// Verbosity flags shared by every binary.
#[derive(Args, Debug, Clone, Copy, Default)]
pub(crate) struct LogArgs {
    /// Quiet mode (errors only).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use twice for debug output).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

impl LogArgs {
    fn default_filter(self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose.min(2) {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

pub(crate) fn init_logging(args: LogArgs) {
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_filter()),
    )
    .format_timestamp(None)
    .format_target(false)
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_follows_flags() {
        let quiet = LogArgs {
            quiet: true,
            verbose: 0,
        };
        assert_eq!(quiet.default_filter(), "error");
        assert_eq!(LogArgs::default().default_filter(), "warn");
        let loud = LogArgs {
            quiet: false,
            verbose: 5,
        };
        assert_eq!(loud.default_filter(), "debug");
    }
}
