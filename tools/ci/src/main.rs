//! Runs a set of checks on the codebase, allowing for easy local testing of CI runs.
//!
//! Adapted from [Bevy's CI runner](https://github.com/bevyengine/bevy/tree/main/tools/ci/src).
//! Local runs use whatever Rust toolchain is the local default.

use std::{collections::HashSet, process};

use hexplan_lib::enum_iter::IterableEnum;
use hexplan_macros::IterableEnum;
use itertools::Itertools;
use xshell::{cmd, Shell};

mod data_check;

/// The checks that can be run in CI, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IterableEnum)]
enum Check {
    Format,
    Clippy,
    Test,
    DocTest,
    DocCheck,
    CompileCheck,
    DataCheck,
}

impl Check {
    /// Returns the argument that selects this check.
    fn argument(&self) -> &'static str {
        match self {
            Check::Format => "format",
            Check::Clippy => "clippy",
            Check::Test => "test",
            Check::DocTest => "doctest",
            Check::DocCheck => "doccheck",
            Check::CompileCheck => "compilecheck",
            Check::DataCheck => "datacheck",
        }
    }

    /// Returns the [`Check`] selected by the given argument.
    fn from_argument(argument: &str) -> Option<Check> {
        Check::variants().find(|check| check.argument() == argument)
    }

    /// Runs this check, exiting the process if it fails.
    fn run(self, sh: &Shell) {
        match self {
            Check::Format => cmd!(sh, "cargo fmt --all -- --check")
                .run()
                .expect("Please run 'cargo fmt --all' to format your code."),
            Check::Clippy => cmd!(sh, "cargo clippy --workspace --all-targets -- {CLIPPY_FLAGS...}")
                .run()
                .expect("Please fix clippy errors in output above."),
            // Doc tests run separately
            Check::Test => cmd!(sh, "cargo test --workspace --lib --bins --tests --benches")
                .run()
                .expect("Please fix failing tests in output above."),
            Check::DocTest => cmd!(sh, "cargo test --workspace --doc")
                .run()
                .expect("Please fix failing doc-tests in output above."),
            Check::DocCheck => {
                let _rustdocflags = sh.push_env("RUSTDOCFLAGS", "-D warnings");
                cmd!(sh, "cargo doc --workspace --no-deps --document-private-items")
                    .run()
                    .expect("Please fix doc warnings in output above.");
            }
            Check::CompileCheck => cmd!(sh, "cargo check --workspace")
                .run()
                .expect("Please fix compiler errors in above output."),
            Check::DataCheck => {
                if let Err(message) = data_check::verify_data_files() {
                    eprintln!("{message}");
                    process::exit(1);
                }
            }
        }
    }
}

/// Controls how clippy is run.
const CLIPPY_FLAGS: [&str; 3] = [
    "-Aclippy::type_complexity",
    "-Wclippy::doc_markdown",
    "-Dwarnings",
];

fn main() {
    let selected: HashSet<Check> = match std::env::args().nth(1).as_deref() {
        None => Check::variants().collect(),
        Some(arg) => match Check::from_argument(arg) {
            Some(check) => HashSet::from([check]),
            None => {
                println!(
                    "Invalid argument: {arg}.\nEnter one of: {}.",
                    Check::variants().map(|check| check.argument()).join(", "),
                );
                process::exit(1);
            }
        },
    };

    let sh = Shell::new().expect("Could not open a shell.");
    for check in Check::variants().filter(|check| selected.contains(check)) {
        check.run(&sh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_from_argument_reverses() {
        for check in Check::variants() {
            assert_eq!(Check::from_argument(check.argument()), Some(check));
        }
        assert_eq!(Check::from_argument("invalid"), None);
    }

    #[test]
    fn every_check_has_a_distinct_argument() {
        assert_eq!(
            Check::variants().map(|check| check.argument()).unique().count(),
            Check::N_VARIANTS
        );
    }
}
