//! Error handling
//!
//! Every error the engine can raise is a variant of [`BranchError`].
//! Raising one always means the same thing happened in the original
//! C implementation: print a single diagnostic line and unwind out of
//! the test body, because the engine's bookkeeping can no longer be
//! trusted for the rest of this run.

use std::fmt;
use thiserror::Error;

/// Where in the user's test body a branch point was declared or closed.
///
/// Formats as `SOURCE_LOCATION_FORMAT` from the original implementation:
/// `"{file}:{line}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl SourceLocation {
    pub fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Every way a test body can misuse the branch exploration engine, or
/// the engine can detect that its own bookkeeping has gone inconsistent.
///
/// Variants are grouped by the error kinds from the design's error
/// handling section: usage errors, structural mismatches across runs,
/// name mismatches at `branch_end`, start/end pairing mismatches, and
/// impossible internal states.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BranchError {
    /// `branch_start_count` was asked for fewer than two twigs.
    #[error("{location}: error: branch start in function {} requested for {num_twigs} branches, only 2 or more branches are supported", location.function)]
    TooFewTwigs {
        location: SourceLocation,
        num_twigs: u32,
    },

    /// A branch operation was called while no test was in progress.
    #[error("{location}: error: branch {operation} in function {} called outside a test", location.function)]
    OutsideTest {
        location: SourceLocation,
        operation: &'static str,
    },

    /// `branch_end` was called with no open branch to close.
    #[error("{location}: error: branch end requested in function {} using name \"{name}\", but no branch started", location.function)]
    NoOpenBranch {
        location: SourceLocation,
        name: String,
    },

    /// A twig that was `DISCOVERED` on a previous run produced more
    /// sibling branches this run than it did previously.
    #[error("{location}: error: more sub-branches under \"{parent_name}\" this run than were recorded previously")]
    TooManySubbranches {
        location: SourceLocation,
        parent_name: String,
    },

    /// The branch re-encountered at a cursor position does not match
    /// the one recorded there on a previous run (name, arity, source
    /// location, or insertion order differs).
    #[error("{location}: error: branch structure at this point does not match the structure recorded on a previous run (expected \"{expected_name}\")")]
    StructureMismatch {
        location: SourceLocation,
        expected_name: String,
    },

    /// `branch_end_named` was called with a name that does not match
    /// the innermost open branch.
    #[error("{location}: error: branch end in function {} using name \"{name}\". Expected name \"{expected}\" as used by last branch start", location.function)]
    NameMismatch {
        location: SourceLocation,
        name: String,
        expected: String,
    },

    /// A `branch_end` was paired with the wrong open branch: the
    /// innermost open branch is not the one the caller believes it
    /// closed.
    #[error("{location}: error: inconsistent amount of branch start/end function pairs detected in function {} using name \"{name}\", with recorded branch name \"{recorded}\"", location.function)]
    UnbalancedBranchEnds {
        location: SourceLocation,
        name: String,
        recorded: String,
    },

    /// After a run, the cursor did not return to the trunk at nesting
    /// level zero.
    #[error("branch ends don't match branch starts at top level")]
    TopLevelImbalance,

    /// After a run, the number of top-level branches visited changed
    /// from a previous run.
    #[error("number of branches in top level not consistent between runs")]
    TopLevelCountChanged,

    /// A twig was observed in a state that should be unreachable (for
    /// example, already closed twice).
    #[error("{location}: error: twig for branch \"{name}\" observed in an impossible state")]
    ImpossibleTwigState {
        location: SourceLocation,
        name: String,
    },

    /// `branch_custom_func_wrapper` was called re-entrantly from
    /// inside a function it is already driving.
    #[error("branch_custom_func_wrapper is not reentrant")]
    ReentrantCustomWrapper,
}

/// Log `err` at `error` level (mirroring the original's `print_error`)
/// and unwind the current thread by panicking with `err` as the typed
/// payload.
///
/// This is the Rust analogue of the original's `print_error` + `_fail`
/// pair: a panic is this ecosystem's non-local control transfer, and
/// [`crate::harness::EscapeGuard`] is what runs on that unwind path to
/// clean up the tree and print the current branch path.
pub(crate) fn fail(err: BranchError) -> ! {
    log::error!("{err}");
    std::panic::panic_any(err);
}
