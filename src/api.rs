//! Plain-function entry points the public macros expand into.
//!
//! These are thin, public so the macros (which must expand to
//! `$crate`-qualified paths usable from any crate) can reach them, but
//! documented as "call through the macros" rather than directly.

use crate::error::{fail, BranchError, SourceLocation};
use crate::tls;

/// Entry point for [`crate::branch_start_count`].
///
/// Arity is checked before checking whether a test is in progress, so
/// that calling this with `num_twigs < 2` is always reported as
/// `TooFewTwigs`, even outside a test — matching the original, which
/// checks arity before the enabled flag in one function.
pub fn branch_start_count_at(
    name: &'static str,
    num_twigs: u32,
    twig_names: Option<&'static [&'static str]>,
    loc: SourceLocation,
) -> u32 {
    if num_twigs < 2 {
        fail(BranchError::TooFewTwigs {
            location: loc,
            num_twigs,
        });
    }
    tls::with_engine_mut("start", loc, |engine| {
        engine.branch_start(name, num_twigs, twig_names, loc)
    })
}

/// Entry point for [`crate::branch_end_named`].
pub fn branch_end_named_at(name: &'static str, loc: SourceLocation) {
    tls::with_engine_mut("end", loc, |engine| engine.branch_end(name, loc));
}

/// `branch_print_current_path`: print the branch path selected on the
/// run currently in progress, or do nothing if no test is in progress.
pub fn branch_print_current_path() {
    tls::print_current_path();
}
