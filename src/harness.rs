//! The re-execution loop.
//!
//! `run_branching_test` plays the role of `cmocka_unit_test_twigs` /
//! `_branch_test_wrapper` / `_branch_teardown_wrapper` combined, for
//! any plain `FnMut` test body: it initializes the thread's engine,
//! calls the body until the restart decision says every combination
//! has been exercised, and tears the engine down.
//!
//! If the body panics (an assertion failure, or a [`crate::error::BranchError`]
//! raised by the engine itself), [`EscapeGuard`] runs on the unwind
//! path to print the branch path that was in progress and clean up —
//! the original's `_branch_teardown_wrapper` does the same check of
//! `global_branches_enabled` before printing.

use crate::engine::RestartCode;
use crate::error::BranchError;
use crate::tls;

struct EscapeGuard;

impl Drop for EscapeGuard {
    fn drop(&mut self) {
        if std::thread::panicking() && tls::is_active() {
            log::error!("branch path in progress when test body unwound:");
            tls::print_current_path();
            tls::cleanup();
        }
    }
}

/// Drive `body` through every root-to-leaf combination of branch
/// selections its calls to the `branch_start*`/`branch_end*` macros
/// describe, calling `body` once per combination.
///
/// Panics propagate to the caller after [`EscapeGuard`] has printed the
/// in-progress path and cleaned up the engine.
pub fn run_branching_test(mut body: impl FnMut()) {
    tls::init();
    let _guard = EscapeGuard;
    loop {
        body();
        match tls::restart() {
            RestartCode::Complete => break,
            RestartCode::Restart => continue,
        }
    }
    tls::cleanup();
}

/// Drive `func`, called with `state`, until every combination its
/// calls to the branch macros describe has been exercised.
///
/// Not reentrant: calling this from inside a `func` it is already
/// driving fails with [`BranchError::ReentrantCustomWrapper`] rather
/// than silently corrupting the running engine's bookkeeping.
pub fn branch_custom_func_wrapper<S>(mut func: impl FnMut(&mut S), state: &mut S) {
    if tls::is_active() {
        crate::error::fail(BranchError::ReentrantCustomWrapper);
    }
    run_branching_test(|| func(state));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn body_runs_once_per_leaf_combination() {
        let mut runs = 0;
        run_branching_test(|| {
            runs += 1;
            let _ = crate::branch_start!();
            crate::branch_end!();
        });
        assert_eq!(runs, 2);
    }

    #[test]
    fn custom_func_wrapper_rejects_reentry() {
        let mut state = 0u32;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            branch_custom_func_wrapper(
                |s: &mut u32| {
                    *s += 1;
                    let mut inner_state = 0u32;
                    branch_custom_func_wrapper(|s2: &mut u32| *s2 += 1, &mut inner_state);
                },
                &mut state,
            );
        }));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<BranchError>().is_some());
    }
}
