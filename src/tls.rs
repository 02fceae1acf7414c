//! Per-thread engine storage.
//!
//! The original keeps one `global_branch_information` static shared by
//! the whole process. A thread-local is the direct Rust analogue when
//! tests may run on separate threads: each thread gets its own engine,
//! with the same single-instance-at-a-time lifecycle the original
//! assumes.

use std::cell::RefCell;

use crate::engine::{Engine, RestartCode};
use crate::error::{fail, BranchError, SourceLocation};

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

/// Run `f` against the live engine, or fail with [`BranchError::OutsideTest`]
/// if no test is currently in progress on this thread.
pub(crate) fn with_engine_mut<R>(
    operation: &'static str,
    loc: SourceLocation,
    f: impl FnOnce(&mut Engine) -> R,
) -> R {
    ENGINE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(engine) => f(engine),
        None => fail(BranchError::OutsideTest {
            location: loc,
            operation,
        }),
    })
}

pub(crate) fn is_active() -> bool {
    ENGINE.with(|cell| cell.borrow().is_some())
}

pub(crate) fn init() {
    ENGINE.with(|cell| *cell.borrow_mut() = Some(Engine::new()));
}

pub(crate) fn cleanup() {
    ENGINE.with(|cell| *cell.borrow_mut() = None);
}

pub(crate) fn restart() -> RestartCode {
    ENGINE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .expect("restart() is only called between init() and cleanup()")
            .restart()
    })
}

pub(crate) fn print_current_path() {
    ENGINE.with(|cell| {
        if let Some(engine) = cell.borrow().as_ref() {
            engine.print_current_path();
        }
    });
}
