//! `twigtest`: a branch-point discovery and exhaustive enumeration
//! engine for tree-shaped test bodies.
//!
//! A test written against this crate describes an n-ary decision tree
//! by calling [`branch_start_count!`]/[`branch_start!`] at each point
//! where the test body's behavior forks, and closes each one with the
//! matching [`branch_end_named!`]/[`branch_end!`]. [`harness::run_branching_test`]
//! re-executes the body, once per root-to-leaf combination of branch
//! selections, until every combination has been exercised exactly
//! once.
//!
//! ```
//! use twigtest::harness::run_branching_test;
//!
//! let mut combinations = Vec::new();
//! run_branching_test(|| {
//!     let a = twigtest::branch_start_count!("a", 2, None);
//!     let b = twigtest::branch_start_count!("b", 2, None);
//!     combinations.push((a, b));
//!     twigtest::branch_end_named!("b");
//!     twigtest::branch_end_named!("a");
//! });
//! assert_eq!(combinations.len(), 4);
//! ```

#[macro_use]
mod macros;

pub mod api;
pub mod error;
pub mod harness;

mod engine;
mod sibling_list;
mod tls;
mod tree;

pub use api::{branch_end_named_at, branch_print_current_path, branch_start_count_at};
pub use error::BranchError;
pub use harness::{branch_custom_func_wrapper, run_branching_test};
