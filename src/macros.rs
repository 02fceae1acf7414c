//! Source-location capture.
//!
//! The original threads `__FILE__`, `__LINE__`, and `__func__` into
//! `_branch_start`/`_branch_end` via preprocessor macros at every call
//! site. `file!()` and `line!()` are direct replacements; there is no
//! built-in `function!()`, so [`__twigtest_function_name`] reaches for
//! the standard trick of naming a zero-sized local function and
//! trimming `type_name`'s trailing `::f` off its path.

/// Not part of the public API; used by the four macros below.
#[doc(hidden)]
#[macro_export]
macro_rules! __twigtest_function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        &name[..name.len() - 3]
    }};
}

/// Declare a branch point with an explicit name, arity, and optional
/// per-twig names, capturing the call site automatically.
#[macro_export]
macro_rules! branch_start_count {
    ($name:expr, $num_twigs:expr, $twig_names:expr) => {
        $crate::branch_start_count_at(
            $name,
            $num_twigs,
            $twig_names,
            $crate::error::SourceLocation::new(file!(), line!(), $crate::__twigtest_function_name!()),
        )
    };
}

/// Declare an unnamed two-way branch point.
#[macro_export]
macro_rules! branch_start {
    () => {
        $crate::branch_start_count!("", 2, None)
    };
}

/// Close the branch point opened by the matching `branch_start_count!`/
/// `branch_start!`, checking that `$name` matches the name it was
/// opened with.
#[macro_export]
macro_rules! branch_end_named {
    ($name:expr) => {
        $crate::branch_end_named_at(
            $name,
            $crate::error::SourceLocation::new(file!(), line!(), $crate::__twigtest_function_name!()),
        )
    };
}

/// Close the innermost open branch point opened with [`branch_start!`],
/// which also uses the empty name. Closing a branch opened with
/// [`branch_start_count!`] under a non-empty name with this macro
/// fails with a name mismatch, same as closing it under any other
/// wrong name would.
#[macro_export]
macro_rules! branch_end {
    () => {
        $crate::branch_end_named!("")
    };
}
