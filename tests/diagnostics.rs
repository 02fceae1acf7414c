//! Named twigs and the current-path diagnostic. `twig_names` is purely
//! cosmetic — it must never change which combinations get visited.

use std::cell::Cell;

use twigtest::harness::run_branching_test;
use twigtest::{branch_end_named, branch_start_count};

#[test]
fn twig_names_do_not_change_enumeration() {
    const PHY_NAMES: &[&str] = &["change_to_2mbps", "change_to_coded", "no_change"];
    const ERR_2M: &[&str] = &["success", "destination phy not supported"];

    let combos = Cell::new(Vec::<(u32, u32)>::new());
    run_branching_test(|| {
        let phy = branch_start_count!("change_response_phy", 3, Some(PHY_NAMES));
        let mut code = 0;
        if phy == 0 {
            code = branch_start_count!("ch_rsp_error_code", 2, Some(ERR_2M));
            branch_end_named!("ch_rsp_error_code");
        }
        branch_end_named!("change_response_phy");
        let mut combos_inner = combos.take();
        combos_inner.push((phy, code));
        combos.set(combos_inner);
    });

    let combos = combos.into_inner();
    // phy == 0 forks two ways (code 0/1), phy == 1 and phy == 2 each
    // contribute one combination with code defaulted to 0.
    assert_eq!(combos.len(), 4);
    assert!(combos.contains(&(0, 0)));
    assert!(combos.contains(&(0, 1)));
    assert!(combos.contains(&(1, 0)));
    assert!(combos.contains(&(2, 0)));
}

#[test]
fn print_current_path_does_not_panic_mid_run() {
    // branch_print_current_path is a diagnostic, callable any time a
    // test is in progress; it must never itself disturb the run.
    run_branching_test(|| {
        let _ = branch_start_count!("a", 2, None);
        twigtest::branch_print_current_path();
        branch_end_named!("a");
    });
}

#[test]
fn print_current_path_outside_a_test_is_a_no_op() {
    // No engine is active on this thread at this point.
    twigtest::branch_print_current_path();
}
