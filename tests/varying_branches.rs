//! Branch points whose presence (not just their selected value) varies
//! from run to run, nested to different depths.

use std::cell::Cell;

use twigtest::harness::run_branching_test;
use twigtest::{branch_end_named, branch_start_count};

const NOT_ENTERED: u32 = 255;

#[test]
fn varying_nested_branch_test_success() {
    const BRANCH_VALUES: &[(u32, u32)] = &[
        (0, 0),
        (0, 1),
        (1, NOT_ENTERED),
        (2, 0),
        (2, 1),
        (2, 2),
        (2, 3),
    ];
    let runs = Cell::new(0usize);
    run_branching_test(|| {
        let i = runs.get();
        let lvl1 = branch_start_count!("aba", 3, None);
        let mut lvl2 = NOT_ENTERED;
        match lvl1 {
            0 => {
                lvl2 = branch_start_count!("baba", 2, None);
                branch_end_named!("baba");
            }
            2 => {
                lvl2 = branch_start_count!("caba", 4, None);
                branch_end_named!("caba");
            }
            _ => {}
        }
        branch_end_named!("aba");
        assert_eq!(lvl1, BRANCH_VALUES[i].0);
        assert_eq!(lvl2, BRANCH_VALUES[i].1);
        runs.set(i + 1);
    });
    assert_eq!(runs.get(), BRANCH_VALUES.len());
}

#[test]
fn varying_double_nested_branch_test_success() {
    const BRANCH_VALUES: &[(u32, u32, u32)] = &[
        (0, 0, NOT_ENTERED),
        (0, 1, NOT_ENTERED),
        (1, NOT_ENTERED, NOT_ENTERED),
        (2, 0, 0),
        (2, 0, 1),
        (2, 0, 2),
        (2, 0, 3),
        (2, 1, NOT_ENTERED),
        (2, 2, NOT_ENTERED),
    ];
    let runs = Cell::new(0usize);
    run_branching_test(|| {
        let i = runs.get();
        let lvl1 = branch_start_count!("first_level", 3, None);
        let mut lvl2 = NOT_ENTERED;
        let mut lvl3 = NOT_ENTERED;
        match lvl1 {
            0 => {
                lvl2 = branch_start_count!("second_level_first_subbranch", 2, None);
                branch_end_named!("second_level_first_subbranch");
            }
            2 => {
                lvl2 = branch_start_count!("second_level_third_subbranch", 3, None);
                if lvl2 == 0 {
                    lvl3 = branch_start_count!("third_level_first_subbranch", 4, None);
                    branch_end_named!("third_level_first_subbranch");
                }
                branch_end_named!("second_level_third_subbranch");
            }
            _ => {}
        }
        branch_end_named!("first_level");
        assert_eq!(lvl1, BRANCH_VALUES[i].0);
        assert_eq!(lvl2, BRANCH_VALUES[i].1);
        assert_eq!(lvl3, BRANCH_VALUES[i].2);
        runs.set(i + 1);
    });
    assert_eq!(runs.get(), BRANCH_VALUES.len());
}

/// Six levels deep at one nesting depth, including a later sibling
/// branch (`third_level_third_subbranch`) that is declared every time
/// `first_level` selects its third twig regardless of what
/// `second_level_third_subbranch` picked — it structurally overshadows
/// the two conditional branches declared earlier in the same arm.
#[test]
fn varying_sequential_nested_branch_test_success() {
    const NE: u32 = NOT_ENTERED;
    const BRANCH_VALUES: &[(u32, u32, u32, u32, u32, u32)] = &[
        (0, 0, NE, NE, NE, NE),
        (0, 1, NE, NE, NE, NE),
        (1, NE, NE, NE, NE, NE),
        (2, 0, 0, NE, 0, 0),
        (2, 0, 0, NE, 1, 0),
        (2, 0, 1, NE, 0, 0),
        (2, 0, 1, NE, 1, 0),
        (2, 0, 2, NE, 0, 0),
        (2, 0, 2, NE, 1, 0),
        (2, 0, 2, NE, 1, 1),
        (2, 1, 0, 0, 0, 0),
        (2, 1, 0, 0, 1, 0),
        (2, 1, 0, 1, 0, 0),
        (2, 1, 0, 1, 1, 0),
        (2, 1, 1, 0, 0, 0),
        (2, 1, 1, 0, 1, 0),
        (2, 1, 1, 1, 0, 0),
        (2, 1, 1, 1, 1, 0),
        (2, 1, 2, 0, 0, 0),
        (2, 1, 2, 0, 1, 0),
        (2, 1, 2, 1, 0, 0),
        (2, 1, 2, 1, 1, 0),
        (2, 1, 2, 1, 1, 1),
        (2, 2, NE, NE, 0, 0),
        (2, 2, NE, NE, 1, 0),
        (2, 2, NE, NE, 1, 1),
    ];
    let runs = Cell::new(0usize);
    run_branching_test(|| {
        let i = runs.get();
        let lvl1 = branch_start_count!("first_level", 3, None);
        let mut lvl2 = NE;
        let mut lvl3 = NE;
        let mut lvl4 = NE;
        let mut lvl5 = NE;
        let mut lvl6 = NE;

        match lvl1 {
            0 => {
                lvl2 = branch_start_count!("second_level_first_subbranch", 2, None);
                branch_end_named!("second_level_first_subbranch");
            }
            2 => {
                lvl2 = branch_start_count!("second_level_third_subbranch", 3, None);
                if lvl2 == 0 || lvl2 == 1 {
                    lvl3 = branch_start_count!("third_level_first_subbranch", 3, None);
                    branch_end_named!("third_level_first_subbranch");
                }
                if lvl2 == 1 {
                    lvl4 = branch_start_count!("third_level_second_subbranch", 2, None);
                    branch_end_named!("third_level_second_subbranch");
                }
                lvl5 = branch_start_count!("third_level_third_subbranch", 2, None);
                branch_end_named!("third_level_third_subbranch");

                branch_end_named!("second_level_third_subbranch");

                lvl6 = branch_start_count!("second_level_forth_subbranch", 2, None);
                branch_end_named!("second_level_forth_subbranch");
            }
            _ => {}
        }
        branch_end_named!("first_level");

        assert_eq!(lvl1, BRANCH_VALUES[i].0);
        assert_eq!(lvl2, BRANCH_VALUES[i].1);
        assert_eq!(lvl3, BRANCH_VALUES[i].2);
        assert_eq!(lvl4, BRANCH_VALUES[i].3);
        assert_eq!(lvl5, BRANCH_VALUES[i].4);
        assert_eq!(lvl6, BRANCH_VALUES[i].5);
        runs.set(i + 1);
    });
    assert_eq!(runs.get(), BRANCH_VALUES.len());
}
