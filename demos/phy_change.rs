//! Named-twig diagnostics, demonstrated on a physical-layer change
//! response test modeled after a Bluetooth link-layer procedure.
//!
//! Run with `RUST_LOG=trace cargo run --example phy_change` to see the
//! engine's own instrumentation alongside the test's output.

use twigtest::harness::run_branching_test;
use twigtest::{branch_end_named, branch_start_count};

fn main() {
    env_logger::init();

    const CH_RSP_NAMES: &[&str] = &["change_to_2mbps", "change to coded", "no change"];
    const CH_RSP_ERROR_CODE_2M: &[&str] = &["success", "destination phy not supported"];
    const CH_RSP_ERROR_CODE_CD: &[&str] = &[
        "success",
        "destination phy not supported",
        "not enough time",
        "<not entered>",
    ];
    const DLE_RSP_ERROR_CODE: &[&str] = &[
        "larger packets",
        "smaller packets",
        "same size packets",
        "no packet size change",
        "<not entered>",
    ];

    run_branching_test(|| {
        let ch_rsp_phy =
            branch_start_count!("change_response_phy", 3, Some(CH_RSP_NAMES));
        let mut ch_rsp_errcode = 3u32;
        let mut dle_rsp_errcode = 4u32;

        match ch_rsp_phy {
            0 => {
                ch_rsp_errcode =
                    branch_start_count!("ch_rsp_error_code", 2, Some(CH_RSP_ERROR_CODE_2M));
                branch_end_named!("ch_rsp_error_code");
                dle_rsp_errcode = branch_start_count!(
                    "data length procedure response error code",
                    4,
                    Some(DLE_RSP_ERROR_CODE)
                );
                branch_end_named!("data length procedure response error code");
            }
            1 => {
                ch_rsp_errcode =
                    branch_start_count!("ch_rsp_error_code_cd", 3, Some(CH_RSP_ERROR_CODE_CD));
                branch_end_named!("ch_rsp_error_code_cd");
            }
            2 => {
                ch_rsp_errcode = branch_start_count!("ch_rsp_error_code", 2, None);
                branch_end_named!("ch_rsp_error_code");
            }
            _ => unreachable!(),
        }
        branch_end_named!("change_response_phy");

        println!(
            "Phy change test: Phy: {} ({}),\tCode: {} ({}),\tDle: {} ({})",
            CH_RSP_NAMES[ch_rsp_phy as usize],
            ch_rsp_phy,
            CH_RSP_ERROR_CODE_CD
                .get(ch_rsp_errcode as usize)
                .unwrap_or(&"?"),
            ch_rsp_errcode,
            DLE_RSP_ERROR_CODE
                .get(dle_rsp_errcode as usize)
                .unwrap_or(&"?"),
            dle_rsp_errcode,
        );
    });
}
