//! EmptyStatement xpath suppression regression tests.

mod xpath_harness;

use xpath_harness::{module_config, run_verifications};

#[test]
fn standalone_semicolon() {
    run_verifications(
        &module_config("EmptyStatement"),
        "InputXpathEmptyStatement.java",
        &["3:9: Empty statement."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathEmptyStatement']]\
             /class_body/method_declaration[./identifier[@text='method']]/block/SEMI",
        ],
    );
}

#[test]
fn empty_while_body() {
    run_verifications(
        &module_config("EmptyStatement"),
        "InputXpathEmptyStatementLoop.java",
        &["3:23: Empty statement."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathEmptyStatementLoop']]\
             /class_body/method_declaration[./identifier[@text='spin']]/block/while_statement\
             /SEMI",
        ],
    );
}
