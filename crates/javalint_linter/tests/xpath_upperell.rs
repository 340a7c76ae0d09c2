//! UpperEll xpath suppression regression tests.

mod xpath_harness;

use xpath_harness::{module_config, run_verifications};

#[test]
fn lowercase_ell_on_field_initializer() {
    run_verifications(
        &module_config("UpperEll"),
        "InputXpathUpperEll.java",
        &["2:16: Should use uppercase 'L'."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathUpperEll']]/class_body\
             /field_declaration/variable_declarator[./identifier[@text='bad']]\
             /decimal_integer_literal[@text='508l']",
        ],
    );
}

#[test]
fn lowercase_ell_on_hex_literal() {
    run_verifications(
        &module_config("UpperEll"),
        "InputXpathUpperEllLocal.java",
        &["3:20: Should use uppercase 'L'."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathUpperEllLocal']]\
             /class_body/method_declaration[./identifier[@text='method']]/block\
             /local_variable_declaration/variable_declarator[./identifier[@text='hex']]\
             /hex_integer_literal[@text='0xffl']",
        ],
    );
}
