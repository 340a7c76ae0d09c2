//! NeedBraces xpath suppression regression tests.

mod xpath_harness;

use xpath_harness::{module_config, run_verifications};

#[test]
fn if_without_braces() {
    run_verifications(
        &module_config("NeedBraces"),
        "InputXpathNeedBracesIf.java",
        &["3:9: 'if' construct must use '{}'s"],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathNeedBracesIf']]\
             /class_body/method_declaration[./identifier[@text='method']]/block/if_statement",
            "/program/class_declaration[./identifier[@text='InputXpathNeedBracesIf']]\
             /class_body/method_declaration[./identifier[@text='method']]/block/if_statement/IF",
        ],
    );
}

#[test]
fn while_without_braces() {
    run_verifications(
        &module_config("NeedBraces"),
        "InputXpathNeedBracesLoop.java",
        &["3:9: 'while' construct must use '{}'s"],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathNeedBracesLoop']]\
             /class_body/method_declaration[./identifier[@text='countDown']]/block\
             /while_statement",
            "/program/class_declaration[./identifier[@text='InputXpathNeedBracesLoop']]\
             /class_body/method_declaration[./identifier[@text='countDown']]/block\
             /while_statement/WHILE",
        ],
    );
}
