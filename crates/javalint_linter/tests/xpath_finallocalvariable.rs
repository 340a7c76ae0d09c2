//! FinalLocalVariable xpath suppression regression tests.

mod xpath_harness;

use xpath_harness::{module_config, run_verifications};

#[test]
fn local_variable_never_reassigned() {
    run_verifications(
        &module_config("FinalLocalVariable"),
        "InputXpathFinalLocalVariable.java",
        &["3:13: Variable 'count' should be declared final."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathFinalLocalVariable']]\
             /class_body/method_declaration[./identifier[@text='method']]/block\
             /local_variable_declaration/variable_declarator[./identifier[@text='count']]",
            "/program/class_declaration[./identifier[@text='InputXpathFinalLocalVariable']]\
             /class_body/method_declaration[./identifier[@text='method']]/block\
             /local_variable_declaration/variable_declarator/identifier[@text='count']",
        ],
    );
}

#[test]
fn enhanced_for_loop_variable() {
    run_verifications(
        &module_config("FinalLocalVariable").property("validateEnhancedForLoopVariable", "true"),
        "InputXpathFinalLocalVariableEnhancedFor.java",
        &["3:18: Variable 'item' should be declared final."],
        &[
            "/program/class_declaration\
             [./identifier[@text='InputXpathFinalLocalVariableEnhancedFor']]/class_body\
             /method_declaration[./identifier[@text='method']]/block/enhanced_for_statement\
             /identifier[@text='item']",
        ],
    );
}
