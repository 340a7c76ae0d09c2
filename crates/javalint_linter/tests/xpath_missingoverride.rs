//! MissingOverride xpath suppression regression tests.

mod xpath_harness;

use xpath_harness::{module_config, run_verifications};

#[test]
fn inherit_doc_without_override_annotation() {
    run_verifications(
        &module_config("MissingOverride"),
        "InputXpathMissingOverride.java",
        &["5:5: include @java.lang.Override annotation when {@inheritDoc} Javadoc tag exists"],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverride']]\
             /class_body/method_declaration[./identifier[@text='process']]",
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverride']]\
             /class_body/method_declaration[./identifier[@text='process']]/modifiers",
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverride']]\
             /class_body/method_declaration[./identifier[@text='process']]/modifiers/PUBLIC",
        ],
    );
}

#[test]
fn inherit_doc_on_private_method() {
    run_verifications(
        &module_config("MissingOverride"),
        "InputXpathMissingOverridePrivate.java",
        &["5:5: {@inheritDoc} tag is not valid at this location."],
        &[
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverridePrivate']]\
             /class_body/method_declaration[./identifier[@text='getValue']]",
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverridePrivate']]\
             /class_body/method_declaration[./identifier[@text='getValue']]/modifiers",
            "/program/class_declaration[./identifier[@text='InputXpathMissingOverridePrivate']]\
             /class_body/method_declaration[./identifier[@text='getValue']]/modifiers/PRIVATE",
        ],
    );
}
