#[test]
fn schema_model_derive_ui() {
    let testcases = trybuild::TestCases::new();
    testcases.pass("tests/ui/schema_model/pass.rs");
    testcases.pass("tests/ui/schema_model/pass_overrides.rs");
    testcases.compile_fail("tests/ui/schema_model/fail_generic.rs");
    testcases.compile_fail("tests/ui/schema_model/fail_tuple.rs");
    testcases.compile_fail("tests/ui/schema_model/fail_enum.rs");
    testcases.compile_fail("tests/ui/schema_model/fail_unknown_type.rs");
    testcases.compile_fail("tests/ui/schema_model/fail_duplicate_name.rs");
}
