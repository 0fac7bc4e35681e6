use tracetab::guard::{GuardError, KNOWN_TABLES, validate};

#[test]
fn every_known_table_passes_bare() {
    for table in KNOWN_TABLES {
        assert_eq!(validate(table), Ok(()), "table `{table}` should validate");
    }
}

#[test]
fn empty_query_fails_before_table_lookup() {
    assert_eq!(validate(""), Err(GuardError::EmptyQuery));
    assert_eq!(validate("  \n  "), Err(GuardError::EmptyQuery));
}

#[test]
fn unknown_table_error_names_the_identifier() {
    let error = validate("notatable | limit 10").expect_err("unknown table must fail");
    assert_eq!(error.code(), "unknown_table");
    assert!(error.to_string().contains("`notatable`"));
}

#[test]
fn multiline_query_with_leading_whitespace_validates() {
    assert_eq!(validate("\n  traces\n  | where severityLevel > 2\n"), Ok(()));
}

#[test]
fn multi_statement_query_validates_on_its_first_statement() {
    assert_eq!(validate("traces; requests | take 5"), Ok(()));
    assert_eq!(validate("traces\n| where a > 1;\nrequests | count"), Ok(()));
}

#[test]
fn only_the_first_statement_table_is_checked() {
    assert_eq!(validate("traces; notatable"), Ok(()));
    assert!(matches!(
        validate("notatable; traces"),
        Err(GuardError::UnknownTable { .. })
    ));
}

#[test]
fn delimiter_scan_still_covers_later_statements() {
    assert!(matches!(
        validate("traces; requests | where (a > 1"),
        Err(GuardError::UnbalancedDelimiters { .. })
    ));
}

#[test]
fn unclosed_paren_is_reported() {
    let error = validate("traces | where (a > 1").expect_err("unclosed paren must fail");
    assert_eq!(error.code(), "unbalanced_delimiters");
    assert!(error.to_string().contains("never closed"));
}

#[test]
fn mismatched_closer_kind_is_reported() {
    assert!(matches!(
        validate("traces | where (x[0) > 1]"),
        Err(GuardError::UnbalancedDelimiters { .. })
    ));
}

#[test]
fn stray_closer_is_reported() {
    assert!(matches!(
        validate("traces | project a)"),
        Err(GuardError::UnbalancedDelimiters { .. })
    ));
}

#[test]
fn bracket_scan_ignores_string_literal_context() {
    // Known limitation: a literal containing a lone bracket is misreported.
    assert!(matches!(
        validate("traces | where message == \"(\""),
        Err(GuardError::UnbalancedDelimiters { .. })
    ));
}

#[test]
fn nested_calls_and_index_expressions_validate() {
    assert_eq!(
        validate("requests | where tostring(customDimensions[\"env\"]) == \"prod\""),
        Ok(())
    );
}
