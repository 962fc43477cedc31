// Unit tests for turning free-text prompts into filter specifications.
use test_case::test_case;
use ticketlens::{parse_prompt, FilterSpec};

#[test]
fn parses_every_named_dimension_from_the_reference_prompt() {
    let spec = parse_prompt(
        r#"customer name "ABCD" from "2024-01-01" to "2024-02-23" with priority "High" and status "Assigned" and product name "Flosense water controller""#,
    );

    assert_eq!(
        spec,
        FilterSpec {
            customer_name: Some("ABCD".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-02-23".into()),
            status: Some("Assigned".into()),
            priority: Some("High".into()),
            product_name: Some("Flosense water controller".into()),
            customer_city: None,
            category: None,
            last_6_months: false,
        }
    );
}

#[test_case("show me everything" ; "no keywords")]
#[test_case("" ; "empty prompt")]
#[test_case("customer name ABCD" ; "unquoted value")]
#[test_case(r#"from "2024-01-01" only"# ; "lone from")]
#[test_case(r#"to "2024-02-01""# ; "lone to")]
fn unmatched_prompts_are_unconstrained(prompt: &str) {
    assert!(parse_prompt(prompt).is_unconstrained());
}

#[test_case(r#"CUSTOMER NAME "ABCD""# ; "upper case keyword")]
#[test_case(r#"Customer   Name   'ABCD'"# ; "extra whitespace")]
#[test_case(r#"customer name "ABCD'"# ; "mismatched quotes")]
#[test_case(r#"customer name'ABCD'"# ; "no space before quote")]
fn keyword_matching_is_permissive(prompt: &str) {
    assert_eq!(parse_prompt(prompt).customer_name.as_deref(), Some("ABCD"));
}

#[test]
fn only_first_occurrence_counts() {
    let spec = parse_prompt(r#"status "Closed" or status "Assigned""#);
    assert_eq!(spec.status.as_deref(), Some("Closed"));
}

#[test]
fn last_six_months_needs_no_value() {
    let spec = parse_prompt("Trends in the LAST 6 MONTHS for customer city 'Pune'");
    assert!(spec.last_6_months);
    assert_eq!(spec.customer_city.as_deref(), Some("Pune"));
    assert!(!parse_prompt("last six months").last_6_months);
}

#[test]
fn values_are_kept_verbatim() {
    let spec = parse_prompt(r#"category " Leakage " and priority 'P1 - Urgent'"#);
    assert_eq!(spec.category.as_deref(), Some(" Leakage "));
    assert_eq!(spec.priority.as_deref(), Some("P1 - Urgent"));
}
