// Unit tests for the filter engine's documented behaviour.
use chrono::NaiveDate;
use test_case::test_case;
use ticketlens::filter::{FilterDimension, FilterEngine, FilterSpec, FilterWarning};
use ticketlens::protocol::ticket::{Ticket, TicketBuilder, TicketCollection};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).expect("date")
}

fn dated(date: &str) -> Ticket {
    TicketBuilder::new()
        .customer_name("ABCD Corp")
        .status("Closed")
        .incidence_date(date)
        .build()
}

fn names(tickets: &TicketCollection) -> Vec<String> {
    tickets
        .iter()
        .filter_map(|ticket| ticket.fields().get("TICKET_NO"))
        .map(|value| value.to_string())
        .collect()
}

fn numbered(number: u32, ticket: TicketBuilder) -> Ticket {
    ticket
        .column("TICKET_NO", serde_json::json!(number))
        .build()
}

fn mixed_tickets() -> TicketCollection {
    vec![
        numbered(
            1,
            TicketBuilder::new()
                .customer_name("abcd corp")
                .customer_city("Pune")
                .status("Closed")
                .priority("High")
                .product_name("Flosense water controller")
                .incidence_type("Leakage")
                .incidence_date("2024-01-15"),
        ),
        numbered(
            2,
            TicketBuilder::new()
                .customer_name("xyz co")
                .customer_city("Mumbai")
                .status("Assigned")
                .priority("Low")
                .product_name("Valve")
                .incidence_type("No Flow")
                .incidence_date("2024-03-01"),
        ),
        numbered(
            3,
            TicketBuilder::new()
                .customer_name("ABCD Industries")
                .customer_city("Pune")
                .status("Assigned")
                .priority("high")
                .product_name("FLOSENSE meter")
                .incidence_type("leakage")
                .incidence_date("2024-02-23"),
        ),
    ]
    .into()
}

#[test]
fn unconstrained_spec_is_identity() {
    let tickets = mixed_tickets();
    let outcome = FilterEngine::new().apply_at(&tickets, &FilterSpec::default(), reference_date());

    assert_eq!(outcome.tickets, tickets);
    assert!(outcome.warnings.is_empty());
    assert!(outcome.applied.is_empty());
}

#[test_case(FilterSpec { customer_name: Some("ABCD".into()), ..FilterSpec::default() }, &["1", "3"] ; "customer name")]
#[test_case(FilterSpec { customer_city: Some("pune".into()), ..FilterSpec::default() }, &["1", "3"] ; "customer city")]
#[test_case(FilterSpec { status: Some("assigned".into()), ..FilterSpec::default() }, &["2", "3"] ; "status")]
#[test_case(FilterSpec { priority: Some("HIGH".into()), ..FilterSpec::default() }, &["1", "3"] ; "priority")]
#[test_case(FilterSpec { product_name: Some("flosense".into()), ..FilterSpec::default() }, &["1", "3"] ; "product name")]
#[test_case(FilterSpec { category: Some("Leak".into()), ..FilterSpec::default() }, &["1", "3"] ; "category")]
fn text_dimensions_match_case_insensitive_substrings(spec: FilterSpec, expected: &[&str]) {
    let outcome = FilterEngine::new().apply_at(&mixed_tickets(), &spec, reference_date());
    assert_eq!(names(&outcome.tickets), expected);
}

#[test]
fn customer_name_includes_lowercase_and_excludes_others() {
    let tickets: TicketCollection = vec![
        TicketBuilder::new().customer_name("abcd corp").build(),
        TicketBuilder::new().customer_name("xyz co").build(),
    ]
    .into();
    let spec = FilterSpec {
        customer_name: Some("ABCD".into()),
        ..FilterSpec::default()
    };

    let outcome = FilterEngine::new().apply_at(&tickets, &spec, reference_date());
    assert_eq!(outcome.tickets.len(), 1);
    assert_eq!(
        outcome.tickets.iter().next().and_then(|t| t.text(ticketlens::TicketField::CustomerName)),
        Some("abcd corp".to_string())
    );
}

#[test_case("2024-01-15", true ; "inside the range")]
#[test_case("2024-03-01", false ; "after the range")]
#[test_case("2024-02-23", true ; "on the end boundary")]
#[test_case("2024-01-01", true ; "on the start boundary")]
#[test_case("2023-12-31", false ; "before the range")]
fn explicit_range_is_inclusive(date: &str, included: bool) {
    let spec = FilterSpec {
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-02-23".into()),
        ..FilterSpec::default()
    };
    let tickets: TicketCollection = vec![dated(date)].into();

    let outcome = FilterEngine::new().apply_at(&tickets, &spec, reference_date());
    assert_eq!(outcome.tickets.len() == 1, included);
}

#[test_case("2024-02-01", true ; "five months back")]
#[test_case("2023-11-01", false ; "eight months back")]
#[test_case("2024-01-01", true ; "window start")]
#[test_case("2024-07-01", true ; "today")]
fn last_six_months_window(date: &str, included: bool) {
    let spec = FilterSpec {
        last_6_months: true,
        ..FilterSpec::default()
    };
    let tickets: TicketCollection = vec![dated(date)].into();

    let outcome = FilterEngine::new().apply_at(&tickets, &spec, reference_date());
    assert_eq!(outcome.tickets.len() == 1, included);
}

#[test]
fn window_and_explicit_range_are_both_enforced() {
    let spec = FilterSpec {
        last_6_months: true,
        start_date: Some("2023-06-01".into()),
        end_date: Some("2024-02-15".into()),
        ..FilterSpec::default()
    };
    let tickets: TicketCollection = vec![
        dated("2023-09-01"),
        dated("2024-02-01"),
        dated("2024-05-01"),
    ]
    .into();

    let outcome = FilterEngine::new().apply_at(&tickets, &spec, reference_date());
    assert_eq!(outcome.tickets.len(), 1);
    assert_eq!(
        outcome.applied,
        vec![FilterDimension::LastSixMonths, FilterDimension::DateRange]
    );
}

#[test]
fn malformed_dates_skip_range_but_keep_other_filters() {
    let spec = FilterSpec {
        start_date: Some("not-a-date".into()),
        end_date: Some("2024-02-23".into()),
        status: Some("Closed".into()),
        ..FilterSpec::default()
    };

    let outcome = FilterEngine::new().apply_at(&mixed_tickets(), &spec, reference_date());
    assert_eq!(names(&outcome.tickets), vec!["1"]);
    assert_eq!(outcome.applied, vec![FilterDimension::Status]);
    assert!(matches!(
        outcome.warnings.as_slice(),
        [FilterWarning::InvalidDateBound { value, .. }] if value == "not-a-date"
    ));
}

#[test]
fn empty_input_stays_empty() {
    let spec = FilterSpec {
        customer_name: Some("ABCD".into()),
        start_date: Some("2024-01-01".into()),
        end_date: Some("2024-02-23".into()),
        status: Some("Closed".into()),
        last_6_months: true,
        ..FilterSpec::default()
    };

    let outcome = FilterEngine::new().apply_at(&TicketCollection::empty(), &spec, reference_date());
    assert!(outcome.is_empty());
    assert!(outcome.warnings.is_empty());
}

#[test]
fn output_preserves_input_order() {
    let spec = FilterSpec {
        priority: Some("high".into()),
        ..FilterSpec::default()
    };
    let outcome = FilterEngine::new().apply_at(&mixed_tickets(), &spec, reference_date());
    assert_eq!(names(&outcome.tickets), vec!["1", "3"]);
}

#[test]
fn missing_column_is_a_warning_not_a_failure() {
    let tickets: TicketCollection = vec![
        TicketBuilder::new().customer_name("ABCD Corp").status("Closed").build(),
        TicketBuilder::new().customer_name("XYZ Co").status("Closed").build(),
    ]
    .into();
    let spec = FilterSpec {
        product_name: Some("Valve".into()),
        customer_name: Some("abcd".into()),
        ..FilterSpec::default()
    };

    let outcome = FilterEngine::new().apply_at(&tickets, &spec, reference_date());
    assert_eq!(outcome.tickets.len(), 1);
    assert_eq!(outcome.applied, vec![FilterDimension::CustomerName]);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].dimension(), FilterDimension::ProductName);
}
