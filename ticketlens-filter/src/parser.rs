use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::spec::FilterSpec;

/// Target slot for a captured prompt value.
#[derive(Debug, Clone, Copy)]
enum Slot {
    CustomerName,
    CustomerCity,
    DateRange,
    Status,
    Priority,
    ProductName,
    Category,
    LastSixMonths,
}

struct PromptRule {
    slot: Slot,
    pattern: Regex,
}

// Quoted values accept either quote character on each side.
const VALUE: &str = r#"\s*["']([^"']+)["']"#;

fn keyword_rule(slot: Slot, keyword: &str) -> PromptRule {
    let pattern = format!(r"(?i)\b{keyword}{VALUE}");
    PromptRule {
        slot,
        pattern: Regex::new(&pattern).expect("prompt keyword pattern must compile"),
    }
}

static RULES: Lazy<Vec<PromptRule>> = Lazy::new(|| {
    vec![
        keyword_rule(Slot::CustomerName, r"customer\s+name"),
        keyword_rule(Slot::CustomerCity, r"customer\s+city"),
        PromptRule {
            slot: Slot::DateRange,
            pattern: Regex::new(&format!(r"(?i)\bfrom{VALUE}\s*to{VALUE}"))
                .expect("date range pattern must compile"),
        },
        keyword_rule(Slot::Status, "status"),
        keyword_rule(Slot::Priority, "priority"),
        keyword_rule(Slot::ProductName, r"product\s+name"),
        keyword_rule(Slot::Category, "category"),
        PromptRule {
            slot: Slot::LastSixMonths,
            pattern: Regex::new(r"(?i)\blast\s+6\s+months\b")
                .expect("last 6 months pattern must compile"),
        },
    ]
});

/// Turns a free-text prompt into a [`FilterSpec`].
///
/// Every rule is matched independently against the whole prompt and only its
/// first occurrence counts. Phrases that match no rule are ignored; an
/// unrecognised prompt yields an unconstrained spec.
pub fn parse_prompt(prompt: &str) -> FilterSpec {
    let mut spec = FilterSpec::default();

    for rule in RULES.iter() {
        let Some(captures) = rule.pattern.captures(prompt) else {
            continue;
        };
        let value = |index: usize| captures.get(index).map(|m| m.as_str().to_string());

        match rule.slot {
            Slot::CustomerName => spec.customer_name = value(1),
            Slot::CustomerCity => spec.customer_city = value(1),
            Slot::DateRange => {
                spec.start_date = value(1);
                spec.end_date = value(2);
            }
            Slot::Status => spec.status = value(1),
            Slot::Priority => spec.priority = value(1),
            Slot::ProductName => spec.product_name = value(1),
            Slot::Category => spec.category = value(1),
            Slot::LastSixMonths => spec.last_6_months = true,
        }
    }

    debug!(filters = %spec.describe(), "parsed prompt");
    spec
}
