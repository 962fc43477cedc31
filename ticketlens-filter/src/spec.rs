use serde::{Deserialize, Serialize};

use crate::dimension::FilterDimension;

/// Structured filter derived from one user prompt. `None` means the
/// dimension imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_city: Option<String>,
    /// Incidence type / category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub last_6_months: bool,
}

impl FilterSpec {
    /// Parses a free-text prompt. See [`crate::parse_prompt`].
    pub fn from_prompt(prompt: &str) -> Self {
        crate::parser::parse_prompt(prompt)
    }

    /// Whether every dimension is unset.
    pub fn is_unconstrained(&self) -> bool {
        self.active_dimensions().is_empty()
    }

    /// Set dimensions in the order the engine applies them. A date range
    /// counts as set when either bound is present.
    pub fn active_dimensions(&self) -> Vec<FilterDimension> {
        FilterDimension::APPLICATION_ORDER
            .into_iter()
            .filter(|dimension| self.is_set(*dimension))
            .collect()
    }

    pub fn is_set(&self, dimension: FilterDimension) -> bool {
        match dimension {
            FilterDimension::LastSixMonths => self.last_6_months,
            FilterDimension::DateRange => self.start_date.is_some() || self.end_date.is_some(),
            other => self.text_value(other).is_some(),
        }
    }

    /// Value of a text dimension, `None` for the date dimensions.
    pub fn text_value(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::CustomerName => self.customer_name.as_deref(),
            FilterDimension::Status => self.status.as_deref(),
            FilterDimension::Priority => self.priority.as_deref(),
            FilterDimension::ProductName => self.product_name.as_deref(),
            FilterDimension::CustomerCity => self.customer_city.as_deref(),
            FilterDimension::Category => self.category.as_deref(),
            FilterDimension::LastSixMonths | FilterDimension::DateRange => None,
        }
    }

    /// Short human readable rendering, e.g. `status="Closed", last 6 months`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        for dimension in self.active_dimensions() {
            match dimension {
                FilterDimension::LastSixMonths => parts.push("last 6 months".to_string()),
                FilterDimension::DateRange => parts.push(format!(
                    "from {:?} to {:?}",
                    self.start_date.as_deref().unwrap_or("?"),
                    self.end_date.as_deref().unwrap_or("?")
                )),
                other => {
                    if let Some(value) = self.text_value(other) {
                        parts.push(format!("{}={:?}", other.key(), value));
                    }
                }
            }
        }

        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }
}
