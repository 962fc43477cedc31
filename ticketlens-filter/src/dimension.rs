use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ticketlens_protocol::ticket::{Ticket, TicketField};

/// One independently toggleable narrowing criterion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    LastSixMonths,
    CustomerName,
    DateRange,
    Status,
    Priority,
    ProductName,
    CustomerCity,
    Category,
}

impl FilterDimension {
    /// Order in which the engine narrows the working set. The six month
    /// window always comes first.
    pub const APPLICATION_ORDER: [FilterDimension; 8] = [
        FilterDimension::LastSixMonths,
        FilterDimension::CustomerName,
        FilterDimension::DateRange,
        FilterDimension::Status,
        FilterDimension::Priority,
        FilterDimension::ProductName,
        FilterDimension::CustomerCity,
        FilterDimension::Category,
    ];

    /// Key used in filter specifications.
    pub fn key(self) -> &'static str {
        match self {
            FilterDimension::LastSixMonths => "last_6_months",
            FilterDimension::CustomerName => "customer_name",
            FilterDimension::DateRange => "date_range",
            FilterDimension::Status => "status",
            FilterDimension::Priority => "priority",
            FilterDimension::ProductName => "product_name",
            FilterDimension::CustomerCity => "customer_city",
            FilterDimension::Category => "category",
        }
    }

    /// Ticket column the dimension reads.
    pub fn field(self) -> TicketField {
        match self {
            FilterDimension::LastSixMonths | FilterDimension::DateRange => {
                TicketField::IncidenceDate
            }
            FilterDimension::CustomerName => TicketField::CustomerName,
            FilterDimension::Status => TicketField::Status,
            FilterDimension::Priority => TicketField::Priority,
            FilterDimension::ProductName => TicketField::ProductName,
            FilterDimension::CustomerCity => TicketField::CustomerCity,
            FilterDimension::Category => TicketField::IncidenceType,
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolved per-ticket test for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Criterion {
    /// Case-insensitive substring containment. `needle` is already lowercased.
    Contains { field: TicketField, needle: String },
    /// Inclusive calendar-day range on the incidence date.
    Within { from: NaiveDate, to: NaiveDate },
}

impl Criterion {
    pub(crate) fn contains(field: TicketField, needle: &str) -> Self {
        Criterion::Contains {
            field,
            needle: needle.to_lowercase(),
        }
    }

    pub(crate) fn field(&self) -> TicketField {
        match self {
            Criterion::Contains { field, .. } => *field,
            Criterion::Within { .. } => TicketField::IncidenceDate,
        }
    }

    /// Absent or unreadable fields never match.
    pub(crate) fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Criterion::Contains { field, needle } => ticket
                .text(*field)
                .map(|candidate| candidate.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false),
            Criterion::Within { from, to } => ticket
                .incidence_date()
                .map(|date| *from <= date && date <= *to)
                .unwrap_or(false),
        }
    }
}
