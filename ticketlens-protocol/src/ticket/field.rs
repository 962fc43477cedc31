use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known ticket columns. Each maps to the upstream column names it may
/// appear under; the first one present on a record wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TicketField {
    CustomerName,
    CustomerCity,
    IncidenceDate,
    Status,
    Priority,
    ProductName,
    IncidenceType,
}

impl TicketField {
    pub const ALL: [TicketField; 7] = [
        TicketField::CustomerName,
        TicketField::CustomerCity,
        TicketField::IncidenceDate,
        TicketField::Status,
        TicketField::Priority,
        TicketField::ProductName,
        TicketField::IncidenceType,
    ];

    /// Upstream column names, in lookup order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TicketField::CustomerName => &["CUSTOMER_NAME", "customer_name"],
            TicketField::CustomerCity => &["CUSTOMER_CITY", "CITY_NAME", "customer_city"],
            TicketField::IncidenceDate => &["INCIDENCE_DATE", "TICKET_DATE", "incidence_date"],
            TicketField::Status => &["STATUS_MEANING", "STATUS", "status"],
            TicketField::Priority => &[
                "INCIDENCE_LEVEL_MEANING",
                "PRIORITY_MEANING",
                "PRIORITY",
                "priority",
            ],
            TicketField::ProductName => &["PRODUCT_NAME", "product_name"],
            TicketField::IncidenceType => &[
                "INCIDENCE_DESCRIPTION",
                "INCIDENCE_TYPE",
                "incidence_type",
            ],
        }
    }

    /// Canonical upstream column, used when building records.
    pub fn primary_column(self) -> &'static str {
        self.columns()[0]
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketField::CustomerName => "customer name",
            TicketField::CustomerCity => "customer city",
            TicketField::IncidenceDate => "incidence date",
            TicketField::Status => "status",
            TicketField::Priority => "priority",
            TicketField::ProductName => "product name",
            TicketField::IncidenceType => "incidence type",
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
