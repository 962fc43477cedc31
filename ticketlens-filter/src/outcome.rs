use ticketlens_protocol::ticket::TicketCollection;

use crate::dimension::FilterDimension;
use crate::error::FilterWarning;

/// Best-effort result of one filter application.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Matching tickets, in input order.
    pub tickets: TicketCollection,
    /// Dimensions that were skipped and why.
    pub warnings: Vec<FilterWarning>,
    /// Dimensions that were evaluated against the working set.
    pub applied: Vec<FilterDimension>,
}

impl FilterOutcome {
    pub fn new(tickets: TicketCollection) -> Self {
        Self {
            tickets,
            warnings: Vec::new(),
            applied: Vec::new(),
        }
    }

    pub fn record_dimension(&mut self, dimension: FilterDimension) {
        if !self.applied.contains(&dimension) {
            self.applied.push(dimension);
        }
    }

    pub fn push_warning(&mut self, warning: FilterWarning) {
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether nothing matched. Not an error.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn into_tickets(self) -> TicketCollection {
        self.tickets
    }
}
