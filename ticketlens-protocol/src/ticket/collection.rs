use serde::{Deserialize, Serialize};

use super::field::TicketField;
use super::record::Ticket;

/// Ordered ticket sequence as returned upstream. Duplicates are legal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketCollection {
    tickets: Vec<Ticket>,
}

impl TicketCollection {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.tickets.iter()
    }

    pub fn as_slice(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn into_vec(self) -> Vec<Ticket> {
        self.tickets
    }

    /// Whether at least one ticket carries a column for `field`.
    pub fn has_column(&self, field: TicketField) -> bool {
        self.tickets.iter().any(|ticket| ticket.has_column(field))
    }

    /// Keeps the tickets matching `predicate`, preserving order.
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&Ticket) -> bool,
    {
        self.tickets.retain(predicate);
    }

    /// The collection as a JSON list of records.
    pub fn records_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.tickets
                .iter()
                .map(|ticket| serde_json::Value::Object(ticket.fields().clone()))
                .collect(),
        )
    }
}

impl From<Vec<Ticket>> for TicketCollection {
    fn from(value: Vec<Ticket>) -> Self {
        TicketCollection::new(value)
    }
}

impl FromIterator<Ticket> for TicketCollection {
    fn from_iter<I: IntoIterator<Item = Ticket>>(iter: I) -> Self {
        TicketCollection::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TicketCollection {
    type Item = Ticket;
    type IntoIter = std::vec::IntoIter<Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickets.into_iter()
    }
}

impl<'a> IntoIterator for &'a TicketCollection {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.tickets.iter()
    }
}
