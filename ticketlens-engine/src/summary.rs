use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use ticketlens_protocol::ticket::{TicketCollection, TicketField};

pub const DEFAULT_TOP_N: usize = 10;

/// One bar of a category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// Tickets raised on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Aggregates shown next to every filtered subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    pub total: usize,
    pub by_category: Vec<CountEntry>,
    pub by_status: Vec<CountEntry>,
    pub by_priority: Vec<CountEntry>,
    pub daily: Vec<DailyCount>,
    /// Tickets whose incidence date is absent or unreadable.
    pub undated: usize,
    pub top_customers: Vec<CountEntry>,
    pub top_products: Vec<CountEntry>,
    pub top_cities: Vec<CountEntry>,
}

impl TicketSummary {
    pub fn from_tickets(tickets: &TicketCollection) -> Self {
        Self::with_top_n(tickets, DEFAULT_TOP_N)
    }

    pub fn with_top_n(tickets: &TicketCollection, top_n: usize) -> Self {
        let mut daily: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut undated = 0;
        for ticket in tickets {
            match ticket.incidence_date() {
                Some(date) => *daily.entry(date).or_default() += 1,
                None => undated += 1,
            }
        }

        let top = |field| {
            let mut counts = value_counts(tickets, field);
            counts.truncate(top_n);
            counts
        };

        Self {
            total: tickets.len(),
            by_category: value_counts(tickets, TicketField::IncidenceType),
            by_status: value_counts(tickets, TicketField::Status),
            by_priority: value_counts(tickets, TicketField::Priority),
            daily: daily
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
            undated,
            top_customers: top(TicketField::CustomerName),
            top_products: top(TicketField::ProductName),
            top_cities: top(TicketField::CustomerCity),
        }
    }

    pub fn most_raised_category(&self) -> Option<&CountEntry> {
        self.by_category.first()
    }
}

/// Counts distinct values of a field, most frequent first, ties by label.
/// Tickets without the field are not counted.
pub fn value_counts(tickets: &TicketCollection, field: TicketField) -> Vec<CountEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in tickets.iter().filter_map(|ticket| ticket.text(field)) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        *counts.entry(value.to_string()).or_default() += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}
