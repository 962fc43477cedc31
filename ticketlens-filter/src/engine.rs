use chrono::{Months, NaiveDate, Utc};
use ticketlens_protocol::dates::parse_date;
use ticketlens_protocol::ticket::TicketCollection;
use tracing::{debug, warn};

use crate::dimension::{Criterion, FilterDimension};
use crate::error::{DateBound, FilterWarning};
use crate::outcome::FilterOutcome;
use crate::spec::FilterSpec;

/// Months covered by the `last_6_months` window.
pub const RECENT_WINDOW_MONTHS: u32 = 6;

/// Applies [`FilterSpec`]s to ticket collections.
///
/// Dimensions are ANDed and applied in [`FilterDimension::APPLICATION_ORDER`],
/// so the recent window narrows the working set before anything else. A
/// dimension that cannot be evaluated is skipped with a [`FilterWarning`];
/// the others still apply.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    window_months: u32,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    pub fn new() -> Self {
        Self {
            window_months: RECENT_WINDOW_MONTHS,
        }
    }

    /// Filters against today's date (UTC).
    pub fn apply(&self, tickets: &TicketCollection, spec: &FilterSpec) -> FilterOutcome {
        self.apply_at(tickets, spec, Utc::now().date_naive())
    }

    /// Filters with an explicit reference date for the recent window. The
    /// window is computed once per call.
    pub fn apply_at(
        &self,
        tickets: &TicketCollection,
        spec: &FilterSpec,
        today: NaiveDate,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::new(tickets.clone());

        for dimension in spec.active_dimensions() {
            let criterion = match self.resolve(dimension, spec, today) {
                Ok(criterion) => criterion,
                Err(warning) => {
                    warn!(%dimension, %warning, "skipping filter dimension");
                    outcome.push_warning(warning);
                    continue;
                }
            };

            if !outcome.tickets.is_empty() && !outcome.tickets.has_column(criterion.field()) {
                let warning = FilterWarning::MissingColumn {
                    dimension,
                    field: criterion.field(),
                };
                warn!(%dimension, %warning, "skipping filter dimension");
                outcome.push_warning(warning);
                continue;
            }

            let before = outcome.tickets.len();
            outcome.tickets.retain(|ticket| criterion.matches(ticket));
            outcome.record_dimension(dimension);
            debug!(
                %dimension,
                before,
                after = outcome.tickets.len(),
                "applied filter dimension"
            );
        }

        outcome
    }

    fn resolve(
        &self,
        dimension: FilterDimension,
        spec: &FilterSpec,
        today: NaiveDate,
    ) -> Result<Criterion, FilterWarning> {
        match dimension {
            FilterDimension::LastSixMonths => Ok(Criterion::Within {
                from: today
                    .checked_sub_months(Months::new(self.window_months))
                    .unwrap_or(NaiveDate::MIN),
                to: today,
            }),
            FilterDimension::DateRange => {
                let from = resolve_bound(DateBound::Start, spec.start_date.as_deref())?;
                let to = resolve_bound(DateBound::End, spec.end_date.as_deref())?;
                Ok(Criterion::Within { from, to })
            }
            other => {
                let needle = spec.text_value(other).unwrap_or_default();
                Ok(Criterion::contains(other.field(), needle))
            }
        }
    }
}

fn resolve_bound(bound: DateBound, raw: Option<&str>) -> Result<NaiveDate, FilterWarning> {
    let raw = raw.ok_or(FilterWarning::IncompleteDateRange { missing: bound })?;
    parse_date(raw).ok_or_else(|| FilterWarning::InvalidDateBound {
        bound,
        value: raw.to_string(),
    })
}

/// Filters with a default engine against today's date.
pub fn filter_tickets(tickets: &TicketCollection, spec: &FilterSpec) -> FilterOutcome {
    FilterEngine::new().apply(tickets, spec)
}
