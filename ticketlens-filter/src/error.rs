use serde::Serialize;
use thiserror::Error;
use ticketlens_protocol::ticket::TicketField;

use crate::dimension::FilterDimension;

/// Which end of an explicit date range failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBound {
    Start,
    End,
}

impl std::fmt::Display for DateBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateBound::Start => f.write_str("start"),
            DateBound::End => f.write_str("end"),
        }
    }
}

/// Non-fatal problems met while applying a filter. The affected dimension is
/// skipped and the remaining ones still apply.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterWarning {
    #[error("{dimension} filter skipped: no ticket has a {field} column")]
    MissingColumn {
        dimension: FilterDimension,
        field: TicketField,
    },
    #[error("date range filter skipped: could not read {bound} date {value:?}")]
    InvalidDateBound { bound: DateBound, value: String },
    #[error("date range filter skipped: the {missing} date is missing")]
    IncompleteDateRange { missing: DateBound },
}

impl FilterWarning {
    pub fn dimension(&self) -> FilterDimension {
        match self {
            FilterWarning::MissingColumn { dimension, .. } => *dimension,
            FilterWarning::InvalidDateBound { .. } | FilterWarning::IncompleteDateRange { .. } => {
                FilterDimension::DateRange
            }
        }
    }
}
