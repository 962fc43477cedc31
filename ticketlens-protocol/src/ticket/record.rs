use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::TicketField;
use crate::dates::parse_date;

/// One customer-support incidence record, kept as the raw upstream object so
/// columns this crate does not know about survive serialisation untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket {
    fields: Map<String, Value>,
}

impl Ticket {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Borrow the raw columns.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Raw value of a well-known field. `null` counts as absent.
    pub fn get(&self, field: TicketField) -> Option<&Value> {
        field
            .columns()
            .iter()
            .filter_map(|column| self.fields.get(*column))
            .find(|value| !value.is_null())
    }

    /// Whether any column alias of `field` exists on the record, even as `null`.
    pub fn has_column(&self, field: TicketField) -> bool {
        field
            .columns()
            .iter()
            .any(|column| self.fields.contains_key(*column))
    }

    /// Text view of a field. Numbers and booleans are rendered; arrays and
    /// objects are not considered text.
    pub fn text(&self, field: TicketField) -> Option<String> {
        match self.get(field)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Parsed incidence date, if present and readable.
    pub fn incidence_date(&self) -> Option<NaiveDate> {
        self.text(TicketField::IncidenceDate)
            .as_deref()
            .and_then(parse_date)
    }
}

impl From<Map<String, Value>> for Ticket {
    fn from(value: Map<String, Value>) -> Self {
        Ticket::new(value)
    }
}

/// Builder helper to create tickets with well-known columns.
#[derive(Debug, Default)]
pub struct TicketBuilder {
    fields: Map<String, Value>,
}

impl TicketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: TicketField, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.primary_column().to_string(), Value::String(value.into()));
        self
    }

    pub fn customer_name(self, value: impl Into<String>) -> Self {
        self.field(TicketField::CustomerName, value)
    }

    pub fn customer_city(self, value: impl Into<String>) -> Self {
        self.field(TicketField::CustomerCity, value)
    }

    pub fn incidence_date(self, value: impl Into<String>) -> Self {
        self.field(TicketField::IncidenceDate, value)
    }

    pub fn status(self, value: impl Into<String>) -> Self {
        self.field(TicketField::Status, value)
    }

    pub fn priority(self, value: impl Into<String>) -> Self {
        self.field(TicketField::Priority, value)
    }

    pub fn product_name(self, value: impl Into<String>) -> Self {
        self.field(TicketField::ProductName, value)
    }

    pub fn incidence_type(self, value: impl Into<String>) -> Self {
        self.field(TicketField::IncidenceType, value)
    }

    /// Sets an arbitrary raw column.
    pub fn column(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn build(self) -> Ticket {
        Ticket::new(self.fields)
    }
}
