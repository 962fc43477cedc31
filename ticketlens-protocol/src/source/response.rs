use serde_json::{Map, Value};
use thiserror::Error;

use crate::ticket::{Ticket, TicketCollection};

/// Reasons an upstream body cannot be read as a ticket list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("expected a list of tickets or an object holding one, got {0}")]
    UnexpectedShape(&'static str),
    #[error("ticket list entry {index} is {kind}, not an object")]
    NonObjectRecord { index: usize, kind: &'static str },
}

/// Decodes the upstream body into tickets.
///
/// Accepted shapes: a top-level list of ticket objects; an object carrying
/// `data.TICKET_LIST`; or any object with a nested list of objects, where the
/// first such list found depth-first in document order wins. An object whose
/// only nested lists are empty decodes to no tickets.
pub fn decode_ticket_payload(payload: Value) -> Result<TicketCollection, PayloadError> {
    match payload {
        Value::Array(items) => records_from_list(items),
        Value::Object(mut root) => {
            if let Some(list) = take_ticket_list(&mut root) {
                return list;
            }
            let root = Value::Object(root);
            match find_record_list(&root) {
                Some(items) => records_from_list(items.clone()),
                None if has_empty_list(&root) => Ok(TicketCollection::empty()),
                None => Err(PayloadError::UnexpectedShape("an object without a ticket list")),
            }
        }
        other => Err(PayloadError::UnexpectedShape(kind_of(&other))),
    }
}

fn take_ticket_list(
    root: &mut Map<String, Value>,
) -> Option<Result<TicketCollection, PayloadError>> {
    let data = root.get_mut("data")?.as_object_mut()?;
    match data.remove("TICKET_LIST")? {
        Value::Array(items) => Some(records_from_list(items)),
        Value::Null => Some(Ok(TicketCollection::empty())),
        other => Some(Err(PayloadError::UnexpectedShape(kind_of(&other)))),
    }
}

fn find_record_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            Some(items)
        }
        Value::Array(items) => items.iter().find_map(find_record_list),
        Value::Object(map) => map.values().find_map(find_record_list),
        _ => None,
    }
}

fn has_empty_list(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty() || items.iter().any(has_empty_list),
        Value::Object(map) => map.values().any(has_empty_list),
        _ => false,
    }
}

fn records_from_list(items: Vec<Value>) -> Result<TicketCollection, PayloadError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Ticket::new(fields)),
            other => Err(PayloadError::NonObjectRecord {
                index,
                kind: kind_of(&other),
            }),
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
