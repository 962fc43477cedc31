mod request;
mod response;

pub use request::FetchRequest;
pub use response::{decode_ticket_payload, PayloadError};
