pub mod dates;
pub mod source;
pub mod ticket;

pub mod prelude {
    pub use crate::dates::parse_date;
    pub use crate::source::{decode_ticket_payload, FetchRequest, PayloadError};
    pub use crate::ticket::{Ticket, TicketBuilder, TicketCollection, TicketField};
}
