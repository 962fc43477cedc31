mod collection;
mod field;
mod record;

pub use collection::TicketCollection;
pub use field::TicketField;
pub use record::{Ticket, TicketBuilder};
