//! Ticket system: data model, storage trait and the in-memory store.

mod memory_store;
mod seed;
mod store;
mod types;

pub use memory_store::MemoryTicketStore;
pub use seed::seed_tickets;
pub use store::{
    RatingPolicy, TicketError, TicketFilter, TicketRequest, TicketStore, UpdatedTicket,
};
pub use types::{Accent, Field, Rating, Ticket, TicketStatus, UnknownStatus, ValidationError};
