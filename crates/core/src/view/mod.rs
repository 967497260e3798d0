//! View models for the ticket screen.
//!
//! A UI renders these directly: the list of cards, the add/edit form and
//! the delete confirmation prompt. None of them hold state of their own
//! beyond what the form is editing; every change goes through a
//! [`TicketStore`](crate::ticket::TicketStore).

mod card;
mod form;
mod prompt;

pub use card::{Screen, TicketCard, SCREEN_HEADER};
pub use form::{FormMode, TicketForm};
pub use prompt::{confirm_delete, DeleteChoice, DeleteOutcome, DeletePrompt};
