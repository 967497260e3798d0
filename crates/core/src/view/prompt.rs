use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ticket::{Ticket, TicketError, TicketStore};

/// Confirmation shown before a ticket is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub choices: [DeleteChoice; 2],
}

impl Default for DeletePrompt {
    fn default() -> Self {
        Self {
            title: "Delete Ticket",
            message: "Are you sure you want to delete this ticket?",
            choices: [DeleteChoice::Cancel, DeleteChoice::Delete],
        }
    }
}

/// Answer to the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteChoice {
    Cancel,
    /// Destructive choice.
    Delete,
}

/// What happened after the prompt was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user backed out; the store was not touched.
    Cancelled,
    /// The ticket was removed.
    Deleted(Ticket),
    /// The user confirmed but no ticket had that id.
    Missing,
}

impl DeleteOutcome {
    /// Returns true if a ticket was removed.
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }
}

/// Apply the user's answer to the delete prompt for ticket `id`.
pub fn confirm_delete(
    store: &dyn TicketStore,
    id: &str,
    choice: DeleteChoice,
) -> Result<DeleteOutcome, TicketError> {
    match choice {
        DeleteChoice::Cancel => {
            debug!(ticket_id = %id, "Delete cancelled");
            Ok(DeleteOutcome::Cancelled)
        }
        DeleteChoice::Delete => Ok(match store.delete(id)? {
            Some(ticket) => DeleteOutcome::Deleted(ticket),
            None => DeleteOutcome::Missing,
        }),
    }
}
