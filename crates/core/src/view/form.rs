use serde::Serialize;
use tracing::debug;

use crate::ticket::{Ticket, TicketError, TicketRequest, TicketStatus, TicketStore};

/// Whether the form adds a new ticket or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// Buffer behind the add/edit modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketForm {
    #[serde(flatten)]
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketForm {
    /// Empty form for a new ticket.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            description: String::new(),
            status: TicketStatus::Created,
        }
    }

    /// Form prefilled from an existing ticket.
    pub fn edit(ticket: &Ticket) -> Self {
        Self {
            mode: FormMode::Edit {
                id: ticket.id.clone(),
            },
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
        }
    }

    /// Modal heading.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Ticket",
            FormMode::Edit { .. } => "Edit Ticket",
        }
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Save",
            FormMode::Edit { .. } => "Update",
        }
    }

    /// The request this form would submit.
    pub fn request(&self) -> TicketRequest {
        TicketRequest::new(self.title.clone(), self.description.clone()).with_status(self.status)
    }

    /// Validate and save the form through the store.
    ///
    /// On a validation error nothing is written and the error's message is
    /// the alert text to show.
    pub fn submit(&self, store: &dyn TicketStore) -> Result<Ticket, TicketError> {
        let request = self.request();
        request.validate()?;

        debug!(heading = self.heading(), "Submitting ticket form");
        match &self.mode {
            FormMode::Add => store.create(request),
            FormMode::Edit { id } => store.update(id, request),
        }
    }
}
