//! In-memory ticket store implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    seed::seed_tickets, Rating, RatingPolicy, Ticket, TicketError, TicketFilter, TicketRequest,
    TicketStore, UpdatedTicket,
};

/// Ticket store holding an insertion-ordered collection in memory.
///
/// The collection lives as long as the store; nothing is persisted.
pub struct MemoryTicketStore {
    tickets: Mutex<Vec<Ticket>>,
    rating_policy: RatingPolicy,
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTicketStore {
    /// Create an empty store that only accepts ratings for completed tickets.
    pub fn new() -> Self {
        Self::with_tickets(Vec::new())
    }

    /// Create a store preloaded with the three seed tickets.
    pub fn seeded() -> Self {
        Self::with_tickets(seed_tickets())
    }

    /// Create a store preloaded with the given tickets, in order.
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: Mutex::new(tickets),
            rating_policy: RatingPolicy::default(),
        }
    }

    /// Set the rating policy.
    pub fn with_rating_policy(mut self, policy: RatingPolicy) -> Self {
        self.rating_policy = policy;
        self
    }

    /// Returns the rating policy in effect.
    pub fn rating_policy(&self) -> RatingPolicy {
        self.rating_policy
    }

    // Every operation completes without panicking while holding the lock,
    // so a poisoned guard still protects a consistent collection.
    fn tickets(&self) -> MutexGuard<'_, Vec<Ticket>> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh_id(tickets: &[Ticket]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !tickets.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }
}

impl TicketStore for MemoryTicketStore {
    fn create(&self, request: TicketRequest) -> Result<Ticket, TicketError> {
        request.validate()?;

        let mut tickets = self.tickets();
        let ticket = Ticket {
            id: Self::fresh_id(&tickets),
            title: request.title,
            description: request.description,
            status: request.status,
            rating: None,
        };
        tickets.push(ticket.clone());

        debug!(ticket_id = %ticket.id, status = %ticket.status, "Ticket created");
        Ok(ticket)
    }

    fn get(&self, id: &str) -> Result<Option<Ticket>, TicketError> {
        Ok(self.tickets().iter().find(|t| t.id == id).cloned())
    }

    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError> {
        Ok(self
            .tickets()
            .iter()
            .filter(|t| filter.matches(t))
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect())
    }

    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError> {
        Ok(self.tickets().iter().filter(|t| filter.matches(t)).count())
    }

    fn update_with_previous(
        &self,
        id: &str,
        request: TicketRequest,
    ) -> Result<UpdatedTicket, TicketError> {
        request.validate()?;

        let mut tickets = self.tickets();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TicketError::NotFound(id.to_string()))?;

        let previous = ticket.status;
        ticket.title = request.title;
        ticket.description = request.description;
        ticket.status = request.status;

        debug!(ticket_id = %id, from = %previous, to = %ticket.status, "Ticket updated");
        Ok(UpdatedTicket {
            ticket: ticket.clone(),
            previous_status: previous,
        })
    }

    fn delete(&self, id: &str) -> Result<Option<Ticket>, TicketError> {
        let mut tickets = self.tickets();
        let removed = tickets
            .iter()
            .position(|t| t.id == id)
            .map(|index| tickets.remove(index));

        match &removed {
            Some(_) => debug!(ticket_id = %id, "Ticket deleted"),
            None => debug!(ticket_id = %id, "Delete ignored, no such ticket"),
        }
        Ok(removed)
    }

    fn rate(&self, id: &str, stars: i64) -> Result<Ticket, TicketError> {
        let rating = Rating::new(stars)?;

        let mut tickets = self.tickets();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TicketError::NotFound(id.to_string()))?;

        if !self.rating_policy.allows(ticket.status) {
            warn!(ticket_id = %id, status = %ticket.status, "Rejected rating for ticket that is not completed");
            return Err(TicketError::InvalidState {
                ticket_id: id.to_string(),
                current_state: ticket.status.to_string(),
                operation: "rate".to_string(),
            });
        }

        ticket.rating = Some(rating);

        debug!(ticket_id = %id, rating = %rating, "Ticket rated");
        Ok(ticket.clone())
    }
}
