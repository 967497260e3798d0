//! Ticket storage trait and types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::require_text;
use crate::ticket::{Field, Ticket, TicketStatus, ValidationError};

/// Error type for ticket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// Input was rejected; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(String),
    /// Cannot perform operation due to current status.
    #[error("Cannot {operation} ticket {ticket_id}: current status is {current_state}")]
    InvalidState {
        ticket_id: String,
        current_state: String,
        operation: String,
    },
}

/// Title, description and status submitted by the ticket form.
///
/// Used for both creating and editing a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
}

impl TicketRequest {
    /// Create a request with the default status.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: TicketStatus::default(),
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    /// Check that title and description are not blank. Title is checked first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, Field::Title)?;
        require_text(&self.description, Field::Description)
    }
}

/// Whether ratings are accepted for tickets that are not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingPolicy {
    /// Only completed tickets can be rated.
    #[default]
    CompletedOnly,
    /// Any ticket can be rated; visibility is left to the UI.
    AnyStatus,
}

impl RatingPolicy {
    /// Returns true if a ticket in `status` may receive a rating.
    pub fn allows(&self, status: TicketStatus) -> bool {
        match self {
            RatingPolicy::CompletedOnly => status.shows_rating(),
            RatingPolicy::AnyStatus => true,
        }
    }
}

/// Filter for querying tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFilter {
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Maximum number of results.
    pub limit: usize,
    /// Offset for pagination.
    pub offset: usize,
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketFilter {
    /// Create a new filter with defaults.
    pub fn new() -> Self {
        Self {
            status: None,
            limit: 100,
            offset: 0,
        }
    }

    /// Filter by status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns true if the ticket passes the status filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.is_none_or(|status| ticket.status == status)
    }
}

/// Trait for ticket storage backends.
///
/// Result of an edit, with the status the ticket had just before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedTicket {
    pub ticket: Ticket,
    pub previous_status: TicketStatus,
}

impl UpdatedTicket {
    /// Returns `(from, to)` if the edit changed the status.
    pub fn transition(&self) -> Option<(TicketStatus, TicketStatus)> {
        (self.previous_status != self.ticket.status)
            .then_some((self.previous_status, self.ticket.status))
    }
}

/// Every mutating operation is atomic: on error the collection is unchanged.
pub trait TicketStore: Send + Sync {
    /// Append a new ticket with a fresh id and no rating.
    fn create(&self, request: TicketRequest) -> Result<Ticket, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: &str) -> Result<Option<Ticket>, TicketError>;

    /// List tickets matching the filter, in insertion order.
    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError>;

    /// Count tickets matching the filter, ignoring pagination.
    fn count(&self, filter: &TicketFilter) -> Result<usize, TicketError>;

    /// Replace title, description and status. Id and rating are kept.
    ///
    /// The previous status is read under the same lock as the write.
    fn update_with_previous(
        &self,
        id: &str,
        request: TicketRequest,
    ) -> Result<UpdatedTicket, TicketError>;

    /// Replace title, description and status. Id and rating are kept.
    fn update(&self, id: &str, request: TicketRequest) -> Result<Ticket, TicketError> {
        self.update_with_previous(id, request)
            .map(|updated| updated.ticket)
    }

    /// Permanently delete a ticket.
    /// Returns the deleted ticket, or `None` if no ticket had that id.
    fn delete(&self, id: &str) -> Result<Option<Ticket>, TicketError>;

    /// Set the star rating of a ticket.
    fn rate(&self, id: &str, stars: i64) -> Result<Ticket, TicketError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(status: TicketStatus) -> Ticket {
        Ticket {
            id: "t".to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            status,
            rating: None,
        }
    }

    #[test]
    fn test_request_defaults_to_created() {
        let request = TicketRequest::new("VPN", "Cannot connect");
        assert_eq!(request.status, TicketStatus::Created);
    }

    #[test]
    fn test_request_deserialize_without_status() {
        let request: TicketRequest =
            serde_json::from_str(r#"{"title":"VPN","description":"Cannot connect"}"#).unwrap();
        assert_eq!(request.status, TicketStatus::Created);
    }

    #[test]
    fn test_validate_title_checked_first() {
        let request = TicketRequest::new(" ", "");
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyField(Field::Title))
        );
    }

    #[test]
    fn test_validate_description() {
        let request = TicketRequest::new("VPN", "   ");
        assert_eq!(
            request.validate(),
            Err(ValidationError::EmptyField(Field::Description))
        );
        assert!(TicketRequest::new("VPN", "x").validate().is_ok());
    }

    #[test]
    fn test_rating_policy() {
        assert!(RatingPolicy::CompletedOnly.allows(TicketStatus::Completed));
        assert!(!RatingPolicy::CompletedOnly.allows(TicketStatus::Created));
        assert!(!RatingPolicy::CompletedOnly.allows(TicketStatus::UnderAssistance));
        assert!(RatingPolicy::AnyStatus.allows(TicketStatus::Created));
    }

    #[test]
    fn test_filter_matches_status() {
        let filter = TicketFilter::new().with_status(TicketStatus::Completed);
        assert!(filter.matches(&ticket(TicketStatus::Completed)));
        assert!(!filter.matches(&ticket(TicketStatus::Created)));
        assert!(TicketFilter::new().matches(&ticket(TicketStatus::Created)));
    }

    #[test]
    fn test_updated_ticket_transition() {
        let updated = UpdatedTicket {
            ticket: ticket(TicketStatus::Completed),
            previous_status: TicketStatus::Created,
        };
        assert_eq!(
            updated.transition(),
            Some((TicketStatus::Created, TicketStatus::Completed))
        );

        let unchanged = UpdatedTicket {
            ticket: ticket(TicketStatus::Created),
            previous_status: TicketStatus::Created,
        };
        assert_eq!(unchanged.transition(), None);
    }

    #[test]
    fn test_error_display() {
        let err = TicketError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Ticket not found: abc");

        let err = TicketError::from(ValidationError::EmptyField(Field::Title));
        assert_eq!(err.to_string(), "Please enter a ticket title.");

        let err = TicketError::InvalidState {
            ticket_id: "1".to_string(),
            current_state: "Created".to_string(),
            operation: "rate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot rate ticket 1: current status is Created"
        );
    }
}
