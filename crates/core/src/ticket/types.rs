//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle status of a ticket.
///
/// Every status is reachable from every other one through an edit; there are
/// no automatic transitions. Serialized as its display label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TicketStatus {
    /// Initial status of a new ticket.
    #[default]
    Created,
    /// Someone is working on the ticket.
    #[serde(rename = "Under Assistance")]
    UnderAssistance,
    /// Work is done; the ticket can be rated.
    Completed,
}

impl TicketStatus {
    /// All statuses in picker order.
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Created,
        TicketStatus::UnderAssistance,
        TicketStatus::Completed,
    ];

    /// Returns the display label, which is also the wire form.
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Created => "Created",
            TicketStatus::UnderAssistance => "Under Assistance",
            TicketStatus::Completed => "Completed",
        }
    }

    /// Returns the accent colour used for the status badge.
    pub fn accent(&self) -> Accent {
        match self {
            TicketStatus::Created => Accent::Blue,
            TicketStatus::UnderAssistance => Accent::Yellow,
            TicketStatus::Completed => Accent::Green,
        }
    }

    /// Returns true if the rating control is shown for this status.
    pub fn shows_rating(&self) -> bool {
        matches!(self, TicketStatus::Completed)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing a status label outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ticket status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Accent
// ============================================================================

/// Badge accent colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Blue,
    Yellow,
    Green,
    /// Neutral colour for labels outside the known statuses.
    Gray,
}

impl Accent {
    /// Returns the accent as a hex colour string.
    pub fn hex(&self) -> &'static str {
        match self {
            Accent::Blue => "#3B82F6",
            Accent::Yellow => "#EAB308",
            Accent::Green => "#22C55E",
            Accent::Gray => "#6B7280",
        }
    }

    /// Maps an arbitrary status label to an accent.
    ///
    /// Total over all strings: anything that is not a known label is gray.
    pub fn for_label(label: &str) -> Self {
        label
            .parse::<TicketStatus>()
            .map(|status| status.accent())
            .unwrap_or(Accent::Gray)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Description,
    Rating,
}

impl Field {
    /// Returns the field name as used in API error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Rating => "rating",
        }
    }

    /// Alert text shown when the field is left empty.
    pub fn missing_message(&self) -> &'static str {
        match self {
            Field::Title => "Please enter a ticket title.",
            Field::Description => "Please enter a description.",
            Field::Rating => "Please choose a rating.",
        }
    }
}

/// Input rejected before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    #[error("{}", .0.missing_message())]
    EmptyField(Field),
    /// A rating outside 1..=5.
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(i64),
    /// A rating that is not a whole number, kept as submitted.
    #[error("Rating must be a whole number of stars, got {0}")]
    RatingNotWhole(String),
}

impl ValidationError {
    /// Returns the field at fault.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::RatingOutOfRange(_) | ValidationError::RatingNotWhole(_) => {
                Field::Rating
            }
        }
    }
}

/// Checks that a text field has content after trimming.
pub(crate) fn require_text(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

// ============================================================================
// Rating
// ============================================================================

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5.
    pub fn new(stars: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&stars) {
            Ok(Self(stars as u8))
        } else {
            Err(ValidationError::RatingOutOfRange(stars))
        }
    }

    /// Number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }

    /// Returns true if star number `star` (1-based) is filled.
    pub fn fills(self, star: u8) -> bool {
        self.0 >= star
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

// ============================================================================
// Ticket
// ============================================================================

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Unique, immutable identifier.
    pub id: String,
    /// Short title, never blank.
    pub title: String,
    /// Free text description, never blank.
    pub description: String,
    /// Current status.
    pub status: TicketStatus,
    /// Star rating, unset until someone rates the ticket.
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Ticket {
    /// Returns true if the rating control is shown for this ticket.
    pub fn shows_rating(&self) -> bool {
        self.status.shows_rating()
    }

    /// Returns the badge accent for the current status.
    pub fn accent(&self) -> Accent {
        self.status.accent()
    }
}
