//! Tickets the tracker starts with.

use super::{Rating, Ticket, TicketStatus};

/// Returns the three starter tickets, in display order.
pub fn seed_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "1".to_string(),
            title: "Mobile Dev".to_string(),
            description: "Students develop apps using react native".to_string(),
            status: TicketStatus::Created,
            rating: None,
        },
        Ticket {
            id: "2".to_string(),
            title: "Web technology".to_string(),
            description: "In collaboration with mobile dev, and also uses angular".to_string(),
            status: TicketStatus::UnderAssistance,
            rating: None,
        },
        Ticket {
            id: "3".to_string(),
            title: "Software engineering".to_string(),
            description: "A subject which is a prerequisite for programming".to_string(),
            status: TicketStatus::Completed,
            rating: Rating::new(4).ok(),
        },
    ]
}
