use serde::Serialize;

use crate::ticket::{Rating, Ticket, TicketError, TicketFilter, TicketStatus, TicketStore};

/// Title shown above the ticket list.
pub const SCREEN_HEADER: &str = "Support Ticket Tracker";

/// One entry of the ticket list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    /// Badge colour as a hex string.
    pub accent: &'static str,
    /// Whether the star rating control is shown.
    pub show_rating: bool,
    /// Filled state of stars 1 to 5.
    pub stars: [bool; 5],
}

impl From<&Ticket> for TicketCard {
    fn from(ticket: &Ticket) -> Self {
        let mut stars = [false; 5];
        if let Some(rating) = ticket.rating {
            for (star, filled) in (Rating::MIN..=Rating::MAX).zip(stars.iter_mut()) {
                *filled = rating.fills(star);
            }
        }

        Self {
            id: ticket.id.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status,
            accent: ticket.accent().hex(),
            show_rating: ticket.shows_rating(),
            stars,
        }
    }
}

/// The whole screen: header plus every ticket card in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub header: &'static str,
    pub cards: Vec<TicketCard>,
}

impl Screen {
    /// Build the screen from the current store contents.
    pub fn render(store: &dyn TicketStore) -> Result<Self, TicketError> {
        let filter = TicketFilter::new().with_limit(usize::MAX);
        let cards = store.list(&filter)?.iter().map(TicketCard::from).collect();
        Ok(Self {
            header: SCREEN_HEADER,
            cards,
        })
    }
}
