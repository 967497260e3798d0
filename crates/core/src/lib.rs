pub mod config;
pub mod ticket;
pub mod view;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, StoreConfig, WsConfig,
};
pub use ticket::{
    seed_tickets, Accent, Field, MemoryTicketStore, Rating, RatingPolicy, Ticket, TicketError,
    TicketFilter, TicketRequest, TicketStatus, TicketStore, UnknownStatus, UpdatedTicket,
    ValidationError,
};
pub use view::{
    confirm_delete, DeleteChoice, DeleteOutcome, DeletePrompt, FormMode, Screen, TicketCard,
    TicketForm, SCREEN_HEADER,
};
