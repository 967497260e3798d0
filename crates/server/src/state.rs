use helpdesk_core::{Config, SanitizedConfig, TicketStore};
use std::sync::Arc;

use crate::api::WsBroadcaster;

/// Shared application state
pub struct AppState {
    config: Config,
    ticket_store: Arc<dyn TicketStore>,
    ws_broadcaster: WsBroadcaster,
}

impl AppState {
    pub fn new(
        config: Config,
        ticket_store: Arc<dyn TicketStore>,
        ws_broadcaster: WsBroadcaster,
    ) -> Self {
        Self {
            config,
            ticket_store,
            ws_broadcaster,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn ticket_store(&self) -> &dyn TicketStore {
        self.ticket_store.as_ref()
    }

    pub fn ws_broadcaster(&self) -> &WsBroadcaster {
        &self.ws_broadcaster
    }
}
