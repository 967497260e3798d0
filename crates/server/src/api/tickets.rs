//! Ticket API handlers.

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use helpdesk_core::{
    confirm_delete, DeleteChoice, DeletePrompt, Screen, Ticket, TicketError, TicketFilter,
    TicketRequest, TicketStatus, ValidationError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::metrics::{
    TICKETS_CREATED_TOTAL, TICKETS_DELETED_TOTAL, TICKETS_RATED_TOTAL,
    TICKET_STATUS_TRANSITIONS,
};
use crate::state::AppState;

/// Maximum allowed limit for ticket queries
const MAX_LIMIT: usize = 1000;

/// Default limit for ticket queries
const DEFAULT_LIMIT: usize = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// Filter by status label
    pub status: Option<String>,
    /// Maximum number of tickets to return
    pub limit: Option<usize>,
    /// Pagination offset
    pub offset: Option<usize>,
}

/// Request body for rating a ticket
///
/// `stars` is kept as raw JSON so a fractional or quoted value is reported
/// as a rating error rather than a body parse error.
#[derive(Debug, Deserialize)]
pub struct RateTicketBody {
    pub stars: Value,
}

impl RateTicketBody {
    /// Whole number of stars requested.
    pub fn stars(&self) -> Result<i64, ValidationError> {
        self.stars
            .as_i64()
            .ok_or_else(|| ValidationError::RatingNotWhole(self.stars.to_string()))
    }
}

/// Request body for deleting a ticket
#[derive(Debug, Deserialize)]
pub struct DeleteTicketBody {
    /// Answer to the delete prompt
    pub choice: DeleteChoice,
}

/// Response for listing tickets
#[derive(Debug, Serialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<Ticket>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Response for a delete request that was answered
#[derive(Debug, Serialize)]
pub struct DeleteTicketResponse {
    pub deleted: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Response when a delete arrives without an answer to the prompt
#[derive(Debug, Serialize)]
pub struct ConfirmationRequired {
    pub error: String,
    pub prompt: DeletePrompt,
}

type ApiError = (StatusCode, Json<TicketErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(TicketErrorResponse {
            error: error.into(),
            field: None,
        }),
    )
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    debug!("Rejected request body: {}", rejection.body_text());
    error_response(rejection.status(), rejection.body_text())
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    debug!("Rejected query string: {}", rejection.body_text());
    error_response(rejection.status(), rejection.body_text())
}

impl From<TicketError> for TicketErrorResponse {
    fn from(e: TicketError) -> Self {
        let field = match &e {
            TicketError::Validation(v) => Some(v.field().as_str()),
            _ => None,
        };
        Self {
            error: e.to_string(),
            field,
        }
    }
}

fn store_error(e: TicketError) -> ApiError {
    let status = match &e {
        TicketError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TicketError::NotFound(_) => StatusCode::NOT_FOUND,
        TicketError::InvalidState { .. } => StatusCode::CONFLICT,
    };
    (status, Json(TicketErrorResponse::from(e)))
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let Json(body) = body.map_err(json_rejection)?;
    let ticket = state.ticket_store().create(body).map_err(store_error)?;

    TICKETS_CREATED_TOTAL.inc();
    state
        .ws_broadcaster()
        .ticket_updated(&ticket.id, ticket.status);
    info!(ticket_id = %ticket.id, "Created ticket {:?}", ticket.title);

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, ApiError> {
    match state.ticket_store().get(&id) {
        Ok(Some(ticket)) => Ok(Json(ticket)),
        Ok(None) => Err(store_error(TicketError::NotFound(id))),
        Err(e) => Err(store_error(e)),
    }
}

/// List tickets with optional filters
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListTicketsParams>, QueryRejection>,
) -> Result<Json<ListTicketsResponse>, ApiError> {
    let Query(params) = params.map_err(query_rejection)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let mut filter = TicketFilter::new().with_limit(limit).with_offset(offset);

    if let Some(ref label) = params.status {
        let status = label
            .parse::<TicketStatus>()
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
        filter = filter.with_status(status);
    }

    let tickets = state.ticket_store().list(&filter).map_err(store_error)?;
    let total = state.ticket_store().count(&filter).map_err(store_error)?;

    Ok(Json(ListTicketsResponse {
        tickets,
        total,
        limit,
        offset,
    }))
}

/// Replace title, description and status of a ticket
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Json(body) = body.map_err(json_rejection)?;
    let updated = state
        .ticket_store()
        .update_with_previous(&id, body)
        .map_err(store_error)?;

    if let Some((from, to)) = updated.transition() {
        TICKET_STATUS_TRANSITIONS
            .with_label_values(&[from.label(), to.label()])
            .inc();
    }
    let ticket = updated.ticket;
    state
        .ws_broadcaster()
        .ticket_updated(&ticket.id, ticket.status);

    Ok(Json(ticket))
}

/// Rate a ticket
pub async fn rate_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<RateTicketBody>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Json(body) = body.map_err(json_rejection)?;
    let ticket = body
        .stars()
        .map_err(TicketError::from)
        .and_then(|stars| state.ticket_store().rate(&id, stars))
        .map_err(|e| {
            warn!(ticket_id = %id, "Rating rejected: {}", e);
            store_error(e)
        })?;

    TICKETS_RATED_TOTAL.inc();
    state
        .ws_broadcaster()
        .ticket_updated(&ticket.id, ticket.status);

    Ok(Json(ticket))
}

/// Delete a ticket once the prompt has been answered (DELETE endpoint)
///
/// An empty body, with or without a JSON content type, returns the prompt
/// with 428 and nothing is deleted.
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    if body.iter().all(u8::is_ascii_whitespace) {
        return (
            StatusCode::PRECONDITION_REQUIRED,
            Json(ConfirmationRequired {
                error: "Deletion must be confirmed".to_string(),
                prompt: DeletePrompt::default(),
            }),
        )
            .into_response();
    }

    let body: DeleteTicketBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            let status = if e.is_data() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::BAD_REQUEST
            };
            return error_response(status, format!("Invalid delete request: {}", e))
                .into_response();
        }
    };

    match confirm_delete(state.ticket_store(), &id, body.choice) {
        Ok(outcome) => {
            if outcome.is_deleted() {
                TICKETS_DELETED_TOTAL.inc();
                state.ws_broadcaster().ticket_deleted(&id);
                info!(ticket_id = %id, "Deleted ticket");
            }
            Json(DeleteTicketResponse {
                deleted: outcome.is_deleted(),
            })
            .into_response()
        }
        Err(e) => store_error(e).into_response(),
    }
}

/// The ticket screen: header plus one card per ticket
pub async fn get_screen(State(state): State<Arc<AppState>>) -> Result<Json<Screen>, ApiError> {
    Screen::render(state.ticket_store())
        .map(Json)
        .map_err(store_error)
}
