use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::{ContactError, ContactResult};
use crate::model::{Contact, ContactInput};
use crate::service::ContactService;
use crate::validation::FieldError;

#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactService,
}

impl AppState {
    pub fn new(contacts: ContactService) -> Self {
        Self { contacts }
    }
}

/// Wires the contact endpoints onto a router.
///
/// `DELETE /contacts/:id` does not take a [`Principal`], so it answers even
/// for unauthenticated callers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/:id", put(update_contact).delete(delete_contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn list_contacts(
    State(state): State<AppState>,
    principal: Principal,
) -> ContactResult<Json<Vec<Contact>>> {
    let contacts = state.contacts.list(&principal).await?;
    Ok(Json(contacts))
}

async fn create_contact(
    State(state): State<AppState>,
    principal: Principal,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> ContactResult<Json<Contact>> {
    let input = body_input(body)?;
    let contact = state.contacts.create(&principal, input).await?;
    Ok(Json(contact))
}

async fn update_contact(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<ContactInput>, JsonRejection>,
) -> ContactResult<Json<Contact>> {
    // No stored contact can have an id that isn't a UUID.
    let id = Uuid::parse_str(&id).map_err(|_| ContactError::NotFound)?;
    let existing = state.contacts.owned_contact(&principal, id).await?;
    let input = body_input(body)?;
    let contact = state.contacts.merge(existing, input).await?;
    Ok(Json(contact))
}

async fn delete_contact(State(state): State<AppState>, Path(id): Path<String>) -> &'static str {
    state.contacts.delete(&id).await
}

/// A request without a JSON content type carries no fields. Bodies that are
/// sent as JSON but don't parse are rejected with a fixed message.
fn body_input(body: Result<Json<ContactInput>, JsonRejection>) -> ContactResult<ContactInput> {
    let rejection = match body {
        Ok(Json(input)) => return Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => return Ok(ContactInput::default()),
        Err(rejection) => rejection,
    };

    tracing::debug!(error = %rejection, "request body rejected");
    let msg = match rejection {
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        JsonRejection::JsonDataError(_) => "Request body must be an object of string fields",
        _ => "Request body could not be read",
    };
    Err(ContactError::Validation(vec![FieldError::body(msg)]))
}
