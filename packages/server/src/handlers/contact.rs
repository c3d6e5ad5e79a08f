use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::entity::contact_message;
use crate::error::{AppError, ErrorBody};
use crate::models::contact::{ContactMessageResponse, CreateContactRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    operation_id = "createContactMessage",
    summary = "Submit a contact message",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message saved", body = String, content_type = "text/plain"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_contact_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let payload = payload.validate()?;

    let new_message = contact_message::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        message: Set(payload.message),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let model = new_message.insert(&state.db).await?;

    tracing::info!(id = model.id, "Saved contact message");
    Ok((StatusCode::CREATED, "Message saved successfully"))
}

#[utoipa::path(
    get,
    path = "/api/contact/messages",
    tag = "Contact",
    operation_id = "listContactMessages",
    summary = "List contact messages, newest first",
    responses(
        (status = 200, description = "All messages", body = Vec<ContactMessageResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_contact_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessageResponse>>, AppError> {
    let rows = contact_message::Entity::find()
        .order_by_desc(contact_message::Column::CreatedAt)
        .order_by_desc(contact_message::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(ContactMessageResponse::from).collect()))
}
