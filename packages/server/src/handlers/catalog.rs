use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QuerySelect, Set,
    TransactionTrait,
};
use storefront_common::storage::StoredImage;
use tracing::instrument;

use crate::config::ImageUpdatePolicy;
use crate::entity::catalog_part;
use crate::error::{AppError, ErrorBody};
use crate::models::catalog::{CatalogListQuery, CatalogPartForm, CatalogPartResponse};
use crate::query::{CatalogFilter, distinct_values};
use crate::state::AppState;
use crate::upload::{self, MultipartForm};

use super::shared::delete_image_owner;

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "Catalog",
    operation_id = "listCatalogParts",
    summary = "List catalog parts with optional filters and sorting",
    description = "`name` matches a case-insensitive substring; `brand` and `category` match \
        case-insensitively and exactly. Filters combine with AND. `price` sorts numerically \
        (`low-to-high`, `high-to-low`) ahead of `order` on name (`asc`, `desc`). Unknown sort \
        values are ignored.",
    params(CatalogListQuery),
    responses(
        (status = 200, description = "Matching parts", body = Vec<CatalogPartResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_parts(
    State(state): State<AppState>,
    Query(query): Query<CatalogListQuery>,
) -> Result<Json<Vec<CatalogPartResponse>>, AppError> {
    let rows = CatalogFilter::from(query).select().all(&state.db).await?;

    Ok(Json(rows.into_iter().map(CatalogPartResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/catalog",
    tag = "Catalog",
    operation_id = "createCatalogPart",
    summary = "Create a catalog part",
    description = "Multipart form with `name`, `price` and `description` (required), `link`, \
        `brand`, `category` (optional) and an optional `image` file. `price` must be a decimal \
        number and is stored as sent.",
    request_body(content_type = "multipart/form-data", description = "Part fields with optional image"),
    responses(
        (status = 201, description = "Part created", body = CatalogPartResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_part(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = MultipartForm::read(multipart, state.config.storage.max_upload_size).await?;
    let fields = CatalogPartForm::parse(&form)?;
    let stored = form.persist_image(&*state.images).await?;

    let new_part = catalog_part::ActiveModel {
        name: Set(fields.name),
        price: Set(fields.price),
        description: Set(fields.description),
        link: Set(fields.link),
        brand: Set(fields.brand),
        category: Set(fields.category),
        image_url: Set(stored.as_ref().map(|s| s.public_path.clone())),
        ..Default::default()
    };

    let model = match new_part.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(ref stored) = stored {
                upload::discard(&*state.images, stored).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(id = model.id, "Created catalog part");
    Ok((StatusCode::CREATED, Json(CatalogPartResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/api/catalog/{id}",
    tag = "Catalog",
    operation_id = "updateCatalogPart",
    summary = "Replace a catalog part",
    description = "Replaces every field of the part. With the default `replace` image policy \
        an update without an `image` file clears `image_url`, even if the part had an image; \
        with `keep_existing` the previous image stays. An image no longer referenced after the \
        update is removed.",
    params(("id" = i32, Path, description = "Catalog part ID")),
    request_body(content_type = "multipart/form-data", description = "Part fields with optional image"),
    responses(
        (status = 200, description = "Part updated", body = CatalogPartResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Part not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<CatalogPartResponse>, AppError> {
    let mut form = MultipartForm::read(multipart, state.config.storage.max_upload_size).await?;
    let fields = CatalogPartForm::parse(&form)?;
    let stored = form.persist_image(&*state.images).await?;

    let policy = state.config.catalog.image_update_policy;
    let (model, superseded) =
        match replace_part(&state.db, id, fields, stored.as_ref(), policy).await {
            Ok(result) => result,
            Err(e) => {
                if let Some(ref stored) = stored {
                    upload::discard(&*state.images, stored).await;
                }
                return Err(e);
            }
        };

    if let Some(ref old) = superseded {
        upload::release(&*state.images, old).await;
    }

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/catalog/{id}",
    tag = "Catalog",
    operation_id = "deleteCatalogPart",
    summary = "Delete a catalog part",
    description = "Deletes the part and then removes its image file. A failure to remove the \
        file is logged and does not fail the request.",
    params(("id" = i32, Path, description = "Catalog part ID")),
    responses(
        (status = 200, description = "Part deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Part not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let image =
        delete_image_owner::<catalog_part::Entity>(&state.db, id, "Part not found").await?;

    if let Some(ref path) = image {
        upload::release(&*state.images, path).await;
    }

    Ok((StatusCode::OK, "Part deleted"))
}

#[utoipa::path(
    get,
    path = "/api/catalog/brands",
    tag = "Catalog",
    operation_id = "listCatalogBrands",
    summary = "List distinct brands",
    responses(
        (status = 200, description = "Distinct non-empty brands, ascending", body = Vec<String>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let brands = distinct_values(catalog_part::Column::Brand)
        .into_tuple::<String>()
        .all(&state.db)
        .await?;

    Ok(Json(brands))
}

#[utoipa::path(
    get,
    path = "/api/catalog/categories",
    tag = "Catalog",
    operation_id = "listCatalogCategories",
    summary = "List distinct categories",
    responses(
        (status = 200, description = "Distinct non-empty categories, ascending", body = Vec<String>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let categories = distinct_values(catalog_part::Column::Category)
        .into_tuple::<String>()
        .all(&state.db)
        .await?;

    Ok(Json(categories))
}

/// Full replace of a part inside one transaction.
///
/// Returns the updated row and the image path it no longer references.
async fn replace_part(
    db: &DatabaseConnection,
    id: i32,
    fields: CatalogPartForm,
    uploaded: Option<&StoredImage>,
    policy: ImageUpdatePolicy,
) -> Result<(catalog_part::Model, Option<String>), AppError> {
    let txn = db.begin().await?;

    let existing = find_part_for_update(&txn, id).await?;
    let previous = existing.image_url.clone();
    let image_url = next_image_url(
        policy,
        previous.as_deref(),
        uploaded.map(|s| s.public_path.as_str()),
    );

    let mut active: catalog_part::ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.price = Set(fields.price);
    active.description = Set(fields.description);
    active.link = Set(fields.link);
    active.brand = Set(fields.brand);
    active.category = Set(fields.category);
    active.image_url = Set(image_url);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    let superseded = previous.filter(|old| model.image_url.as_deref() != Some(old.as_str()));
    Ok((model, superseded))
}

/// Image reference a part carries after an update.
fn next_image_url(
    policy: ImageUpdatePolicy,
    previous: Option<&str>,
    uploaded: Option<&str>,
) -> Option<String> {
    match (uploaded, policy) {
        (Some(path), _) => Some(path.to_string()),
        (None, ImageUpdatePolicy::Replace) => None,
        (None, ImageUpdatePolicy::KeepExisting) => previous.map(str::to_string),
    }
}

async fn find_part_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<catalog_part::Model, AppError> {
    catalog_part::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Part not found".into()))
}
