use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::entity::product;
use crate::error::{AppError, ErrorBody};
use crate::models::product::{CreateProductForm, ProductResponse};
use crate::state::AppState;
use crate::upload::{self, MultipartForm};

use super::shared::delete_image_owner;

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List all products",
    responses(
        (status = 200, description = "All products, by id", body = Vec<ProductResponse>),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let rows = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    operation_id = "createProduct",
    summary = "Create a product",
    description = "Multipart form with `name`, `price` and `productLink` text fields and an \
        optional `image` file. The image is stored before the row is inserted and its public \
        path is recorded on the product.",
    request_body(content_type = "multipart/form-data", description = "Product fields with optional image"),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = MultipartForm::read(multipart, state.config.storage.max_upload_size).await?;
    let fields = CreateProductForm::parse(&form)?;
    let stored = form.persist_image(&*state.images).await?;

    let new_product = product::ActiveModel {
        name: Set(fields.name),
        price: Set(fields.price),
        product_link: Set(fields.product_link),
        image: Set(stored.as_ref().map(|s| s.public_path.clone())),
        ..Default::default()
    };

    let model = match new_product.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(ref stored) = stored {
                upload::discard(&*state.images, stored).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(id = model.id, "Created product");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    operation_id = "deleteProduct",
    summary = "Delete a product",
    description = "Deletes the product and then removes its image file. A failure to remove \
        the file is logged and does not fail the request.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let image = delete_image_owner::<product::Entity>(&state.db, id, "Product not found").await?;

    if let Some(ref path) = image {
        upload::release(&*state.images, path).await;
    }

    Ok((StatusCode::OK, "Product deleted"))
}
