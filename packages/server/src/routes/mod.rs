use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::catalog::*;
use crate::handlers::contact::*;
use crate::handlers::product::*;
use crate::state::AppState;
use crate::upload::upload_body_limit;

/// Every API route. Handler annotations carry their full paths.
pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let max_image_size = config.storage.max_upload_size;

    OpenApiRouter::new()
        .merge(product_routes().layer(upload_body_limit(max_image_size)))
        .merge(catalog_routes().layer(upload_body_limit(max_image_size)))
        .merge(contact_routes())
}

fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(delete_product))
}

fn catalog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_parts, create_part))
        .routes(routes!(update_part, delete_part))
        .routes(routes!(list_brands))
        .routes(routes!(list_categories))
}

fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_contact_message))
        .routes(routes!(list_contact_messages))
}
