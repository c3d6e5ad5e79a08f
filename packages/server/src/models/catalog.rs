use serde::{Deserialize, Serialize};

use crate::entity::catalog_part;
use crate::error::AppError;
use crate::upload::MultipartForm;

use super::shared::parse_price;

/// Query string accepted by the catalog listing.
///
/// Every parameter is optional. Unrecognised `price` and `order` values are
/// ignored rather than rejected.
#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogListQuery {
    /// Case-insensitive substring of the part name.
    pub name: Option<String>,
    /// Case-insensitive exact brand.
    pub brand: Option<String>,
    /// Case-insensitive exact category.
    pub category: Option<String>,
    /// `low-to-high` or `high-to-low`.
    pub price: Option<String>,
    /// `asc` or `desc`, by name.
    pub order: Option<String>,
}

/// Text fields of a catalog part form, shared by create and update.
#[derive(Debug, PartialEq)]
pub struct CatalogPartForm {
    pub name: String,
    /// Validated as a decimal, stored as sent (trimmed).
    pub price: String,
    pub description: String,
    pub link: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
}

impl CatalogPartForm {
    pub fn parse(form: &MultipartForm) -> Result<Self, AppError> {
        let price = form.required("price")?;
        parse_price(&price)?;

        Ok(Self {
            name: form.required("name")?,
            price,
            description: form.required("description")?,
            link: form.optional("link"),
            brand: form.optional("brand"),
            category: form.optional("category"),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CatalogPartResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Bolt")]
    pub name: String,
    #[schema(example = "9.99")]
    pub price: String,
    #[schema(example = "M6 hex bolt")]
    pub description: String,
    pub link: Option<String>,
    #[schema(example = "Acme")]
    pub brand: Option<String>,
    #[schema(example = "Fasteners")]
    pub category: Option<String>,
    /// Public path of the part image.
    pub image_url: Option<String>,
}

impl From<catalog_part::Model> for CatalogPartResponse {
    fn from(m: catalog_part::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            price: m.price,
            description: m.description,
            link: m.link,
            brand: m.brand,
            category: m.category,
            image_url: m.image_url,
        }
    }
}
