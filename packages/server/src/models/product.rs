use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::product;
use crate::error::AppError;
use crate::upload::MultipartForm;

use super::shared::parse_price;

/// Text fields of a product upload form.
#[derive(Debug, PartialEq)]
pub struct CreateProductForm {
    pub name: String,
    pub price: Decimal,
    pub product_link: String,
}

impl CreateProductForm {
    pub fn parse(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            name: form.required("name")?,
            price: parse_price(&form.required("price")?)?,
            product_link: form.required("productLink")?,
        })
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Wireless mouse")]
    pub name: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[serde(rename = "productLink")]
    #[schema(example = "https://shop.example.com/mouse")]
    pub product_link: String,
    /// Public path of the product image.
    #[schema(example = "/uploads/0193a1b2c3d47e8f9a0b1c2d3e4f5a6b-mouse.png")]
    pub image: Option<String>,
}

impl From<product::Model> for ProductResponse {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            price: m.price,
            product_link: m.product_link,
            image: m.image,
        }
    }
}
