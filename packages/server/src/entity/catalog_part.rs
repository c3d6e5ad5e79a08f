use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_part")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// Decimal number kept as text; sorted through a numeric cast.
    pub price: String,
    pub description: String,
    pub link: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,

    /// Public path of the uploaded image, if any.
    pub image_url: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
