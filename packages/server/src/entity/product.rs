use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub price: Decimal,
    pub product_link: String,

    /// Public path of the uploaded image, if any.
    pub image: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
