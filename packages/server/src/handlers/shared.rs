use sea_orm::sea_query::LockType;
use sea_orm::{
    DatabaseConnection, EntityTrait, PrimaryKeyTrait, QuerySelect, TransactionTrait,
};

use crate::entity::{catalog_part, product};
use crate::error::AppError;

/// A row that may own an uploaded image.
pub trait ImageOwner {
    fn image_path(&self) -> Option<&str>;
}

impl ImageOwner for product::Model {
    fn image_path(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl ImageOwner for catalog_part::Model {
    fn image_path(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Delete a row under a row lock and hand back the image path it held.
///
/// The lock keeps a concurrent update from swapping the image reference
/// between the read and the delete. Removing the file is left to the caller,
/// after commit, so a failed delete never loses the file of a surviving row.
pub async fn delete_image_owner<E>(
    db: &DatabaseConnection,
    id: i32,
    not_found: &str,
) -> Result<Option<String>, AppError>
where
    E: EntityTrait,
    E::Model: ImageOwner,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let txn = db.begin().await?;

    let existing = E::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(not_found.into()))?;

    E::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(existing.image_path().map(str::to_string))
}
