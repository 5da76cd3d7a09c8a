use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::{error, info, instrument};

use models::product::{self, ActiveModel, Column, Entity, Model};

use super::domain::{required, resolve_int, ImageUpload, ProductInput};
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::UploadStore;

/// Result of an update: the stored record and the image it replaced, if any.
#[derive(Debug, Clone)]
pub struct UpdatedProduct {
    pub product: Model,
    pub removed_image: Option<String>,
}

pub async fn list(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<Model>, ServiceError> {
    let query = Entity::find().order_by_asc(Column::Id);
    let rows = match page {
        Some(p) => {
            let (idx, per_page) = p.normalize();
            query.paginate(db, per_page).fetch_page(idx).await
        }
        None => query.all(db).await,
    };
    rows.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Model, ServiceError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("product"))
}

/// Validate, store the optional image, then insert. The image is removed again
/// if the insert fails.
#[instrument(skip(db, uploads, input, image))]
pub async fn create(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    input: ProductInput,
    image: Option<ImageUpload>,
) -> Result<Model, ServiceError> {
    let name = required("name", input.name)?;
    let description = required("description", input.description)?;
    let price = required("price", resolve_int("price", input.price.as_ref())?)?;
    product::validate_fields(&name, &description, price)?;

    let image_url = match image {
        Some(img) => Some(uploads.store(img.file_name.as_deref(), &img.bytes).await?),
        None => None,
    };

    match product::create(db, &name, &description, price, image_url.clone()).await {
        Ok(created) => {
            info!(product_id = created.id, "product_created");
            Ok(created)
        }
        Err(e) => {
            discard_upload(uploads, image_url.as_deref()).await;
            Err(e.into())
        }
    }
}

/// Partial update: absent fields, including the image, keep their stored value.
#[instrument(skip(db, uploads, input, image))]
pub async fn update(
    db: &DatabaseConnection,
    uploads: &UploadStore,
    id: i32,
    input: ProductInput,
    image: Option<ImageUpload>,
) -> Result<UpdatedProduct, ServiceError> {
    let existing = get(db, id).await?;

    let name = input.name.unwrap_or_else(|| existing.name.clone());
    let description = input.description.unwrap_or_else(|| existing.description.clone());
    let price = resolve_int("price", input.price.as_ref())?.unwrap_or(existing.price);
    product::validate_fields(&name, &description, price)?;

    let new_image = match image {
        Some(img) => Some(uploads.store(img.file_name.as_deref(), &img.bytes).await?),
        None => None,
    };
    let replaced = new_image.is_some();

    let mut am: ActiveModel = existing.clone().into();
    am.name = Set(name);
    am.description = Set(description);
    am.price = Set(price);
    am.image_url = Set(new_image.clone().or_else(|| existing.image_url.clone()));

    let updated = match am.update(db).await {
        Ok(m) => m,
        Err(e) => {
            discard_upload(uploads, new_image.as_deref()).await;
            return Err(ServiceError::from_update(e, "product"));
        }
    };

    let mut removed_image = None;
    if replaced {
        if let Some(old) = existing.image_url {
            if remove_quietly(uploads, &old).await {
                removed_image = Some(old);
            }
        }
    }
    info!(product_id = updated.id, image_replaced = replaced, "product_updated");
    Ok(UpdatedProduct { product: updated, removed_image })
}

/// Result of a delete: the deleted record and whether its image file was removed.
#[derive(Debug, Clone)]
pub struct DeletedProduct {
    pub product: Model,
    pub image_removed: bool,
}

/// Delete and return the deleted record; its image file goes with it.
#[instrument(skip(db, uploads))]
pub async fn delete(db: &DatabaseConnection, uploads: &UploadStore, id: i32) -> Result<DeletedProduct, ServiceError> {
    let existing = get(db, id).await?;
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("product"));
    }
    let image_removed = match existing.image_url.as_deref() {
        Some(url) => remove_quietly(uploads, url).await,
        None => false,
    };
    info!(product_id = id, image_removed, "product_deleted");
    Ok(DeletedProduct { product: existing, image_removed })
}

async fn discard_upload(uploads: &UploadStore, url: Option<&str>) {
    if let Some(url) = url {
        remove_quietly(uploads, url).await;
    }
}

/// File cleanup never fails the request; the database is the source of truth.
async fn remove_quietly(uploads: &UploadStore, url: &str) -> bool {
    match uploads.remove(url).await {
        Ok(removed) => removed,
        Err(e) => {
            error!(error = %e, path = %url, "failed to remove upload");
            false
        }
    }
}
