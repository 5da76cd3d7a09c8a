use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::{info, instrument};

use models::service::{self, ActiveModel, Column, Entity, Model};

use super::domain::{required, resolve_int, ServiceInput};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

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
        .ok_or_else(|| ServiceError::not_found("service"))
}

#[instrument(skip(db, input))]
pub async fn create(db: &DatabaseConnection, input: ServiceInput) -> Result<Model, ServiceError> {
    let name = required("name", input.name)?;
    let description = required("description", input.description)?;
    let price = required("price", resolve_int("price", input.price.as_ref())?)?;
    let duration = required("duration", resolve_int("duration", input.duration.as_ref())?)?;
    let created = service::create(db, &name, &description, price, duration).await?;
    info!(service_id = created.id, "service_created");
    Ok(created)
}

/// Partial update: absent fields keep their stored value.
#[instrument(skip(db, input))]
pub async fn update(db: &DatabaseConnection, id: i32, input: ServiceInput) -> Result<Model, ServiceError> {
    let existing = get(db, id).await?;

    let name = input.name.unwrap_or_else(|| existing.name.clone());
    let description = input.description.unwrap_or_else(|| existing.description.clone());
    let price = resolve_int("price", input.price.as_ref())?.unwrap_or(existing.price);
    let duration = resolve_int("duration", input.duration.as_ref())?.unwrap_or(existing.duration);
    service::validate_fields(&name, &description, price, duration)?;

    let mut am: ActiveModel = existing.into();
    am.name = Set(name);
    am.description = Set(description);
    am.price = Set(price);
    am.duration = Set(duration);
    let updated = am.update(db).await.map_err(|e| ServiceError::from_update(e, "service"))?;
    info!(service_id = updated.id, "service_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<Model, ServiceError> {
    let existing = get(db, id).await?;
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service"));
    }
    info!(service_id = id, "service_deleted");
    Ok(existing)
}
