//! `service` table: a bookable offering with a price and a duration.
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub duration: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_fields(name: &str, description: &str, price: i64, duration: i64) -> Result<(), errors::ModelError> {
    validate::required_text("name", name)?;
    validate::required_text("description", description)?;
    validate::non_negative("price", price)?;
    validate::non_negative("duration", duration)
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
    price: i64,
    duration: i64,
) -> Result<Model, errors::ModelError> {
    validate_fields(name, description, price, duration)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        price: Set(price),
        duration: Set(duration),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
